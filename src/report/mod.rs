//! Console text for the preview.

pub mod format;

pub use format::*;
