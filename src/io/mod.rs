//! Input helpers.
//!
//! - CSV ingest into a date-indexed `SalesTable` (`ingest`)

pub mod ingest;

pub use ingest::*;
