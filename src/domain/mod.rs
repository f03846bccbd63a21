//! Domain types used throughout the preview.
//!
//! This module defines:
//!
//! - the date-indexed table (`SalesTable`) and its measure columns
//! - the table dimensions reported to the user (`TableShape`)

pub mod types;

pub use types::*;
