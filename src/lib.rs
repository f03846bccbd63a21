//! `sales-preview` library crate.
//!
//! The binary (`sales-preview`) is a thin wrapper around this library so that:
//!
//! - loading and shaping the table is testable without spawning processes
//! - console formatting can be checked as plain strings
//! - the data path is injected instead of read from a global

pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod report;
