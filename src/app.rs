//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads configuration and starts logging
//! - runs the preview pipeline
//! - prints the formatted result

use clap::Parser;

use crate::config::PreviewConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `sales-preview` binary.
pub fn run() -> Result<(), AppError> {
    let _cli = crate::cli::Cli::parse();

    let config = PreviewConfig::from_env()?;
    crate::logging::init();

    let outcome = pipeline::run_preview(&config)?;
    print!("{}", crate::report::format_outcome(&outcome, &config));

    Ok(())
}
