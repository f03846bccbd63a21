//! Command-line parsing.
//!
//! The tool takes no arguments; everything it needs comes from
//! `PreviewConfig`. clap still provides `--help` and `--version`.

use clap::Parser;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "sales-preview",
    version,
    about = "Preview the processed daily sales table",
    long_about = "Loads the processed daily sales CSV and prints its shape and first rows.\n\n\
                  Configuration (environment or .env): SALES_DATA_PATH, SALES_INDEX_COLUMN, \
                  SALES_PREVIEW_ROWS, SALES_NOTEBOOKS_DIR. Log filter: RUST_LOG."
)]
pub struct Cli {}
