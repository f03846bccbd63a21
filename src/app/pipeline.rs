//! The preview computation, kept apart from printing.
//!
//! load -> shape -> head
//!
//! The binary and the tests both consume `PreviewOutcome`; only `app::run`
//! writes to stdout.

use std::path::PathBuf;

use tracing::info;

use crate::config::PreviewConfig;
use crate::domain::{SalesTable, TableShape};
use crate::error::{AppError, LoadError};
use crate::io::ingest::load_sales_table;

/// What a run found at the configured path.
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewOutcome {
    /// The table loaded; `head` holds at most `preview_rows` leading rows.
    Loaded { shape: TableShape, head: SalesTable },
    /// Nothing at the configured path; upstream preprocessing has not run.
    Missing { path: PathBuf },
}

/// Load the configured table and compute its shape and preview rows.
///
/// A missing file is an outcome, not an error. Malformed or unreadable input
/// is returned as an `AppError` carrying its exit code.
pub fn run_preview(config: &PreviewConfig) -> Result<PreviewOutcome, AppError> {
    match load_sales_table(config) {
        Ok(table) => Ok(PreviewOutcome::Loaded {
            shape: table.shape(),
            head: table.head(config.preview_rows),
        }),
        Err(LoadError::Missing { path }) => {
            info!(path = %path.display(), "processed sales data not found");
            Ok(PreviewOutcome::Missing { path })
        }
        Err(err) => Err(err.into()),
    }
}
