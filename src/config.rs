//! Run configuration for the preview.
//!
//! Defaults match the reference deployment layout (`data/processed/...`,
//! `notebooks/`). Each value can be overridden from the environment or a
//! `.env` file in the working directory.

use std::path::PathBuf;

use crate::error::{AppError, EXIT_INPUT};

pub const DEFAULT_DATA_PATH: &str = "data/processed/sales_daily.csv";
pub const DEFAULT_INDEX_COLUMN: &str = "order_date";
pub const DEFAULT_PREVIEW_ROWS: usize = 5;
pub const DEFAULT_NOTEBOOKS_DIR: &str = "notebooks/";

pub const ENV_DATA_PATH: &str = "SALES_DATA_PATH";
pub const ENV_INDEX_COLUMN: &str = "SALES_INDEX_COLUMN";
pub const ENV_PREVIEW_ROWS: &str = "SALES_PREVIEW_ROWS";
pub const ENV_NOTEBOOKS_DIR: &str = "SALES_NOTEBOOKS_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewConfig {
    /// Where the processed daily sales table is expected to live.
    pub data_path: PathBuf,
    /// Column parsed as dates and used as the table index.
    pub index_column: String,
    /// Number of leading rows shown in the preview.
    pub preview_rows: usize,
    /// Directory named in the closing pointer message.
    pub notebooks_dir: String,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            index_column: DEFAULT_INDEX_COLUMN.to_string(),
            preview_rows: DEFAULT_PREVIEW_ROWS,
            notebooks_dir: DEFAULT_NOTEBOOKS_DIR.to_string(),
        }
    }
}

impl PreviewConfig {
    /// Defaults overridden by process environment (after loading `.env`).
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each key.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::default();

        if let Some(path) = get(ENV_DATA_PATH) {
            config.data_path = PathBuf::from(path);
        }
        if let Some(column) = get(ENV_INDEX_COLUMN) {
            config.index_column = column;
        }
        if let Some(raw) = get(ENV_PREVIEW_ROWS) {
            config.preview_rows = parse_preview_rows(&raw)?;
        }
        if let Some(dir) = get(ENV_NOTEBOOKS_DIR) {
            config.notebooks_dir = dir;
        }

        Ok(config)
    }
}

fn parse_preview_rows(raw: &str) -> Result<usize, AppError> {
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(AppError::new(
            EXIT_INPUT,
            format!("Invalid {ENV_PREVIEW_ROWS} '{raw}': expected a positive integer."),
        )),
    }
}
