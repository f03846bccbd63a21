use std::path::PathBuf;

/// Exit code for configuration problems and input that cannot be read.
pub const EXIT_INPUT: u8 = 2;
/// Exit code for input that exists but does not parse as a sales table.
pub const EXIT_DATA_FORMAT: u8 = 3;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Failures of loading the processed sales table.
///
/// `Missing` is an expected outcome (upstream preprocessing has not run yet)
/// and is turned into guidance by the pipeline. The other variants are fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The configured path does not exist.
    Missing { path: PathBuf },
    /// The file exists but could not be opened or read.
    Unreadable { path: PathBuf, message: String },
    /// The file exists but is not a valid date-indexed table.
    DataFormat {
        path: PathBuf,
        /// 1-based file line, when the problem is tied to one record.
        line: Option<usize>,
        message: String,
    },
}

impl LoadError {
    pub(crate) fn data_format(path: &std::path::Path, line: Option<usize>, message: impl Into<String>) -> Self {
        LoadError::DataFormat {
            path: path.to_path_buf(),
            line,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Missing { path } => {
                write!(f, "Processed sales data not found: '{}'", path.display())
            }
            LoadError::Unreadable { path, message } => {
                write!(f, "Failed to read '{}': {message}", path.display())
            }
            LoadError::DataFormat {
                path,
                line: Some(line),
                message,
            } => write!(f, "Invalid sales data in '{}' (line {line}): {message}", path.display()),
            LoadError::DataFormat {
                path,
                line: None,
                message,
            } => write!(f, "Invalid sales data in '{}': {message}", path.display()),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<LoadError> for AppError {
    fn from(err: LoadError) -> Self {
        let exit_code = match err {
            LoadError::DataFormat { .. } => EXIT_DATA_FORMAT,
            LoadError::Unreadable { .. } => EXIT_INPUT,
            // The pipeline turns `Missing` into guidance before converting;
            // only direct callers of `load_sales_table` can get here.
            LoadError::Missing { .. } => EXIT_INPUT,
        };
        AppError::new(exit_code, err.to_string())
    }
}
