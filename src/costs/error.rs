use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, CostError>;

/// Error type covering the different failure cases that can occur while the
/// tool loads cost data, aggregates it, or writes the report.
#[derive(Debug, Error)]
pub enum CostError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when the delimited text reader fails.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Raised when the configuration file is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Raised when a workbook input does not have the expected structure.
    #[error("invalid workbook structure: {0}")]
    InvalidWorkbook(String),

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when an input file carries a header but no data rows.
    #[error("input file {0} contains no records")]
    EmptyInput(PathBuf),

    /// Raised when required columns are absent from an input file.
    #[error("missing required columns in {}: {}", path.display(), missing.join(", "))]
    Schema { path: PathBuf, missing: Vec<String> },

    /// Raised when a cost cell cannot be read as an integer.
    #[error("invalid number '{value}' in column {column} at row {row} of {}", path.display())]
    InvalidNumber {
        path: PathBuf,
        row: usize,
        column: String,
        value: String,
    },

    /// Raised when the defective flag is not a recognised boolean spelling.
    #[error("invalid defective flag '{value}' at row {row} of {}", path.display())]
    InvalidFlag {
        path: PathBuf,
        row: usize,
        value: String,
    },

    /// Raised when a required text cell is blank.
    #[error("empty value in column {column} at row {row} of {}", path.display())]
    InvalidValue {
        path: PathBuf,
        row: usize,
        column: String,
    },

    /// Raised when the same ISN appears twice within one dataset.
    #[error("duplicate ISN '{isn}' in {}", path.display())]
    DuplicateIsn { path: PathBuf, isn: String },

    /// Raised when a statistic is requested over zero records.
    #[error("cannot compute {statistic}: no records in scope")]
    EmptyDataset { statistic: &'static str },

    /// Raised when a statistic needs a column the dataset schema lacks.
    #[error("cannot compute {statistic}: column '{column}' is not part of the dataset schema")]
    MissingColumn {
        column: &'static str,
        statistic: &'static str,
    },

    /// Raised when the report destination cannot be created or written.
    #[error("cannot write output location {}: {source}", path.display())]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Raised when the run configuration is inconsistent.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
