//! Error handling for the analytics engine.

use std::io;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

/// Specialized error type for loading employee data and computing reports
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    /// A single input row could not be turned into a valid employee record
    #[error("Invalid record{}: {reason}", record_location(.row, .employee_number))]
    InvalidRecord {
        /// Zero-based row index within the loaded input, when the record came from one
        row: Option<usize>,
        /// Employee number, when it could be read
        employee_number: Option<u32>,
        /// What was wrong with the row
        reason: String,
    },

    /// An aggregate was requested over a group with no rows
    #[error("Aggregate requested over empty group: {group}")]
    EmptyGroup {
        /// Description of the group
        group: String,
    },

    /// A dataset-wide aggregate was requested over an empty dataset
    #[error("Cannot compute {operation} over an empty dataset")]
    EmptyDataset {
        /// Name of the aggregate that was requested
        operation: String,
    },

    /// The caller asked for a grouping dimension that does not exist
    #[error("Unknown group key: {0}")]
    UnknownGroupKey(String),

    /// The caller asked for a numeric measure that does not exist
    #[error("Unknown measure: {0}")]
    UnknownMeasure(String),

    /// The caller asked for a report that is not in the catalogue
    #[error("Unknown report: {0}")]
    UnknownReport(String),

    /// The input table is missing columns or has the wrong shape
    #[error("Schema error: {0}")]
    Schema(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error opening or reading a file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error processing Arrow data
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error processing Parquet data
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// Error reading or writing JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error converting between serde types and Arrow
    #[error("Serialization error: {0}")]
    Serialization(String),
}

fn record_location(row: &Option<usize>, employee_number: &Option<u32>) -> String {
    let row = row.map(|r| format!(" at row {r}")).unwrap_or_default();
    match employee_number {
        Some(n) => format!("{row} (employee {n})"),
        None => row,
    }
}

impl AnalyticsError {
    /// Build an invalid-record error for the given row
    pub fn invalid_record(
        row: usize,
        employee_number: Option<u32>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidRecord {
            row: Some(row),
            employee_number,
            reason: reason.into(),
        }
    }

    /// Build an invalid-record error for a record that is not tied to an input row
    pub fn invalid_value(employee_number: Option<u32>, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            row: None,
            employee_number,
            reason: reason.into(),
        }
    }

    /// Build an empty-group error
    pub fn empty_group(group: impl Into<String>) -> Self {
        Self::EmptyGroup {
            group: group.into(),
        }
    }

    /// Build an empty-dataset error
    pub fn empty_dataset(operation: impl Into<String>) -> Self {
        Self::EmptyDataset {
            operation: operation.into(),
        }
    }

    /// Whether this error describes a single bad input row
    #[must_use]
    pub const fn is_record_error(&self) -> bool {
        matches!(self, Self::InvalidRecord { .. })
    }
}

impl From<serde_arrow::Error> for AnalyticsError {
    fn from(error: serde_arrow::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

/// Result type for analytics operations
pub type Result<T> = std::result::Result<T, AnalyticsError>;
