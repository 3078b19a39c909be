// Row-level errors
// A failed row is a value the loader logs and skips, never a fatal error.

use thiserror::Error;

/// Why a single CSV row could not become a `ResaleRecord`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    /// The row does not fit the declared schema (missing required column,
    /// short row, undecodable bytes)
    #[error("{0}")]
    Schema(String),

    /// A numeric column holds text that is not a float
    #[error("could not convert {field} to float: '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    /// Floor area must be a positive, finite number
    #[error("floor_area_sqm must be positive, got {0}")]
    NonPositiveArea(f64),
}

impl From<csv::Error> for RecordError {
    fn from(err: csv::Error) -> Self {
        match err.kind() {
            // Keep only serde's message ("missing field `town`"), not the position prefix
            csv::ErrorKind::Deserialize { err, .. } => RecordError::Schema(err.to_string()),
            _ => RecordError::Schema(err.to_string()),
        }
    }
}
