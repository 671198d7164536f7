//! Error types for the fallible edges of the crate (file loading, parsing, export)
//!
//! The schedule engine itself never fails; only reading and writing loan data can.

use thiserror::Error;

/// Result alias for loading and exporting loan data
pub type LoanResult<T> = Result<T, LoanError>;

#[derive(Error, Debug)]
pub enum LoanError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A parameter value that does not map to any known option
    #[error("Invalid value for {field}: {value:?}")]
    InvalidField {
        field: &'static str,
        value: String,
    },
}

impl LoanError {
    pub fn invalid_field(field: &'static str, value: impl Into<String>) -> Self {
        LoanError::InvalidField {
            field,
            value: value.into(),
        }
    }
}
