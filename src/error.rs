//! Error types for stock ledger operations.

use thiserror::Error;

/// Error codes for ledger processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Required field missing or out of range (-1)
    Validation = -1,
    /// Referenced stock entry does not exist (-2)
    NotFound = -2,
    /// Cut piece does not fit the base sheet (-3)
    DoesNotFit = -3,
    /// Stock file header is not a known schema (E100)
    CsvSchema = 100,
    /// Malformed CSV record (E101)
    Csv = 101,
    /// File access failed (E200)
    Io = 200,
    /// Configuration could not be decoded (E300)
    Config = 300,
}

/// Main error type for the ledger.
#[derive(Debug, Error)]
pub enum StockError {
    #[error("Invalid value for '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("Stock entry not found: {key}")]
    NotFound { key: String },

    #[error("Cut piece {cut_width}x{cut_length} does not fit base sheet {base_width}x{base_length}")]
    DoesNotFit {
        cut_width: f64,
        cut_length: f64,
        base_width: f64,
        base_length: f64,
    },

    #[error("Stock file is missing required column '{column}'")]
    CsvSchema { column: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
}

impl StockError {
    /// Shorthand for a validation failure on one field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        StockError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Get the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            StockError::Validation { .. } => ErrorCode::Validation,
            StockError::NotFound { .. } => ErrorCode::NotFound,
            StockError::DoesNotFit { .. } => ErrorCode::DoesNotFit,
            StockError::CsvSchema { .. } => ErrorCode::CsvSchema,
            StockError::Csv(_) => ErrorCode::Csv,
            StockError::Io(_) => ErrorCode::Io,
            StockError::Json(_) => ErrorCode::Config,
        }
    }

    /// Get the numeric error code value.
    pub fn code_value(&self) -> i32 {
        self.code() as i32
    }

    /// Whether the caller must correct its input before retrying.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self.code(),
            ErrorCode::Validation | ErrorCode::NotFound | ErrorCode::DoesNotFit
        )
    }
}

/// Result type alias for ledger operations.
pub type Result<T> = std::result::Result<T, StockError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = StockError::validation("width", "must be positive");
        assert_eq!(err.code(), ErrorCode::Validation);
        assert_eq!(err.code_value(), -1);
        assert!(err.is_input_error());

        let err = StockError::CsvSchema {
            column: "Gramatura".into(),
        };
        assert_eq!(err.code_value(), 100);
        assert!(!err.is_input_error());
    }

    #[test]
    fn test_error_messages() {
        let err = StockError::DoesNotFit {
            cut_width: 2000.0,
            cut_length: 300.0,
            base_width: 1680.0,
            base_length: 2600.0,
        };
        assert_eq!(
            err.to_string(),
            "Cut piece 2000x300 does not fit base sheet 1680x2600"
        );

        let err = StockError::validation("paper_type", "must not be empty");
        assert_eq!(
            err.to_string(),
            "Invalid value for 'paper_type': must not be empty"
        );
    }
}
