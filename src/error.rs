//! Error types.
//!
//! Row-level errors are recoverable: the aggregator drops the row and reports
//! a warning. Read errors are structural and abort the run.

use std::num::{ParseFloatError, ParseIntError};
use std::path::PathBuf;
use thiserror::Error;

/// A single sales row could not be normalized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    /// The `amount` field is not a decimal number.
    #[error("invalid amount '{value}': {source}")]
    InvalidAmount {
        value: String,
        #[source]
        source: ParseFloatError,
    },

    /// The `quantity` field is not an integer.
    #[error("invalid quantity '{value}': {source}")]
    InvalidQuantity {
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// Adding the row's `quantity` would overflow a running unit total.
    #[error("quantity {quantity} overflows the running unit total")]
    QuantityOverflow { quantity: i64 },
}

/// The row source itself is unusable.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV input: {0}")]
    Csv(#[from] csv::Error),

    #[error("no sales records found in {}", path.display())]
    Empty { path: PathBuf },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_error_messages() {
        let err = RowError::InvalidAmount {
            value: "abc".to_string(),
            source: "abc".parse::<f64>().unwrap_err(),
        };
        assert!(err.to_string().starts_with("invalid amount 'abc'"));

        let err = RowError::InvalidQuantity {
            value: "1.5".to_string(),
            source: "1.5".parse::<i64>().unwrap_err(),
        };
        assert!(err.to_string().contains("'1.5'"));

        let err = RowError::QuantityOverflow { quantity: i64::MAX };
        assert!(err.to_string().contains("overflows"));
    }

    #[test]
    fn test_read_error_messages() {
        let err = ReadError::Empty {
            path: PathBuf::from("sales.csv"),
        };
        assert_eq!(err.to_string(), "no sales records found in sales.csv");
    }
}
