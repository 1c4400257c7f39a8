//! Error types for change detection over telemetry series
//!
//! Provides a unified error type for all shift-scan crates.

use thiserror::Error;

/// Core error type for series and detector operations
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or inconsistent input rows
    #[error("Malformed series data: {0}")]
    DataFormat(String),

    /// An unrecognized data kind was requested for iteration
    #[error("Unknown data kind requested for iteration: {0}")]
    UnknownDataType(String),

    /// An invalid number of points was requested from a windowed read
    #[error("Invalid number of points: {0}")]
    InvalidNumber(String),

    /// A read past the bounds of the active view
    #[error("Index out of range: {0}")]
    IndexOutOfRange(String),

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} samples, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for an empty active view
    pub fn empty_view(operation: &str) -> Self {
        Self::IndexOutOfRange(format!("{operation} on an empty view"))
    }

    /// Create an error for a non-positive window read request
    pub fn zero_points(operation: &str) -> Self {
        Self::InvalidNumber(format!(
            "{operation} requires a number of points greater than 0"
        ))
    }

    /// Create an error for a column-kind hint that contradicts the data
    pub fn kind_conflict(column: usize, expected: &str, found: &str) -> Self {
        Self::DataFormat(format!(
            "column {column} declared as {expected} but contains {found} values"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::DataFormat("row 3 is wider than the header".to_string());
        assert_eq!(
            err.to_string(),
            "Malformed series data: row 3 is wider than the header"
        );

        let err = Error::UnknownDataType("numericalish".to_string());
        assert_eq!(
            err.to_string(),
            "Unknown data kind requested for iteration: numericalish"
        );

        let err = Error::InvalidNumber("got 0".to_string());
        assert_eq!(err.to_string(), "Invalid number of points: got 0");

        let err = Error::IndexOutOfRange("cursor at 5, view length 5".to_string());
        assert_eq!(err.to_string(), "Index out of range: cursor at 5, view length 5");

        let err = Error::InsufficientData {
            expected: 18,
            actual: 4,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient data: expected at least 18 samples, got 4"
        );
    }

    #[test]
    fn test_error_helper_functions() {
        match Error::empty_view("current") {
            Error::IndexOutOfRange(msg) => assert!(msg.contains("current")),
            _ => panic!("expected IndexOutOfRange"),
        }

        match Error::zero_points("next_n") {
            Error::InvalidNumber(msg) => assert!(msg.contains("next_n")),
            _ => panic!("expected InvalidNumber"),
        }

        match Error::kind_conflict(2, "numeric", "text") {
            Error::DataFormat(msg) => {
                assert!(msg.contains("column 2"));
                assert!(msg.contains("numeric"));
            }
            _ => panic!("expected DataFormat"),
        }
    }

    #[test]
    fn test_anyhow_conversion() {
        let err: Error = anyhow::anyhow!("backend exploded").into();
        assert!(err.to_string().contains("backend exploded"));
    }
}
