//! Error types for splice continuity analysis
//!
//! Provides a unified error type for all splice crates.

use crate::station::StationId;
use chrono::NaiveDate;
use thiserror::Error;

/// Core error type for splice continuity operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Input table or series does not have the required shape or ordering
    #[error("Contract violation: {0}")]
    ContractViolation(String),

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} records, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// No timestamp in the later series satisfies the matching policy
    #[error("Alignment failed: no date matches {boundary} under policy '{policy}'")]
    Alignment { boundary: NaiveDate, policy: String },

    /// No series was supplied for a station named by a splice pair
    #[error("No series available for station {0}")]
    MissingSeries(StationId),

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// Threading or parallelization error
    #[error("Execution error: {0}")]
    Execution(String),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for empty input
    pub fn empty_input(_operation: &str) -> Self {
        Self::InsufficientData {
            expected: 1,
            actual: 0,
        }
    }

    /// Create an error for invalid quantile
    pub fn invalid_quantile(p: f64) -> Self {
        Self::InvalidParameter(format!("Quantile {p} must be in [0, 1]"))
    }

    /// Create an error for size mismatch
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::ContractViolation(format!(
            "Size mismatch in {context}: expected {expected}, got {actual}"
        ))
    }

    /// Whether this error is scoped to a single pair rather than the batch
    pub fn is_pair_local(&self) -> bool {
        matches!(
            self,
            Self::Alignment { .. } | Self::MissingSeries(_) | Self::InsufficientData { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidParameter("years must be positive".to_string());
        assert_eq!(err.to_string(), "Invalid parameter: years must be positive");

        let err = Error::InsufficientData { expected: 2, actual: 1 };
        assert_eq!(
            err.to_string(),
            "Insufficient data: expected at least 2 records, got 1"
        );

        let err = Error::Alignment {
            boundary: NaiveDate::from_ymd_opt(2001, 3, 4).unwrap(),
            policy: "next".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Alignment failed: no date matches 2001-03-04 under policy 'next'"
        );

        let err = Error::MissingSeries(StationId::new("722950", "23174"));
        assert_eq!(err.to_string(), "No series available for station 722950-23174");
    }

    #[test]
    fn test_error_helper_functions() {
        let err = Error::invalid_quantile(1.5);
        assert_eq!(err.to_string(), "Invalid parameter: Quantile 1.5 must be in [0, 1]");

        let err = Error::size_mismatch(10, 9, "field 'temp'");
        assert_eq!(
            err.to_string(),
            "Contract violation: Size mismatch in field 'temp': expected 10, got 9"
        );

        match Error::empty_input("window") {
            Error::InsufficientData { expected, actual } => {
                assert_eq!(expected, 1);
                assert_eq!(actual, 0);
            }
            _ => panic!("Wrong error type"),
        }
    }

    #[test]
    fn test_pair_local_errors() {
        assert!(Error::MissingSeries(StationId::new("a", "b")).is_pair_local());
        assert!(Error::empty_input("x").is_pair_local());
        assert!(!Error::ContractViolation("bad".into()).is_pair_local());
        assert!(!Error::invalid_quantile(2.0).is_pair_local());
    }

    #[test]
    fn test_error_from_anyhow() {
        let err: Error = anyhow::anyhow!("custom error message").into();
        assert!(matches!(err, Error::Other(_)));
        assert!(err.to_string().contains("custom error message"));
    }
}
