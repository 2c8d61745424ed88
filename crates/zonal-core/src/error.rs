//! Error types for zonal statistics
//!
//! Provides a unified error type for all zonal-stats crates.
//!
//! Only configuration and query mistakes surface as errors. Data anomalies
//! (missing samples, NaN, NoData and excluded values) are counted by the
//! processors and never reach this type.

use crate::statistic::{RangesType, Statistic};
use thiserror::Error;

/// Core error type for range construction, accumulation and queries
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed range bounds
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// Operation not defined for the given arguments
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// No processor supports the requested statistic
    #[error("No processor supports statistic {0}")]
    UnsupportedStatistic(Statistic),

    /// The include/exclude type of a processor's ranges is fixed once set
    #[error("Ranges type is already {current}, cannot add a range of type {requested}")]
    RangesTypeConflict {
        current: RangesType,
        requested: RangesType,
    },

    /// A result or count was requested for a statistic that was never configured
    #[error("Statistic {0} has not been set")]
    StatisticNotSet(Statistic),

    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Inconsistent configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration could not be parsed
    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),

    /// IO error (for configuration files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for a malformed range
    pub fn invalid_range(reason: impl Into<String>) -> Self {
        Self::InvalidRange(reason.into())
    }

    /// Create an error for a range whose lower bound exceeds its upper bound
    pub fn inverted_bounds(min: impl std::fmt::Display, max: impl std::fmt::Display) -> Self {
        Self::InvalidRange(format!("min ({min}) is greater than max ({max})"))
    }

    /// Create an error for a membership test against a missing value
    pub fn missing_value(operation: &str) -> Self {
        Self::UnsupportedOperation(format!("{operation} is not defined for a missing value"))
    }

    /// Create an error for an inconsistent configuration
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig(reason.into())
    }

    /// Whether this error is a configuration mistake rather than a query mistake
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidRange(_)
                | Self::UnsupportedStatistic(_)
                | Self::RangesTypeConflict { .. }
                | Self::InvalidParameter(_)
                | Self::InvalidConfig(_)
                | Self::Config(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidRange("bad bounds".to_string());
        assert_eq!(err.to_string(), "Invalid range: bad bounds");

        let err = Error::UnsupportedStatistic(Statistic::Median);
        assert_eq!(err.to_string(), "No processor supports statistic median");

        let err = Error::RangesTypeConflict {
            current: RangesType::Include,
            requested: RangesType::Exclude,
        };
        assert_eq!(
            err.to_string(),
            "Ranges type is already include, cannot add a range of type exclude"
        );

        let err = Error::StatisticNotSet(Statistic::Sdev);
        assert_eq!(err.to_string(), "Statistic sdev has not been set");
    }

    #[test]
    fn test_error_helper_functions() {
        let err = Error::inverted_bounds(5.0, 1.0);
        assert_eq!(
            err.to_string(),
            "Invalid range: min (5) is greater than max (1)"
        );

        let err = Error::missing_value("contains");
        assert!(matches!(err, Error::UnsupportedOperation(_)));
        assert!(err.to_string().contains("contains"));

        let err = Error::invalid_config("no statistics");
        assert_eq!(err.to_string(), "Invalid configuration: no statistics");
    }

    #[test]
    fn test_error_classification() {
        assert!(Error::invalid_range("x").is_configuration_error());
        assert!(Error::UnsupportedStatistic(Statistic::Sum).is_configuration_error());
        assert!(!Error::StatisticNotSet(Statistic::Sum).is_configuration_error());
        assert!(!Error::missing_value("contains").is_configuration_error());
    }

    #[test]
    fn test_error_from_io_error() {
        use std::io;

        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();

        match err {
            Error::Io(_) => {
                assert!(err.to_string().contains("file not found"));
            }
            _ => panic!("Wrong error type"),
        }
    }

    #[test]
    fn test_error_from_anyhow() {
        let anyhow_err = anyhow::anyhow!("custom error message");
        let err: Error = anyhow_err.into();

        match err {
            Error::Other(_) => {
                assert!(err.to_string().contains("custom error message"));
            }
            _ => panic!("Wrong error type"),
        }
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<Vec<f64>>("[1.0,").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.is_configuration_error());
    }
}
