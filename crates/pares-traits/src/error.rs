//! Error types for the pares toolkit.
//!
//! This module defines the error type shared by the table loader, the
//! similarity scorer and the VaR estimator.

use crate::types::Metric;
use thiserror::Error;

/// The main error type for pares operations.
#[derive(Debug, Error)]
pub enum ParesError {
    /// Error due to invalid or malformed data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Error when a required column is missing from the dataset.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Error when data is insufficient for the requested operation.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Error when a symbol is not found in the dataset or at the data source.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The data source answered but had nothing for the request.
    #[error("No data available for {0}")]
    NoData(String),

    /// Error when a date is out of range or invalid.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Error fetching data from external sources.
    #[error("Data fetch error: {0}")]
    DataFetch(String),

    /// The target value of a metric is zero, so a percentage deviation
    /// from it is undefined.
    #[error("Undefined deviation: target {metric} is zero")]
    UndefinedDeviation {
        /// The metric whose target value is zero.
        metric: Metric,
    },

    /// Error when a configuration value is rejected.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// A specialized Result type for pares operations.
pub type Result<T> = std::result::Result<T, ParesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ParesError::MissingColumn("RoA".to_string());
        assert_eq!(err.to_string(), "Missing required column: RoA");

        let err = ParesError::UndefinedDeviation {
            metric: Metric::MarketCap,
        };
        assert_eq!(err.to_string(), "Undefined deviation: target Market Cap is zero");
    }
}
