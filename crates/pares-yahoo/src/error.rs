//! Error types for the Yahoo Finance client.

use pares_traits::ParesError;
use thiserror::Error;

/// Errors that can occur when using the Yahoo Finance chart API.
#[derive(Debug, Error)]
pub enum YahooError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("Failed to parse JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned an error payload.
    #[error("Yahoo API error: {code} - {description}")]
    Api {
        /// Error code reported by the API.
        code: String,
        /// Error description reported by the API.
        description: String,
    },

    /// Non-success HTTP status without a usable error payload.
    #[error("HTTP {status}: {body}")]
    Http {
        /// Status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// Rate limit exceeded.
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Symbol not found.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// No data available.
    #[error("No data available for {0}")]
    NoData(String),
}

impl From<YahooError> for ParesError {
    fn from(err: YahooError) -> Self {
        match err {
            YahooError::SymbolNotFound(symbol) => Self::SymbolNotFound(symbol),
            YahooError::NoData(symbol) => Self::NoData(symbol),
            other => Self::DataFetch(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_keeps_not_found_distinct() {
        let err: ParesError = YahooError::SymbolNotFound("NOPE.JK".to_string()).into();
        assert!(matches!(err, ParesError::SymbolNotFound(ref s) if s == "NOPE.JK"));

        let err: ParesError = YahooError::NoData("ARCI.JK".to_string()).into();
        assert!(matches!(err, ParesError::NoData(_)));

        let err: ParesError = YahooError::RateLimitExceeded.into();
        assert!(matches!(err, ParesError::DataFetch(ref s) if s == "Rate limit exceeded"));
    }
}
