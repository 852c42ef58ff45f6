//! Market-data source abstraction.
//!
//! The VaR estimator only needs weekly closing prices for a ticker over a
//! date window. [`PriceSource`] is the seam between the estimator and
//! whichever provider answers that question.

use crate::error::Result;
use crate::types::Date;
use serde::{Deserialize, Serialize};
use std::future::Future;

/// One observation of a price series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Period date.
    pub date: Date,
    /// Closing price, `None` when the provider has a gap for this period.
    pub close: Option<f64>,
}

impl PricePoint {
    /// Creates a price point with a known close.
    pub const fn new(date: Date, close: f64) -> Self {
        Self {
            date,
            close: Some(close),
        }
    }
}

/// Provider of weekly closing prices.
///
/// Implementations should report an unknown ticker as
/// [`ParesError::SymbolNotFound`](crate::ParesError::SymbolNotFound), an
/// empty answer as [`ParesError::NoData`](crate::ParesError::NoData) and
/// anything else (network, decoding, rate limiting) as
/// [`ParesError::DataFetch`](crate::ParesError::DataFetch).
pub trait PriceSource {
    /// Fetch weekly closes for `symbol` in `[start, end)`, oldest first.
    fn weekly_closes(
        &self,
        symbol: &str,
        start: Date,
        end: Date,
    ) -> impl Future<Output = Result<Vec<PricePoint>>> + Send;
}
