//! Yahoo Finance chart API client implementation.

use crate::{Result, error::YahooError, types::ChartResponse};
use chrono::NaiveDate;
use pares_traits::{PricePoint, PriceSource};
use reqwest::{Client, StatusCode, header};
use std::env;
use std::future::Future;
use tracing::debug;

/// Default host for the chart API.
const YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Query-string value for one bar per week.
const WEEKLY_INTERVAL: &str = "1wk";

/// The API rejects requests without a browser-like user agent.
const USER_AGENT: &str = "Mozilla/5.0 (compatible; pares/0.1)";

/// Yahoo Finance chart API client.
#[derive(Debug, Clone)]
pub struct YahooClient {
    client: Client,
    base_url: String,
}

impl Default for YahooClient {
    fn default() -> Self {
        Self::new()
    }
}

impl YahooClient {
    /// Create a client for the public Yahoo Finance host.
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(YAHOO_BASE_URL)
    }

    /// Create a client for a custom host.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Create a client honouring `PARES_YAHOO_BASE_URL`.
    ///
    /// This will also load from a `.env` file if present.
    #[must_use]
    pub fn from_env() -> Self {
        // Try to load .env file (ignore errors if not found)
        let _ = dotenvy::dotenv();

        match env::var("PARES_YAHOO_BASE_URL") {
            Ok(url) if !url.trim().is_empty() => Self::with_base_url(url.trim()),
            _ => Self::new(),
        }
    }

    /// The host requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a weekly chart URL for `symbol` covering `[start, end)`.
    fn chart_url(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> String {
        let period1 = start.and_hms_opt(0, 0, 0).map_or(0, |dt| dt.and_utc().timestamp());
        let period2 = end.and_hms_opt(0, 0, 0).map_or(0, |dt| dt.and_utc().timestamp());
        format!(
            "{}/v8/finance/chart/{}?interval={WEEKLY_INTERVAL}&period1={period1}&period2={period2}\
             &events=history",
            self.base_url,
            symbol.to_uppercase(),
        )
    }

    /// Make a GET request and parse the chart response.
    async fn get_chart(&self, symbol: &str, url: &str) -> Result<ChartResponse> {
        debug!(%url, "requesting chart");
        let response = self
            .client
            .get(url)
            .header(header::USER_AGENT, USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(YahooError::RateLimitExceeded);
        }

        let text = response.text().await?;

        if !status.is_success() {
            // Error responses usually still carry a chart error payload.
            if let Ok(chart) = serde_json::from_str::<ChartResponse>(&text)
                && chart.error().is_some()
            {
                return Ok(chart);
            }
            if status == StatusCode::NOT_FOUND {
                return Err(YahooError::SymbolNotFound(symbol.to_string()));
            }
            return Err(YahooError::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(serde_json::from_str(&text)?)
    }

    /// Get weekly price history for a symbol.
    ///
    /// # Arguments
    ///
    /// * `symbol` - Ticker symbol (e.g., "ARCI.JK")
    /// * `start` - First day of the window (inclusive)
    /// * `end` - Last day of the window (exclusive)
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the symbol is unknown or the
    /// window has no bars.
    pub async fn weekly_history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PricePoint>> {
        let url = self.chart_url(symbol, start, end);
        let chart = self.get_chart(symbol, &url).await?;
        let points = chart.into_price_points(symbol)?;

        debug!(%symbol, bars = points.len(), "fetched weekly price history");
        Ok(points)
    }
}

impl PriceSource for YahooClient {
    fn weekly_closes(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Future<Output = pares_traits::Result<Vec<PricePoint>>> + Send {
        async move {
            self.weekly_history(symbol, start, end)
                .await
                .map_err(Into::into)
        }
    }
}
