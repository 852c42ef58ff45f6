//! Yahoo Finance chart API data types.

use crate::{Result, error::YahooError};
use chrono::DateTime;
use pares_traits::PricePoint;
use serde::Deserialize;

/// Top-level chart response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Clone, Deserialize)]
struct Chart {
    #[serde(default)]
    result: Option<Vec<ChartData>>,
    #[serde(default)]
    error: Option<ChartError>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChartError {
    code: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Clone, Deserialize)]
struct ChartData {
    #[serde(default)]
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    #[serde(default)]
    indicators: Indicators,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ChartMeta {
    /// Exchange offset from UTC in seconds.
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteBlock>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct QuoteBlock {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

impl ChartResponse {
    /// The API error payload, if any.
    pub fn error(&self) -> Option<(&str, &str)> {
        self.chart
            .error
            .as_ref()
            .map(|e| (e.code.as_str(), e.description.as_str()))
    }

    /// Convert into price points, oldest first.
    ///
    /// Bars are dated in exchange-local time. Bars without a close keep a
    /// `None` close.
    ///
    /// # Errors
    ///
    /// Returns [`YahooError::SymbolNotFound`] for a "Not Found" error
    /// payload, [`YahooError::Api`] for other error payloads and
    /// [`YahooError::NoData`] when the response carries no bars.
    pub fn into_price_points(self, symbol: &str) -> Result<Vec<PricePoint>> {
        if let Some(error) = self.chart.error {
            if error.code.eq_ignore_ascii_case("Not Found") {
                return Err(YahooError::SymbolNotFound(symbol.to_string()));
            }
            return Err(YahooError::Api {
                code: error.code,
                description: error.description,
            });
        }

        let data = self
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| YahooError::NoData(symbol.to_string()))?;

        if data.timestamp.is_empty() {
            return Err(YahooError::NoData(symbol.to_string()));
        }

        let closes = data
            .indicators
            .quote
            .into_iter()
            .next()
            .map(|q| q.close)
            .unwrap_or_default();

        let offset = data.meta.gmtoffset;
        let mut points: Vec<PricePoint> = data
            .timestamp
            .iter()
            .enumerate()
            .filter_map(|(i, &ts)| {
                DateTime::from_timestamp(ts + offset, 0).map(|dt| PricePoint {
                    date: dt.date_naive(),
                    close: closes.get(i).copied().flatten(),
                })
            })
            .collect();

        points.sort_by_key(|p| p.date);
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const WEEKLY: &str = r#"{
        "chart": {
            "result": [{
                "meta": {"symbol": "ARCI.JK", "gmtoffset": 25200},
                "timestamp": [1703811600, 1704157200, 1704762000],
                "indicators": {
                    "quote": [{"close": [575.0, null, 600.0], "open": [570.0, 575.0, 590.0]}],
                    "adjclose": [{"adjclose": [575.0, null, 600.0]}]
                }
            }],
            "error": null
        }
    }"#;

    #[test]
    fn test_parse_weekly_closes() {
        let response: ChartResponse = serde_json::from_str(WEEKLY).unwrap();
        assert!(response.error().is_none());

        let points = response.into_price_points("ARCI.JK").unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].date, NaiveDate::from_ymd_opt(2023, 12, 29).unwrap());
        assert_eq!(points[0].close, Some(575.0));
        assert_eq!(points[1].close, None);
        assert_eq!(points[2].close, Some(600.0));
    }

    #[test]
    fn test_not_found_payload() {
        let body = r#"{"chart": {"result": null, "error": {
            "code": "Not Found",
            "description": "No data found, symbol may be delisted"
        }}}"#;
        let response: ChartResponse = serde_json::from_str(body).unwrap();
        assert!(matches!(
            response.into_price_points("NOPE.JK"),
            Err(YahooError::SymbolNotFound(ref s)) if s == "NOPE.JK"
        ));
    }

    #[test]
    fn test_other_error_payload() {
        let body = r#"{"chart": {"result": null, "error": {
            "code": "Bad Request",
            "description": "Invalid interval"
        }}}"#;
        let response: ChartResponse = serde_json::from_str(body).unwrap();
        assert!(matches!(
            response.into_price_points("ARCI.JK"),
            Err(YahooError::Api { ref code, .. }) if code == "Bad Request"
        ));
    }

    #[test]
    fn test_result_without_bars_is_no_data() {
        let body = r#"{"chart": {
            "result": [{"meta": {"gmtoffset": 25200}, "indicators": {"quote": [{}]}}],
            "error": null
        }}"#;
        let response: ChartResponse = serde_json::from_str(body).unwrap();
        assert!(matches!(
            response.into_price_points("ARCI.JK"),
            Err(YahooError::NoData(_))
        ));
    }
}
