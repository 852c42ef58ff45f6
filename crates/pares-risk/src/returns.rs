//! Period-over-period return series.

use pares_traits::{ParesError, PricePoint, Result};
use serde::Serialize;

/// Fractional returns between consecutive closes, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReturnSeries {
    returns: Vec<f64>,
}

impl ReturnSeries {
    /// Build returns from a price series.
    ///
    /// Points without a close are dropped before differencing, so a gap
    /// bridges the closes on either side of it. This differs from
    /// forward-filling the gap, which would add a `0.0` return for the gap
    /// period and one more observation to the percentile sample.
    ///
    /// # Errors
    ///
    /// Returns [`ParesError::InvalidData`] if a close is zero or not finite.
    pub fn from_prices(prices: &[PricePoint]) -> Result<Self> {
        let closes: Vec<f64> = prices.iter().filter_map(|p| p.close).collect();
        Self::from_closes(&closes)
    }

    /// Build returns from raw closes: `r[i] = (p[i] - p[i-1]) / p[i-1]`.
    ///
    /// # Errors
    ///
    /// Returns [`ParesError::InvalidData`] if a close is zero or not finite.
    pub fn from_closes(closes: &[f64]) -> Result<Self> {
        if let Some(bad) = closes.iter().find(|c| !c.is_finite()) {
            return Err(ParesError::InvalidData(format!(
                "non-finite close price {bad}"
            )));
        }

        let returns = closes
            .windows(2)
            .map(|w| {
                if w[0] == 0.0 {
                    Err(ParesError::InvalidData(
                        "zero close price precedes a return".to_string(),
                    ))
                } else {
                    Ok((w[1] - w[0]) / w[0])
                }
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { returns })
    }

    /// The returns as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.returns
    }

    /// Number of returns.
    pub fn len(&self) -> usize {
        self.returns.len()
    }

    /// Whether there are no returns.
    pub fn is_empty(&self) -> bool {
        self.returns.is_empty()
    }
}

impl From<Vec<f64>> for ReturnSeries {
    fn from(returns: Vec<f64>) -> Self {
        Self { returns }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pares_traits::Date;

    fn day(d: u32) -> Date {
        Date::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_from_closes() {
        let series = ReturnSeries::from_closes(&[100.0, 110.0, 99.0]).unwrap();
        assert_eq!(series.len(), 2);
        assert_relative_eq!(series.as_slice()[0], 0.10);
        assert_relative_eq!(series.as_slice()[1], -0.10);
    }

    #[test]
    fn test_gaps_are_bridged() {
        let prices = [
            PricePoint::new(day(1), 100.0),
            PricePoint {
                date: day(8),
                close: None,
            },
            PricePoint::new(day(15), 120.0),
        ];
        let series = ReturnSeries::from_prices(&prices).unwrap();
        assert_eq!(series.len(), 1);
        assert_relative_eq!(series.as_slice()[0], 0.20);
    }

    #[test]
    fn test_short_series_has_no_returns() {
        assert!(ReturnSeries::from_closes(&[]).unwrap().is_empty());
        assert!(ReturnSeries::from_closes(&[100.0]).unwrap().is_empty());
    }

    #[test]
    fn test_zero_close_is_rejected() {
        assert!(matches!(
            ReturnSeries::from_closes(&[0.0, 1.0]),
            Err(ParesError::InvalidData(_))
        ));
    }

    #[test]
    fn test_zero_last_close_is_a_total_loss() {
        let series = ReturnSeries::from_closes(&[10.0, 0.0]).unwrap();
        assert_relative_eq!(series.as_slice()[0], -1.0);
    }
}
