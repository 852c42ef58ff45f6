//! Historical VaR estimation.

use crate::returns::ReturnSeries;
use chrono::Duration;
use pares_traits::{Date, ParesError, PriceSource, Result, Symbol, stats};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Configuration for historical VaR.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VarConfig {
    /// Lower tail percentile, in percent.
    pub lower_pct: f64,
    /// Upper tail percentile, in percent.
    pub upper_pct: f64,
    /// Length of the price window in calendar days.
    pub window_days: u32,
}

impl Default for VarConfig {
    fn default() -> Self {
        Self {
            lower_pct: 1.0,
            upper_pct: 99.0,
            window_days: 365,
        }
    }
}

impl VarConfig {
    fn validate(&self) -> Result<()> {
        let in_range = |p: f64| (0.0..=100.0).contains(&p);
        if !in_range(self.lower_pct) || !in_range(self.upper_pct) {
            return Err(ParesError::InvalidConfig(format!(
                "VaR levels must lie in [0, 100], got {} and {}",
                self.lower_pct, self.upper_pct
            )));
        }
        if self.lower_pct > self.upper_pct {
            return Err(ParesError::InvalidConfig(format!(
                "lower VaR level {} exceeds upper level {}",
                self.lower_pct, self.upper_pct
            )));
        }
        if self.window_days == 0 {
            return Err(ParesError::InvalidConfig(
                "VaR window must be at least one day".to_string(),
            ));
        }
        Ok(())
    }
}

/// Tail percentiles of a `returns` distribution at the configured levels.
///
/// Returns `(lower, upper)`.
///
/// # Errors
///
/// Returns an error if `returns` is empty or contains non-finite values.
pub fn historical_var(returns: &ReturnSeries, config: &VarConfig) -> Result<(f64, f64)> {
    let tails = stats::percentiles(returns.as_slice(), &[config.lower_pct, config.upper_pct])?;
    Ok((tails[0], tails[1]))
}

/// A computed VaR pair for one equity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarEstimate {
    /// Ticker.
    pub symbol: Symbol,
    /// Window start (inclusive).
    pub start: Date,
    /// Window end (exclusive).
    pub end: Date,
    /// Lower tail level, in percent.
    pub lower_pct: f64,
    /// Upper tail level, in percent.
    pub upper_pct: f64,
    /// Return at the lower tail level.
    pub var_lower: f64,
    /// Return at the upper tail level.
    pub var_upper: f64,
    /// Number of returns the estimate is based on.
    pub observations: usize,
}

/// Result of a VaR estimation attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VarOutcome {
    /// Estimate computed.
    Estimated(VarEstimate),
    /// The data source does not know the symbol or returned no prices.
    NotFound {
        /// Ticker requested.
        symbol: Symbol,
    },
    /// The data source failed or returned unusable prices.
    FetchFailed {
        /// Ticker requested.
        symbol: Symbol,
        /// Human-readable reason.
        reason: String,
    },
    /// Prices were returned but produced no returns.
    InsufficientHistory {
        /// Ticker requested.
        symbol: Symbol,
        /// Number of closes received.
        observations: usize,
    },
}

impl VarOutcome {
    /// Ticker this outcome is for.
    pub fn symbol(&self) -> &str {
        match self {
            Self::Estimated(estimate) => &estimate.symbol,
            Self::NotFound { symbol }
            | Self::FetchFailed { symbol, .. }
            | Self::InsufficientHistory { symbol, .. } => symbol,
        }
    }

    /// The estimate, if one was computed.
    pub const fn estimate(&self) -> Option<&VarEstimate> {
        match self {
            Self::Estimated(estimate) => Some(estimate),
            _ => None,
        }
    }

    /// Whether an estimate is available.
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Estimated(_))
    }

    /// Why no estimate is available, for display.
    pub fn unavailable_reason(&self) -> Option<String> {
        match self {
            Self::Estimated(_) => None,
            Self::NotFound { .. } => Some("no price data found".to_string()),
            Self::FetchFailed { reason, .. } => Some(reason.clone()),
            Self::InsufficientHistory { observations, .. } => Some(format!(
                "insufficient price history ({observations} closes)"
            )),
        }
    }
}

/// Estimates historical VaR from weekly closes provided by `S`.
#[derive(Debug, Clone)]
pub struct VarEstimator<S> {
    source: S,
    config: VarConfig,
}

impl<S: PriceSource> VarEstimator<S> {
    /// Create an estimator with the default configuration.
    pub fn new(source: S) -> Self {
        Self {
            source,
            config: VarConfig::default(),
        }
    }

    /// Create an estimator with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the levels are outside `[0, 100]`, out of order,
    /// or the window is empty.
    pub fn with_config(source: S, config: VarConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { source, config })
    }

    /// The active configuration.
    pub const fn config(&self) -> &VarConfig {
        &self.config
    }

    /// The underlying price source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Estimate VaR for `symbol` over the window starting at `start`.
    pub async fn estimate(&self, symbol: &str, start: Date) -> VarOutcome {
        let end = start + Duration::days(i64::from(self.config.window_days));
        debug!(%symbol, %start, %end, "fetching weekly closes");

        let prices = match self.source.weekly_closes(symbol, start, end).await {
            Ok(prices) => prices,
            Err(ParesError::SymbolNotFound(_) | ParesError::NoData(_)) => {
                warn!(%symbol, "no price data for VaR");
                return VarOutcome::NotFound {
                    symbol: symbol.to_string(),
                };
            }
            Err(e) => {
                warn!(%symbol, error = %e, "price fetch failed");
                return VarOutcome::FetchFailed {
                    symbol: symbol.to_string(),
                    reason: e.to_string(),
                };
            }
        };

        let closes = prices.iter().filter(|p| p.close.is_some()).count();
        if closes == 0 {
            warn!(%symbol, "price source returned no closes");
            return VarOutcome::NotFound {
                symbol: symbol.to_string(),
            };
        }

        let returns = match ReturnSeries::from_prices(&prices) {
            Ok(returns) => returns,
            Err(e) => {
                warn!(%symbol, error = %e, "unusable price series");
                return VarOutcome::FetchFailed {
                    symbol: symbol.to_string(),
                    reason: e.to_string(),
                };
            }
        };

        if returns.is_empty() {
            return VarOutcome::InsufficientHistory {
                symbol: symbol.to_string(),
                observations: closes,
            };
        }

        match historical_var(&returns, &self.config) {
            Ok((var_lower, var_upper)) => VarOutcome::Estimated(VarEstimate {
                symbol: symbol.to_string(),
                start,
                end,
                lower_pct: self.config.lower_pct,
                upper_pct: self.config.upper_pct,
                var_lower,
                var_upper,
                observations: returns.len(),
            }),
            Err(e) => VarOutcome::FetchFailed {
                symbol: symbol.to_string(),
                reason: e.to_string(),
            },
        }
    }
}
