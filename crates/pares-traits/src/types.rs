//! Common types used throughout the pares toolkit.
//!
//! This module defines the fundamental metrics, typed equity records and the
//! target profile a comparison run is centred on.

use crate::error::{ParesError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// A market symbol identifier, e.g. "ARCI.JK".
pub type Symbol = String;

/// A fundamental metric that peers are compared on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Return on assets, in percent.
    ReturnOnAssets,
    /// Market capitalization, in the listing currency.
    MarketCap,
    /// Return on equity, in percent.
    ReturnOnEquity,
}

impl Metric {
    /// All metrics, in the default comparison order.
    pub const ALL: [Self; 3] = [Self::ReturnOnAssets, Self::MarketCap, Self::ReturnOnEquity];

    /// Short display label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::ReturnOnAssets => "RoA",
            Self::MarketCap => "Market Cap",
            Self::ReturnOnEquity => "RoE",
        }
    }

    /// Name used on the command line.
    pub const fn cli_name(self) -> &'static str {
        match self {
            Self::ReturnOnAssets => "roa",
            Self::MarketCap => "market-cap",
            Self::ReturnOnEquity => "roe",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Metric {
    type Err = ParesError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "roa" | "return-on-assets" => Ok(Self::ReturnOnAssets),
            "market-cap" | "marketcap" | "mc" => Ok(Self::MarketCap),
            "roe" | "return-on-equity" => Ok(Self::ReturnOnEquity),
            _ => Err(ParesError::InvalidConfig(format!(
                "unknown metric '{s}' (expected roa, market-cap or roe)"
            ))),
        }
    }
}

/// The fundamental values of one equity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fundamentals {
    /// Return on assets, in percent.
    pub return_on_assets: f64,
    /// Market capitalization.
    pub market_cap: f64,
    /// Return on equity, in percent.
    pub return_on_equity: f64,
}

impl Fundamentals {
    /// Create a new set of fundamentals.
    pub const fn new(return_on_assets: f64, market_cap: f64, return_on_equity: f64) -> Self {
        Self {
            return_on_assets,
            market_cap,
            return_on_equity,
        }
    }

    /// Value of the given metric.
    pub const fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::ReturnOnAssets => self.return_on_assets,
            Metric::MarketCap => self.market_cap,
            Metric::ReturnOnEquity => self.return_on_equity,
        }
    }

    /// Returns a copy with `metric` replaced by `value`.
    #[must_use]
    pub const fn with(mut self, metric: Metric, value: f64) -> Self {
        match metric {
            Metric::ReturnOnAssets => self.return_on_assets = value,
            Metric::MarketCap => self.market_cap = value,
            Metric::ReturnOnEquity => self.return_on_equity = value,
        }
        self
    }
}

/// One row of the loaded equity dataset.
///
/// Records are validated when the table is loaded and cannot be modified
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquityRecord {
    ticker: Symbol,
    fundamentals: Fundamentals,
    subsector: String,
    date: Date,
}

impl EquityRecord {
    /// Creates a new record.
    pub fn new(
        ticker: impl Into<Symbol>,
        fundamentals: Fundamentals,
        subsector: impl Into<String>,
        date: Date,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            fundamentals,
            subsector: subsector.into(),
            date,
        }
    }

    /// Ticker symbol.
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Fundamental values.
    pub const fn fundamentals(&self) -> &Fundamentals {
        &self.fundamentals
    }

    /// Subsector label.
    pub fn subsector(&self) -> &str {
        &self.subsector
    }

    /// Reference date of the fundamentals. Also the start of the VaR window.
    pub const fn date(&self) -> Date {
        self.date
    }
}

/// The equity every peer is compared against.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetProfile {
    /// Ticker symbol.
    pub ticker: Symbol,
    /// Target values for each metric.
    pub fundamentals: Fundamentals,
    /// Subsector used to restrict the peer set.
    pub subsector: String,
}

impl TargetProfile {
    /// Creates a target profile.
    pub fn new(
        ticker: impl Into<Symbol>,
        fundamentals: Fundamentals,
        subsector: impl Into<String>,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            fundamentals,
            subsector: subsector.into(),
        }
    }

    /// Builds a target profile from a dataset record.
    pub fn from_record(record: &EquityRecord) -> Self {
        Self::new(record.ticker(), *record.fundamentals(), record.subsector())
    }

    /// Overrides one metric value.
    #[must_use]
    pub fn with_metric(mut self, metric: Metric, value: f64) -> Self {
        self.fundamentals = self.fundamentals.with(metric, value);
        self
    }

    /// Overrides the subsector.
    #[must_use]
    pub fn with_subsector(mut self, subsector: impl Into<String>) -> Self {
        self.subsector = subsector.into();
        self
    }
}
