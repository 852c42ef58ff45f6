#![doc(issue_tracker_base_url = "https://github.com/factordynamics/pares/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # pares
//!
//! Peer comparison and historical Value-at-Risk for equities.
//!
//! pares is an umbrella crate that re-exports all pares sub-crates for
//! convenience.
//!
//! ## Quick Start
//!
//! ```ignore
//! use pares::{EquityTable, PeerScope, SimilarityScorer, TargetProfile, VarEstimator};
//! use pares::yahoo::YahooClient;
//!
//! # async fn run() -> pares::Result<()> {
//! let table = EquityTable::from_csv_path("final_df")?;
//! let record = table.require("ARCI.JK")?;
//! let target = TargetProfile::from_record(record);
//!
//! let comparison = SimilarityScorer::default().compare(&table, &target, PeerScope::Subsector)?;
//!
//! let estimator = VarEstimator::new(YahooClient::from_env());
//! let outcome = estimator.estimate(&target.ticker, record.date()).await;
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`traits`] - Error type, equity records, the loaded table, [`PriceSource`]
//! - [`compare`] - Similarity scorer and peer selection
//! - [`risk`] - Return series and historical VaR
//! - [`yahoo`] - Yahoo Finance weekly price client
//!
//! ## Architecture
//!
//! 1. **Table** loads and validates the equity dataset once per run
//! 2. **Scorer** ranks peers by summed absolute percentage deviation
//! 3. **Estimator** turns weekly closes into tail return percentiles

/// Version information for the pares crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Core Types
// ============================================================================

/// Core types and trait definitions.
pub mod traits {
    pub use pares_traits::*;
}

pub use pares_traits::{
    Date, EquityRecord, EquityTable, Fundamentals, Metric, ParesError, PricePoint, PriceSource,
    Result, Symbol, TargetProfile,
};

// ============================================================================
// Comparison
// ============================================================================

/// Peer similarity scoring.
pub mod compare {
    pub use pares_compare::*;
}

pub use pares_compare::{Comparison, PeerScope, PeerScore, ScorerConfig, SimilarityScorer};

// ============================================================================
// Risk
// ============================================================================

/// Historical Value-at-Risk.
pub mod risk {
    pub use pares_risk::*;
}

pub use pares_risk::{VarConfig, VarEstimate, VarEstimator, VarOutcome};

// ============================================================================
// Market Data
// ============================================================================

/// Yahoo Finance price client.
pub mod yahoo {
    pub use pares_yahoo::*;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::Duration;
    use std::future::{Future, ready};

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(VERSION.contains('.'));
    }

    /// Serves the same weekly closes for one ticker; everything else is unknown.
    struct FixedSource {
        ticker: &'static str,
        closes: Vec<f64>,
    }

    impl PriceSource for FixedSource {
        fn weekly_closes(
            &self,
            symbol: &str,
            start: Date,
            _end: Date,
        ) -> impl Future<Output = Result<Vec<PricePoint>>> + Send {
            let result = if symbol == self.ticker {
                Ok(self
                    .closes
                    .iter()
                    .enumerate()
                    .map(|(i, &c)| PricePoint::new(start + Duration::weeks(i as i64), c))
                    .collect())
            } else {
                Err(ParesError::SymbolNotFound(symbol.to_string()))
            };
            ready(result)
        }
    }

    fn table() -> EquityTable {
        let date = Date::from_ymd_opt(2023, 12, 29).unwrap();
        EquityTable::new(vec![
            EquityRecord::new(
                "ARCI.JK",
                Fundamentals::new(20.55, 2_793_937_500_000.0, 130.73),
                "Basic Materials",
                date,
            ),
            EquityRecord::new(
                "PEER.JK",
                Fundamentals::new(20.55, 2_793_937_500_000.0, 130.73),
                "Basic Materials",
                date,
            ),
            EquityRecord::new(
                "OTHER.JK",
                Fundamentals::new(5.0, 1_000_000_000_000.0, 10.0),
                "Basic Materials",
                date,
            ),
        ])
    }

    #[tokio::test]
    async fn test_compare_then_estimate_closest_peer() {
        let table = table();
        let target = TargetProfile::from_record(table.require("ARCI.JK").unwrap());

        let comparison = SimilarityScorer::default()
            .compare(&table, &target, PeerScope::Subsector)
            .unwrap();
        let closest = comparison.closest().unwrap();
        assert_eq!(closest.ticker, "PEER.JK");
        assert_eq!(closest.total, 0.0);

        let estimator = VarEstimator::new(FixedSource {
            ticker: "PEER.JK",
            closes: vec![100.0, 101.0, 98.98, 101.9494],
        });

        let peer_date = table.require(&closest.ticker).unwrap().date();
        let peer_var = estimator.estimate(&closest.ticker, peer_date).await;
        let estimate = peer_var.estimate().unwrap();
        assert_eq!(estimate.observations, 3);
        // returns 0.01, -0.02, 0.03
        assert_relative_eq!(estimate.var_lower, -0.0194, epsilon = 1e-9);
        assert_relative_eq!(estimate.var_upper, 0.0296, epsilon = 1e-9);

        // The target itself has no prices at this source.
        let target_var = estimator.estimate(&target.ticker, peer_date).await;
        assert!(matches!(target_var, VarOutcome::NotFound { .. }));
    }
}
