//! Peer similarity scoring for pares.
//!
//! This crate ranks candidate equities by how far their fundamentals sit
//! from a target's. For each metric the absolute percentage deviation
//! `|candidate - target| / |target| * 100` is computed; the per-metric
//! deviations are summed without normalization and the lowest sums win.
//!
//! # Examples
//!
//! ```rust,no_run
//! use pares_compare::{PeerScope, SimilarityScorer};
//! use pares_traits::{EquityTable, TargetProfile};
//!
//! # fn main() -> pares_traits::Result<()> {
//! let table = EquityTable::from_csv_path("final_df")?;
//! let target = TargetProfile::from_record(table.require("ARCI.JK")?);
//!
//! let scorer = SimilarityScorer::default();
//! let comparison = scorer.compare(&table, &target, PeerScope::Subsector)?;
//! for peer in comparison.entries() {
//!     println!("{} {:.2}", peer.ticker, peer.total);
//! }
//! # Ok(())
//! # }
//! ```

mod deviation;
mod peers;
mod scorer;

// Re-export main types
pub use deviation::deviation_pct;
pub use peers::{PeerScope, select_peers};
pub use scorer::{Comparison, MetricDeviation, PeerScore, ScorerConfig, SimilarityScorer};
