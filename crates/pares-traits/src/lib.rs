#![doc(issue_tracker_base_url = "https://github.com/factordynamics/pares/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types and trait definitions for the pares peer comparison toolkit.
//!
//! This crate provides the shared vocabulary used by the scorer, the VaR
//! estimator and the market-data clients: typed equity records, the loaded
//! equity table, the [`PriceSource`] seam and percentile statistics.

/// The version of the pares-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod source;
pub mod stats;
pub mod table;
pub mod types;

// Re-exports
pub use error::{ParesError, Result};
pub use source::{PricePoint, PriceSource};
pub use table::EquityTable;
pub use types::{Date, EquityRecord, Fundamentals, Metric, Symbol, TargetProfile};
