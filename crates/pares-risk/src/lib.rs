//! Historical Value-at-Risk for pares.
//!
//! VaR here is purely historical: weekly closes over a trailing window are
//! turned into period-over-period returns, and the lower and upper tail
//! percentiles of that distribution are reported as signed fractional
//! returns.
//!
//! Prices come from any [`PriceSource`](pares_traits::PriceSource). The
//! estimator never fails outright; fetch problems surface as unavailable
//! [`VarOutcome`] variants the caller can display.

mod returns;
mod var;

pub use returns::ReturnSeries;
pub use var::{VarConfig, VarEstimate, VarEstimator, VarOutcome, historical_var};
