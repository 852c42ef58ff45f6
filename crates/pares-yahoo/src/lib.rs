//! Yahoo Finance price client for pares.
//!
//! This crate fetches weekly closing prices from the Yahoo Finance chart
//! API and exposes them through [`PriceSource`](pares_traits::PriceSource),
//! so the VaR estimator can use it directly.
//!
//! # Usage
//!
//! ```rust,ignore
//! use pares_yahoo::YahooClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = YahooClient::from_env();
//!     let start = chrono::NaiveDate::from_ymd_opt(2023, 12, 29).unwrap();
//!     let end = chrono::NaiveDate::from_ymd_opt(2024, 12, 28).unwrap();
//!
//!     let closes = client.weekly_history("ARCI.JK", start, end).await?;
//!     println!("{} weekly closes", closes.len());
//!     Ok(())
//! }
//! ```
//!
//! # Environment Variables
//!
//! `PARES_YAHOO_BASE_URL` overrides the API host, e.g. for a local mirror:
//!
//! ```bash
//! PARES_YAHOO_BASE_URL=http://localhost:8080
//! ```

mod client;
mod error;
mod types;

pub use client::YahooClient;
pub use error::YahooError;
pub use types::ChartResponse;

/// Result type for Yahoo operations.
pub type Result<T> = std::result::Result<T, YahooError>;
