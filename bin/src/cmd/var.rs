//! VaR command implementation.

use crate::config::Settings;
use crate::report::{self, OutputFormat};
use crate::{RiskArgs, data};
use anyhow::{Context, Result};
use pares_risk::VarEstimator;
use pares_yahoo::YahooClient;
use std::path::PathBuf;

/// Estimate historical VaR for a single ticker.
///
/// Without `--start` the window begins at the ticker's dataset date.
pub(crate) async fn estimate_var(
    settings: &Settings,
    symbol: &str,
    start: Option<&str>,
    dataset: Option<PathBuf>,
    risk: &RiskArgs,
    format: OutputFormat,
) -> Result<()> {
    let symbol = symbol.trim();
    let start = match start {
        Some(s) => data::parse_date(s)?,
        None => {
            let path = settings.dataset_path(dataset);
            let table = data::load_table(&path)
                .with_context(|| format!("loading dataset {}", path.display()))?;
            table.require(symbol)?.date()
        }
    };

    let estimator = VarEstimator::with_config(YahooClient::from_env(), risk.config())?;
    let outcome = estimator.estimate(symbol, start).await;

    match format {
        OutputFormat::Text => {
            report::banner("Value at Risk (VaR)");
            report::print_var(&outcome);
        }
        OutputFormat::Json => report::print_json(&outcome)?,
    }

    Ok(())
}
