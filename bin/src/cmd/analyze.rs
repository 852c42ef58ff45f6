//! Analyze command implementation.

use crate::config::Settings;
use crate::report::{self, AnalysisReport, OutputFormat};
use crate::{RiskArgs, ScoringArgs, TargetArgs, data};
use anyhow::{Context, Result};
use pares_compare::PeerScope;
use pares_risk::VarEstimator;
use pares_yahoo::YahooClient;
use tracing::info;

/// Compare peers in both scopes, then estimate VaR for the closest
/// subsector peer and for the target.
///
/// Prices are fetched one ticker at a time. An unavailable VaR is reported
/// in the output and does not fail the run.
pub(crate) async fn analyze(
    settings: &Settings,
    target_args: &TargetArgs,
    scoring: &ScoringArgs,
    risk: &RiskArgs,
    format: OutputFormat,
) -> Result<()> {
    let path = settings.dataset_path(target_args.dataset.clone());
    let table = data::load_table(&path)
        .with_context(|| format!("loading dataset {}", path.display()))?;
    let target = data::resolve_target(&table, &target_args.target, &target_args.overrides())?;
    let target_date = table.require(&target.ticker)?.date();
    let scorer = scoring.scorer()?;

    let subsector = scorer
        .compare(&table, &target, PeerScope::Subsector)
        .with_context(|| format!("comparing {} within its subsector", target.ticker))?;
    let universe = scorer
        .compare(&table, &target, PeerScope::Universe)
        .with_context(|| format!("comparing {} across all subsectors", target.ticker))?;

    let estimator = VarEstimator::with_config(YahooClient::from_env(), risk.config())?;
    let mut var = Vec::with_capacity(2);

    if let Some(peer) = subsector.closest() {
        let peer_date = table.require(&peer.ticker)?.date();
        info!(peer = %peer.ticker, start = %peer_date, "estimating VaR for closest peer");
        var.push(estimator.estimate(&peer.ticker, peer_date).await);
    }

    info!(target = %target.ticker, start = %target_date, "estimating VaR for target");
    var.push(estimator.estimate(&target.ticker, target_date).await);

    let analysis = AnalysisReport {
        target,
        metrics: scorer.config().metrics.clone(),
        comparisons: vec![subsector, universe],
        var,
    };

    match format {
        OutputFormat::Text => report::print_report(&analysis),
        OutputFormat::Json => report::print_json(&analysis)?,
    }

    Ok(())
}
