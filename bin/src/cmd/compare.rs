//! Compare command implementation.

use crate::config::Settings;
use crate::report::{self, AnalysisReport, OutputFormat};
use crate::{ScopeArg, ScoringArgs, TargetArgs, data};
use anyhow::{Context, Result};

/// Rank the closest peers of the target within the requested scopes.
pub(crate) fn compare_peers(
    settings: &Settings,
    target_args: &TargetArgs,
    scoring: &ScoringArgs,
    scope: ScopeArg,
    format: OutputFormat,
) -> Result<()> {
    let path = settings.dataset_path(target_args.dataset.clone());
    let table = data::load_table(&path)
        .with_context(|| format!("loading dataset {}", path.display()))?;
    let target = data::resolve_target(&table, &target_args.target, &target_args.overrides())?;
    let scorer = scoring.scorer()?;

    let comparisons = scope
        .scopes()
        .iter()
        .map(|&s| scorer.compare(&table, &target, s))
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("comparing peers of {}", target.ticker))?;

    let analysis = AnalysisReport {
        target,
        metrics: scorer.config().metrics.clone(),
        comparisons,
        var: Vec::new(),
    };

    match format {
        OutputFormat::Text => report::print_report(&analysis),
        OutputFormat::Json => report::print_json(&analysis)?,
    }

    Ok(())
}
