//! pares CLI binary.
//!
//! Compares a target equity against its peers and estimates historical VaR
//! for the target and its closest peer.

mod cmd;
mod config;
mod data;
mod report;

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use config::Settings;
use data::TargetOverrides;
use pares_compare::{PeerScope, ScorerConfig, SimilarityScorer};
use pares_risk::VarConfig;
use pares_traits::Metric;
use report::OutputFormat;
use std::path::PathBuf;
use std::process;
use tracing::Level;

#[derive(Parser)]
#[command(name = "pares")]
#[command(about = "Peer comparison and historical VaR for equities", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank the peers closest to a target equity
    Compare {
        #[command(flatten)]
        target: TargetArgs,

        #[command(flatten)]
        scoring: ScoringArgs,

        /// Peer scope to compare within
        #[arg(long, value_enum, default_value_t = ScopeArg::Both)]
        scope: ScopeArg,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Estimate historical VaR for one ticker
    Var {
        /// Ticker symbol
        symbol: String,

        /// Window start (YYYY-MM-DD, defaults to the ticker's dataset date)
        #[arg(long)]
        start: Option<String>,

        /// Path to the equity dataset (CSV)
        #[arg(short, long)]
        dataset: Option<PathBuf>,

        #[command(flatten)]
        risk: RiskArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Compare peers, then estimate VaR for the target and its closest peer
    Analyze {
        #[command(flatten)]
        target: TargetArgs,

        #[command(flatten)]
        scoring: ScoringArgs,

        #[command(flatten)]
        risk: RiskArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

/// Target selection and metric overrides.
#[derive(Args, Debug, Clone)]
pub(crate) struct TargetArgs {
    /// Target ticker symbol
    pub(crate) target: String,

    /// Path to the equity dataset (CSV)
    #[arg(short, long)]
    pub(crate) dataset: Option<PathBuf>,

    /// Override the target's return on assets (%)
    #[arg(long)]
    pub(crate) roa: Option<f64>,

    /// Override the target's market capitalization
    #[arg(long)]
    pub(crate) market_cap: Option<f64>,

    /// Override the target's return on equity (%)
    #[arg(long)]
    pub(crate) roe: Option<f64>,

    /// Override the target's subsector
    #[arg(long)]
    pub(crate) subsector: Option<String>,
}

impl TargetArgs {
    pub(crate) fn overrides(&self) -> TargetOverrides {
        let metrics = [
            (Metric::ReturnOnAssets, self.roa),
            (Metric::MarketCap, self.market_cap),
            (Metric::ReturnOnEquity, self.roe),
        ]
        .into_iter()
        .filter_map(|(metric, value)| value.map(|v| (metric, v)))
        .collect();

        TargetOverrides {
            metrics,
            subsector: self
                .subsector
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        }
    }
}

/// Scoring options.
#[derive(Args, Debug, Clone)]
pub(crate) struct ScoringArgs {
    /// Metrics to compare (roa, market-cap, roe)
    #[arg(short, long, value_delimiter = ',', default_value = "roa,market-cap,roe")]
    pub(crate) metrics: Vec<Metric>,

    /// Number of closest peers to keep
    #[arg(short = 'n', long, default_value_t = 3)]
    pub(crate) top: usize,
}

impl ScoringArgs {
    pub(crate) fn scorer(&self) -> pares_traits::Result<SimilarityScorer> {
        let mut metrics = Vec::with_capacity(self.metrics.len());
        for &metric in &self.metrics {
            if !metrics.contains(&metric) {
                metrics.push(metric);
            }
        }
        SimilarityScorer::new(ScorerConfig {
            metrics,
            limit: self.top,
        })
    }
}

/// VaR options.
#[derive(Args, Debug, Clone)]
pub(crate) struct RiskArgs {
    /// Lower tail percentile
    #[arg(long, default_value_t = 1.0)]
    pub(crate) lower: f64,

    /// Upper tail percentile
    #[arg(long, default_value_t = 99.0)]
    pub(crate) upper: f64,

    /// Price window length in calendar days
    #[arg(long, default_value_t = 365)]
    pub(crate) window_days: u32,
}

impl RiskArgs {
    pub(crate) const fn config(&self) -> VarConfig {
        VarConfig {
            lower_pct: self.lower,
            upper_pct: self.upper,
            window_days: self.window_days,
        }
    }
}

/// Which peer scopes to compare within.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ScopeArg {
    /// Same subsector only
    Subsector,
    /// Whole dataset
    Universe,
    /// Both, subsector first
    Both,
}

impl ScopeArg {
    pub(crate) const fn scopes(self) -> &'static [PeerScope] {
        match self {
            Self::Subsector => &[PeerScope::Subsector],
            Self::Universe => &[PeerScope::Universe],
            Self::Both => &[PeerScope::Subsector, PeerScope::Universe],
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::WARN
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let settings = Settings::from_env();

    match cli.command {
        Commands::Compare {
            target,
            scoring,
            scope,
            format,
        } => {
            cmd::compare::compare_peers(&settings, &target, &scoring, scope, format)?;
        }
        Commands::Var {
            symbol,
            start,
            dataset,
            risk,
            format,
        } => {
            cmd::var::estimate_var(&settings, &symbol, start.as_deref(), dataset, &risk, format)
                .await?;
        }
        Commands::Analyze {
            target,
            scoring,
            risk,
            format,
        } => {
            cmd::analyze::analyze(&settings, &target, &scoring, &risk, format).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_compare_defaults() {
        let cli = Cli::try_parse_from(["pares", "compare", "ARCI.JK"]).unwrap();
        match cli.command {
            Commands::Compare {
                target,
                scoring,
                scope,
                format,
            } => {
                assert_eq!(target.target, "ARCI.JK");
                assert!(target.dataset.is_none());
                assert_eq!(scoring.metrics, Metric::ALL.to_vec());
                assert_eq!(scoring.top, 3);
                assert_eq!(scope, ScopeArg::Both);
                assert_eq!(format, OutputFormat::Text);
            }
            _ => panic!("expected compare"),
        }
    }

    #[test]
    fn test_analyze_overrides_and_metrics() {
        let cli = Cli::try_parse_from([
            "pares",
            "-v",
            "analyze",
            "ARCI.JK",
            "--roa",
            "20.55",
            "--subsector",
            "Basic Materials",
            "--metrics",
            "roe,roa,roe",
            "-n",
            "5",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 1);

        match cli.command {
            Commands::Analyze {
                target,
                scoring,
                risk,
                format,
            } => {
                let overrides = target.overrides();
                assert_eq!(overrides.metrics, vec![(Metric::ReturnOnAssets, 20.55)]);
                assert_eq!(overrides.subsector.as_deref(), Some("Basic Materials"));

                let scorer = scoring.scorer().unwrap();
                assert_eq!(
                    scorer.config().metrics,
                    vec![Metric::ReturnOnEquity, Metric::ReturnOnAssets]
                );
                assert_eq!(scorer.config().limit, 5);

                assert_eq!(risk.config(), VarConfig::default());
                assert_eq!(format, OutputFormat::Json);
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_subsector_override_is_trimmed() {
        let cli =
            Cli::try_parse_from(["pares", "compare", "ARCI.JK", "--subsector", " Basic Materials "])
                .unwrap();
        match cli.command {
            Commands::Compare { target, .. } => {
                assert_eq!(target.overrides().subsector.as_deref(), Some("Basic Materials"));
            }
            _ => panic!("expected compare"),
        }

        let cli =
            Cli::try_parse_from(["pares", "compare", "ARCI.JK", "--subsector", "  "]).unwrap();
        match cli.command {
            Commands::Compare { target, .. } => assert!(target.overrides().subsector.is_none()),
            _ => panic!("expected compare"),
        }
    }

    #[test]
    fn test_unknown_metric_is_rejected() {
        assert!(Cli::try_parse_from(["pares", "compare", "ARCI.JK", "-m", "pe"]).is_err());
    }

    #[test]
    fn test_scope_arg_scopes() {
        assert_eq!(ScopeArg::Both.scopes(), &[PeerScope::Subsector, PeerScope::Universe]);
        assert_eq!(ScopeArg::Universe.scopes(), &[PeerScope::Universe]);
    }
}
