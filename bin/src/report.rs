//! Text and JSON rendering of comparison and VaR results.

use anyhow::Result;
use clap::ValueEnum;
use pares_compare::{Comparison, PeerScope};
use pares_risk::VarOutcome;
use pares_traits::{Metric, TargetProfile};
use serde::Serialize;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable tables
    Text,
    /// A single JSON document
    Json,
}

/// Everything one run produced.
#[derive(Debug, Serialize)]
pub(crate) struct AnalysisReport {
    pub(crate) target: TargetProfile,
    pub(crate) metrics: Vec<Metric>,
    pub(crate) comparisons: Vec<Comparison>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) var: Vec<VarOutcome>,
}

pub(crate) fn banner(title: &str) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║{title:^62}║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
}

fn rule(title: &str) {
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("{title}");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
}

/// Format a metric value for display.
pub(crate) fn format_value(metric: Metric, value: f64) -> String {
    match metric {
        Metric::MarketCap => group_thousands(value),
        Metric::ReturnOnAssets | Metric::ReturnOnEquity => format!("{value:.2}%"),
    }
}

fn group_thousands(value: f64) -> String {
    let digits = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0.0 {
        grouped.insert(0, '-');
    }
    grouped
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) fn print_target(target: &TargetProfile, metrics: &[Metric]) {
    println!("Target:     {}", target.ticker);
    println!("Subsector:  {}", target.subsector);
    for &metric in metrics {
        let label = format!("{}:", metric.label());
        println!(
            "{label:<11} {}",
            format_value(metric, target.fundamentals.get(metric))
        );
    }
    println!();
}

pub(crate) fn print_comparison(
    comparison: &Comparison,
    target: &TargetProfile,
    metrics: &[Metric],
) {
    let title = match comparison.scope {
        PeerScope::Subsector => format!("CLOSEST PEERS IN {}", target.subsector.to_uppercase()),
        PeerScope::Universe => "CLOSEST PEERS ACROSS ALL SUBSECTORS".to_string(),
    };
    rule(&title);

    if comparison.is_empty() {
        match comparison.scope {
            PeerScope::Subsector => println!(
                "No other equities in subsector {} to compare against.\n",
                target.subsector
            ),
            PeerScope::Universe => {
                println!("No other equities in the dataset to compare against.\n");
            }
        }
        return;
    }

    print!("{:<6}{:<12}", "Rank", "Symbol");
    for metric in metrics {
        let header = format!("{} dev %", metric.label());
        print!("{header:>18}");
    }
    println!("{:>14}", "Total %");
    println!("{}", "─".repeat(18 + 18 * metrics.len() + 14));

    for (rank, peer) in comparison.entries().iter().enumerate() {
        print!("{:<6}{:<12}", rank + 1, peer.ticker);
        for &metric in metrics {
            match peer.deviation(metric) {
                Some(dev) => print!("{dev:>18.2}"),
                None => print!("{:>18}", "-"),
            }
        }
        println!("{:>14.2}", peer.total);
    }
    println!();
    println!(
        "{} of {} candidates shown, lowest total deviation first.\n",
        comparison.len(),
        comparison.candidates
    );
}

pub(crate) fn print_var(outcome: &VarOutcome) {
    println!("{}", outcome.symbol());
    match outcome {
        VarOutcome::Estimated(estimate) => {
            println!("  - VaR {}%: {:.4}", estimate.lower_pct, estimate.var_lower);
            println!("  - VaR {}%: {:.4}", estimate.upper_pct, estimate.var_upper);
            println!(
                "  ({} weekly returns, {} to {})",
                estimate.observations, estimate.start, estimate.end
            );
        }
        _ => {
            let reason = outcome.unavailable_reason().unwrap_or_default();
            println!("  - VaR unavailable: {reason}");
        }
    }
    println!();
}

/// Render a full report as text.
pub(crate) fn print_report(report: &AnalysisReport) {
    banner("Peer Comparison");
    print_target(&report.target, &report.metrics);
    for comparison in &report.comparisons {
        print_comparison(comparison, &report.target, &report.metrics);
    }

    if !report.var.is_empty() {
        banner("Value at Risk (VaR)");
        for outcome in &report.var {
            print_var(outcome);
        }
    }
}
