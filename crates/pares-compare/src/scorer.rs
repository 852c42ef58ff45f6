//! Similarity scorer.

use crate::deviation::deviation_pct;
use crate::peers::{PeerScope, select_peers};
use pares_traits::{
    EquityRecord, EquityTable, Fundamentals, Metric, ParesError, Result, Symbol, TargetProfile,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Configuration for similarity scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorerConfig {
    /// Metrics to compare, in breakdown order.
    pub metrics: Vec<Metric>,
    /// Number of closest peers to keep.
    pub limit: usize,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            metrics: Metric::ALL.to_vec(),
            limit: 3,
        }
    }
}

impl ScorerConfig {
    fn validate(&self) -> Result<()> {
        if self.metrics.is_empty() {
            return Err(ParesError::InvalidConfig(
                "at least one metric is required".to_string(),
            ));
        }
        if self.limit == 0 {
            return Err(ParesError::InvalidConfig(
                "peer limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Deviation of one candidate metric from the target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricDeviation {
    /// Metric compared.
    pub metric: Metric,
    /// Candidate's value.
    pub value: f64,
    /// Absolute percentage deviation from the target value.
    pub deviation_pct: f64,
}

/// Aggregate score of one candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeerScore {
    /// Candidate ticker.
    pub ticker: Symbol,
    /// Sum of the per-metric deviations.
    pub total: f64,
    /// Per-metric deviations, in configured metric order.
    pub breakdown: Vec<MetricDeviation>,
}

impl PeerScore {
    /// Deviation for `metric`, if it was part of the comparison.
    pub fn deviation(&self, metric: Metric) -> Option<f64> {
        self.breakdown
            .iter()
            .find(|d| d.metric == metric)
            .map(|d| d.deviation_pct)
    }
}

/// Closest peers of a target under one scope, ascending by total deviation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    /// Target the peers were scored against.
    pub target: Symbol,
    /// Scope the candidates were drawn from.
    pub scope: PeerScope,
    /// Number of candidates scored before truncation.
    pub candidates: usize,
    entries: Vec<PeerScore>,
}

impl Comparison {
    /// Retained peers, closest first.
    pub fn entries(&self) -> &[PeerScore] {
        &self.entries
    }

    /// The closest peer, if any.
    pub fn closest(&self) -> Option<&PeerScore> {
        self.entries.first()
    }

    /// Whether no peer was found.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of retained peers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Ranks candidates by aggregate absolute percentage deviation.
///
/// Deviations are summed as raw percentages. A metric whose candidates
/// spread widely in relative terms (market cap, typically) therefore
/// dominates the total.
#[derive(Debug, Clone, Default)]
pub struct SimilarityScorer {
    config: ScorerConfig,
}

impl SimilarityScorer {
    /// Create a scorer with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the metric list is empty or the limit is zero.
    pub fn new(config: ScorerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration.
    pub const fn config(&self) -> &ScorerConfig {
        &self.config
    }

    /// Select peers of `target` from `table` under `scope` and score them.
    ///
    /// An empty peer set yields an empty [`Comparison`].
    ///
    /// # Errors
    ///
    /// Returns [`ParesError::UndefinedDeviation`] if a configured target
    /// metric is zero and there is at least one candidate.
    pub fn compare(
        &self,
        table: &EquityTable,
        target: &TargetProfile,
        scope: PeerScope,
    ) -> Result<Comparison> {
        let candidates = select_peers(table, target, scope);
        if candidates.is_empty() {
            warn!(
                target = %target.ticker,
                subsector = %target.subsector,
                %scope,
                "no peers to compare against"
            );
        }

        let entries = self.score(&candidates, &target.fundamentals)?;
        Ok(Comparison {
            target: target.ticker.clone(),
            scope,
            candidates: candidates.len(),
            entries,
        })
    }

    /// Score `candidates` against `target`, returning the closest ones.
    ///
    /// Ties keep the candidates' input order.
    ///
    /// # Errors
    ///
    /// Returns [`ParesError::UndefinedDeviation`] if a configured target
    /// metric is zero and `candidates` is not empty.
    pub fn score(
        &self,
        candidates: &[&EquityRecord],
        target: &Fundamentals,
    ) -> Result<Vec<PeerScore>> {
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        // Reject undefined targets before touching any candidate.
        for &metric in &self.config.metrics {
            if target.get(metric) == 0.0 {
                return Err(ParesError::UndefinedDeviation { metric });
            }
        }

        let mut scores = candidates
            .iter()
            .map(|record| self.score_one(record, target))
            .collect::<Result<Vec<_>>>()?;

        scores.sort_by(|a, b| a.total.total_cmp(&b.total));
        scores.truncate(self.config.limit);

        debug!(
            candidates = candidates.len(),
            kept = scores.len(),
            "scored peer candidates"
        );
        Ok(scores)
    }

    fn score_one(&self, record: &EquityRecord, target: &Fundamentals) -> Result<PeerScore> {
        let breakdown = self
            .config
            .metrics
            .iter()
            .map(|&metric| {
                let value = record.fundamentals().get(metric);
                deviation_pct(metric, value, target.get(metric)).map(|deviation_pct| {
                    MetricDeviation {
                        metric,
                        value,
                        deviation_pct,
                    }
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let total = breakdown.iter().map(|d| d.deviation_pct).sum();
        Ok(PeerScore {
            ticker: record.ticker().to_string(),
            total,
            breakdown,
        })
    }
}
