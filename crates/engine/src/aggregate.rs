//! Per-tier summaries and the current / non-current score split.

use serde::Serialize;

use crate::model::ScoredClient;
use crate::tier::Tier;

/// Count, min, max and mean score of one tier. Stats are `None` when the
/// tier is empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierSummary {
    pub tier: Tier,
    pub count: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
}

/// One summary per tier, canonical order, empty tiers included.
pub fn summarize_tiers(clients: &[ScoredClient]) -> [TierSummary; 4] {
    Tier::ALL.map(|tier| {
        let scores: Vec<f64> = clients
            .iter()
            .filter(|c| c.tier == tier)
            .map(|c| c.score)
            .collect();
        TierSummary {
            tier,
            count: scores.len(),
            min: scores.iter().copied().reduce(f64::min),
            max: scores.iter().copied().reduce(f64::max),
            mean: mean(&scores),
        }
    })
}

/// Five-number summary plus mean and sample standard deviation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DistributionStats {
    pub count: usize,
    pub min: Option<f64>,
    pub q1: Option<f64>,
    pub median: Option<f64>,
    pub q3: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    /// Needs at least two values.
    pub std_dev: Option<f64>,
}

impl DistributionStats {
    pub fn from_scores(scores: &[f64]) -> Self {
        let mut sorted = scores.to_vec();
        sorted.sort_by(f64::total_cmp);
        Self {
            count: sorted.len(),
            min: sorted.first().copied(),
            q1: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q3: quantile(&sorted, 0.75),
            max: sorted.last().copied(),
            mean: mean(&sorted),
            std_dev: sample_std_dev(&sorted),
        }
    }
}

/// Scores of current (`"Y"`) clients versus everyone else.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusSplit {
    pub current_scores: Vec<f64>,
    pub non_current_scores: Vec<f64>,
    pub current: DistributionStats,
    pub non_current: DistributionStats,
}

pub fn split_by_status(clients: &[ScoredClient]) -> StatusSplit {
    let (current, other): (Vec<&ScoredClient>, Vec<&ScoredClient>) =
        clients.iter().partition(|c| c.is_current());
    let current_scores: Vec<f64> = current.iter().map(|c| c.score).collect();
    let non_current_scores: Vec<f64> = other.iter().map(|c| c.score).collect();
    StatusSplit {
        current: DistributionStats::from_scores(&current_scores),
        non_current: DistributionStats::from_scores(&non_current_scores),
        current_scores,
        non_current_scores,
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

/// Linear interpolation between closest ranks; `sorted` must be ascending.
fn quantile(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = p * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64))
}
