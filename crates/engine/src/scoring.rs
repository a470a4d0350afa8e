//! Weighted scores, ranks and natural-breaks tiers.

use serde::{Deserialize, Serialize};

use crate::aggregate::{split_by_status, summarize_tiers};
use crate::error::ScoringError;
use crate::jenks::{distinct_count, jenks_breaks};
use crate::model::{score_text, ClientRecord, ScoredClient, ScoringResult};
use crate::tier::{TierBreaks, DEFAULT_BOUNDARY_OFFSET};
use crate::weights::WeightVector;

/// Number of tiers, and therefore of natural-breaks classes.
pub const TIER_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringOptions {
    /// Added to every interior natural-breaks boundary before classifying.
    pub boundary_offset: f64,
}

impl Default for ScoringOptions {
    fn default() -> Self {
        Self { boundary_offset: DEFAULT_BOUNDARY_OFFSET }
    }
}

/// Score with the default boundary offset.
pub fn score(records: &[ClientRecord], weights: &WeightVector) -> Result<ScoringResult, ScoringError> {
    score_with(records, weights, &ScoringOptions::default())
}

/// Full scoring pass. Pure: the same inputs always give the same result.
pub fn score_with(
    records: &[ClientRecord],
    weights: &WeightVector,
    options: &ScoringOptions,
) -> Result<ScoringResult, ScoringError> {
    let fractions = weights.normalized()?;

    let scores: Vec<f64> = records
        .iter()
        .map(|record| weighted_score(record, &fractions))
        .collect();
    let breaks = natural_breaks(&scores, options.boundary_offset)?;

    let clients: Vec<ScoredClient> = rank_order(&scores)
        .into_iter()
        .enumerate()
        .map(|(pos, idx)| ScoredClient {
            rank: pos + 1,
            input_index: idx,
            score: scores[idx],
            tier: breaks.classify(scores[idx]),
            record: records[idx].clone(),
        })
        .collect();

    if let Some(top) = clients.first() {
        log::debug!(
            "scored {} clients; top '{}' at {}; breaks {:?}",
            clients.len(),
            top.name(),
            score_text(top.score),
            breaks.effective
        );
    }

    Ok(ScoringResult {
        weights: fractions,
        tiers: summarize_tiers(&clients),
        status_split: split_by_status(&clients),
        clients,
        breaks,
    })
}

/// Sum of axis values times normalized weights. No clamping.
pub fn weighted_score(record: &ClientRecord, fractions: &WeightVector) -> f64 {
    record
        .axes()
        .iter()
        .zip(fractions.as_array())
        .map(|(value, weight)| value * weight)
        .sum()
}

/// Input indices ordered by descending score. Stable: equal scores keep
/// input order, so ranks are positional and never shared.
pub fn rank_order(scores: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
    order
}

/// 1-based rank of each score, reported in input order.
pub fn ranks(scores: &[f64]) -> Vec<usize> {
    let mut ranks = vec![0; scores.len()];
    for (pos, idx) in rank_order(scores).into_iter().enumerate() {
        ranks[idx] = pos + 1;
    }
    ranks
}

/// Interior natural-breaks boundaries for four classes, shifted by `offset`.
pub fn natural_breaks(scores: &[f64], offset: f64) -> Result<TierBreaks, ScoringError> {
    let distinct = distinct_count(scores);
    let insufficient = ScoringError::InsufficientData {
        records: scores.len(),
        distinct_scores: distinct,
    };
    if scores.len() < TIER_COUNT || distinct < TIER_COUNT {
        return Err(insufficient);
    }

    let breaks = jenks_breaks(scores, TIER_COUNT).map_err(|e| {
        log::warn!("natural breaks failed: {e}");
        insufficient
    })?;
    Ok(TierBreaks::from_raw([breaks[1], breaks[2], breaks[3]], offset))
}
