use serde::{Serialize, Serializer};

use crate::aggregate::{StatusSplit, TierSummary};
use crate::table::format_number;
use crate::tier::{Tier, TierBreaks};
use crate::weights::WeightVector;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Raw "Current Client" value. Only a literal `Y` counts as current; any
/// other value is kept verbatim for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrentStatus {
    Yes,
    No,
    Other(String),
}

impl CurrentStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "Y" => Self::Yes,
            "N" => Self::No,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn is_current(&self) -> bool {
        matches!(self, Self::Yes)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Yes => "Y",
            Self::No => "N",
            Self::Other(raw) => raw,
        }
    }
}

impl Serialize for CurrentStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One uploaded row projected onto the fixed schema. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientRecord {
    pub name: String,
    pub current_client: CurrentStatus,
    pub current_work: f64,
    pub future_work: f64,
    pub difficulty: f64,
    pub profitability: f64,
    pub ease_to_distribute: f64,
}

impl ClientRecord {
    /// Axis scores in [`crate::weights::AXES`] order.
    pub fn axes(&self) -> [f64; 5] {
        [
            self.current_work,
            self.future_work,
            self.difficulty,
            self.profitability,
            self.ease_to_distribute,
        ]
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// A record with its weighted score, positional rank and tier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredClient {
    /// 1-based, by descending score; ties keep input order.
    pub rank: usize,
    /// Position of the record in the normalized input.
    pub input_index: usize,
    pub score: f64,
    pub tier: Tier,
    #[serde(flatten)]
    pub record: ClientRecord,
}

impl ScoredClient {
    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn is_current(&self) -> bool {
        self.record.current_client.is_current()
    }
}

/// Everything the presentation layer reads after one scoring pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringResult {
    /// Normalized weight fractions actually applied.
    pub weights: WeightVector,
    /// Sorted by rank.
    pub clients: Vec<ScoredClient>,
    pub breaks: TierBreaks,
    /// One entry per tier in canonical order, empty tiers included.
    pub tiers: [TierSummary; 4],
    pub status_split: StatusSplit,
}

impl ScoringResult {
    pub fn tier_summary(&self, tier: Tier) -> &TierSummary {
        &self.tiers[tier.index()]
    }

    pub fn clients_in(&self, tier: Tier) -> impl Iterator<Item = &ScoredClient> {
        self.clients.iter().filter(move |c| c.tier == tier)
    }

    pub fn scores(&self) -> Vec<f64> {
        self.clients.iter().map(|c| c.score).collect()
    }

    /// Human-readable boundary lines, Elite first.
    pub fn boundary_descriptions(&self, decimals: usize) -> [String; 4] {
        let [b1, b2, b3] = self.breaks.effective;
        let fmt = |v: f64| format!("{v:.decimals$}");
        [
            format!("Elite: >= {}", fmt(b3)),
            format!("Priority: {} - {}", fmt(b2), fmt(b3)),
            format!("Standard: {} - {}", fmt(b1), fmt(b2)),
            format!("Maintenance: < {}", fmt(b1)),
        ]
    }
}

/// Compact score text for logs.
pub(crate) fn score_text(score: f64) -> String {
    format_number((score * 100.0).round() / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_literal_y_is_current() {
        assert!(CurrentStatus::parse("Y").is_current());
        assert!(CurrentStatus::parse(" Y ").is_current());
        assert!(!CurrentStatus::parse("y").is_current());
        assert!(!CurrentStatus::parse("N").is_current());
        assert!(!CurrentStatus::parse("").is_current());
    }

    #[test]
    fn raw_value_preserved() {
        let status = CurrentStatus::parse("Former");
        assert_eq!(status, CurrentStatus::Other("Former".into()));
        assert_eq!(status.as_str(), "Former");
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"Former\"");
    }

    #[test]
    fn score_text_rounds() {
        assert_eq!(score_text(42.004), "42");
        assert_eq!(score_text(42.126), "42.13");
    }
}
