//! Priority tiers and the cut points separating them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Calibrated for weighted sums of roughly 0..100 per axis. Not rescaled for
/// other input ranges.
pub const DEFAULT_BOUNDARY_OFFSET: f64 = 0.075;

/// Four ordered priority bands. Declaration order is priority order, so
/// `Elite < Maintenance` under `Ord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Elite,
    Priority,
    Standard,
    Maintenance,
}

impl Tier {
    /// Canonical order, highest priority first.
    pub const ALL: [Tier; 4] = [Tier::Elite, Tier::Priority, Tier::Standard, Tier::Maintenance];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Elite => "Elite",
            Self::Priority => "Priority",
            Self::Standard => "Standard",
            Self::Maintenance => "Maintenance",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Elite => "Tier 1: Elite",
            Self::Priority => "Tier 2: Priority",
            Self::Standard => "Tier 3: Standard",
            Self::Maintenance => "Tier 4: Maintenance",
        }
    }

    /// Display color (hex RGB) used by charts and the detail table.
    pub fn color(self) -> &'static str {
        match self {
            Self::Elite => "#1f77b4",
            Self::Priority => "#ff7f0e",
            Self::Standard => "#2ca02c",
            Self::Maintenance => "#d62728",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Three interior cut points `b1 <= b2 <= b3`.
///
/// `raw` are the natural-breaks boundaries, `effective` the same values
/// shifted up by `offset`. Classification uses `effective` only:
///
/// | Tier        | Interval            |
/// |-------------|---------------------|
/// | Maintenance | `(-inf, b1)`        |
/// | Standard    | `[b1, b2)`          |
/// | Priority    | `[b2, b3)`          |
/// | Elite       | `[b3, +inf)`        |
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TierBreaks {
    pub raw: [f64; 3],
    pub offset: f64,
    pub effective: [f64; 3],
}

impl TierBreaks {
    pub fn from_raw(raw: [f64; 3], offset: f64) -> Self {
        Self { raw, offset, effective: raw.map(|b| b + offset) }
    }

    /// A score equal to a boundary belongs to the higher tier.
    pub fn classify(&self, score: f64) -> Tier {
        let [b1, b2, b3] = self.effective;
        if score >= b3 {
            Tier::Elite
        } else if score >= b2 {
            Tier::Priority
        } else if score >= b1 {
            Tier::Standard
        } else {
            Tier::Maintenance
        }
    }

    /// Inclusive lower bound of a tier, `None` for Maintenance.
    pub fn lower_bound(&self, tier: Tier) -> Option<f64> {
        let [b1, b2, b3] = self.effective;
        match tier {
            Tier::Elite => Some(b3),
            Tier::Priority => Some(b2),
            Tier::Standard => Some(b1),
            Tier::Maintenance => None,
        }
    }

    /// Exclusive upper bound of a tier, `None` for Elite.
    pub fn upper_bound(&self, tier: Tier) -> Option<f64> {
        let [b1, b2, b3] = self.effective;
        match tier {
            Tier::Elite => None,
            Tier::Priority => Some(b3),
            Tier::Standard => Some(b2),
            Tier::Maintenance => Some(b1),
        }
    }
}
