//! Relative importance of the five scoring axes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScoringError;

/// Axis names in canonical order, matching [`WeightVector::as_array`].
pub const AXES: [&str; 5] = [
    "current_work",
    "future_work",
    "difficulty",
    "profitability",
    "ease_to_distribute",
];

// Interactive control contract: integer sliders 0..=100 in steps of 5.
pub const SLIDER_MIN: f64 = 0.0;
pub const SLIDER_MAX: f64 = 100.0;
pub const SLIDER_STEP: f64 = 5.0;

/// Five raw, non-negative weights. They need not sum to 1; scoring divides
/// each by their sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightVector {
    pub current_work: f64,
    pub future_work: f64,
    pub difficulty: f64,
    pub profitability: f64,
    pub ease_to_distribute: f64,
}

impl Default for WeightVector {
    fn default() -> Self {
        Self {
            current_work: 30.0,
            future_work: 25.0,
            difficulty: 15.0,
            profitability: 25.0,
            ease_to_distribute: 5.0,
        }
    }
}

impl WeightVector {
    pub fn new(
        current_work: f64,
        future_work: f64,
        difficulty: f64,
        profitability: f64,
        ease_to_distribute: f64,
    ) -> Self {
        Self { current_work, future_work, difficulty, profitability, ease_to_distribute }
    }

    pub fn from_array(values: [f64; 5]) -> Self {
        let [cw, fw, dd, prof, ease] = values;
        Self::new(cw, fw, dd, prof, ease)
    }

    pub fn as_array(&self) -> [f64; 5] {
        [
            self.current_work,
            self.future_work,
            self.difficulty,
            self.profitability,
            self.ease_to_distribute,
        ]
    }

    pub fn sum(&self) -> f64 {
        self.as_array().iter().sum()
    }

    /// Divide every weight by the total so the result sums to 1.
    pub fn normalized(&self) -> Result<WeightVector, ScoringError> {
        for (axis, value) in AXES.into_iter().zip(self.as_array()) {
            if !value.is_finite() || value < 0.0 {
                return Err(ScoringError::InvalidWeight { axis, value });
            }
        }
        let total = self.sum();
        if total == 0.0 {
            return Err(ScoringError::ZeroWeight);
        }
        Ok(Self::from_array(self.as_array().map(|w| w / total)))
    }

    /// Check the values against the slider contract (0..=100, step 5).
    pub fn check_slider(&self) -> Result<(), WeightError> {
        for (axis, value) in AXES.into_iter().zip(self.as_array()) {
            if !(SLIDER_MIN..=SLIDER_MAX).contains(&value) {
                return Err(WeightError::OutOfRange { axis, value });
            }
            if value % SLIDER_STEP != 0.0 {
                return Err(WeightError::OffStep { axis, value });
            }
        }
        Ok(())
    }
}

impl fmt::Display for WeightVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [cw, fw, dd, prof, ease] = self.as_array();
        write!(f, "{cw},{fw},{dd},{prof},{ease}")
    }
}

/// Bad weight list as typed by a user.
#[derive(Debug, Clone, PartialEq)]
pub enum WeightError {
    /// Wrong number of comma-separated values.
    Count(usize),
    NotANumber(String),
    OutOfRange { axis: &'static str, value: f64 },
    OffStep { axis: &'static str, value: f64 },
}

impl fmt::Display for WeightError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "expected 5 comma-separated weights, got {n}"),
            Self::NotANumber(s) => write!(f, "weight '{s}' is not a number"),
            Self::OutOfRange { axis, value } => {
                write!(f, "weight '{axis}' = {value} is outside {SLIDER_MIN}..={SLIDER_MAX}")
            }
            Self::OffStep { axis, value } => {
                write!(f, "weight '{axis}' = {value} is not a multiple of {SLIDER_STEP}")
            }
        }
    }
}

impl std::error::Error for WeightError {}

impl FromStr for WeightVector {
    type Err = WeightError;

    /// Parse `"30,25,15,25,5"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != AXES.len() {
            return Err(WeightError::Count(parts.len()));
        }
        let mut values = [0.0; 5];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part
                .parse::<f64>()
                .map_err(|_| WeightError::NotANumber(part.to_string()))?;
        }
        Ok(Self::from_array(values))
    }
}
