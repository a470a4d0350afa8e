use std::fmt;

/// Failure turning an uploaded table into client records.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizationError {
    /// Unreadable container, bad encoding, or a cell that cannot be coerced.
    ParseFailure(String),
    /// Required logical columns with no matching header.
    /// `missing` holds logical names, `found` the headers actually present.
    MissingColumns { missing: Vec<String>, found: Vec<String> },
}

impl NormalizationError {
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseFailure(msg.into())
    }
}

impl fmt::Display for NormalizationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParseFailure(msg) => write!(f, "error reading file: {msg}"),
            Self::MissingColumns { missing, found } => write!(
                f,
                "missing required columns: {} (found columns: {})",
                missing.join(", "),
                found.join(", ")
            ),
        }
    }
}

impl std::error::Error for NormalizationError {}

/// Failure computing scores and tiers. Terminal for the recomputation.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoringError {
    /// Every weight is zero, so they cannot be normalized.
    ZeroWeight,
    /// A weight is negative or not a finite number.
    InvalidWeight { axis: &'static str, value: f64 },
    /// Too few records or distinct scores for a four-tier partition.
    InsufficientData { records: usize, distinct_scores: usize },
}

impl fmt::Display for ScoringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroWeight => {
                write!(f, "all weights are zero; raise at least one weight above zero")
            }
            Self::InvalidWeight { axis, value } => {
                write!(f, "weight '{axis}' must be a non-negative number, got {value}")
            }
            Self::InsufficientData { records, distinct_scores } => write!(
                f,
                "four tiers need at least 4 records with 4 distinct scores, \
                 got {records} record(s) with {distinct_scores} distinct score(s)"
            ),
        }
    }
}

impl std::error::Error for ScoringError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_columns_message_lists_both_sides() {
        let err = NormalizationError::MissingColumns {
            missing: vec!["profitability".into()],
            found: vec!["Client".into(), "Current Work".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("profitability"));
        assert!(msg.contains("Client, Current Work"));
    }

    #[test]
    fn insufficient_data_message_has_counts() {
        let err = ScoringError::InsufficientData { records: 4, distinct_scores: 3 };
        assert!(err.to_string().contains("4 record(s) with 3 distinct"));
    }
}
