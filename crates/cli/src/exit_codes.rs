//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Scripts rely on them, so codes are never renumbered.
//!
//! | Code | Meaning                                        |
//! |------|------------------------------------------------|
//! | 0    | Success                                        |
//! | 1    | General error (unspecified)                    |
//! | 2    | Usage error (bad args, unreadable weight list) |
//! | 3    | Upload could not be parsed                     |
//! | 4    | Upload lacks required columns                  |
//! | 5    | Weights all zero, negative or not finite       |
//! | 6    | Too few records / distinct scores for 4 tiers  |
//! | 7    | Settings file unreadable or invalid            |

use clientrank_engine::{NormalizationError, ScoringError};

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// File unreadable, unsupported, or a cell that cannot be read as a number.
pub const EXIT_PARSE: u8 = 3;

/// One or more required columns absent from the header.
pub const EXIT_MISSING_COLUMNS: u8 = 4;

/// Weight vector cannot be normalized.
pub const EXIT_WEIGHTS: u8 = 5;

/// Natural breaks need at least 4 records with 4 distinct scores.
pub const EXIT_INSUFFICIENT_DATA: u8 = 6;

/// Settings file could not be read, parsed or validated.
pub const EXIT_CONFIG: u8 = 7;

pub fn normalization_exit_code(err: &NormalizationError) -> u8 {
    match err {
        NormalizationError::ParseFailure(_) => EXIT_PARSE,
        NormalizationError::MissingColumns { .. } => EXIT_MISSING_COLUMNS,
    }
}

pub fn scoring_exit_code(err: &ScoringError) -> u8 {
    match err {
        ScoringError::ZeroWeight | ScoringError::InvalidWeight { .. } => EXIT_WEIGHTS,
        ScoringError::InsufficientData { .. } => EXIT_INSUFFICIENT_DATA,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct() {
        let codes = [
            EXIT_SUCCESS,
            EXIT_ERROR,
            EXIT_USAGE,
            EXIT_PARSE,
            EXIT_MISSING_COLUMNS,
            EXIT_WEIGHTS,
            EXIT_INSUFFICIENT_DATA,
            EXIT_CONFIG,
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn error_mapping() {
        assert_eq!(normalization_exit_code(&NormalizationError::parse("x")), EXIT_PARSE);
        let missing = NormalizationError::MissingColumns { missing: vec![], found: vec![] };
        assert_eq!(normalization_exit_code(&missing), EXIT_MISSING_COLUMNS);
        assert_eq!(scoring_exit_code(&ScoringError::ZeroWeight), EXIT_WEIGHTS);
        let invalid = ScoringError::InvalidWeight { axis: "difficulty", value: -1.0 };
        assert_eq!(scoring_exit_code(&invalid), EXIT_WEIGHTS);
        let short = ScoringError::InsufficientData { records: 3, distinct_scores: 3 };
        assert_eq!(scoring_exit_code(&short), EXIT_INSUFFICIENT_DATA);
    }
}
