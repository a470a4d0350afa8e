//! `clientrank-engine`: client priority scoring pipeline.
//!
//! Pure engine crate: receives an already-parsed table, returns normalized
//! client records, weighted scores, natural-breaks tiers and per-tier
//! aggregates. No CLI or file IO dependencies.

pub mod aggregate;
pub mod error;
pub mod jenks;
pub mod model;
pub mod normalize;
pub mod scoring;
pub mod session;
pub mod table;
pub mod tier;
pub mod weights;

pub use error::{NormalizationError, ScoringError};
pub use model::{ClientRecord, CurrentStatus, ScoredClient, ScoringResult};
pub use normalize::{normalize, NormalizedTable};
pub use scoring::{score, score_with, ScoringOptions};
pub use session::Session;
pub use table::{Cell, RawTable};
pub use tier::{Tier, TierBreaks};
pub use weights::WeightVector;
