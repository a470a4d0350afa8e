//! Per-upload state: the normalized table and the current weights.
//!
//! Each session owns its data; nothing is shared between sessions. Every
//! call to [`Session::recompute`] is a full, independent scoring pass.

use crate::error::ScoringError;
use crate::model::{ClientRecord, ScoringResult};
use crate::normalize::NormalizedTable;
use crate::scoring::{score_with, ScoringOptions};
use crate::weights::WeightVector;

#[derive(Debug, Clone)]
pub struct Session {
    table: NormalizedTable,
    weights: WeightVector,
    options: ScoringOptions,
}

impl Session {
    /// New session with the default weights.
    pub fn new(table: NormalizedTable) -> Self {
        Self {
            table,
            weights: WeightVector::default(),
            options: ScoringOptions::default(),
        }
    }

    pub fn with_weights(mut self, weights: WeightVector) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_options(mut self, options: ScoringOptions) -> Self {
        self.options = options;
        self
    }

    pub fn records(&self) -> &[ClientRecord] {
        &self.table.records
    }

    pub fn table(&self) -> &NormalizedTable {
        &self.table
    }

    pub fn weights(&self) -> &WeightVector {
        &self.weights
    }

    pub fn options(&self) -> &ScoringOptions {
        &self.options
    }

    pub fn set_weights(&mut self, weights: WeightVector) {
        self.weights = weights;
    }

    /// Start from the weights embedded in the upload, when it had any.
    pub fn adopt_embedded_weights(&mut self) -> bool {
        match self.table.embedded_weights {
            Some(weights) => {
                self.weights = weights;
                true
            }
            None => false,
        }
    }

    pub fn recompute(&self) -> Result<ScoringResult, ScoringError> {
        score_with(&self.table.records, &self.weights, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CurrentStatus;

    fn table(values: &[f64], embedded: Option<WeightVector>) -> NormalizedTable {
        let records: Vec<ClientRecord> = values
            .iter()
            .enumerate()
            .map(|(i, v)| ClientRecord {
                name: format!("client {i}"),
                current_client: CurrentStatus::No,
                current_work: *v,
                future_work: 0.0,
                difficulty: 0.0,
                profitability: 0.0,
                ease_to_distribute: 100.0 - *v,
            })
            .collect();
        NormalizedTable {
            row_count: records.len(),
            records,
            columns_found: vec![],
            embedded_weights: embedded,
        }
    }

    #[test]
    fn weight_change_reorders_without_touching_records() {
        let mut session = Session::new(table(&[10.0, 40.0, 70.0, 90.0], None));
        let before = session.records().to_vec();

        session.set_weights(WeightVector::new(1.0, 0.0, 0.0, 0.0, 0.0));
        let by_current = session.recompute().unwrap();
        assert_eq!(by_current.clients[0].name(), "client 3");

        session.set_weights(WeightVector::new(0.0, 0.0, 0.0, 0.0, 1.0));
        let by_ease = session.recompute().unwrap();
        assert_eq!(by_ease.clients[0].name(), "client 0");

        assert_eq!(session.records(), before.as_slice());
    }

    #[test]
    fn failed_recompute_reports_error() {
        let mut session = Session::new(table(&[10.0, 40.0, 70.0, 90.0], None));
        session.set_weights(WeightVector::from_array([0.0; 5]));
        assert_eq!(session.recompute().unwrap_err(), ScoringError::ZeroWeight);
    }

    #[test]
    fn embedded_weights_adopted_on_request() {
        let embedded = WeightVector::new(50.0, 0.0, 0.0, 0.0, 50.0);
        let mut session = Session::new(table(&[10.0, 40.0, 70.0, 90.0], Some(embedded)));
        assert_eq!(session.weights(), &WeightVector::default());
        assert!(session.adopt_embedded_weights());
        assert_eq!(session.weights(), &embedded);
    }
}
