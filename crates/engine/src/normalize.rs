//! Map an arbitrary uploaded table onto the fixed client schema.
//!
//! Header matching is case-insensitive and ignores surrounding whitespace.
//! Only the seven required columns survive; everything else is dropped.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::NormalizationError;
use crate::model::{ClientRecord, CurrentStatus};
use crate::table::{Cell, RawTable};
use crate::weights::WeightVector;

/// Required logical column names, lowercase, in canonical order.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "client",
    "current client",
    "current work",
    "future work",
    "difficulty dealing with",
    "profitability",
    "ease to distribute",
];

/// Headers as shown in templates and user-facing hints.
pub const DISPLAY_COLUMNS: [&str; 7] = [
    "Client",
    "Current Client",
    "Current Work",
    "Future Work",
    "Difficulty Dealing With",
    "Profitability",
    "Ease to Distribute",
];

// Index into REQUIRED_COLUMNS of the first axis column.
const FIRST_AXIS: usize = 2;

/// Successful normalization: records plus what was seen in the header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedTable {
    pub records: Vec<ClientRecord>,
    pub row_count: usize,
    /// Header labels as found in the upload, in column order.
    pub columns_found: Vec<String>,
    /// Weights from a spreadsheet metadata row above the header, if every
    /// axis column had a number there.
    pub embedded_weights: Option<WeightVector>,
}

/// Column positions of the seven required fields.
#[derive(Debug, Clone, Copy)]
struct ColumnMap([usize; 7]);

impl ColumnMap {
    fn resolve(labels: &[String]) -> Result<Self, NormalizationError> {
        let mut by_key: HashMap<String, usize> = HashMap::new();
        for (idx, label) in labels.iter().enumerate() {
            let key = label.trim().to_lowercase();
            if key.is_empty() {
                continue;
            }
            if by_key.contains_key(&key) {
                log::warn!("duplicate column '{label}' at position {}; using the first one", idx + 1);
                continue;
            }
            by_key.insert(key, idx);
        }

        let mut indices = [0usize; 7];
        let mut missing = Vec::new();
        for (slot, name) in REQUIRED_COLUMNS.iter().enumerate() {
            match by_key.get(*name) {
                Some(&idx) => indices[slot] = idx,
                None => missing.push(name.to_string()),
            }
        }

        if !missing.is_empty() {
            return Err(NormalizationError::MissingColumns {
                missing,
                found: labels.to_vec(),
            });
        }
        Ok(Self(indices))
    }

    fn axis_columns(&self) -> &[usize] {
        &self.0[FIRST_AXIS..]
    }
}

/// Validate headers and project every row onto [`ClientRecord`].
pub fn normalize(table: &RawTable) -> Result<NormalizedTable, NormalizationError> {
    let labels = table.header_labels();
    let columns = ColumnMap::resolve(&labels)?;

    let records = (0..table.rows.len())
        .map(|row| record_from_row(table, row, &columns, &labels))
        .collect::<Result<Vec<_>, _>>()?;

    let embedded_weights = table
        .metadata_row
        .as_deref()
        .and_then(|meta| weights_from_metadata(meta, &columns));

    log::debug!(
        "normalized {} rows from {} columns (embedded weights: {})",
        records.len(),
        labels.len(),
        embedded_weights.is_some()
    );

    Ok(NormalizedTable {
        row_count: records.len(),
        records,
        columns_found: labels,
        embedded_weights,
    })
}

fn record_from_row(
    table: &RawTable,
    row: usize,
    columns: &ColumnMap,
    labels: &[String],
) -> Result<ClientRecord, NormalizationError> {
    let [name_col, current_col, ..] = columns.0;

    let mut axes = [0.0f64; 5];
    for (slot, &col) in axes.iter_mut().zip(columns.axis_columns()) {
        *slot = axis_value(table.cell(row, col), row, &labels[col])?;
    }
    let [current_work, future_work, difficulty, profitability, ease_to_distribute] = axes;

    Ok(ClientRecord {
        name: table.cell(row, name_col).to_text().trim().to_string(),
        current_client: CurrentStatus::parse(&table.cell(row, current_col).to_text()),
        current_work,
        future_work,
        difficulty,
        profitability,
        ease_to_distribute,
    })
}

fn axis_value(cell: &Cell, row: usize, label: &str) -> Result<f64, NormalizationError> {
    let value = match cell {
        Cell::Number(n) => Some(*n),
        Cell::Text(s) => s.trim().parse::<f64>().ok(),
        Cell::Empty | Cell::Bool(_) => None,
    };
    match value {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(NormalizationError::parse(format!(
            "data row {}, column '{}': cannot read '{}' as a number",
            row + 1,
            label.trim(),
            cell.to_text()
        ))),
    }
}

fn weights_from_metadata(meta: &[Cell], columns: &ColumnMap) -> Option<WeightVector> {
    let mut values = [0.0f64; 5];
    for (slot, &col) in values.iter_mut().zip(columns.axis_columns()) {
        match meta.get(col) {
            Some(Cell::Number(n)) if n.is_finite() => *slot = *n,
            _ => return None,
        }
    }
    Some(WeightVector::from_array(values))
}
