//! Jenks natural breaks for one-dimensional data.
//!
//! Fisher's dynamic programme: for every prefix of the sorted data and every
//! class count, keep the partition with the smallest summed squared deviation
//! and the index where its last class starts. Breaks are read back from the
//! end.
//!
//! The returned vector has `n_classes + 1` entries: the minimum, the maximum
//! of each class except the last, and the overall maximum.

use std::collections::BTreeSet;
use std::fmt;

use ordered_float::OrderedFloat;

#[derive(Debug, Clone, PartialEq)]
pub enum JenksError {
    /// Fewer than two classes requested.
    TooFewClasses(usize),
    /// Not enough distinct values to fill every class.
    NotEnoughValues { classes: usize, distinct: usize },
    /// NaN or infinite input.
    NonFinite,
}

impl fmt::Display for JenksError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewClasses(n) => write!(f, "natural breaks need at least 2 classes, got {n}"),
            Self::NotEnoughValues { classes, distinct } => {
                write!(f, "{classes} classes need {classes} distinct values, got {distinct}")
            }
            Self::NonFinite => write!(f, "values must be finite"),
        }
    }
}

impl std::error::Error for JenksError {}

/// Number of distinct values (`-0.0` and `0.0` count once).
pub fn distinct_count(values: &[f64]) -> usize {
    values.iter().map(|v| OrderedFloat(*v)).collect::<BTreeSet<_>>().len()
}

/// Compute `n_classes + 1` natural-breaks boundaries over `values`.
pub fn jenks_breaks(values: &[f64], n_classes: usize) -> Result<Vec<f64>, JenksError> {
    if n_classes < 2 {
        return Err(JenksError::TooFewClasses(n_classes));
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(JenksError::NonFinite);
    }
    let distinct = distinct_count(values);
    if distinct < n_classes {
        return Err(JenksError::NotEnoughValues { classes: n_classes, distinct });
    }

    let mut data = values.to_vec();
    data.sort_by(f64::total_cmp);

    let limits = lower_class_limits(&data, n_classes);
    read_breaks(&data, &limits, n_classes)
        .ok_or(JenksError::NotEnoughValues { classes: n_classes, distinct })
}

/// `limits[l][k]` = 1-based index where the last class starts in the best
/// partition of the first `l` values into `k` classes.
fn lower_class_limits(data: &[f64], n_classes: usize) -> Vec<Vec<usize>> {
    let n = data.len();
    let mut limits = vec![vec![0usize; n_classes + 1]; n + 1];
    let mut variances = vec![vec![0.0f64; n_classes + 1]; n + 1];

    for class in 1..=n_classes {
        limits[1][class] = 1;
        for row in variances.iter_mut().skip(2) {
            row[class] = f64::INFINITY;
        }
    }

    for l in 2..=n {
        let mut sum = 0.0;
        let mut sum_squares = 0.0;
        let mut variance = 0.0;

        for m in 1..=l {
            let lower = l - m + 1;
            let value = data[lower - 1];
            let count = m as f64;
            sum += value;
            sum_squares += value * value;
            variance = sum_squares - (sum * sum) / count;

            let before = lower - 1;
            if before != 0 {
                for class in 2..=n_classes {
                    let candidate = variance + variances[before][class - 1];
                    if variances[l][class] >= candidate {
                        limits[l][class] = lower;
                        variances[l][class] = candidate;
                    }
                }
            }
        }

        limits[l][1] = 1;
        variances[l][1] = variance;
    }

    limits
}

fn read_breaks(data: &[f64], limits: &[Vec<usize>], n_classes: usize) -> Option<Vec<f64>> {
    let n = data.len();
    let mut breaks = vec![0.0; n_classes + 1];
    breaks[0] = data[0];
    breaks[n_classes] = data[n - 1];

    let mut end = n;
    for class in (2..=n_classes).rev() {
        let start = limits[end][class];
        // The previous class must end at or after the first value.
        if start < 2 {
            return None;
        }
        breaks[class - 1] = data[start - 2];
        end = start - 1;
    }
    Some(breaks)
}
