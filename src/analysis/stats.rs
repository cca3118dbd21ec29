//! Descriptive statistics and IQR outlier detection for numeric columns.
//!
//! Statistics use the population formulas (divide by N) and a
//! non-interpolated quartile index: `sorted[floor(N * p)]`. Both are part
//! of the output contract and must not be swapped for sample variance or
//! interpolating quantiles.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::round1;
use crate::dataset::Cell;

/// Descriptive statistics for one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStatistics {
    /// Number of coercible numeric values.
    pub count: usize,
    /// Minimum.
    pub min: f64,
    /// Maximum.
    pub max: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// Median, `sorted[floor(N * 0.5)]`.
    pub median: f64,
    /// Most frequent value; frequency ties go to the value seen first.
    pub mode: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// Population variance.
    pub variance: f64,
    /// First quartile, `sorted[floor(N * 0.25)]`.
    pub q1: f64,
    /// Second quartile; equals the median.
    pub q2: f64,
    /// Third quartile, `sorted[floor(N * 0.75)]`.
    pub q3: f64,
    /// `max - min`.
    pub range: f64,
}

impl ColumnStatistics {
    /// Interquartile range.
    #[must_use]
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Lower outlier bound, `q1 - 1.5 * iqr`.
    #[must_use]
    pub fn lower_bound(&self) -> f64 {
        self.q1 - 1.5 * self.iqr()
    }

    /// Upper outlier bound, `q3 + 1.5 * iqr`.
    #[must_use]
    pub fn upper_bound(&self) -> f64 {
        self.q3 + 1.5 * self.iqr()
    }
}

/// Computes descriptive statistics for numeric columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatisticsCalculator;

impl StatisticsCalculator {
    /// Create a new calculator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Collect the coercible numeric values of a column with their row
    /// indices, in row order. Values that fail coercion are discarded.
    pub fn numeric_values<'a>(
        &self,
        cells: impl Iterator<Item = Option<&'a Cell>>,
    ) -> Vec<(usize, f64)> {
        cells
            .enumerate()
            .filter_map(|(index, cell)| {
                cell.filter(|c| !c.is_missing())
                    .and_then(Cell::as_f64)
                    .map(|value| (index, value))
            })
            .collect()
    }

    /// Compute statistics over the given values (in encounter order).
    /// Returns `None` when there are no values — a defined "unavailable"
    /// result, not an error.
    #[must_use]
    pub fn compute(&self, values: &[f64]) -> Option<ColumnStatistics> {
        if values.is_empty() {
            return None;
        }

        let n = values.len();
        #[allow(clippy::cast_precision_loss)]
        let n_f = n as f64;

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let min = sorted[0];
        let max = sorted[n - 1];
        let mean = values.iter().sum::<f64>() / n_f;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n_f;
        let std_dev = variance.sqrt();

        let q1 = sorted[quartile_index(n, 0.25)];
        let q2 = sorted[quartile_index(n, 0.5)];
        let q3 = sorted[quartile_index(n, 0.75)];

        Some(ColumnStatistics {
            count: n,
            min,
            max,
            mean,
            median: q2,
            mode: mode(values),
            std_dev,
            variance,
            q1,
            q2,
            q3,
            range: max - min,
        })
    }
}

/// `floor(N * p)`, clamped into the slice.
fn quartile_index(n: usize, p: f64) -> usize {
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let index = (n as f64 * p).floor() as usize;
    index.min(n - 1)
}

/// Highest-frequency value; ties resolve to the value encountered first.
fn mode(values: &[f64]) -> f64 {
    let mut tallies: HashMap<u64, (usize, usize)> = HashMap::new();
    for (position, value) in values.iter().enumerate() {
        let entry = tallies.entry(value.to_bits()).or_insert((0, position));
        entry.0 += 1;
    }

    let mut best = (0usize, usize::MAX, 0u64);
    for (bits, (count, first)) in tallies {
        if count > best.0 || (count == best.0 && first < best.1) {
            best = (count, first, bits);
        }
    }
    f64::from_bits(best.2)
}

/// Which side of the bounds an outlier fell on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutlierKind {
    /// Below the lower bound.
    Low,
    /// Above the upper bound.
    High,
}

/// One outlying value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outlier {
    /// Row index of the value.
    pub index: usize,
    /// The value.
    pub value: f64,
    /// Which bound it crossed.
    pub kind: OutlierKind,
}

/// IQR outlier report for one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierReport {
    /// The outliers, in row order.
    pub outliers: Vec<Outlier>,
    /// Number of outliers.
    pub count: usize,
    /// Outliers as a percentage of the column's numeric values, one
    /// decimal.
    pub percentage: f64,
    /// `q1 - 1.5 * iqr`.
    pub lower_bound: f64,
    /// `q3 + 1.5 * iqr`.
    pub upper_bound: f64,
}

/// Flags values strictly outside the IQR fences.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutlierDetector;

impl OutlierDetector {
    /// Create a new detector.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Detect outliers among `values` using the column's statistics.
    /// A value exactly on a bound is not an outlier.
    #[must_use]
    pub fn detect(&self, values: &[(usize, f64)], stats: &ColumnStatistics) -> OutlierReport {
        let lower = stats.lower_bound();
        let upper = stats.upper_bound();

        let outliers: Vec<Outlier> = values
            .iter()
            .filter_map(|&(index, value)| {
                if value < lower {
                    Some(Outlier {
                        index,
                        value,
                        kind: OutlierKind::Low,
                    })
                } else if value > upper {
                    Some(Outlier {
                        index,
                        value,
                        kind: OutlierKind::High,
                    })
                } else {
                    None
                }
            })
            .collect();

        let count = outliers.len();
        let percentage = if values.is_empty() {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            let pct = count as f64 / values.len() as f64 * 100.0;
            round1(pct)
        };

        OutlierReport {
            outliers,
            count,
            percentage,
            lower_bound: lower,
            upper_bound: upper,
        }
    }
}
