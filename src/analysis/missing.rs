//! Missing-value analysis.
//!
//! A cell is missing when it is null, absent from its row record, empty
//! text, or whitespace-only text. The completeness score penalizes both the
//! volume of missing cells and the breadth of columns they touch.

use serde::{Deserialize, Serialize};

use super::{round1, round2};
use crate::dataset::Dataset;

/// Missing-value census for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMissing {
    /// Column name.
    pub column: String,
    /// Number of missing cells.
    pub count: usize,
    /// Missing cells as a percentage of the row count, one decimal.
    pub percentage: f64,
    /// Row indices of the missing cells, ascending.
    pub positions: Vec<usize>,
}

/// Missing-value census for one row. Only rows with at least one missing
/// cell are reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowMissing {
    /// Row index.
    pub row_index: usize,
    /// Number of missing cells in the row.
    pub missing_count: usize,
    /// Missing cells as a percentage of the column count, one decimal.
    pub percentage: f64,
}

/// Full missing-value report with the completeness score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingReport {
    /// Per-column census, in header order.
    pub by_column: Vec<ColumnMissing>,
    /// Rows containing missing cells, ascending by index.
    pub by_row: Vec<RowMissing>,
    /// Total missing cells across the dataset.
    pub total: usize,
    /// Missing cells as a percentage of all cells, one decimal.
    pub percentage: f64,
    /// Completeness score in [0, 100].
    pub completeness_score: f64,
}

impl MissingReport {
    /// Look up the census for a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnMissing> {
        self.by_column.iter().find(|c| c.column == name)
    }
}

/// Counts missing cells and derives the completeness score.
#[derive(Debug, Clone, Copy, Default)]
pub struct MissingValueAnalyzer;

impl MissingValueAnalyzer {
    /// Create a new analyzer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Analyze the dataset. Never fails; zero-row and zero-column datasets
    /// report 0% missing and a completeness score of 100.
    #[must_use]
    pub fn analyze(&self, dataset: &Dataset) -> MissingReport {
        let rows = dataset.row_count();
        let columns = dataset.column_count();

        let mut by_column = Vec::with_capacity(columns);
        let mut row_counts = vec![0usize; rows];

        for header in dataset.headers() {
            let mut positions = Vec::new();
            for (index, cell) in dataset.column(header).enumerate() {
                let missing = cell.map_or(true, |c| c.is_missing());
                if missing {
                    positions.push(index);
                    row_counts[index] += 1;
                }
            }
            by_column.push(ColumnMissing {
                column: header.clone(),
                count: positions.len(),
                percentage: round1(percent(positions.len(), rows)),
                positions,
            });
        }

        let by_row: Vec<RowMissing> = row_counts
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(row_index, count)| RowMissing {
                row_index,
                missing_count: *count,
                percentage: round1(percent(*count, columns)),
            })
            .collect();

        let total: usize = by_column.iter().map(|c| c.count).sum();
        let overall = percent(total, rows * columns);

        let affected = by_column.iter().filter(|c| c.count > 0).count();
        let breadth_penalty = ratio(affected, columns) * 15.0;
        let completeness_score = round2((100.0 - overall - breadth_penalty).max(0.0));

        MissingReport {
            by_column,
            by_row,
            total,
            percentage: round1(overall),
            completeness_score,
        }
    }
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        #[allow(clippy::cast_precision_loss)]
        let r = part as f64 / whole as f64;
        r
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    ratio(part, whole) * 100.0
}
