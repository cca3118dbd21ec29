//! Duplicate-row detection and column cardinality.
//!
//! Rows are grouped by a canonical fingerprint: the row's values are
//! projected across all headers, serialized to deterministic tokens,
//! **sorted**, and joined. The first row in each group is the original;
//! every later row is reported as a duplicate of it.
//!
//! Because the tokens are sorted before joining, the fingerprint is
//! insensitive to which column a value came from: two rows holding the
//! same multiset of values in different columns collapse into one group.
//! This is long-standing observed behavior kept for output parity — see
//! the pinned `fingerprint_ignores_column_assignment` test before
//! changing it.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::{round1, round2};
use crate::dataset::{Cell, Dataset};

/// Ratio below which a column's cardinality starts to penalize the
/// uniqueness score.
const CARDINALITY_FLOOR: f64 = 0.8;

/// One detected duplicate row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateEntry {
    /// Index of the first row in the group. Always less than
    /// `duplicate_row`.
    pub original_row: usize,
    /// Index of the duplicated row.
    pub duplicate_row: usize,
    /// The duplicated row's record.
    pub data: HashMap<String, Cell>,
}

/// Duplicate-detection report with the uniqueness score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateReport {
    /// Number of duplicate rows (group originals are not counted).
    pub count: usize,
    /// Duplicate rows as a percentage of all rows, one decimal.
    pub percentage: f64,
    /// The duplicates, ascending by `duplicate_row`.
    pub duplicates: Vec<DuplicateEntry>,
    /// Uniqueness score in [0, 100].
    pub uniqueness_score: f64,
}

/// Cardinality census for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnCardinality {
    /// Column name.
    pub column: String,
    /// Distinct non-missing values.
    pub unique_count: usize,
    /// Non-missing values.
    pub non_missing: usize,
    /// `unique_count / non_missing`; 1.0 when the column has no
    /// non-missing values.
    pub ratio: f64,
}

/// Finds duplicate rows and low-cardinality columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct DuplicateDetector;

impl DuplicateDetector {
    /// Create a new detector.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Detect duplicate rows and derive the uniqueness score.
    #[must_use]
    pub fn detect(&self, dataset: &Dataset) -> DuplicateReport {
        let rows = dataset.row_count();
        let mut first_seen: HashMap<String, usize> = HashMap::new();
        let mut duplicates = Vec::new();

        for index in 0..rows {
            let fingerprint = self.fingerprint(dataset, index);
            match first_seen.get(&fingerprint) {
                Some(&original_row) => duplicates.push(DuplicateEntry {
                    original_row,
                    duplicate_row: index,
                    data: dataset.rows()[index].clone(),
                }),
                None => {
                    first_seen.insert(fingerprint, index);
                }
            }
        }

        let count = duplicates.len();
        let duplicate_pct = if rows == 0 {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            let pct = count as f64 / rows as f64 * 100.0;
            pct
        };

        let cardinality_penalty: f64 = self
            .column_cardinality(dataset)
            .iter()
            .filter(|c| c.ratio < CARDINALITY_FLOOR)
            .map(|c| (CARDINALITY_FLOOR - c.ratio) * 10.0)
            .sum();

        let uniqueness_score = round2((100.0 - duplicate_pct - cardinality_penalty).max(0.0));

        DuplicateReport {
            count,
            percentage: round1(duplicate_pct),
            duplicates,
            uniqueness_score,
        }
    }

    /// Census distinct non-missing values per column, in header order.
    #[must_use]
    pub fn column_cardinality(&self, dataset: &Dataset) -> Vec<ColumnCardinality> {
        dataset
            .headers()
            .iter()
            .map(|header| {
                let mut seen: HashSet<String> = HashSet::new();
                let mut non_missing = 0usize;
                for cell in dataset.column(header).flatten() {
                    if cell.is_missing() {
                        continue;
                    }
                    non_missing += 1;
                    seen.insert(cell.fingerprint_token());
                }
                let ratio = if non_missing == 0 {
                    1.0
                } else {
                    #[allow(clippy::cast_precision_loss)]
                    let r = seen.len() as f64 / non_missing as f64;
                    r
                };
                ColumnCardinality {
                    column: header.clone(),
                    unique_count: seen.len(),
                    non_missing,
                    ratio,
                }
            })
            .collect()
    }

    /// The canonical fingerprint for one row: sorted value tokens across
    /// all headers, absent keys included as nulls.
    fn fingerprint(&self, dataset: &Dataset, row: usize) -> String {
        let mut tokens: Vec<String> = dataset
            .headers()
            .iter()
            .map(|header| {
                dataset
                    .value(row, header)
                    .map_or_else(|| "null".to_string(), Cell::fingerprint_token)
            })
            .collect();
        tokens.sort_unstable();
        tokens.join("|")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_identical_rows() {
        let dataset = Dataset::from_csv_str("id,age\n1,30\n2,25\n1,30\n").unwrap();
        let report = DuplicateDetector::new().detect(&dataset);
        assert_eq!(report.count, 1);
        assert!((report.percentage - 33.3).abs() < 1e-9);
        assert_eq!(report.duplicates[0].original_row, 0);
        assert_eq!(report.duplicates[0].duplicate_row, 2);
    }

    #[test]
    fn test_original_always_precedes_duplicate() {
        let dataset = Dataset::from_csv_str("x\na\nb\na\nb\na\n").unwrap();
        let report = DuplicateDetector::new().detect(&dataset);
        assert_eq!(report.count, 3);
        for entry in &report.duplicates {
            assert!(entry.original_row < entry.duplicate_row);
        }
    }

    #[test]
    fn test_fingerprint_ignores_column_assignment() {
        // Pinned quirk: the sorted fingerprint conflates rows holding the
        // same values in swapped columns.
        let dataset = Dataset::from_json_str(r#"[{"a": 1, "b": 2}, {"a": 2, "b": 1}]"#).unwrap();
        let report = DuplicateDetector::new().detect(&dataset);
        assert_eq!(report.count, 1);
        assert_eq!(report.duplicates[0].original_row, 0);
        assert_eq!(report.duplicates[0].duplicate_row, 1);
    }

    #[test]
    fn test_text_and_number_do_not_collide() {
        let dataset = Dataset::from_json_str(r#"[{"a": 1}, {"a": "1"}]"#).unwrap();
        let report = DuplicateDetector::new().detect(&dataset);
        assert_eq!(report.count, 0);
    }

    #[test]
    fn test_no_duplicates_scores_100() {
        let dataset = Dataset::from_csv_str("a,b\n1,x\n2,y\n3,z\n").unwrap();
        let report = DuplicateDetector::new().detect(&dataset);
        assert_eq!(report.count, 0);
        assert!((report.uniqueness_score - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_cardinality_penalty_reduces_score() {
        // Column "a" repeats one value across four rows: ratio 0.25,
        // penalty (0.8 - 0.25) * 10 = 5.5. Column "b" stays unique.
        let dataset = Dataset::from_csv_str("a,b\nk,1\nk,2\nk,3\nk,4\n").unwrap();
        let report = DuplicateDetector::new().detect(&dataset);
        assert_eq!(report.count, 0);
        assert!((report.uniqueness_score - 94.5).abs() < 1e-9);
    }

    #[test]
    fn test_score_floor() {
        let dataset = Dataset::from_csv_str("a\nk\nk\nk\nk\nk\nk\nk\nk\nk\nk\n").unwrap();
        let report = DuplicateDetector::new().detect(&dataset);
        // Nine of ten rows duplicated plus the cardinality penalty: floored.
        assert!(report.uniqueness_score >= 0.0);
        assert!(report.uniqueness_score <= 100.0);
    }

    #[test]
    fn test_column_cardinality() {
        let dataset = Dataset::from_csv_str("a,b\nx,1\nx,2\ny,\n").unwrap();
        let cardinality = DuplicateDetector::new().column_cardinality(&dataset);
        assert_eq!(cardinality[0].column, "a");
        assert_eq!(cardinality[0].unique_count, 2);
        assert_eq!(cardinality[0].non_missing, 3);
        assert_eq!(cardinality[1].unique_count, 2);
        assert_eq!(cardinality[1].non_missing, 2);
        assert!((cardinality[1].ratio - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_dataset() {
        let dataset = Dataset::new(vec!["a".to_string()], vec![]);
        let report = DuplicateDetector::new().detect(&dataset);
        assert_eq!(report.count, 0);
        assert!((report.percentage - 0.0).abs() < 1e-9);
        assert!((report.uniqueness_score - 100.0).abs() < 1e-9);
    }
}
