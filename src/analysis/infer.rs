//! Column type inference.
//!
//! Classifies every non-missing cell through a fixed predicate chain and
//! reports the dominant type per column with a confidence figure. The chain
//! order is part of the output contract: boolean wins over number (so the
//! text tokens `"1"` and `"0"` read as booleans), number wins over date,
//! and anything else is a string.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dataset::{Cell, Dataset};

/// Date formats a text value may match, tried in order. A match must also
/// resolve to a real calendar date.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%d-%m-%Y"];

/// Boolean text tokens, compared case-insensitively.
const BOOLEAN_TOKENS: [&str; 6] = ["true", "false", "yes", "no", "1", "0"];

/// The inferred type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Column has no non-missing values.
    Empty,
    /// Numeric values dominate.
    Number,
    /// Free-form text dominates.
    String,
    /// Boolean values dominate.
    Boolean,
    /// Calendar dates dominate.
    Date,
}

impl ColumnType {
    /// Human-readable name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Number => "number",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Date => "date",
        }
    }
}

/// Tie-break order for dominant-type selection: the first type in this
/// sequence reaching the maximum tally wins.
const DOMINANCE_ORDER: [ColumnType; 4] = [
    ColumnType::Number,
    ColumnType::String,
    ColumnType::Boolean,
    ColumnType::Date,
];

/// Per-column inference result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnTypeInfo {
    /// The dominant type.
    pub data_type: ColumnType,
    /// Fraction of non-missing values matching the dominant type, in [0, 1].
    pub confidence: f64,
    /// Whether the column contains at least one missing cell.
    pub nullable: bool,
    /// Whether more than one type occurs among the non-missing values.
    pub mixed_types: bool,
}

impl ColumnTypeInfo {
    fn empty() -> Self {
        Self {
            data_type: ColumnType::Empty,
            confidence: 1.0,
            nullable: true,
            mixed_types: false,
        }
    }
}

/// Infers the dominant value type of each column.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeInferencer;

impl TypeInferencer {
    /// Create a new inferencer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Infer every column, returned in header order.
    #[must_use]
    pub fn infer(&self, dataset: &Dataset) -> Vec<ColumnTypeInfo> {
        dataset
            .headers()
            .iter()
            .map(|header| self.infer_column(dataset.column(header)))
            .collect()
    }

    /// Infer a single column from its cells; `None` marks an absent key.
    pub fn infer_column<'a>(
        &self,
        cells: impl Iterator<Item = Option<&'a Cell>>,
    ) -> ColumnTypeInfo {
        let mut tallies: [(ColumnType, usize); 4] = [
            (ColumnType::Number, 0),
            (ColumnType::String, 0),
            (ColumnType::Boolean, 0),
            (ColumnType::Date, 0),
        ];
        let mut total = 0usize;
        let mut missing = 0usize;

        for cell in cells {
            match cell {
                Some(cell) if !cell.is_missing() => {
                    let ty = classify(cell);
                    for slot in &mut tallies {
                        if slot.0 == ty {
                            slot.1 += 1;
                        }
                    }
                    total += 1;
                }
                _ => missing += 1,
            }
        }

        if total == 0 {
            return ColumnTypeInfo::empty();
        }

        // First maximum wins, in DOMINANCE_ORDER.
        let max = tallies.iter().map(|(_, n)| *n).max().unwrap_or(0);
        let dominant = DOMINANCE_ORDER
            .iter()
            .find(|ty| tallies.iter().any(|(t, n)| t == *ty && *n == max))
            .copied()
            .unwrap_or(ColumnType::String);

        #[allow(clippy::cast_precision_loss)]
        let confidence = max as f64 / total as f64;
        let observed = tallies.iter().filter(|(_, n)| *n > 0).count();

        ColumnTypeInfo {
            data_type: dominant,
            confidence,
            nullable: missing > 0,
            mixed_types: observed > 1,
        }
    }
}

/// Classify one non-missing cell: boolean, then number, then date, then
/// string.
fn classify(cell: &Cell) -> ColumnType {
    match cell {
        Cell::Boolean(_) => ColumnType::Boolean,
        Cell::Number(_) => ColumnType::Number,
        Cell::Text(s) => {
            let token = s.trim();
            if is_boolean_token(token) {
                ColumnType::Boolean
            } else if token
                .parse::<f64>()
                .map(|v| v.is_finite())
                .unwrap_or(false)
            {
                ColumnType::Number
            } else if is_calendar_date(token) {
                ColumnType::Date
            } else {
                ColumnType::String
            }
        }
        // Missing cells are filtered out before classification.
        Cell::Null => ColumnType::String,
    }
}

fn is_boolean_token(token: &str) -> bool {
    BOOLEAN_TOKENS
        .iter()
        .any(|candidate| token.eq_ignore_ascii_case(candidate))
}

fn is_calendar_date(token: &str) -> bool {
    DATE_FORMATS
        .iter()
        .any(|format| NaiveDate::parse_from_str(token, format).is_ok())
}
