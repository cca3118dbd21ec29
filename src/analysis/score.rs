//! Score aggregation: the validity and consistency dimensions plus the
//! weighted overall score.
//!
//! Completeness and uniqueness arrive pre-computed from the missing-value
//! and duplicate passes; this module derives the remaining two dimensions
//! from string-format homogeneity and type/format consistency, then folds
//! all four into the overall score with two extra penalties.

use serde::{Deserialize, Serialize};

use super::{
    duplicates::DuplicateReport,
    infer::{ColumnType, ColumnTypeInfo},
    missing::MissingReport,
    round2,
};
use crate::dataset::{Cell, Dataset};

/// Dimension weights, in the fixed order completeness / uniqueness /
/// validity / consistency.
const WEIGHTS: [f64; 4] = [0.40, 0.30, 0.20, 0.10];

/// Symbols that mark a decorated numeric value.
const NUMBER_SYMBOLS: [char; 6] = ['$', '\u{20ac}', '\u{a3}', ',', '(', ')'];

/// The four quality dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionScores {
    /// Missing-value dimension, weight 0.40.
    pub completeness: f64,
    /// Duplicate/cardinality dimension, weight 0.30.
    pub uniqueness: f64,
    /// String-format homogeneity dimension, weight 0.20.
    pub validity: f64,
    /// Type/format consistency dimension, weight 0.10.
    pub consistency: f64,
}

/// Decorated-vs-plain census for one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatSplit {
    /// Column name.
    pub column: String,
    /// Values carrying currency symbols, commas, or parentheses.
    pub decorated: usize,
    /// Values that coerce to a number directly.
    pub plain: usize,
}

impl FormatSplit {
    /// Whether the column mixes decorated and plain values.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        self.decorated > 0 && self.plain > 0
    }
}

/// Everything the aggregation step produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedScores {
    /// The four dimension scores, each in [0, 100].
    pub scores: DimensionScores,
    /// The weighted, penalized overall score in [0, 100].
    pub overall: f64,
    /// Per-numeric-column decorated/plain census, in header order.
    pub format_splits: Vec<FormatSplit>,
}

/// String value format classes used by the validity dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum TextFormat {
    Numeric,
    Lowercase,
    Uppercase,
    LowercasePhrase,
    TitlecasePhrase,
    Mixed,
}

/// Null-token spellings used by the validity dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum NullToken {
    Empty,
    NullWord,
    NotAvailable,
    Dash,
}

/// Combines the four dimension scores into the overall quality score.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreAggregator;

impl ScoreAggregator {
    /// Create a new aggregator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Derive all four dimensions and the overall score.
    #[must_use]
    pub fn aggregate(
        &self,
        dataset: &Dataset,
        type_infos: &[ColumnTypeInfo],
        missing: &MissingReport,
        duplicates: &DuplicateReport,
    ) -> AggregatedScores {
        let scores = DimensionScores {
            completeness: missing.completeness_score,
            uniqueness: duplicates.uniqueness_score,
            validity: self.validity_score(dataset, type_infos),
            consistency: self.consistency_score(dataset, type_infos),
        };

        let base = scores.completeness * WEIGHTS[0]
            + scores.uniqueness * WEIGHTS[1]
            + scores.validity * WEIGHTS[2]
            + scores.consistency * WEIGHTS[3];

        let columns = dataset.column_count();
        let affected = missing.by_column.iter().filter(|c| c.count > 0).count();
        let missing_columns_penalty = ratio(affected, columns) * 20.0;

        let format_splits = self.format_splits(dataset, type_infos);
        #[allow(clippy::cast_precision_loss)]
        let format_issues_penalty =
            format_splits.iter().filter(|s| s.is_partial()).count() as f64 * 5.0;

        let overall = round2((base - missing_columns_penalty - format_issues_penalty).max(0.0));

        AggregatedScores {
            scores,
            overall,
            format_splits,
        }
    }

    /// Validity: 100 minus 2 points per string column spanning more than
    /// one format class, minus 1 point per column mixing null-token
    /// spellings. Floored at 0.
    #[must_use]
    pub fn validity_score(&self, dataset: &Dataset, type_infos: &[ColumnTypeInfo]) -> f64 {
        let mut points: f64 = 0.0;

        for (header, info) in dataset.headers().iter().zip(type_infos) {
            if info.data_type == ColumnType::String {
                let mut formats: Vec<TextFormat> = Vec::new();
                for cell in dataset.column(header).flatten() {
                    if cell.is_missing() {
                        continue;
                    }
                    if let Some(text) = cell.as_text() {
                        let format = classify_text_format(text.trim());
                        if !formats.contains(&format) {
                            formats.push(format);
                        }
                    }
                }
                if formats.len() > 1 {
                    points += 2.0;
                }
            }

            let mut tokens: Vec<NullToken> = Vec::new();
            for cell in dataset.column(header).flatten() {
                if let Some(token) = cell.as_text().and_then(classify_null_token) {
                    if !tokens.contains(&token) {
                        tokens.push(token);
                    }
                }
            }
            if tokens.len() > 1 {
                points += 1.0;
            }
        }

        round2((100.0 - points).max(0.0))
    }

    /// Consistency: 100 minus the mixed-type column share (as a
    /// percentage) minus 3 points per numeric column mixing decorated and
    /// plain values. Clamped to [0, 100].
    #[must_use]
    pub fn consistency_score(&self, dataset: &Dataset, type_infos: &[ColumnTypeInfo]) -> f64 {
        let columns = dataset.column_count();
        let mixed = type_infos.iter().filter(|t| t.mixed_types).count();
        let mixed_penalty = ratio(mixed, columns) * 100.0;

        #[allow(clippy::cast_precision_loss)]
        let format_penalty = self
            .format_splits(dataset, type_infos)
            .iter()
            .filter(|s| s.is_partial())
            .count() as f64
            * 3.0;

        round2((100.0 - mixed_penalty - format_penalty).clamp(0.0, 100.0))
    }

    /// Census decorated vs plain values for every numeric-dominant column,
    /// in header order.
    #[must_use]
    pub fn format_splits(
        &self,
        dataset: &Dataset,
        type_infos: &[ColumnTypeInfo],
    ) -> Vec<FormatSplit> {
        dataset
            .headers()
            .iter()
            .zip(type_infos)
            .filter(|(_, info)| info.data_type == ColumnType::Number)
            .map(|(header, _)| {
                let mut decorated = 0usize;
                let mut plain = 0usize;
                for cell in dataset.column(header).flatten() {
                    if cell.is_missing() {
                        continue;
                    }
                    if is_decorated_number(cell) {
                        decorated += 1;
                    } else if cell.as_f64().is_some() {
                        plain += 1;
                    }
                }
                FormatSplit {
                    column: header.clone(),
                    decorated,
                    plain,
                }
            })
            .collect()
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

/// A text value carrying currency symbols, commas, or parentheses that
/// still denotes a number once the symbols are stripped.
fn is_decorated_number(cell: &Cell) -> bool {
    let Some(text) = cell.as_text() else {
        return false;
    };
    let trimmed = text.trim();
    if !trimmed.contains(NUMBER_SYMBOLS) {
        return false;
    }
    let stripped: String = trimmed
        .chars()
        .filter(|c| !NUMBER_SYMBOLS.contains(c) && !c.is_whitespace())
        .collect();
    !stripped.is_empty() && stripped.parse::<f64>().is_ok()
}

fn classify_text_format(text: &str) -> TextFormat {
    if text.parse::<f64>().map(|v| v.is_finite()).unwrap_or(false) {
        return TextFormat::Numeric;
    }

    let has_space = text.contains(char::is_whitespace);
    if !has_space && !text.is_empty() && text.chars().all(|c| c.is_alphabetic() && c.is_lowercase())
    {
        return TextFormat::Lowercase;
    }
    if !has_space && !text.is_empty() && text.chars().all(|c| c.is_alphabetic() && c.is_uppercase())
    {
        return TextFormat::Uppercase;
    }
    if has_space
        && text
            .chars()
            .all(|c| c.is_whitespace() || (c.is_alphabetic() && c.is_lowercase()))
    {
        return TextFormat::LowercasePhrase;
    }
    if !text.is_empty() && text.split_whitespace().all(is_titlecase_word) {
        return TextFormat::TitlecasePhrase;
    }
    TextFormat::Mixed
}

fn is_titlecase_word(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => chars.all(|c| c.is_alphabetic() && c.is_lowercase()),
        _ => false,
    }
}

fn classify_null_token(text: &str) -> Option<NullToken> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Some(NullToken::Empty)
    } else if trimmed.eq_ignore_ascii_case("null") {
        Some(NullToken::NullWord)
    } else if trimmed.eq_ignore_ascii_case("n/a") {
        Some(NullToken::NotAvailable)
    } else if trimmed == "-" {
        Some(NullToken::Dash)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{
        duplicates::DuplicateDetector, infer::TypeInferencer, missing::MissingValueAnalyzer,
    };

    fn aggregate(dataset: &Dataset) -> AggregatedScores {
        let type_infos = TypeInferencer::new().infer(dataset);
        let missing = MissingValueAnalyzer::new().analyze(dataset);
        let duplicates = DuplicateDetector::new().detect(dataset);
        ScoreAggregator::new().aggregate(dataset, &type_infos, &missing, &duplicates)
    }

    #[test]
    fn test_clean_dataset_scores_100() {
        let dataset = Dataset::from_csv_str("id,name\n7,ana\n8,bruno\n9,carla\n").unwrap();
        let result = aggregate(&dataset);
        assert!((result.scores.completeness - 100.0).abs() < 1e-9);
        assert!((result.scores.uniqueness - 100.0).abs() < 1e-9);
        assert!((result.scores.validity - 100.0).abs() < 1e-9);
        assert!((result.scores.consistency - 100.0).abs() < 1e-9);
        assert!((result.overall - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_validity_penalizes_mixed_formats() {
        // "ana" is lowercase, "BRUNO" uppercase: one string column with
        // two format classes loses 2 points.
        let dataset = Dataset::from_csv_str("name\nana\nBRUNO\ncarla\n").unwrap();
        let type_infos = TypeInferencer::new().infer(&dataset);
        let validity = ScoreAggregator::new().validity_score(&dataset, &type_infos);
        assert!((validity - 98.0).abs() < 1e-9);
    }

    #[test]
    fn test_validity_penalizes_mixed_null_tokens() {
        let dataset = Dataset::from_csv_str("a\nN/A\nx\n-\ny\n").unwrap();
        let type_infos = TypeInferencer::new().infer(&dataset);
        let validity = ScoreAggregator::new().validity_score(&dataset, &type_infos);
        // 2 for the format mix (uppercase-ish tokens vs lowercase) plus 1
        // for mixing "N/A" with "-".
        assert!(validity < 100.0);
        let homogeneous = Dataset::from_csv_str("a\nx\ny\nz\n").unwrap();
        let infos = TypeInferencer::new().infer(&homogeneous);
        assert!(
            (ScoreAggregator::new().validity_score(&homogeneous, &infos) - 100.0).abs() < 1e-9
        );
    }

    #[test]
    fn test_consistency_penalizes_mixed_types() {
        // One of two columns mixes numbers and text: 100 - 50 = 50.
        let dataset = Dataset::from_csv_str("a,b\n1,x\ntwo,y\n3,z\n4,w\n").unwrap();
        let type_infos = TypeInferencer::new().infer(&dataset);
        let consistency = ScoreAggregator::new().consistency_score(&dataset, &type_infos);
        assert!((consistency - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_format_split_census() {
        let dataset =
            Dataset::from_csv_str("price\n100\n$1,200\n300\n400\n").unwrap();
        let type_infos = TypeInferencer::new().infer(&dataset);
        let splits = ScoreAggregator::new().format_splits(&dataset, &type_infos);
        assert_eq!(splits.len(), 1);
        assert_eq!(splits[0].decorated, 1);
        assert_eq!(splits[0].plain, 3);
        assert!(splits[0].is_partial());
    }

    #[test]
    fn test_partial_split_hits_consistency_and_overall() {
        let dataset =
            Dataset::from_csv_str("price\n100\n$1,200\n300\n400\n").unwrap();
        let result = aggregate(&dataset);
        // The split column mixes number and string cells, so consistency
        // takes both the mixed-type share (one of one column) and the
        // format penalty; the overall score also loses the flat 5 points.
        assert!(result.scores.consistency < 100.0);
        assert!(result.overall < result.scores.completeness);
    }

    #[test]
    fn test_weighted_base() {
        // Uniform dimension scores collapse to the same overall score.
        assert!((WEIGHTS.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_columns_penalty() {
        // One of two columns has a missing cell: base loses
        // (1/2) * 20 = 10 on top of the completeness dimension drop.
        let dataset = Dataset::from_csv_str("a,b\n1,2\n3,\n5,6\n7,8\n").unwrap();
        let result = aggregate(&dataset);
        let base = result.scores.completeness * 0.4
            + result.scores.uniqueness * 0.3
            + result.scores.validity * 0.2
            + result.scores.consistency * 0.1;
        assert!((result.overall - round2((base - 10.0).max(0.0))).abs() < 1e-9);
    }

    #[test]
    fn test_scores_stay_in_bounds() {
        let dataset = Dataset::from_csv_str("a,b\n,\n,\n,\n").unwrap();
        let result = aggregate(&dataset);
        for score in [
            result.scores.completeness,
            result.scores.uniqueness,
            result.scores.validity,
            result.scores.consistency,
            result.overall,
        ] {
            assert!((0.0..=100.0).contains(&score));
        }
    }
}
