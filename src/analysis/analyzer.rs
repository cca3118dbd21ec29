//! The analysis entry point: one synchronous pass over an immutable
//! dataset producing the full [`QualityAnalysis`].
//!
//! The engine never fails for a structurally valid dataset. Zero rows,
//! all-missing columns, and empty numeric columns are defined cases with
//! sentinel outputs, never errors.

use serde::{Deserialize, Serialize};

use super::{
    duplicates::{DuplicateDetector, DuplicateReport},
    infer::{ColumnType, ColumnTypeInfo, TypeInferencer},
    issues::{Issue, IssueGenerator, Severity},
    missing::{MissingReport, MissingValueAnalyzer},
    score::{DimensionScores, ScoreAggregator},
    stats::{ColumnStatistics, OutlierDetector, OutlierReport, StatisticsCalculator},
};
use crate::dataset::Dataset;

/// Everything known about one column, merged across the passes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    /// Column name.
    pub column: String,
    /// Inferred type information.
    pub type_info: ColumnTypeInfo,
    /// Missing cells.
    pub missing_count: usize,
    /// Missing cells as a percentage of rows, one decimal.
    pub missing_percentage: f64,
    /// Distinct non-missing values.
    pub unique_count: usize,
    /// Distinct / non-missing ratio, 1.0 for columns without values.
    pub unique_ratio: f64,
    /// Descriptive statistics; absent unless the column is numeric with at
    /// least one coercible value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<ColumnStatistics>,
    /// Outlier report; absent whenever statistics are.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outliers: Option<OutlierReport>,
}

/// Headline counts for the analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Rows analyzed.
    pub total_rows: usize,
    /// Columns analyzed.
    pub total_columns: usize,
    /// Cells analyzed (`rows * columns`).
    pub total_cells: usize,
    /// Missing cells.
    pub missing_cells: usize,
    /// Duplicate rows.
    pub duplicate_rows: usize,
    /// Columns whose dominant type is numeric.
    pub numeric_columns: usize,
    /// Columns mixing more than one value type.
    pub mixed_type_columns: usize,
    /// Issues detected.
    pub issue_count: usize,
}

/// The complete quality analysis handed to downstream consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityAnalysis {
    /// Weighted overall score in [0, 100].
    pub overall_score: f64,
    /// The four dimension scores.
    pub scores: DimensionScores,
    /// Missing-value report.
    pub missing_values: MissingReport,
    /// Duplicate-row report.
    pub duplicates: DuplicateReport,
    /// Per-column profiles, in header order.
    pub column_stats: Vec<ColumnProfile>,
    /// Detected issues, in the generator's fixed order.
    pub issues: Vec<Issue>,
    /// Headline counts.
    pub summary: AnalysisSummary,
}

impl QualityAnalysis {
    /// Whether any issue was detected.
    #[must_use]
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    /// Issues scoped to a column.
    #[must_use]
    pub fn column_issues(&self, column: &str) -> Vec<&Issue> {
        self.issues
            .iter()
            .filter(|i| i.column.as_deref() == Some(column))
            .collect()
    }

    /// Issues at the given severity.
    #[must_use]
    pub fn issues_at(&self, severity: Severity) -> Vec<&Issue> {
        self.issues.iter().filter(|i| i.severity == severity).collect()
    }

    /// The profile for a column, by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnProfile> {
        self.column_stats.iter().find(|c| c.column == name)
    }
}

/// Runs every analysis pass and assembles the [`QualityAnalysis`].
///
/// # Example
///
/// ```
/// use calidad::{Dataset, QualityAnalyzer};
///
/// let dataset = Dataset::from_csv_str("id,age\n7,30\n8,25\n").unwrap();
/// let analysis = QualityAnalyzer::new().analyze(&dataset);
/// assert!((analysis.overall_score - 100.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct QualityAnalyzer {
    inferencer: TypeInferencer,
    missing: MissingValueAnalyzer,
    duplicates: DuplicateDetector,
    statistics: StatisticsCalculator,
    outliers: OutlierDetector,
    scores: ScoreAggregator,
    issues: IssueGenerator,
}

impl QualityAnalyzer {
    /// Create a new analyzer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyze a dataset. Derives everything fresh; the input is never
    /// mutated.
    #[must_use]
    pub fn analyze(&self, dataset: &Dataset) -> QualityAnalysis {
        let type_infos = self.inferencer.infer(dataset);
        let missing = self.missing.analyze(dataset);
        let duplicates = self.duplicates.detect(dataset);
        let cardinality = self.duplicates.column_cardinality(dataset);

        let mut statistics: Vec<Option<ColumnStatistics>> = Vec::new();
        let mut outlier_reports: Vec<Option<OutlierReport>> = Vec::new();
        for (header, info) in dataset.headers().iter().zip(&type_infos) {
            if info.data_type != ColumnType::Number {
                statistics.push(None);
                outlier_reports.push(None);
                continue;
            }
            let values = self.statistics.numeric_values(dataset.column(header));
            let floats: Vec<f64> = values.iter().map(|(_, v)| *v).collect();
            let stats = self.statistics.compute(&floats);
            let outliers = stats
                .as_ref()
                .map(|stats| self.outliers.detect(&values, stats));
            statistics.push(stats);
            outlier_reports.push(outliers);
        }

        let aggregated = self
            .scores
            .aggregate(dataset, &type_infos, &missing, &duplicates);

        let issues = self.issues.generate(
            dataset.headers(),
            &missing,
            &duplicates,
            &type_infos,
            &aggregated.format_splits,
            &outlier_reports,
        );

        let column_stats: Vec<ColumnProfile> = dataset
            .headers()
            .iter()
            .enumerate()
            .map(|(i, header)| ColumnProfile {
                column: header.clone(),
                type_info: type_infos[i].clone(),
                missing_count: missing.by_column[i].count,
                missing_percentage: missing.by_column[i].percentage,
                unique_count: cardinality[i].unique_count,
                unique_ratio: cardinality[i].ratio,
                statistics: statistics[i].clone(),
                outliers: outlier_reports[i].clone(),
            })
            .collect();

        let summary = AnalysisSummary {
            total_rows: dataset.row_count(),
            total_columns: dataset.column_count(),
            total_cells: dataset.row_count() * dataset.column_count(),
            missing_cells: missing.total,
            duplicate_rows: duplicates.count,
            numeric_columns: type_infos
                .iter()
                .filter(|t| t.data_type == ColumnType::Number)
                .count(),
            mixed_type_columns: type_infos.iter().filter(|t| t.mixed_types).count(),
            issue_count: issues.len(),
        };

        QualityAnalysis {
            overall_score: aggregated.overall,
            scores: aggregated.scores,
            missing_values: missing,
            duplicates,
            column_stats,
            issues,
            summary,
        }
    }
}
