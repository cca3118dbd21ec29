//! Dataset quality analysis.
//!
//! Assesses a tabular [`Dataset`](crate::Dataset) across four weighted
//! dimensions and emits a reproducible report: per-column type inference,
//! a missing-value census, duplicate-row detection, descriptive statistics
//! with IQR outliers, and an ordered issue list.
//!
//! Every pass is a pure function over the immutable input; the analyzer
//! never fails for a structurally valid dataset and never mutates it.
//!
//! # Example
//!
//! ```
//! use calidad::{Dataset, QualityAnalyzer};
//!
//! let dataset = Dataset::from_csv_str("id,age\n1,30\n2,\n1,30\n").unwrap();
//! let analysis = QualityAnalyzer::new().analyze(&dataset);
//!
//! assert_eq!(analysis.duplicates.count, 1);
//! assert!(analysis.overall_score < 100.0);
//! ```

// Statistical computation and internal methods
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::unused_self)]

mod analyzer;
mod duplicates;
mod infer;
mod issues;
mod missing;
mod score;
mod stats;


pub use analyzer::{AnalysisSummary, ColumnProfile, QualityAnalysis, QualityAnalyzer};
pub use duplicates::{ColumnCardinality, DuplicateDetector, DuplicateEntry, DuplicateReport};
pub use infer::{ColumnType, ColumnTypeInfo, TypeInferencer};
pub use issues::{Issue, IssueGenerator, IssueKind, Severity};
pub use missing::{ColumnMissing, MissingReport, MissingValueAnalyzer, RowMissing};
pub use score::{AggregatedScores, DimensionScores, FormatSplit, ScoreAggregator};
pub use stats::{
    ColumnStatistics, Outlier, OutlierDetector, OutlierKind, OutlierReport, StatisticsCalculator,
};

/// Round to one decimal place, for reported percentages.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to two decimal places, for reported scores.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
