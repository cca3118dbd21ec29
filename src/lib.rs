//! calidad - Tabular Dataset Quality Assessment in Pure Rust
//!
//! Grades a tabular dataset (headers plus row records of dynamically-typed
//! cells) across four weighted dimensions and produces a reproducible
//! quality report: per-column type inference, a missing-value census,
//! duplicate-row detection, descriptive statistics with IQR outliers, and
//! a deterministic, ordered issue list.
//!
//! # Design Principles
//!
//! 1. **Deterministic** - identical input yields byte-identical reports;
//!    issue order is a fixed contract
//! 2. **Total** - the engine never fails for a structurally valid dataset;
//!    degenerate inputs produce defined sentinel outputs
//! 3. **Pure core** - analysis is a synchronous, side-effect-free pass
//!    over an immutable snapshot; ingestion, rendering, persistence, and
//!    narration live at the edges
//!
//! # Quick Start
//!
//! ```
//! use calidad::{Dataset, QualityAnalyzer};
//!
//! let dataset = Dataset::from_csv_str("id,age\n1,30\n2,\n1,30\n").unwrap();
//! let analysis = QualityAnalyzer::new().analyze(&dataset);
//!
//! println!("score: {:.1}", analysis.overall_score);
//! for issue in &analysis.issues {
//!     println!("[{}] {}", issue.severity, issue.description);
//! }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
// Allow common test patterns
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::cast_lossless,
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::unreadable_literal
    )
)]
// Allow some pedantic lints for cleaner code
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::module_name_repetitions)]

pub mod analysis;
/// CLI module for command-line interface
#[cfg(feature = "cli")]
pub mod cli;
pub mod dataset;
pub mod error;
pub mod explain;
pub mod history;
pub mod insight;
pub mod report;

// Re-exports for convenience
pub use analysis::{
    AnalysisSummary, ColumnProfile, ColumnStatistics, ColumnType, ColumnTypeInfo,
    DimensionScores, DuplicateDetector, DuplicateReport, Issue, IssueGenerator, IssueKind,
    MissingReport, MissingValueAnalyzer, Outlier, OutlierDetector, OutlierKind, OutlierReport,
    QualityAnalysis, QualityAnalyzer, ScoreAggregator, Severity, StatisticsCalculator,
    TypeInferencer,
};
pub use dataset::{Cell, Dataset};
pub use error::{Error, Result};
pub use explain::{explain, Explanation, IssueExplanation, Remediation};
pub use history::{ScoreHistory, ScoreSnapshot};
pub use insight::{generate_insight, template_insight, NarrativeInsight, Narrator, Readiness};
pub use report::{render, render_text, ReportFormat};
