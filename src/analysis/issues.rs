//! Issue records and the deterministic issue generator.
//!
//! Issues are emitted in a fixed sequence so reports are reproducible
//! byte-for-byte: missing-value issues in header order, the single
//! duplicate-rows issue, mixed-type issues, numeric-format-split issues,
//! then outlier issues. Tests assert the sequence, not just membership.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{
    duplicates::DuplicateReport,
    infer::ColumnTypeInfo,
    missing::MissingReport,
    score::FormatSplit,
    stats::OutlierReport,
};

/// Issue severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational.
    Low,
    /// Worth addressing.
    Medium,
    /// Needs attention before the data is used.
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// The kind of quality issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum IssueKind {
    /// Missing values in a column.
    Missing,
    /// Duplicate rows in the dataset.
    Duplicate,
    /// Mixed value types in a column.
    Inconsistent,
    /// Mixed symbol-decorated and plain numeric values in a column.
    Format,
    /// Outlying numeric values in a column.
    Outlier,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Missing => "missing",
            Self::Duplicate => "duplicate",
            Self::Inconsistent => "inconsistent",
            Self::Format => "format",
            Self::Outlier => "outlier",
        };
        write!(f, "{name}")
    }
}

/// One detected quality issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// What kind of problem this is.
    pub kind: IssueKind,
    /// How bad it is.
    pub severity: Severity,
    /// The affected column, when the issue is column-scoped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    /// Human-readable description.
    pub description: String,
    /// Affected-value count, when meaningful.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    /// Type-inference confidence, for mixed-type issues.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// Produces the ordered issue list from the detector outputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct IssueGenerator;

impl IssueGenerator {
    /// Create a new generator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Generate the issue list. `outliers` runs parallel to `headers`;
    /// columns without statistics carry `None`.
    #[must_use]
    pub fn generate(
        &self,
        headers: &[String],
        missing: &MissingReport,
        duplicates: &DuplicateReport,
        type_infos: &[ColumnTypeInfo],
        format_splits: &[FormatSplit],
        outliers: &[Option<OutlierReport>],
    ) -> Vec<Issue> {
        let mut issues = Vec::new();

        for column in &missing.by_column {
            if column.count == 0 {
                continue;
            }
            issues.push(Issue {
                kind: IssueKind::Missing,
                severity: missing_severity(column.percentage),
                column: Some(column.column.clone()),
                description: format!(
                    "Column '{}' has {} missing values ({}%)",
                    column.column, column.count, column.percentage
                ),
                count: Some(column.count),
                confidence: None,
            });
        }

        if duplicates.count > 0 {
            issues.push(Issue {
                kind: IssueKind::Duplicate,
                severity: Severity::High,
                column: None,
                description: format!(
                    "{} duplicate rows detected ({}%)",
                    duplicates.count, duplicates.percentage
                ),
                count: Some(duplicates.count),
                confidence: None,
            });
        }

        for (header, info) in headers.iter().zip(type_infos) {
            if !info.mixed_types {
                continue;
            }
            let severity = if info.confidence < 0.75 {
                Severity::High
            } else {
                Severity::Medium
            };
            issues.push(Issue {
                kind: IssueKind::Inconsistent,
                severity,
                column: Some(header.clone()),
                description: format!(
                    "Column '{}' mixes value types (dominant: {}, {:.1}% of values)",
                    header,
                    info.data_type.name(),
                    info.confidence * 100.0
                ),
                count: None,
                confidence: Some(info.confidence),
            });
        }

        for split in format_splits {
            if !split.is_partial() {
                continue;
            }
            issues.push(Issue {
                kind: IssueKind::Format,
                severity: Severity::Low,
                column: Some(split.column.clone()),
                description: format!(
                    "Column '{}' mixes symbol-formatted and plain numeric values \
                     ({} formatted, {} plain)",
                    split.column, split.decorated, split.plain
                ),
                count: Some(split.decorated),
                confidence: None,
            });
        }

        for (header, report) in headers.iter().zip(outliers) {
            let Some(report) = report else { continue };
            if report.count == 0 {
                continue;
            }
            issues.push(Issue {
                kind: IssueKind::Outlier,
                severity: outlier_severity(report.percentage),
                column: Some(header.clone()),
                description: format!(
                    "Column '{}' has {} outliers ({}%) outside [{}, {}]",
                    header, report.count, report.percentage, report.lower_bound, report.upper_bound
                ),
                count: Some(report.count),
                confidence: None,
            });
        }

        issues
    }
}

fn missing_severity(percentage: f64) -> Severity {
    if percentage > 50.0 {
        Severity::High
    } else if percentage > 25.0 {
        Severity::High
    } else if percentage > 10.0 {
        Severity::Medium
    } else {
        Severity::Low
    }
}

fn outlier_severity(percentage: f64) -> Severity {
    if percentage > 5.0 {
        Severity::High
    } else if percentage > 2.0 {
        Severity::Medium
    } else {
        Severity::Low
    }
}
