//! Human-readable explanations and remediation templates.
//!
//! A pure function from the analysis outputs to reader-facing text: one
//! entry per issue, each with a headline, a longer explanation, and a
//! remediation suggestion including an illustrative SQL snippet. No side
//! effects; callers decide where the text goes.

use serde::{Deserialize, Serialize};

use crate::analysis::{ColumnProfile, Issue, IssueKind};

/// Placeholder table name used in the SQL snippets.
const TABLE: &str = "dataset";

/// A remediation suggestion for one issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Remediation {
    /// What to do about the issue.
    pub guidance: String,
    /// An illustrative SQL snippet for inspecting or fixing the data.
    pub sql: String,
}

/// Explanation of a single issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueExplanation {
    /// One-line headline.
    pub headline: String,
    /// Longer explanation of what was found and why it matters.
    pub detail: String,
    /// Suggested remediation.
    pub remediation: Remediation,
}

/// All issue explanations for one analysis, in issue order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    /// One entry per issue, preserving the issue list's order.
    pub entries: Vec<IssueExplanation>,
}

impl Explanation {
    /// Render the explanation as plain text.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (i, entry) in self.entries.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, entry.headline));
            out.push_str(&format!("   {}\n", entry.detail));
            out.push_str(&format!("   Suggestion: {}\n", entry.remediation.guidance));
            out.push_str(&format!("   SQL: {}\n", entry.remediation.sql));
        }
        out
    }
}

/// Explain every issue. Pure: depends only on the inputs.
#[must_use]
pub fn explain(issues: &[Issue], columns: &[ColumnProfile]) -> Explanation {
    let entries = issues
        .iter()
        .map(|issue| explain_issue(issue, columns))
        .collect();
    Explanation { entries }
}

fn explain_issue(issue: &Issue, columns: &[ColumnProfile]) -> IssueExplanation {
    let column = issue.column.as_deref().unwrap_or("");
    match issue.kind {
        IssueKind::Missing => IssueExplanation {
            headline: format!("Missing values in '{column}'"),
            detail: format!(
                "{} Rows without a value weaken any aggregate computed over \
                 this column and can silently shrink joins.",
                issue.description
            ),
            remediation: Remediation {
                guidance: format!(
                    "Inspect the affected rows, then either backfill \
                     '{column}' from the source system or exclude the rows."
                ),
                sql: format!(
                    "SELECT * FROM {TABLE} WHERE {column} IS NULL OR TRIM(CAST({column} AS TEXT)) = '';"
                ),
            },
        },
        IssueKind::Duplicate => IssueExplanation {
            headline: "Duplicate rows".to_string(),
            detail: format!(
                "{} Duplicates inflate counts and averages computed over the \
                 table.",
                issue.description
            ),
            remediation: Remediation {
                guidance: "Deduplicate on the full column list, keeping the first occurrence."
                    .to_string(),
                sql: format!(
                    "SELECT {cols}, COUNT(*) AS copies FROM {TABLE} GROUP BY {cols} HAVING COUNT(*) > 1;",
                    cols = column_list(columns)
                ),
            },
        },
        IssueKind::Inconsistent => IssueExplanation {
            headline: format!("Mixed value types in '{column}'"),
            detail: format!(
                "{} Consumers must coerce every value before using the \
                 column, and coercions that fail turn into nulls.",
                issue.description
            ),
            remediation: Remediation {
                guidance: format!(
                    "Normalize '{column}' to its dominant type at the source, \
                     or split the deviating values into their own column."
                ),
                sql: format!(
                    "SELECT {column}, COUNT(*) FROM {TABLE} GROUP BY {column} ORDER BY COUNT(*) DESC;"
                ),
            },
        },
        IssueKind::Format => IssueExplanation {
            headline: format!("Inconsistent number formatting in '{column}'"),
            detail: format!(
                "{} Symbol-decorated values do not parse as numbers, so part \
                 of the column drops out of numeric aggregates.",
                issue.description
            ),
            remediation: Remediation {
                guidance: format!(
                    "Strip currency symbols, separators, and parentheses from \
                     '{column}' so every value parses the same way."
                ),
                sql: format!(
                    "UPDATE {TABLE} SET {column} = REPLACE(REPLACE(REPLACE({column}, '$', ''), ',', ''), '(', '-');"
                ),
            },
        },
        IssueKind::Outlier => {
            let bounds = columns
                .iter()
                .find(|c| c.column == column)
                .and_then(|c| c.outliers.as_ref())
                .map_or_else(String::new, |o| {
                    format!(
                        " WHERE {column} < {lower} OR {column} > {upper}",
                        lower = o.lower_bound,
                        upper = o.upper_bound
                    )
                });
            IssueExplanation {
                headline: format!("Outliers in '{column}'"),
                detail: format!(
                    "{} Extreme values dominate means and standard deviations; \
                     verify whether they are real measurements or entry errors.",
                    issue.description
                ),
                remediation: Remediation {
                    guidance: format!(
                        "Review the flagged rows in '{column}'; cap, correct, \
                         or exclude values that are not genuine."
                    ),
                    sql: format!("SELECT * FROM {TABLE}{bounds};"),
                },
            }
        }
        // IssueKind is non_exhaustive; explain future kinds generically.
        #[allow(unreachable_patterns)]
        _ => IssueExplanation {
            headline: format!("Quality issue: {}", issue.kind),
            detail: issue.description.clone(),
            remediation: Remediation {
                guidance: "Review the affected data manually.".to_string(),
                sql: format!("SELECT * FROM {TABLE} LIMIT 100;"),
            },
        },
    }
}

fn column_list(columns: &[ColumnProfile]) -> String {
    let names: Vec<&str> = columns.iter().map(|c| c.column.as_str()).collect();
    if names.is_empty() {
        "*".to_string()
    } else {
        names.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Dataset, QualityAnalyzer};

    fn analyzed() -> crate::QualityAnalysis {
        let dataset = Dataset::from_json_str(
            r#"[
                {"name": "ana",   "price": 100,      "score": 1},
                {"name": "",      "price": 200,      "score": 2},
                {"name": "bruno", "price": "$1,300", "score": 3},
                {"name": "carla", "price": 400,      "score": 4},
                {"name": "dora",  "price": 500,      "score": 5},
                {"name": "eva",   "price": 600,      "score": 1000},
                {"name": "fin",   "price": 700,      "score": 6},
                {"name": "fin",   "price": 700,      "score": 6}
            ]"#,
        )
        .unwrap();
        QualityAnalyzer::new().analyze(&dataset)
    }

    #[test]
    fn test_one_entry_per_issue_in_order() {
        let analysis = analyzed();
        let explanation = explain(&analysis.issues, &analysis.column_stats);
        assert_eq!(explanation.entries.len(), analysis.issues.len());
        assert!(explanation.entries[0].headline.contains("name"));
    }

    #[test]
    fn test_every_kind_gets_sql() {
        let analysis = analyzed();
        let explanation = explain(&analysis.issues, &analysis.column_stats);
        for entry in &explanation.entries {
            assert!(entry.remediation.sql.contains("dataset"));
            assert!(entry.remediation.sql.ends_with(';'));
        }
    }

    #[test]
    fn test_duplicate_sql_lists_all_columns() {
        let analysis = analyzed();
        let explanation = explain(&analysis.issues, &analysis.column_stats);
        let duplicate = explanation
            .entries
            .iter()
            .find(|e| e.headline == "Duplicate rows")
            .unwrap();
        assert!(duplicate.remediation.sql.contains("name, price, score"));
    }

    #[test]
    fn test_outlier_sql_uses_bounds() {
        let analysis = analyzed();
        let explanation = explain(&analysis.issues, &analysis.column_stats);
        let outlier = explanation
            .entries
            .iter()
            .find(|e| e.headline.contains("Outliers"))
            .unwrap();
        assert!(outlier.remediation.sql.contains("score <"));
        assert!(outlier.remediation.sql.contains("score >"));
    }

    #[test]
    fn test_pure_function() {
        let analysis = analyzed();
        let first = explain(&analysis.issues, &analysis.column_stats);
        let second = explain(&analysis.issues, &analysis.column_stats);
        assert_eq!(first, second);
    }

    #[test]
    fn test_no_issues_no_entries() {
        let dataset = Dataset::from_csv_str("a,b\n7,x\n8,y\n").unwrap();
        let analysis = QualityAnalyzer::new().analyze(&dataset);
        let explanation = explain(&analysis.issues, &analysis.column_stats);
        assert!(explanation.entries.is_empty());
        assert!(explanation.to_text().is_empty());
    }

    #[test]
    fn test_to_text_numbers_entries() {
        let analysis = analyzed();
        let text = explain(&analysis.issues, &analysis.column_stats).to_text();
        assert!(text.starts_with("1. "));
        assert!(text.contains("Suggestion:"));
        assert!(text.contains("SQL:"));
    }
}
