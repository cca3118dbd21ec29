//! Narrative insight port.
//!
//! The engine never talks to a narrative service itself. Callers may
//! supply a [`Narrator`] implementation (an LLM-backed client, typically);
//! when none is supplied or the narrator fails, a deterministic template
//! built solely from the overall score and the issue list stands in. A
//! narrator failure is recovered here, never surfaced to the caller.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    analysis::{IssueKind, QualityAnalysis, Severity},
    error::Result,
};

/// Readiness verdict for downstream use of the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Readiness {
    /// Fit for use as-is.
    Ready,
    /// Usable after addressing the reported issues.
    NeedsWork,
    /// Not fit for use yet.
    NotReady,
}

impl Readiness {
    /// Derive the verdict from an overall score.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::Ready
        } else if score >= 50.0 {
            Self::NeedsWork
        } else {
            Self::NotReady
        }
    }

    /// One-line decision text.
    #[must_use]
    pub fn decision(&self) -> &'static str {
        match self {
            Self::Ready => "Ready for use",
            Self::NeedsWork => "Usable after remediation",
            Self::NotReady => "Not ready for use",
        }
    }
}

impl fmt::Display for Readiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready => write!(f, "ready"),
            Self::NeedsWork => write!(f, "needs-work"),
            Self::NotReady => write!(f, "not-ready"),
        }
    }
}

/// A narrative summary of an analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeInsight {
    /// Prose summary of the dataset's quality.
    pub summary: String,
    /// High-severity issue descriptions.
    pub critical_issues: Vec<String>,
    /// Suggested next steps.
    pub recommendations: Vec<String>,
    /// The readiness verdict.
    pub readiness: Readiness,
}

/// A narrative-insight provider.
///
/// Implementations may call out to external services and fail; the caller
/// of [`generate_insight`] never sees those failures.
pub trait Narrator {
    /// Produce a narrative for the analysis.
    ///
    /// # Errors
    ///
    /// Implementations surface transport or service failures here; they
    /// are recovered by the template fallback.
    fn narrate(&self, analysis: &QualityAnalysis) -> Result<NarrativeInsight>;
}

/// Produce an insight, preferring the narrator and falling back to the
/// deterministic template on absence or failure.
#[must_use]
pub fn generate_insight(
    narrator: Option<&dyn Narrator>,
    analysis: &QualityAnalysis,
) -> NarrativeInsight {
    narrator
        .and_then(|n| n.narrate(analysis).ok())
        .unwrap_or_else(|| template_insight(analysis))
}

/// The deterministic fallback: a pure function of the overall score and
/// the issue list.
#[must_use]
pub fn template_insight(analysis: &QualityAnalysis) -> NarrativeInsight {
    let readiness = Readiness::from_score(analysis.overall_score);

    let summary = if analysis.issues.is_empty() {
        format!(
            "The dataset scored {:.1}/100 with no quality issues detected. {}.",
            analysis.overall_score,
            readiness.decision()
        )
    } else {
        format!(
            "The dataset scored {:.1}/100 with {} quality issue(s) detected. {}.",
            analysis.overall_score,
            analysis.issues.len(),
            readiness.decision()
        )
    };

    let critical_issues: Vec<String> = analysis
        .issues
        .iter()
        .filter(|i| i.severity == Severity::High)
        .map(|i| i.description.clone())
        .collect();

    let mut recommendations = Vec::new();
    let mut seen: Vec<IssueKind> = Vec::new();
    for issue in &analysis.issues {
        if seen.contains(&issue.kind) {
            continue;
        }
        seen.push(issue.kind);
        recommendations.push(recommendation_for(issue.kind).to_string());
    }
    if recommendations.is_empty() {
        recommendations.push("No remediation needed.".to_string());
    }

    NarrativeInsight {
        summary,
        critical_issues,
        recommendations,
        readiness,
    }
}

fn recommendation_for(kind: IssueKind) -> &'static str {
    match kind {
        IssueKind::Missing => "Backfill or exclude rows with missing values.",
        IssueKind::Duplicate => "Deduplicate rows before aggregation.",
        IssueKind::Inconsistent => "Normalize columns to a single value type.",
        IssueKind::Format => "Standardize numeric formatting within each column.",
        IssueKind::Outlier => "Review outlying values for entry errors.",
        #[allow(unreachable_patterns)]
        _ => "Review the affected data manually.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Dataset, Error, QualityAnalyzer};

    struct FailingNarrator;

    impl Narrator for FailingNarrator {
        fn narrate(&self, _analysis: &QualityAnalysis) -> Result<NarrativeInsight> {
            Err(Error::Format("service unavailable".to_string()))
        }
    }

    struct CannedNarrator;

    impl Narrator for CannedNarrator {
        fn narrate(&self, analysis: &QualityAnalysis) -> Result<NarrativeInsight> {
            Ok(NarrativeInsight {
                summary: "canned".to_string(),
                critical_issues: vec![],
                recommendations: vec![],
                readiness: Readiness::from_score(analysis.overall_score),
            })
        }
    }

    fn dirty_analysis() -> QualityAnalysis {
        let dataset = Dataset::from_csv_str("id,age\nA1,30\nA2,\nA1,30\n").unwrap();
        QualityAnalyzer::new().analyze(&dataset)
    }

    #[test]
    fn test_readiness_tiers() {
        assert_eq!(Readiness::from_score(100.0), Readiness::Ready);
        assert_eq!(Readiness::from_score(80.0), Readiness::Ready);
        assert_eq!(Readiness::from_score(79.9), Readiness::NeedsWork);
        assert_eq!(Readiness::from_score(50.0), Readiness::NeedsWork);
        assert_eq!(Readiness::from_score(49.9), Readiness::NotReady);
    }

    #[test]
    fn test_template_is_deterministic() {
        let analysis = dirty_analysis();
        assert_eq!(template_insight(&analysis), template_insight(&analysis));
    }

    #[test]
    fn test_template_contents() {
        let analysis = dirty_analysis();
        let insight = template_insight(&analysis);

        assert!(insight.summary.contains("issue"));
        // The duplicate and the >25% missing column are both high severity.
        assert!(!insight.critical_issues.is_empty());
        // One recommendation per distinct issue kind.
        assert_eq!(insight.recommendations.len(), 2);
    }

    #[test]
    fn test_clean_dataset_insight() {
        let dataset = Dataset::from_csv_str("a,b\nx,10\ny,20\n").unwrap();
        let analysis = QualityAnalyzer::new().analyze(&dataset);
        let insight = template_insight(&analysis);

        assert_eq!(insight.readiness, Readiness::Ready);
        assert!(insight.critical_issues.is_empty());
        assert_eq!(insight.recommendations, vec!["No remediation needed."]);
    }

    #[test]
    fn test_narrator_failure_falls_back() {
        let analysis = dirty_analysis();
        let insight = generate_insight(Some(&FailingNarrator), &analysis);
        assert_eq!(insight, template_insight(&analysis));
    }

    #[test]
    fn test_narrator_success_wins() {
        let analysis = dirty_analysis();
        let insight = generate_insight(Some(&CannedNarrator), &analysis);
        assert_eq!(insight.summary, "canned");
    }

    #[test]
    fn test_no_narrator_uses_template() {
        let analysis = dirty_analysis();
        let insight = generate_insight(None, &analysis);
        assert_eq!(insight, template_insight(&analysis));
    }
}
