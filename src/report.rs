//! Report rendering.
//!
//! Serializes a [`QualityAnalysis`] into plain text, pretty JSON, or a
//! per-column CSV. The analysis structure itself is the stable contract;
//! rendering only re-arranges it.

use serde::{Deserialize, Serialize};

use crate::{
    analysis::{ColumnProfile, QualityAnalysis},
    error::{Error, Result},
};

/// Output format for a rendered report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable text.
    Text,
    /// Pretty-printed JSON of the full analysis.
    Json,
    /// One CSV row per column profile.
    Csv,
}

impl ReportFormat {
    /// Parse a format name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for unknown names.
    pub fn parse(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(Error::invalid_config(format!(
                "unknown report format '{other}' (expected text, json, or csv)"
            ))),
        }
    }

    /// The canonical name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

/// Render an analysis in the requested format.
///
/// # Errors
///
/// Returns [`Error::Format`] when serialization fails.
pub fn render(analysis: &QualityAnalysis, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(render_text(analysis)),
        ReportFormat::Json => render_json(analysis),
        ReportFormat::Csv => render_csv(analysis),
    }
}

/// Render the human-readable text report.
#[must_use]
pub fn render_text(analysis: &QualityAnalysis) -> String {
    let mut out = String::new();

    out.push_str("Data Quality Report\n");
    out.push_str("===================\n");
    out.push_str(&format!("Rows: {}\n", analysis.summary.total_rows));
    out.push_str(&format!("Columns: {}\n", analysis.summary.total_columns));
    out.push('\n');

    out.push_str(&format!("Overall Score: {:.1}%\n", analysis.overall_score));
    out.push_str(&format!(
        "  completeness: {:.1}  uniqueness: {:.1}  validity: {:.1}  consistency: {:.1}\n",
        analysis.scores.completeness,
        analysis.scores.uniqueness,
        analysis.scores.validity,
        analysis.scores.consistency
    ));
    out.push('\n');

    if analysis.issues.is_empty() {
        out.push_str("\u{2713} No quality issues found\n\n");
    } else {
        out.push_str(&format!("Issues Found ({}):\n", analysis.issues.len()));
        out.push_str("------------------\n");
        for issue in &analysis.issues {
            out.push_str(&format!(
                "  [{}] {}\n",
                issue.severity, issue.description
            ));
        }
        out.push('\n');
    }

    out.push_str(&format!(
        "{:<20} {:<10} {:<10} {:<10} {:<10}\n",
        "COLUMN", "TYPE", "MISSING %", "UNIQUE", "OUTLIERS"
    ));
    out.push_str(&format!("{}\n", "-".repeat(64)));
    for profile in &analysis.column_stats {
        out.push_str(&format!(
            "{:<20} {:<10} {:<10} {:<10} {:<10}\n",
            profile.column,
            profile.type_info.data_type.name(),
            format!("{:.1}", profile.missing_percentage),
            profile.unique_count,
            profile
                .outliers
                .as_ref()
                .map_or_else(|| "-".to_string(), |o| o.count.to_string()),
        ));
    }

    out
}

fn render_json(analysis: &QualityAnalysis) -> Result<String> {
    serde_json::to_string_pretty(analysis).map_err(|e| Error::Format(e.to_string()))
}

fn render_csv(analysis: &QualityAnalysis) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record([
            "column",
            "type",
            "confidence",
            "missing_count",
            "missing_percentage",
            "unique_count",
            "mean",
            "min",
            "max",
            "std_dev",
            "outliers",
        ])
        .map_err(|e| Error::Format(e.to_string()))?;

    for profile in &analysis.column_stats {
        writer
            .write_record(csv_row(profile))
            .map_err(|e| Error::Format(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Format(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| Error::Format(e.to_string()))
}

fn csv_row(profile: &ColumnProfile) -> Vec<String> {
    let stat = |f: fn(&crate::analysis::ColumnStatistics) -> f64| {
        profile
            .statistics
            .as_ref()
            .map_or_else(String::new, |s| f(s).to_string())
    };
    vec![
        profile.column.clone(),
        profile.type_info.data_type.name().to_string(),
        format!("{:.3}", profile.type_info.confidence),
        profile.missing_count.to_string(),
        profile.missing_percentage.to_string(),
        profile.unique_count.to_string(),
        stat(|s| s.mean),
        stat(|s| s.min),
        stat(|s| s.max),
        stat(|s| s.std_dev),
        profile
            .outliers
            .as_ref()
            .map_or_else(String::new, |o| o.count.to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Dataset, QualityAnalyzer};

    fn analyzed() -> QualityAnalysis {
        let dataset = Dataset::from_csv_str("id,age\nA1,30\nA2,\nA1,30\n").unwrap();
        QualityAnalyzer::new().analyze(&dataset)
    }

    #[test]
    fn test_parse_format() {
        assert_eq!(ReportFormat::parse("text").unwrap(), ReportFormat::Text);
        assert_eq!(ReportFormat::parse("JSON").unwrap(), ReportFormat::Json);
        assert_eq!(ReportFormat::parse("csv").unwrap(), ReportFormat::Csv);
        assert!(ReportFormat::parse("yaml").is_err());
    }

    #[test]
    fn test_text_report() {
        let text = render(&analyzed(), ReportFormat::Text).unwrap();
        assert!(text.contains("Data Quality Report"));
        assert!(text.contains("Overall Score:"));
        assert!(text.contains("Issues Found"));
        assert!(text.contains("COLUMN"));
        assert!(text.contains("age"));
    }

    #[test]
    fn test_text_report_clean() {
        let dataset = Dataset::from_csv_str("a,b\nx,10\ny,20\n").unwrap();
        let analysis = QualityAnalyzer::new().analyze(&dataset);
        let text = render_text(&analysis);
        assert!(text.contains("No quality issues found"));
    }

    #[test]
    fn test_json_report_parses_back() {
        let json = render(&analyzed(), ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.get("overall_score").is_some());
        assert!(value.get("scores").is_some());
        assert!(value["column_stats"].as_array().unwrap().len() == 2);
    }

    #[test]
    fn test_csv_report_one_row_per_column() {
        let csv_text = render(&analyzed(), ReportFormat::Csv).unwrap();
        let lines: Vec<&str> = csv_text.trim_end().lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("column,type,"));
        assert!(lines[1].starts_with("id,"));
        assert!(lines[2].starts_with("age,"));
    }

    #[test]
    fn test_csv_report_numeric_fields() {
        let dataset = Dataset::from_json_str(r#"[{"v": 1}, {"v": 2}, {"v": 3}]"#).unwrap();
        let analysis = QualityAnalyzer::new().analyze(&dataset);
        let csv_text = render(&analysis, ReportFormat::Csv).unwrap();
        let row = csv_text.trim_end().lines().nth(1).unwrap();
        assert!(row.contains("number"));
        assert!(row.contains('2')); // mean
    }
}
