//! The `analyze` command.

use std::path::Path;

use crate::{
    analysis::QualityAnalyzer,
    dataset::Dataset,
    error::Result,
    explain::explain,
    history::ScoreHistory,
    insight::generate_insight,
    report::{render, ReportFormat},
};

pub(crate) fn cmd_analyze(
    path: &Path,
    format: &str,
    output: Option<&Path>,
    with_explanations: bool,
    with_insight: bool,
    track: Option<&Path>,
) -> Result<()> {
    let format = ReportFormat::parse(format)?;
    let dataset = Dataset::from_path(path)?;
    let analysis = QualityAnalyzer::new().analyze(&dataset);

    let mut report = render(&analysis, format)?;

    // Explanations and the narrative only make sense in the text report;
    // the JSON report already carries the raw issue list.
    if with_explanations && format == ReportFormat::Text && analysis.has_issues() {
        let explanation = explain(&analysis.issues, &analysis.column_stats);
        report.push_str("\nExplanations\n");
        report.push_str("------------\n");
        report.push_str(&explanation.to_text());
    }

    if with_insight && format == ReportFormat::Text {
        // No narrator is wired into the CLI; the deterministic template
        // stands in, exactly as it would on a narrator failure.
        let insight = generate_insight(None, &analysis);
        report.push_str("\nNarrative\n");
        report.push_str("---------\n");
        report.push_str(&format!("{}\n", insight.summary));
        for critical in &insight.critical_issues {
            report.push_str(&format!("  ! {critical}\n"));
        }
        for recommendation in &insight.recommendations {
            report.push_str(&format!("  - {recommendation}\n"));
        }
    }

    if let Some(track_path) = track {
        let file_name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().to_string());
        ScoreHistory::new(track_path).record(&file_name, &analysis)?;
    }

    match output {
        Some(output_path) => {
            std::fs::write(output_path, &report)
                .map_err(|e| crate::error::Error::io(e, output_path))?;
            println!("Report written to: {}", output_path.display());
        }
        None => println!("{report}"),
    }

    Ok(())
}
