//! The `history` command.

use std::path::Path;

use crate::{error::Result, history::ScoreHistory};

pub(crate) fn cmd_history(name: &str, file: &Path) -> Result<()> {
    let history = ScoreHistory::new(file);
    let snapshots = history.for_file(name)?;

    if snapshots.is_empty() {
        println!("No recorded scores for '{name}' in {}", file.display());
        return Ok(());
    }

    println!("Score history for '{name}'");
    println!(
        "{:<25} {:<8} {:<8} {:<8} {:<8} {:<8}",
        "RECORDED", "OVERALL", "COMPL", "UNIQ", "VALID", "CONSIST"
    );
    println!("{}", "-".repeat(70));
    for snapshot in &snapshots {
        println!(
            "{:<25} {:<8.1} {:<8.1} {:<8.1} {:<8.1} {:<8.1}",
            snapshot.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            snapshot.overall_score,
            snapshot.scores.completeness,
            snapshot.scores.uniqueness,
            snapshot.scores.validity,
            snapshot.scores.consistency,
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Dataset, QualityAnalyzer};

    #[test]
    fn test_history_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("history.json");
        assert!(cmd_history("data.csv", &file).is_ok());
    }

    #[test]
    fn test_history_with_snapshots() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("history.json");

        let dataset = Dataset::from_csv_str("a\nx\ny\n").unwrap();
        let analysis = QualityAnalyzer::new().analyze(&dataset);
        ScoreHistory::new(&file).record("data.csv", &analysis).unwrap();

        assert!(cmd_history("data.csv", &file).is_ok());
    }
}
