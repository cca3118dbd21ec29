//! Command-line interface for calidad.

use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};

mod analyze;
mod history;

/// calidad - Tabular dataset quality assessment
#[derive(Parser)]
#[command(name = "calidad")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a dataset and render a quality report
    Analyze {
        /// Path to the dataset file (CSV or JSON)
        path: PathBuf,
        /// Output format (text, json, csv)
        #[arg(short, long, default_value = "text")]
        format: String,
        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Append per-issue explanations with remediation SQL
        #[arg(long)]
        explain: bool,
        /// Append a narrative summary
        #[arg(long)]
        insight: bool,
        /// Record the scores into this history file
        #[arg(long, value_name = "HISTORY_FILE")]
        track: Option<PathBuf>,
    },
    /// Show recorded score history for a dataset
    History {
        /// The dataset file name the snapshots were recorded under
        name: String,
        /// History file to read
        #[arg(long, default_value = "calidad-history.json")]
        file: PathBuf,
    },
}

/// Parse arguments and run the selected command.
#[must_use]
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze {
            path,
            format,
            output,
            explain,
            insight,
            track,
        } => analyze::cmd_analyze(
            &path,
            &format,
            output.as_deref(),
            explain,
            insight,
            track.as_deref(),
        ),
        Commands::History { name, file } => history::cmd_history(&name, &file),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
