//! Score history persistence.
//!
//! Stores `{file_name, timestamp, overall_score, scores}` snapshots in a
//! JSON index file so score trends can be displayed across runs. The store
//! is append-only with last-N retention per file name; retention is this
//! module's concern, never the engine's.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    analysis::{DimensionScores, QualityAnalysis},
    error::{Error, Result},
};

/// One recorded analysis outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSnapshot {
    /// The analyzed file's name, the history key.
    pub file_name: String,
    /// When the snapshot was recorded.
    pub timestamp: DateTime<Utc>,
    /// Overall score at that time.
    pub overall_score: f64,
    /// Dimension scores at that time.
    pub scores: DimensionScores,
}

/// On-disk index format.
///
/// ```json
/// {
///   "version": "1.0",
///   "snapshots": [
///     {"file_name": "orders.csv", "timestamp": "...", "overall_score": 87.5, "scores": {...}}
///   ]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HistoryIndex {
    version: String,
    snapshots: Vec<ScoreSnapshot>,
}

impl HistoryIndex {
    fn new() -> Self {
        Self {
            version: "1.0".to_string(),
            snapshots: Vec::new(),
        }
    }
}

/// A JSON-file-backed score history.
#[derive(Debug, Clone)]
pub struct ScoreHistory {
    path: PathBuf,
    retain: usize,
}

impl ScoreHistory {
    /// Snapshots kept per file name by default.
    pub const DEFAULT_RETAIN: usize = 10;

    /// Open a history store at `path` with the default retention. The file
    /// is created on the first record.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            retain: Self::DEFAULT_RETAIN,
        }
    }

    /// Open a history store with a custom per-file retention.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] when `retain` is zero.
    pub fn with_retention(path: impl Into<PathBuf>, retain: usize) -> Result<Self> {
        if retain == 0 {
            return Err(Error::invalid_config("retention must be positive"));
        }
        Ok(Self {
            path: path.into(),
            retain,
        })
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record a snapshot of `analysis` under `file_name`, stamped now.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] or [`Error::Parse`] when the index cannot be
    /// read or written.
    pub fn record(&self, file_name: &str, analysis: &QualityAnalysis) -> Result<ScoreSnapshot> {
        let snapshot = ScoreSnapshot {
            file_name: file_name.to_string(),
            timestamp: Utc::now(),
            overall_score: analysis.overall_score,
            scores: analysis.scores,
        };
        self.append(snapshot.clone())?;
        Ok(snapshot)
    }

    /// Append a pre-built snapshot, trimming the file's history to the
    /// retention limit (oldest first).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] or [`Error::Parse`] when the index cannot be
    /// read or written.
    pub fn append(&self, snapshot: ScoreSnapshot) -> Result<()> {
        let mut index = self.load_index()?;
        index.snapshots.push(snapshot);

        let file_name = index.snapshots[index.snapshots.len() - 1].file_name.clone();
        let kept = index
            .snapshots
            .iter()
            .filter(|s| s.file_name == file_name)
            .count();
        if kept > self.retain {
            let mut to_drop = kept - self.retain;
            index.snapshots.retain(|s| {
                if to_drop > 0 && s.file_name == file_name {
                    to_drop -= 1;
                    false
                } else {
                    true
                }
            });
        }

        self.save_index(&index)
    }

    /// All snapshots for one file, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] when the index file is corrupt.
    pub fn for_file(&self, file_name: &str) -> Result<Vec<ScoreSnapshot>> {
        Ok(self
            .load_index()?
            .snapshots
            .into_iter()
            .filter(|s| s.file_name == file_name)
            .collect())
    }

    /// All snapshots, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] when the index file is corrupt.
    pub fn all(&self) -> Result<Vec<ScoreSnapshot>> {
        Ok(self.load_index()?.snapshots)
    }

    /// The most recent snapshot for one file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] when the index file is corrupt.
    pub fn latest(&self, file_name: &str) -> Result<Option<ScoreSnapshot>> {
        Ok(self.for_file(file_name)?.into_iter().next_back())
    }

    fn load_index(&self) -> Result<HistoryIndex> {
        if !self.path.exists() {
            return Ok(HistoryIndex::new());
        }
        let data =
            std::fs::read_to_string(&self.path).map_err(|e| Error::io(e, self.path.clone()))?;
        serde_json::from_str(&data).map_err(|e| Error::parse(e.to_string()))
    }

    fn save_index(&self, index: &HistoryIndex) -> Result<()> {
        let data =
            serde_json::to_string_pretty(index).map_err(|e| Error::Format(e.to_string()))?;
        std::fs::write(&self.path, data).map_err(|e| Error::io(e, self.path.clone()))
    }
}
