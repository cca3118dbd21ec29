//! Error types for calidad.

use std::path::PathBuf;

/// Result type alias for calidad operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur around the analysis engine.
///
/// The engine itself never fails for a structurally valid
/// [`Dataset`](crate::Dataset); every variant here belongs to the ingestion
/// layer that runs before it or the rendering/persistence layers that run
/// after it.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        /// The path where the error occurred, if known.
        path: Option<PathBuf>,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Input could not be parsed into headers and rows.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parse failure.
        message: String,
    },

    /// Input contains no header row and no records.
    #[error("Empty file: {path:?}")]
    EmptyFile {
        /// The path of the empty input, if known.
        path: Option<PathBuf>,
    },

    /// Unsupported file format.
    #[error("Unsupported format: {format}")]
    UnsupportedFormat {
        /// The unsupported format name or extension.
        format: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the configuration error.
        message: String,
    },

    /// Output formatting or serialization error.
    #[error("Format error: {0}")]
    Format(String),
}

impl Error {
    /// Create an I/O error with a path context.
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            path: Some(path.into()),
            source,
        }
    }

    /// Create an I/O error without path context.
    pub fn io_no_path(source: std::io::Error) -> Self {
        Self::Io { path: None, source }
    }

    /// Create a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create an empty-file error for the given path.
    pub fn empty_file(path: impl Into<PathBuf>) -> Self {
        Self::EmptyFile {
            path: Some(path.into()),
        }
    }

    /// Create an empty-file error without path context.
    #[must_use]
    pub fn empty_input() -> Self {
        Self::EmptyFile { path: None }
    }

    /// Create an unsupported format error.
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_with_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::io(io_err, "/path/to/file");
        assert!(err.to_string().contains("/path/to/file"));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_io_error_without_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::io_no_path(io_err);
        assert!(err.to_string().contains("None"));
    }

    #[test]
    fn test_parse_error() {
        let err = Error::parse("unterminated quoted field");
        assert!(err.to_string().contains("unterminated quoted field"));
    }

    #[test]
    fn test_empty_file() {
        let err = Error::empty_file("data.csv");
        assert!(err.to_string().contains("Empty file"));
        assert!(err.to_string().contains("data.csv"));
    }

    #[test]
    fn test_empty_input() {
        let err = Error::empty_input();
        assert!(err.to_string().contains("Empty file"));
    }

    #[test]
    fn test_unsupported_format() {
        let err = Error::unsupported_format("xlsx");
        assert!(err.to_string().contains("xlsx"));
    }

    #[test]
    fn test_invalid_config() {
        let err = Error::invalid_config("retention must be positive");
        assert!(err.to_string().contains("retention must be positive"));
    }

    #[test]
    fn test_format_error() {
        let err = Error::Format("unwritable report".to_string());
        assert!(err.to_string().contains("unwritable report"));
    }
}
