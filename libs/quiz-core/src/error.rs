//! Error types for quiz-core.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::Field;

/// Result type alias using QuizError.
pub type Result<T> = std::result::Result<T, QuizError>;

/// Errors raised while reading, parsing or loading question files.
///
/// Row-level anomalies (ragged rows, blank rows) never surface here; the
/// parser absorbs them.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("usage: {0}")]
    Usage(String),

    #[error("failed to fetch {field}: {message}")]
    FetchFailure { field: Field, message: String },
}

impl From<csv::Error> for QuizError {
    fn from(err: csv::Error) -> Self {
        Self::MalformedInput(err.to_string())
    }
}
