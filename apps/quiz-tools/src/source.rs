//! Question files read from a local directory.

use std::path::PathBuf;

use quiz_core::parser::read_file;
use quiz_core::{CsvSource, Field, QuizError};

/// Reads `<dir>/<field>.csv` for each field.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, field: Field) -> PathBuf {
        self.dir.join(field.file_name())
    }
}

impl CsvSource for DirectorySource {
    fn fetch(&self, field: Field) -> quiz_core::Result<String> {
        let path = self.path_for(field);
        tracing::debug!(path = %path.display(), "reading question file");
        read_file(&path).map_err(|err| QuizError::FetchFailure {
            field,
            message: err.to_string(),
        })
    }
}
