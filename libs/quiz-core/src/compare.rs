//! Comparison of a question set against an older snapshot.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::parser::parse_file;
use crate::types::{ParseOptions, QuestionRecord};

/// Questions present in the current set but not in the backup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub new_questions: Vec<QuestionRecord>,
    pub original_count: usize,
    pub backup_count: usize,
}

/// Find questions of `current` whose text does not appear in `backup`.
///
/// Matching is exact on the question text only; ids, categories and answers
/// are ignored. Order follows `current`.
pub fn compare(current: &[QuestionRecord], backup: &[QuestionRecord]) -> ComparisonReport {
    let known: HashSet<&str> = backup.iter().map(|q| q.question.as_str()).collect();

    ComparisonReport {
        new_questions: current
            .iter()
            .filter(|q| !known.contains(q.question.as_str()))
            .cloned()
            .collect(),
        original_count: current.len(),
        backup_count: backup.len(),
    }
}

/// Parse two files and compare them.
pub fn compare_files(
    original: &Path,
    backup: &Path,
    options: &ParseOptions,
) -> Result<ComparisonReport> {
    let current = parse_file(original, options)?;
    let previous = parse_file(backup, options)?;
    Ok(compare(&current, &previous))
}
