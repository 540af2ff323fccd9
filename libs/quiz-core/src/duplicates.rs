//! Detection of questions that share the same answer.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::parser::parse_file;
use crate::types::{ParseOptions, QuestionId, QuestionRecord};
use crate::FileOutcome;

/// Summary of one question inside a duplicate group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateEntry {
    pub id: QuestionId,
    pub question: String,
    pub category: String,
}

/// Questions sharing one answer string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateGroup {
    pub answer: String,
    pub questions: Vec<DuplicateEntry>,
    pub count: usize,
}

/// Duplicate groups found in one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateReport {
    pub groups: Vec<DuplicateGroup>,
    pub total_questions: usize,
}

impl DuplicateReport {
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

/// Per-file results of a duplicate scan over several files.
#[derive(Debug)]
pub struct MultiFileDuplicates {
    pub results: Vec<FileOutcome<DuplicateReport>>,
    pub total_duplicate_groups: usize,
}

impl MultiFileDuplicates {
    pub fn all_succeeded(&self) -> bool {
        self.results.iter().all(|outcome| outcome.result.is_ok())
    }
}

/// Group questions by exact answer, keeping only groups of two or more.
///
/// Groups appear in the order their answer was first seen. Categories are not
/// considered, so the same answer in two categories forms one group.
pub fn find_duplicates(questions: &[QuestionRecord]) -> Vec<DuplicateGroup> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<&QuestionRecord>)> = Vec::new();

    for question in questions {
        let answer = question.answer.as_str();
        match positions.get(answer).copied() {
            Some(index) => groups[index].1.push(question),
            None => {
                positions.insert(answer, groups.len());
                groups.push((answer, vec![question]));
            }
        }
    }

    groups
        .into_iter()
        .filter(|(_, members)| members.len() > 1)
        .map(|(answer, members)| DuplicateGroup {
            answer: answer.to_string(),
            count: members.len(),
            questions: members
                .into_iter()
                .map(|q| DuplicateEntry {
                    id: q.id.clone(),
                    question: q.question.clone(),
                    category: q.category.clone(),
                })
                .collect(),
        })
        .collect()
}

/// Parse a file and report its duplicate groups.
pub fn detect_duplicates(path: &Path, options: &ParseOptions) -> Result<DuplicateReport> {
    let questions = parse_file(path, options)?;
    Ok(DuplicateReport {
        groups: find_duplicates(&questions),
        total_questions: questions.len(),
    })
}

/// Run [`detect_duplicates`] on every file; failures are recorded per file.
pub fn detect_duplicates_in_files(paths: &[PathBuf], options: &ParseOptions) -> MultiFileDuplicates {
    let mut total_duplicate_groups = 0;
    let mut results = Vec::with_capacity(paths.len());

    for path in paths {
        let result = detect_duplicates(path, options);
        match &result {
            Ok(report) => total_duplicate_groups += report.group_count(),
            Err(err) => tracing::warn!(path = %path.display(), error = %err, "duplicate scan failed"),
        }
        results.push(FileOutcome::new(path.clone(), result));
    }

    MultiFileDuplicates {
        results,
        total_duplicate_groups,
    }
}
