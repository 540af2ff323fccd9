//! Combined comparison and duplicate analysis of one primary file.

use std::path::{Path, PathBuf};

use crate::compare::{compare_files, ComparisonReport};
use crate::duplicates::{detect_duplicates, DuplicateReport};
use crate::error::Result;
use crate::types::ParseOptions;

/// Which parts of the analysis to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzeOptions {
    pub comparison: bool,
    pub duplicates: bool,
    pub summary: bool,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            comparison: true,
            duplicates: true,
            summary: true,
        }
    }
}

/// Outcome of [`analyze`]. A section is `None` when it was not run.
#[derive(Debug)]
pub struct AnalysisReport {
    pub original: PathBuf,
    pub backup: Option<PathBuf>,
    pub comparison: Option<Result<ComparisonReport>>,
    pub duplicates: Option<Result<DuplicateReport>>,
    pub summary: Option<AnalysisSummary>,
}

/// Headline numbers across the sections that succeeded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisSummary {
    pub new_questions: Option<usize>,
    pub duplicate_groups: Option<usize>,
}

/// Run comparison (when a backup is given) and duplicate detection on `original`.
///
/// Failures are kept inside the report so the caller can print what did work.
pub fn analyze(
    original: &Path,
    backup: Option<&Path>,
    analyze_options: AnalyzeOptions,
    parse_options: &ParseOptions,
) -> AnalysisReport {
    let comparison = match backup {
        Some(backup) if analyze_options.comparison => {
            Some(compare_files(original, backup, parse_options))
        }
        _ => None,
    };

    let duplicates = analyze_options
        .duplicates
        .then(|| detect_duplicates(original, parse_options));

    let summary = analyze_options.summary.then(|| AnalysisSummary {
        new_questions: comparison
            .as_ref()
            .and_then(|r| r.as_ref().ok())
            .map(|r| r.new_questions.len()),
        duplicate_groups: duplicates
            .as_ref()
            .and_then(|r| r.as_ref().ok())
            .map(DuplicateReport::group_count),
    });

    AnalysisReport {
        original: original.to_path_buf(),
        backup: backup.map(Path::to_path_buf),
        comparison,
        duplicates,
        summary,
    }
}
