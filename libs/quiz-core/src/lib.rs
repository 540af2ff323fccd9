//! Core quiz library shared by the command-line tools and any front end.
//!
//! Provides:
//! - CSV parser for question banks, plus the canonical-schema formatter
//! - Comparison of question sets and duplicate-answer detection
//! - All-or-nothing loading of per-field question files
//! - The quiz session state machine (answering, scoring, retry)

pub mod analysis;
pub mod compare;
pub mod duplicates;
pub mod error;
pub mod format;
pub mod loader;
pub mod parser;
pub mod session;
pub mod types;

use std::path::PathBuf;

pub use analysis::{analyze, AnalysisReport, AnalysisSummary, AnalyzeOptions};
pub use compare::{compare, compare_files, ComparisonReport};
pub use duplicates::{
    detect_duplicates, detect_duplicates_in_files, find_duplicates, DuplicateEntry,
    DuplicateGroup, DuplicateReport, MultiFileDuplicates,
};
pub use error::{QuizError, Result};
pub use format::{format_csv, format_file, format_files};
pub use loader::{load_question_bank, CsvSource, LoadState, QuestionBank};
pub use parser::{parse, parse_file, parse_with, CANONICAL_HEADER};
pub use session::{
    AnswerFeedback, CorrectRate, EmptyReason, Presentation, SessionConfig, SessionError,
    SessionReport, SessionState, SessionStatus,
};
pub use types::{
    ColumnMapping, Field, IdStrategy, NewlineMode, ParseOptions, QuestionId, QuestionRecord,
    QuizSettings, WrongQuestionRecord,
};

/// Result of one file in a batch operation. A failed file does not stop the batch.
#[derive(Debug)]
pub struct FileOutcome<T> {
    pub path: PathBuf,
    pub result: Result<T>,
}

impl<T> FileOutcome<T> {
    pub fn new(path: PathBuf, result: Result<T>) -> Self {
        Self { path, result }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}
