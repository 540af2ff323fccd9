//! Subcommand implementations.
//!
//! Each command writes its report to the given writer. File-level failures
//! are printed and do not change the exit status.

pub mod analyze;
pub mod compare;
pub mod duplicates;
pub mod format;
pub mod quiz;

use std::io::Write;

use quiz_core::QuestionRecord;

/// One-line summary used in every listing.
pub(crate) fn write_question_line<W: Write>(out: &mut W, question: &QuestionRecord) -> std::io::Result<()> {
    writeln!(out, "  [{}] ({}) {}", question.id, question.category, question.question)
}
