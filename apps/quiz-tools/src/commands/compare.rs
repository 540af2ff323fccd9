use std::io::Write;
use std::path::Path;

use anyhow::Context;
use quiz_core::{compare_files, ComparisonReport, ParseOptions};

use super::write_question_line;

pub fn run<W: Write>(
    original: &Path,
    backup: &Path,
    json: bool,
    options: &ParseOptions,
    out: &mut W,
) -> anyhow::Result<()> {
    match compare_files(original, backup, options) {
        Ok(report) if json => {
            serde_json::to_writer_pretty(&mut *out, &report).context("failed to write JSON report")?;
            writeln!(out)?;
        }
        Ok(report) => render(&report, out)?,
        Err(err) => {
            tracing::error!(error = %err, "comparison failed");
            writeln!(out, "Error: {err}")?;
        }
    }
    Ok(())
}

pub fn render<W: Write>(report: &ComparisonReport, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "Original: {} questions", report.original_count)?;
    writeln!(out, "Backup:   {} questions", report.backup_count)?;

    if report.new_questions.is_empty() {
        return writeln!(out, "No new questions.");
    }

    writeln!(out, "New questions: {}", report.new_questions.len())?;
    for question in &report.new_questions {
        write_question_line(out, question)?;
        writeln!(out, "      answer: {}", question.answer)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quiz_core::{QuestionId, QuestionRecord};

    #[test]
    fn renders_new_questions() {
        let report = ComparisonReport {
            new_questions: vec![QuestionRecord::new(QuestionId::new("7"), "it", "What is TCP?", "A protocol")],
            original_count: 3,
            backup_count: 2,
        };
        let mut out = Vec::new();
        render(&report, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Original: 3 questions\n\
             Backup:   2 questions\n\
             New questions: 1\n  \
             [7] (it) What is TCP?\n      \
             answer: A protocol\n"
        );
    }

    #[test]
    fn renders_no_changes() {
        let report = ComparisonReport {
            new_questions: Vec::new(),
            original_count: 2,
            backup_count: 2,
        };
        let mut out = Vec::new();
        render(&report, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().ends_with("No new questions.\n"));
    }
}
