use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use serde::Serialize;

use quiz_core::{detect_duplicates_in_files, DuplicateReport, MultiFileDuplicates, ParseOptions};

/// JSON view of one file's outcome.
#[derive(Debug, Serialize)]
struct FileView<'a> {
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<&'a DuplicateReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct ScanView<'a> {
    files: Vec<FileView<'a>>,
    total_duplicate_groups: usize,
}

impl<'a> From<&'a MultiFileDuplicates> for ScanView<'a> {
    fn from(scan: &'a MultiFileDuplicates) -> Self {
        let files = scan
            .results
            .iter()
            .map(|outcome| FileView {
                path: outcome.path.display().to_string(),
                report: outcome.result.as_ref().ok(),
                error: outcome.result.as_ref().err().map(ToString::to_string),
            })
            .collect();
        Self {
            files,
            total_duplicate_groups: scan.total_duplicate_groups,
        }
    }
}

pub fn run<W: Write>(paths: &[PathBuf], json: bool, options: &ParseOptions, out: &mut W) -> anyhow::Result<()> {
    let scan = detect_duplicates_in_files(paths, options);
    if json {
        serde_json::to_writer_pretty(&mut *out, &ScanView::from(&scan)).context("failed to write JSON report")?;
        writeln!(out)?;
    } else {
        render(&scan, out)?;
    }
    Ok(())
}

pub fn render<W: Write>(scan: &MultiFileDuplicates, out: &mut W) -> std::io::Result<()> {
    for outcome in &scan.results {
        writeln!(out, "== {} ==", outcome.path.display())?;
        match &outcome.result {
            Ok(report) => render_report(report, out)?,
            Err(err) => writeln!(out, "Error: {err}")?,
        }
    }

    if scan.results.len() > 1 {
        writeln!(out, "Total duplicate groups: {}", scan.total_duplicate_groups)?;
    }
    Ok(())
}

pub fn render_report<W: Write>(report: &DuplicateReport, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "Questions: {}", report.total_questions)?;
    if report.groups.is_empty() {
        return writeln!(out, "No duplicate answers.");
    }

    writeln!(out, "Duplicate answers: {}", report.group_count())?;
    for group in &report.groups {
        writeln!(out, "Answer \"{}\" ({} questions)", group.answer, group.count)?;
        for entry in &group.questions {
            writeln!(out, "  [{}] ({}) {}", entry.id, entry.category, entry.question)?;
        }
    }
    Ok(())
}
