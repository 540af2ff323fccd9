use std::io::Write;
use std::path::{Path, PathBuf};

use quiz_core::{format_files, Field, FileOutcome, QuizError};

/// Files to format: the given paths, or every field file under `csv_dir`.
pub fn targets(paths: &[PathBuf], csv_dir: &Path) -> Vec<PathBuf> {
    if paths.is_empty() {
        Field::ALL
            .iter()
            .map(|field| csv_dir.join(field.file_name()))
            .collect()
    } else {
        paths.to_vec()
    }
}

pub fn run<W: Write>(paths: &[PathBuf], csv_dir: &Path, out: &mut W) -> anyhow::Result<()> {
    let outcomes = format_files(&targets(paths, csv_dir));
    render(&outcomes, out)?;
    Ok(())
}

pub fn render<W: Write>(outcomes: &[FileOutcome<()>], out: &mut W) -> std::io::Result<()> {
    for outcome in outcomes {
        match &outcome.result {
            Ok(()) => writeln!(out, "Formatted {}", outcome.path.display())?,
            Err(QuizError::FileNotFound { .. }) => {
                writeln!(out, "Skipped {} (not found)", outcome.path.display())?
            }
            Err(err) => writeln!(out, "Error: {err}")?,
        }
    }
    let formatted = outcomes.iter().filter(|o| o.is_success()).count();
    writeln!(out, "{formatted} of {} files formatted", outcomes.len())
}
