//! Normalizer for raw CSV exports.
//!
//! Exports carry two metadata lines before the body and quote loosely. The
//! canonical output is the 9-column header followed by one record per line,
//! every field quoted, embedded newlines flattened to spaces, and one empty
//! trailing column on every row.

use std::path::{Path, PathBuf};

use csv::{QuoteStyle, ReaderBuilder, Terminator, Trim, WriterBuilder};

use crate::error::{QuizError, Result};
use crate::parser::{read_file, CANONICAL_HEADER};
use crate::FileOutcome;

/// Number of metadata lines preceding the body of a raw export.
const EXPORT_PREAMBLE_LINES: usize = 2;

/// The canonical column names.
pub fn canonical_header() -> Vec<String> {
    CANONICAL_HEADER.iter().map(|name| name.to_string()).collect()
}

/// Rewrite CSV text into the canonical schema.
///
/// Input that already starts with the canonical header is treated as
/// formatted, so formatting twice gives the same text.
pub fn format_csv(input: &str) -> Result<String> {
    let lines: Vec<&str> = input.lines().collect();
    let canonical = lines.first().is_some_and(|line| is_canonical_header(line));
    let skip = if canonical { 1 } else { EXPORT_PREAMBLE_LINES };
    let body = lines.iter().skip(skip).copied().collect::<Vec<_>>().join("\n");

    let mut rows = read_rows(&body)?;
    for row in &mut rows {
        if canonical && row.len() > CANONICAL_HEADER.len() && row.last().is_some_and(String::is_empty) {
            row.pop();
        }
        if row.len() < CANONICAL_HEADER.len() {
            row.resize(CANONICAL_HEADER.len(), String::new());
        }
    }

    let mut records = Vec::with_capacity(rows.len() + 1);
    records.push(canonical_header());
    records.extend(rows);

    while records
        .last()
        .is_some_and(|row| row.iter().all(String::is_empty))
    {
        records.pop();
    }

    for row in &mut records {
        for cell in row.iter_mut() {
            if cell.contains('\n') {
                *cell = cell.replace("\r\n", " ").replace('\n', " ");
            }
        }
        row.push(String::new());
    }

    write_rows(&records)
}

/// Format each file in place.
///
/// Missing files are logged and skipped; the rest of the batch still runs.
pub fn format_files(paths: &[PathBuf]) -> Vec<FileOutcome<()>> {
    paths
        .iter()
        .map(|path| {
            let result = format_file(path);
            match &result {
                Ok(()) => tracing::info!(path = %path.display(), "formatted csv"),
                Err(QuizError::FileNotFound { .. }) => {
                    tracing::warn!(path = %path.display(), "file not found, skipping")
                }
                Err(err) => tracing::warn!(path = %path.display(), error = %err, "format failed"),
            }
            FileOutcome::new(path.clone(), result)
        })
        .collect()
}

/// Format one file in place.
pub fn format_file(path: &Path) -> Result<()> {
    let input = read_file(path)?;
    let output = format_csv(&input)?;
    std::fs::write(path, output).map_err(|source| QuizError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn is_canonical_header(line: &str) -> bool {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(line.as_bytes());
    match reader.records().next() {
        Some(Ok(record)) => {
            record.len() >= CANONICAL_HEADER.len()
                && CANONICAL_HEADER
                    .iter()
                    .zip(record.iter())
                    .all(|(expected, actual)| *expected == actual)
        }
        _ => false,
    }
}

fn read_rows(body: &str) -> Result<Vec<Vec<String>>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(body.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

fn write_rows(rows: &[Vec<String>]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .flexible(true)
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    for row in rows {
        writer.write_record(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| QuizError::MalformedInput(err.to_string()))?;
    String::from_utf8(bytes).map_err(|err| QuizError::MalformedInput(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CANONICAL_LINE: &str =
        r#""no","memo","category","question","option1","option2","option3","option4","answer","""#;

    #[test]
    fn drops_preamble_and_adds_header() {
        let input = "Exported questions\nGenerated 2024-05-01\n1,,it,What is RAM?,Memory,Disk,,,Memory\n";
        let output = format_csv(input).unwrap();
        let expected = format!(
            "{CANONICAL_LINE}\n\"1\",\"\",\"it\",\"What is RAM?\",\"Memory\",\"Disk\",\"\",\"\",\"Memory\",\"\"\n"
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn flattens_embedded_newlines() {
        let input = "title\nmeta\n1,\"first\nsecond\",it,\"Q\r\nmore\",a,b,,,a\n";
        let output = format_csv(input).unwrap();
        assert!(output.contains("\"first second\""));
        assert!(output.contains("\"Q more\""));
        assert_eq!(output.lines().count(), 2);
    }

    #[test]
    fn drops_trailing_empty_rows() {
        let input = "title\nmeta\n1,,it,Q,a,b,,,a\n,,,,,,,,\n";
        let output = format_csv(input).unwrap();
        assert_eq!(output.lines().count(), 2);
    }

    #[test]
    fn escapes_quotes_in_output() {
        let input = "title\nmeta\n1,,it,\"Say \"\"yes\"\"\",yes,no,,,yes\n";
        let output = format_csv(input).unwrap();
        assert!(output.contains(r#""Say ""yes""""#));
    }

    #[test]
    fn formatting_is_idempotent() {
        let input = "title\nmeta\n1,memo,it,\"a, b\",a,\"b\nc\",,,a\n2,,customer,Q2,x,y,z,w,w\n,,,,,,,,\n";
        let once = format_csv(input).unwrap();
        let twice = format_csv(&once).unwrap();
        assert_eq!(twice, once);
    }

    #[test]
    fn short_rows_are_padded_and_stay_stable() {
        let input = "title\nmeta\n1,,it,Q,a,b,,a\n2,,it,R\n";
        let once = format_csv(input).unwrap();

        assert_eq!(
            once.lines().nth(1),
            Some(r#""1","","it","Q","a","b","","a","","""#)
        );
        assert!(once.lines().all(|line| line.matches("\",\"").count() == 9));
        assert_eq!(format_csv(&once).unwrap(), once);
    }

    #[test]
    fn empty_body_yields_header_only() {
        let output = format_csv("title\nmeta\n").unwrap();
        assert_eq!(output, format!("{CANONICAL_LINE}\n"));
    }

    #[test]
    fn format_files_skips_missing_and_continues() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path();
        let present = dir.join("it.csv");
        std::fs::write(&present, "title\nmeta\n1,,it,Q,a,b,,,a\n").unwrap();
        let missing = dir.join("product.csv");

        let outcomes = format_files(&[missing.clone(), present.clone()]);

        assert!(matches!(outcomes[0].result, Err(QuizError::FileNotFound { .. })));
        assert!(outcomes[1].result.is_ok());
        let rewritten = std::fs::read_to_string(&present).unwrap();
        assert!(rewritten.starts_with(CANONICAL_LINE));
    }
}
