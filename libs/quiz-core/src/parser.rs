//! CSV parser for question banks.
//!
//! # Format
//! ```text
//! no,memo,category,question,option1,option2,option3,option4,answer
//! 1,,math,"2+2=?",3,4,5,6,4
//! 2,"Sum, then halve",math,"(2+4)/2=?",3,4,,,3
//! ```
//!
//! Quoted fields may contain commas, `""` escapes and raw newlines. Rows
//! shorter or longer than the header are padded or truncated, and blank rows
//! are skipped.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;

use chrono::Utc;
use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::{QuizError, Result};
use crate::types::{ColumnMapping, IdStrategy, NewlineMode, ParseOptions, QuestionId, QuestionRecord};

/// Column names of the canonical 9-column schema.
pub const CANONICAL_HEADER: [&str; 9] = [
    "no", "memo", "category", "question", "option1", "option2", "option3", "option4", "answer",
];

/// Parse CSV content with default options.
pub fn parse(content: &str) -> Result<Vec<QuestionRecord>> {
    parse_with(content, &ParseOptions::default())
}

/// Parse CSV content into question records.
pub fn parse_with(content: &str, options: &ParseOptions) -> Result<Vec<QuestionRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let columns = ColumnIndex::resolve(&headers, options.columns);
    let mut ids = IdGenerator::new(options.id_strategy);
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for row in reader.records() {
        let row = row?;
        if row.iter().all(str::is_empty) {
            skipped += 1;
            continue;
        }
        records.push(columns.build(&row, options.newlines, &mut ids));
    }

    tracing::debug!(records = records.len(), skipped, "parsed question csv");
    Ok(records)
}

/// Read and parse a CSV file.
pub fn parse_file(path: &Path, options: &ParseOptions) -> Result<Vec<QuestionRecord>> {
    let content = read_file(path)?;
    parse_with(&content, options)
}

/// Read a file to a string, distinguishing a missing path from other I/O errors.
pub fn read_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(QuizError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    std::fs::read_to_string(path).map_err(|source| QuizError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Positions of each record field within a row.
struct ColumnIndex {
    memo: Option<usize>,
    category: Option<usize>,
    question: Option<usize>,
    options: [Option<usize>; 4],
    answer: Option<usize>,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord, mapping: ColumnMapping) -> Self {
        let position = |name: &str| match mapping {
            ColumnMapping::ByHeader => headers.iter().position(|h| h == name),
            ColumnMapping::Fixed => CANONICAL_HEADER.iter().position(|h| *h == name),
        };

        Self {
            memo: position("memo"),
            category: position("category"),
            question: position("question"),
            options: [
                position("option1"),
                position("option2"),
                position("option3"),
                position("option4"),
            ],
            answer: position("answer"),
        }
    }

    fn build(&self, row: &StringRecord, newlines: NewlineMode, ids: &mut IdGenerator) -> QuestionRecord {
        let get = |index: Option<usize>| -> String {
            let value = index.and_then(|i| row.get(i)).unwrap_or("");
            match newlines {
                NewlineMode::Preserve => value.to_string(),
                NewlineMode::Escape => value.replace("\r\n", "\\n").replace('\n', "\\n"),
            }
        };
        let non_empty = |value: String| (!value.is_empty()).then_some(value);

        let category = get(self.category);
        QuestionRecord {
            id: ids.next(&category),
            question: get(self.question),
            options: self.options.map(|index| non_empty(get(index))),
            answer: get(self.answer),
            memo: non_empty(get(self.memo)),
            category,
        }
    }
}

static NEXT_SEQUENTIAL_ID: OnceLock<AtomicU64> = OnceLock::new();

fn next_sequential_id() -> u64 {
    NEXT_SEQUENTIAL_ID
        .get_or_init(|| AtomicU64::new(Utc::now().timestamp_millis().max(0) as u64))
        .fetch_add(1, Ordering::Relaxed)
}

/// Hands out ids for one parse batch.
struct IdGenerator {
    strategy: IdStrategy,
    per_category: HashMap<String, usize>,
}

impl IdGenerator {
    fn new(strategy: IdStrategy) -> Self {
        Self {
            strategy,
            per_category: HashMap::new(),
        }
    }

    fn next(&mut self, category: &str) -> QuestionId {
        match self.strategy {
            IdStrategy::Sequential => QuestionId::new(next_sequential_id().to_string()),
            IdStrategy::CategorySequence { width } => {
                let seq = self.per_category.entry(category.to_string()).or_insert(0);
                *seq += 1;
                let prefix = if category.is_empty() { "q" } else { category };
                QuestionId::new(format!("{prefix}-{:0width$}", *seq, width = width))
            }
        }
    }
}
