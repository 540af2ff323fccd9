//! All-or-nothing loading of the question bank for a session.

use crate::error::{QuizError, Result};
use crate::parser::parse_with;
use crate::types::{Field, ParseOptions, QuestionRecord};

/// Supplies raw CSV text for a field.
pub trait CsvSource {
    fn fetch(&self, field: Field) -> Result<String>;
}

/// Question sets keyed by field, in selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionBank {
    sets: Vec<(Field, Vec<QuestionRecord>)>,
}

impl QuestionBank {
    pub fn sets(&self) -> impl Iterator<Item = &[QuestionRecord]> {
        self.sets.iter().map(|(_, questions)| questions.as_slice())
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.sets.iter().map(|(field, _)| *field)
    }

    pub fn len(&self) -> usize {
        self.sets.iter().map(|(_, questions)| questions.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Questions whose answer is not one of their offered options.
    pub fn unanswerable(&self) -> impl Iterator<Item = &QuestionRecord> {
        self.sets()
            .flatten()
            .filter(|question| !question.is_answerable())
    }
}

/// Loading status as seen by the session screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loaded(QuestionBank),
    Failed(String),
}

impl LoadState {
    /// Load the bank and fold the outcome into a state. A failure keeps no data.
    pub fn load<S: CsvSource + ?Sized>(source: &S, fields: &[Field], options: &ParseOptions) -> Self {
        if fields.is_empty() {
            return Self::Idle;
        }
        match load_question_bank(source, fields, options) {
            Ok(bank) => Self::Loaded(bank),
            Err(err) => {
                tracing::warn!(error = %err, "question bank load failed");
                Self::Failed(err.to_string())
            }
        }
    }

    pub fn bank(&self) -> Option<&QuestionBank> {
        match self {
            Self::Loaded(bank) => Some(bank),
            _ => None,
        }
    }
}

/// Fetch and parse every field. Any failure discards everything fetched so far.
pub fn load_question_bank<S: CsvSource + ?Sized>(
    source: &S,
    fields: &[Field],
    options: &ParseOptions,
) -> Result<QuestionBank> {
    if fields.is_empty() {
        return Err(QuizError::Usage("select at least one field".to_string()));
    }

    let sets = fields
        .iter()
        .map(|&field| {
            let text = source.fetch(field).map_err(|err| match err {
                QuizError::FetchFailure { .. } => err,
                other => QuizError::FetchFailure {
                    field,
                    message: other.to_string(),
                },
            })?;
            Ok((field, parse_with(&text, options)?))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(QuestionBank { sets })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const HEADER: &str = "no,memo,category,question,option1,option2,option3,option4,answer";

    struct MapSource(HashMap<Field, String>);

    impl CsvSource for MapSource {
        fn fetch(&self, field: Field) -> Result<String> {
            self.0.get(&field).cloned().ok_or(QuizError::FetchFailure {
                field,
                message: "404 Not Found".to_string(),
            })
        }
    }

    fn source() -> MapSource {
        let mut files = HashMap::new();
        files.insert(Field::It, format!("{HEADER}\n1,,it,IT1,a,b,,,a\n2,,it,IT2,a,b,,,b"));
        files.insert(Field::Customer, format!("{HEADER}\n1,,customer,C1,a,b,,,a"));
        MapSource(files)
    }

    #[test]
    fn loads_fields_in_selection_order() {
        let bank = load_question_bank(&source(), &[Field::Customer, Field::It], &ParseOptions::default()).unwrap();
        assert_eq!(bank.fields().collect::<Vec<_>>(), vec![Field::Customer, Field::It]);
        assert_eq!(bank.len(), 3);
    }

    #[test]
    fn flags_questions_without_a_matching_option() {
        let mut files = HashMap::new();
        files.insert(Field::It, format!("{HEADER}\n1,,it,IT1,a,b,,,a\n2,,it,IT2,a,b,,,c\n3,,it,IT3,,,,,a"));
        let bank = load_question_bank(&MapSource(files), &[Field::It], &ParseOptions::default()).unwrap();

        let texts: Vec<_> = bank.unanswerable().map(|q| q.question.as_str()).collect();
        assert_eq!(texts, vec!["IT2", "IT3"]);
    }

    #[test]
    fn one_failure_fails_the_whole_batch() {
        let state = LoadState::load(&source(), &[Field::It, Field::Product], &ParseOptions::default());
        assert_eq!(state, LoadState::Failed("failed to fetch product: 404 Not Found".to_string()));
        assert!(state.bank().is_none());
    }

    #[test]
    fn loading_nothing_is_a_usage_error() {
        let err = load_question_bank(&source(), &[], &ParseOptions::default()).unwrap_err();
        assert!(matches!(err, QuizError::Usage(_)));
    }

    #[test]
    fn no_fields_is_idle() {
        assert_eq!(LoadState::load(&source(), &[], &ParseOptions::default()), LoadState::Idle);
    }
}
