//! Core types for the quiz application.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Named partition of the question bank, one CSV asset each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    It,
    Customer,
    Product,
}

impl Field {
    /// All fields in canonical order.
    pub const ALL: [Field; 3] = [Field::It, Field::Customer, Field::Product];

    /// Get the field key as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::It => "it",
            Self::Customer => "customer",
            Self::Product => "product",
        }
    }

    /// Parse from the lowercase key.
    pub fn from_key(s: &str) -> Option<Self> {
        match s {
            "it" => Some(Self::It),
            "customer" => Some(Self::Customer),
            "product" => Some(Self::Product),
            _ => None,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::It => "IT",
            Self::Customer => "Customer",
            Self::Product => "Product",
        }
    }

    /// File name of the CSV asset backing this field.
    pub fn file_name(&self) -> String {
        format!("{}.csv", self.as_str())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| format!("unknown field '{s}'"))
    }
}

/// Identifier assigned to a question at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One multiple-choice question.
///
/// Options are positional (`options[0]` is `option1`); an absent option is
/// `None` and is never offered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: QuestionId,
    pub category: String,
    pub question: String,
    pub options: [Option<String>; 4],
    pub answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

impl QuestionRecord {
    /// Create a record with no options and no memo.
    pub fn new(
        id: QuestionId,
        category: impl Into<String>,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            id,
            category: category.into(),
            question: question.into(),
            options: [None, None, None, None],
            answer: answer.into(),
            memo: None,
        }
    }

    /// Set options from a list; empty strings and positions past four are dropped.
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = [None, None, None, None];
        for (slot, option) in self.options.iter_mut().zip(options) {
            let option = option.into();
            *slot = (!option.is_empty()).then_some(option);
        }
        self
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        let memo = memo.into();
        self.memo = (!memo.is_empty()).then_some(memo);
        self
    }

    /// Options that are actually offered, in column order.
    pub fn offered_options(&self) -> Vec<&str> {
        self.options.iter().flatten().map(String::as_str).collect()
    }

    /// Whether the answer matches one of the offered options.
    pub fn is_answerable(&self) -> bool {
        self.offered_options().contains(&self.answer.as_str())
    }
}

/// A question answered incorrectly, with the choice that was made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrongQuestionRecord {
    #[serde(flatten)]
    pub question: QuestionRecord,
    pub selected_answer: Option<String>,
}

impl WrongQuestionRecord {
    pub fn new(question: QuestionRecord, selected_answer: Option<String>) -> Self {
        Self {
            question,
            selected_answer,
        }
    }

    /// Strip the selected answer, reverting to a plain question.
    pub fn into_question(self) -> QuestionRecord {
        self.question
    }
}

/// How ids are generated while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum IdStrategy {
    /// Process-wide incrementing counter seeded from the clock.
    Sequential,
    /// `{category}-{seq}`, with the sequence restarting at 1 per category.
    CategorySequence { width: usize },
}

impl Default for IdStrategy {
    fn default() -> Self {
        Self::Sequential
    }
}

impl IdStrategy {
    /// Category sequence with the default padding width of 3.
    pub fn category_sequence() -> Self {
        Self::CategorySequence { width: 3 }
    }

    /// Parse from a configuration key.
    pub fn from_key(s: &str) -> Option<Self> {
        match s {
            "sequential" => Some(Self::Sequential),
            "category" => Some(Self::category_sequence()),
            _ => None,
        }
    }
}

/// How CSV columns are associated with record fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnMapping {
    /// Look columns up by header name.
    ByHeader,
    /// Assume the canonical 9-column order; the header row is skipped.
    Fixed,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self::ByHeader
    }
}

/// Treatment of raw newlines inside quoted fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NewlineMode {
    Preserve,
    /// Replace with the two characters `\n`.
    Escape,
}

impl Default for NewlineMode {
    fn default() -> Self {
        Self::Preserve
    }
}

/// Options controlling CSV parsing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    pub id_strategy: IdStrategy,
    pub columns: ColumnMapping,
    pub newlines: NewlineMode,
}

impl ParseOptions {
    /// Options used by the maintenance tools: fixed canonical columns.
    pub fn maintenance() -> Self {
        Self {
            columns: ColumnMapping::Fixed,
            ..Self::default()
        }
    }

    pub fn with_id_strategy(mut self, id_strategy: IdStrategy) -> Self {
        self.id_strategy = id_strategy;
        self
    }
}

/// Settings chosen on the start screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSettings {
    pub selected_fields: Vec<Field>,
    pub is_random: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_index: Option<usize>,
    pub use_start_index: bool,
    pub show_answers: bool,
}

impl QuizSettings {
    /// Start offset, honoured only when explicitly enabled.
    pub fn effective_start_index(&self) -> Option<usize> {
        if self.use_start_index {
            self.start_index
        } else {
            None
        }
    }
}
