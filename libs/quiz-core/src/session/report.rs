//! End-of-session scoring.

use std::collections::HashSet;
use std::fmt;

use crate::types::WrongQuestionRecord;

/// Share of answered questions that were correct.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CorrectRate {
    /// Nothing was answered.
    NotApplicable,
    /// Percentage rounded to one decimal place.
    Percent(f64),
}

impl CorrectRate {
    pub fn from_counts(correct: usize, answered: usize) -> Self {
        if answered == 0 {
            return Self::NotApplicable;
        }
        let percent = correct as f64 / answered as f64 * 100.0;
        Self::Percent((percent * 10.0).round() / 10.0)
    }
}

impl fmt::Display for CorrectRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotApplicable => f.write_str("N/A"),
            Self::Percent(value) => write!(f, "{value:.1}%"),
        }
    }
}

/// Score and review list shown once a session finishes.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionReport {
    pub correct_count: usize,
    pub wrong_count: usize,
    pub correct_rate: CorrectRate,
    /// Wrong questions with repeats of the same id removed.
    pub wrong_questions: Vec<WrongQuestionRecord>,
}

impl SessionReport {
    pub fn new(correct_count: usize, wrong_count: usize, wrong_questions: &[WrongQuestionRecord]) -> Self {
        Self {
            correct_count,
            wrong_count,
            correct_rate: CorrectRate::from_counts(correct_count, correct_count + wrong_count),
            wrong_questions: dedup_by_id(wrong_questions),
        }
    }

    pub fn answered(&self) -> usize {
        self.correct_count + self.wrong_count
    }

    pub fn is_perfect(&self) -> bool {
        self.answered() > 0 && self.wrong_questions.is_empty()
    }
}

/// Keep the first occurrence of each question id.
pub fn dedup_by_id(questions: &[WrongQuestionRecord]) -> Vec<WrongQuestionRecord> {
    let mut seen = HashSet::new();
    questions
        .iter()
        .filter(|wrong| seen.insert(&wrong.question.id))
        .cloned()
        .collect()
}
