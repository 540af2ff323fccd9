//! Quiz session state machine.
//!
//! A [`SessionState`] is a plain value. Every transition borrows the current
//! state and returns the next one, so a rejected transition leaves the caller
//! holding the state it had:
//!
//! ```text
//! start ─► InProgress ─(select, check_answer, advance)─► Finished ─► retry ─► InProgress
//!                 └──────────────── finish ───────────────┘
//! ```

pub mod report;

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use crate::types::{QuestionRecord, QuizSettings, WrongQuestionRecord};

pub use report::{dedup_by_id, CorrectRate, SessionReport};

/// Errors for transitions that are not allowed in the current state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("session is not in progress")]
    NotInProgress,

    #[error("session has not finished")]
    NotFinished,

    #[error("no answer selected")]
    NoSelection,

    #[error("answer already checked")]
    AlreadyChecked,

    #[error("current question has not been answered")]
    AnswerPending,

    #[error("'{0}' is not one of the offered options")]
    UnknownOption(String),

    #[error("no questions to retry")]
    NothingToRetry,
}

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionStatus {
    #[default]
    NotStarted,
    InProgress,
    Finished,
}

/// Why a session could not start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    /// No question data was loaded.
    NoQuestions,
    /// Questions exist but none at the requested start offset.
    InvalidStartIndex,
    /// A retry was requested with an empty list.
    NoRetryQuestions,
}

impl EmptyReason {
    pub fn message(&self) -> &'static str {
        match self {
            Self::NoQuestions => "No question data. Select a field on the start screen.",
            Self::InvalidStartIndex => "No question found at the requested start position.",
            Self::NoRetryQuestions => "There are no questions to retry.",
        }
    }
}

/// Session options taken from the start screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionConfig {
    pub randomize: bool,
    pub start_index: Option<usize>,
    /// Study mode: the correct answer is preselected and nothing is graded.
    pub show_answers_always: bool,
}

impl From<&QuizSettings> for SessionConfig {
    fn from(settings: &QuizSettings) -> Self {
        Self {
            randomize: settings.is_random,
            start_index: settings.effective_start_index(),
            show_answers_always: settings.show_answers,
        }
    }
}

/// How the current question is shown: shuffled options plus selection state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    pub options: Vec<String>,
    pub selected: Option<String>,
    pub checked: bool,
}

/// Result of checking the current answer, for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub is_correct: bool,
    pub selected_answer: Option<String>,
    pub correct_answer: String,
    pub memo: Option<String>,
}

/// Complete state of one quiz session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    active_questions: Vec<QuestionRecord>,
    start_index: usize,
    current_index: usize,
    correct_count: usize,
    wrong_count: usize,
    wrong_questions: Vec<WrongQuestionRecord>,
    retry_queue: Option<Vec<QuestionRecord>>,
    show_answers_always: bool,
    status: SessionStatus,
    empty_reason: Option<EmptyReason>,
    presentation: Option<Presentation>,
}

impl SessionState {
    /// Build a session from question sets, concatenated in the given order.
    ///
    /// When `randomize` is set the whole list is shuffled once. A start offset
    /// past the end leaves the session not started with
    /// [`EmptyReason::InvalidStartIndex`].
    pub fn start<I, R>(sets: I, config: SessionConfig, rng: &mut R) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<[QuestionRecord]>,
        R: Rng + ?Sized,
    {
        let mut questions: Vec<QuestionRecord> = sets
            .into_iter()
            .flat_map(|set| set.as_ref().to_vec())
            .collect();
        if config.randomize {
            questions.shuffle(rng);
        }

        let state = Self {
            active_questions: questions,
            start_index: config.start_index.unwrap_or(0),
            show_answers_always: config.show_answers_always,
            ..Self::default()
        };
        state.enter(0, rng)
    }

    /// Choose one of the offered options for the current question.
    pub fn select(&self, answer: &str) -> Result<Self, SessionError> {
        let presentation = self.open_presentation()?;
        if !presentation.options.iter().any(|option| option == answer) {
            return Err(SessionError::UnknownOption(answer.to_string()));
        }

        let mut next = self.clone();
        if let Some(presentation) = next.presentation.as_mut() {
            presentation.selected = Some(answer.to_string());
        }
        Ok(next)
    }

    /// Grade the selected answer by exact comparison with the record's answer.
    pub fn check_answer(&self) -> Result<Self, SessionError> {
        let presentation = self.open_presentation()?;
        let selected = presentation.selected.clone().ok_or(SessionError::NoSelection)?;
        let question = self.current_question().ok_or(SessionError::NotInProgress)?.clone();

        let mut next = self.clone();
        if selected == question.answer {
            next.correct_count += 1;
        } else {
            next.wrong_count += 1;
            next.wrong_questions
                .push(WrongQuestionRecord::new(question, Some(selected)));
        }
        if let Some(presentation) = next.presentation.as_mut() {
            presentation.checked = true;
        }
        Ok(next)
    }

    /// Move to the next question, finishing after the last one.
    pub fn advance<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Self, SessionError> {
        self.ensure_in_progress()?;
        if !self.presentation.as_ref().is_some_and(|p| p.checked) {
            return Err(SessionError::AnswerPending);
        }

        let next_index = self.current_index + 1;
        if next_index >= self.effective_questions().len() {
            return self.finish();
        }
        Ok(self.clone().enter(next_index, rng))
    }

    /// Stop the session and go to the result. Allowed at any point in progress.
    pub fn finish(&self) -> Result<Self, SessionError> {
        self.ensure_in_progress()?;
        let mut next = self.clone();
        next.status = SessionStatus::Finished;
        next.retry_queue = None;
        next.presentation = None;
        Ok(next)
    }

    /// Start over with only the questions answered wrong, deduplicated by id.
    ///
    /// Counters and the wrong list are reset so the next report covers the
    /// retry alone. The list keeps its order unless `reshuffle` is set.
    pub fn retry<R: Rng + ?Sized>(&self, reshuffle: bool, rng: &mut R) -> Result<Self, SessionError> {
        if self.status != SessionStatus::Finished {
            return Err(SessionError::NotFinished);
        }

        let mut queue: Vec<QuestionRecord> = dedup_by_id(&self.wrong_questions)
            .into_iter()
            .map(WrongQuestionRecord::into_question)
            .collect();
        if queue.is_empty() {
            return Err(SessionError::NothingToRetry);
        }
        if reshuffle {
            queue.shuffle(rng);
        }

        let state = Self {
            active_questions: self.active_questions.clone(),
            start_index: self.start_index,
            show_answers_always: self.show_answers_always,
            retry_queue: Some(queue),
            ..Self::default()
        };
        Ok(state.enter(0, rng))
    }

    /// Back to the start screen: everything is cleared.
    pub fn reset(&self) -> Self {
        Self::default()
    }

    /// Score so far; final once the session is finished.
    pub fn report(&self) -> SessionReport {
        SessionReport::new(self.correct_count, self.wrong_count, &self.wrong_questions)
    }

    /// Feedback for the current question once it has been checked.
    pub fn feedback(&self) -> Option<AnswerFeedback> {
        let presentation = self.presentation.as_ref().filter(|p| p.checked)?;
        let question = self.current_question()?;
        Some(AnswerFeedback {
            is_correct: self.show_answers_always
                || presentation.selected.as_deref() == Some(question.answer.as_str()),
            selected_answer: presentation.selected.clone(),
            correct_answer: question.answer.clone(),
            memo: question.memo.clone(),
        })
    }

    /// The list the session walks through: the retry list if one is active,
    /// otherwise the ordered questions from the start offset.
    pub fn effective_questions(&self) -> &[QuestionRecord] {
        match &self.retry_queue {
            Some(queue) => queue,
            None => self
                .active_questions
                .get(self.start_index..)
                .unwrap_or_default(),
        }
    }

    pub fn current_question(&self) -> Option<&QuestionRecord> {
        if self.status != SessionStatus::InProgress {
            return None;
        }
        self.effective_questions().get(self.current_index)
    }

    pub fn presentation(&self) -> Option<&Presentation> {
        self.presentation.as_ref()
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn empty_reason(&self) -> Option<EmptyReason> {
        self.empty_reason
    }

    pub fn active_questions(&self) -> &[QuestionRecord] {
        &self.active_questions
    }

    pub fn retry_queue(&self) -> Option<&[QuestionRecord]> {
        self.retry_queue.as_deref()
    }

    pub fn is_retry(&self) -> bool {
        self.retry_queue.is_some()
    }

    pub fn start_index(&self) -> usize {
        self.start_index
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total_questions(&self) -> usize {
        self.effective_questions().len()
    }

    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    pub fn wrong_count(&self) -> usize {
        self.wrong_count
    }

    pub fn wrong_questions(&self) -> &[WrongQuestionRecord] {
        &self.wrong_questions
    }

    pub fn show_answers_always(&self) -> bool {
        self.show_answers_always
    }

    /// Whether the current question is the last one.
    pub fn is_last_question(&self) -> bool {
        self.current_question().is_some() && self.current_index + 1 == self.total_questions()
    }

    /// Make `index` current with a freshly shuffled presentation, or record
    /// why there is nothing to show.
    fn enter<R: Rng + ?Sized>(mut self, index: usize, rng: &mut R) -> Self {
        self.current_index = index;
        let total = self.effective_questions().len();

        if total == 0 {
            self.status = SessionStatus::NotStarted;
            self.presentation = None;
            self.empty_reason = Some(if self.retry_queue.is_some() {
                EmptyReason::NoRetryQuestions
            } else if !self.active_questions.is_empty() {
                EmptyReason::InvalidStartIndex
            } else {
                EmptyReason::NoQuestions
            });
            return self;
        }

        self.status = SessionStatus::InProgress;
        self.empty_reason = None;
        let reveal = self.show_answers_always;
        self.presentation = self
            .effective_questions()
            .get(index)
            .map(|question| present(question, reveal, rng));
        self
    }

    fn ensure_in_progress(&self) -> Result<(), SessionError> {
        if self.status == SessionStatus::InProgress {
            Ok(())
        } else {
            Err(SessionError::NotInProgress)
        }
    }

    /// Presentation of the current question if it can still be answered.
    fn open_presentation(&self) -> Result<&Presentation, SessionError> {
        self.ensure_in_progress()?;
        let presentation = self.presentation.as_ref().ok_or(SessionError::NotInProgress)?;
        if presentation.checked {
            return Err(SessionError::AlreadyChecked);
        }
        Ok(presentation)
    }
}

fn present<R: Rng + ?Sized>(question: &QuestionRecord, reveal: bool, rng: &mut R) -> Presentation {
    Presentation {
        options: shuffled(&question.offered_options(), rng)
            .into_iter()
            .map(str::to_string)
            .collect(),
        selected: reveal.then(|| question.answer.clone()),
        checked: reveal,
    }
}

/// Uniformly shuffled copy of `items` (Fisher-Yates).
pub fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut copy = items.to_vec();
    copy.shuffle(rng);
    copy
}
