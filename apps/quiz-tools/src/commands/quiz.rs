//! Interactive quiz in the terminal.
//!
//! Input is line based: a number picks an option, `q` ends the session early,
//! an empty line moves on after the answer is shown. End of input finishes.

use std::io::{BufRead, Lines, Write};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use quiz_core::{
    load_question_bank, Field, ParseOptions, QuestionBank, QuizError, SessionConfig, SessionReport,
    SessionState, SessionStatus,
};

use crate::cli::QuizArgs;
use crate::error::ToolError;
use crate::source::DirectorySource;

pub fn run<R: BufRead, W: Write>(
    args: &QuizArgs,
    options: &ParseOptions,
    input: R,
    out: &mut W,
) -> anyhow::Result<()> {
    let settings = args.settings();
    let source = DirectorySource::new(&args.csv_dir);

    let bank = load_question_bank(&source, &settings.selected_fields, options).map_err(|err| match err {
        QuizError::Usage(message) => ToolError::Usage(message),
        other => ToolError::Load(other.to_string()),
    })?;
    tracing::info!(questions = bank.len(), "question bank loaded");
    let unanswerable = bank.unanswerable().count();
    if unanswerable > 0 {
        writeln!(out, "Note: {unanswerable} question(s) have an answer that is not among their options.")?;
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    run_session(&bank, SessionConfig::from(&settings), &mut rng, input, out)?;
    Ok(())
}

/// Drive one session (and any retries) from `input`.
///
/// Returns the report of the last finished round, if any round finished.
pub fn run_session<G, R, W>(
    bank: &QuestionBank,
    config: SessionConfig,
    rng: &mut G,
    input: R,
    out: &mut W,
) -> anyhow::Result<Option<SessionReport>>
where
    G: Rng + ?Sized,
    R: BufRead,
    W: Write,
{
    let mut lines = input.lines();
    let mut state = SessionState::start(bank.sets(), config, rng);
    let mut last_report = None;

    loop {
        match state.status() {
            SessionStatus::NotStarted => {
                if let Some(reason) = state.empty_reason() {
                    writeln!(out, "{}", reason.message())?;
                }
                return Ok(last_report);
            }
            SessionStatus::InProgress => {
                write_question(&state, out)?;
                let Some(answered) = answer(&state, &mut lines, out)? else {
                    state = state.finish()?;
                    continue;
                };
                state = answered;

                write_feedback(&state, out)?;
                write!(out, "Press Enter for the next question, q to finish: ")?;
                out.flush()?;
                state = match read_command(&mut lines)?.as_deref() {
                    None | Some("q") => state.finish()?,
                    Some(_) => state.advance(rng)?,
                };
            }
            SessionStatus::Finished => {
                let report = state.report();
                write_report(&report, out)?;
                let can_retry = !report.wrong_questions.is_empty();
                last_report = Some(report);

                if can_retry {
                    write!(out, "Enter r to retry the wrong questions, anything else to quit: ")?;
                    out.flush()?;
                    if read_command(&mut lines)?.as_deref() == Some("r") {
                        state = state.retry(false, rng)?;
                        continue;
                    }
                }
                state = state.reset();
            }
        }
    }
}

/// Prompt until an option is picked. `None` means the user asked to finish.
fn answer<R: BufRead, W: Write>(
    state: &SessionState,
    lines: &mut Lines<R>,
    out: &mut W,
) -> anyhow::Result<Option<SessionState>> {
    let Some(presentation) = state.presentation() else {
        return Ok(None);
    };
    if presentation.checked {
        return Ok(Some(state.clone()));
    }

    let count = presentation.options.len();
    if count == 0 {
        writeln!(out, "This question offers no options.")?;
        loop {
            write!(out, "Enter q to finish: ")?;
            out.flush()?;
            match read_command(lines)?.as_deref() {
                None | Some("q") => return Ok(None),
                Some(_) => continue,
            }
        }
    }

    loop {
        write!(out, "Answer [1-{count}], q to finish: ")?;
        out.flush()?;
        let Some(command) = read_command(lines)? else {
            return Ok(None);
        };
        if command == "q" {
            return Ok(None);
        }

        match command.parse::<usize>() {
            Ok(choice) if (1..=count).contains(&choice) => {
                let selected = state.select(&presentation.options[choice - 1])?;
                return Ok(Some(selected.check_answer()?));
            }
            _ => writeln!(out, "Enter a number between 1 and {count}.")?,
        }
    }
}

fn read_command<R: BufRead>(lines: &mut Lines<R>) -> anyhow::Result<Option<String>> {
    match lines.next() {
        Some(line) => Ok(Some(line?.trim().to_lowercase())),
        None => Ok(None),
    }
}

fn write_question<W: Write>(state: &SessionState, out: &mut W) -> std::io::Result<()> {
    let (Some(question), Some(presentation)) = (state.current_question(), state.presentation()) else {
        return Ok(());
    };

    writeln!(out)?;
    let round = if state.is_retry() { " (retry)" } else { "" };
    let category = Field::from_key(&question.category).map_or(question.category.as_str(), |field| field.label());
    writeln!(
        out,
        "Question {}/{}{round} [{category}]",
        state.current_index() + 1,
        state.total_questions(),
    )?;
    writeln!(out, "{}", question.question)?;
    for (number, option) in presentation.options.iter().enumerate() {
        writeln!(out, "  {}. {option}", number + 1)?;
    }
    Ok(())
}

fn write_feedback<W: Write>(state: &SessionState, out: &mut W) -> std::io::Result<()> {
    let Some(feedback) = state.feedback() else {
        return Ok(());
    };

    if state.show_answers_always() {
        writeln!(out, "Answer: {}", feedback.correct_answer)?;
    } else if feedback.is_correct {
        writeln!(out, "Correct!")?;
    } else {
        writeln!(out, "Wrong. The answer is: {}", feedback.correct_answer)?;
    }
    if let Some(memo) = &feedback.memo {
        writeln!(out, "Note: {memo}")?;
    }
    Ok(())
}

pub fn write_report<W: Write>(report: &SessionReport, out: &mut W) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Result")?;
    writeln!(out, "  Correct: {}", report.correct_count)?;
    writeln!(out, "  Wrong:   {}", report.wrong_count)?;
    writeln!(out, "  Rate:    {}", report.correct_rate)?;

    if !report.wrong_questions.is_empty() {
        writeln!(out, "Review:")?;
        for wrong in &report.wrong_questions {
            let question = &wrong.question;
            writeln!(out, "  [{}] {}", question.category, question.question)?;
            writeln!(
                out,
                "      your answer: {}  correct: {}",
                wrong.selected_answer.as_deref().unwrap_or("-"),
                question.answer
            )?;
        }
    }
    Ok(())
}
