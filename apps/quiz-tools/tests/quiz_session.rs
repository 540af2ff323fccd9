//! Scripted terminal quiz sessions.

mod common;

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use quiz_core::{
    load_question_bank, CorrectRate, Field, ParseOptions, SessionConfig, SessionStatus,
};
use quiz_tools::cli::QuizArgs;
use quiz_tools::commands::quiz::{run, run_session};
use quiz_tools::error::ToolError;
use quiz_tools::source::DirectorySource;
use rand::rngs::StdRng;
use rand::SeedableRng;

use common::fixtures;
use common::{output, TestContext};

fn quiz_args(dir: PathBuf, fields: Vec<Field>) -> QuizArgs {
    QuizArgs {
        fields,
        random: false,
        start_index: None,
        show_answers: false,
        seed: Some(42),
        csv_dir: dir,
    }
}

fn bank_dir(ctx: &TestContext) {
    ctx.write("it.csv", &fixtures::single_option_questions("it", 2));
    let mut customer = fixtures::single_option_questions("customer", 1);
    customer.push_str(&fixtures::trick_question("customer", "Trick?"));
    customer.push('\n');
    ctx.write("customer.csv", &customer);
}

#[test]
fn test_full_session_with_retry() {
    let ctx = TestContext::new();
    bank_dir(&ctx);
    let source = DirectorySource::new(ctx.dir());
    let bank = load_question_bank(&source, &[Field::It, Field::Customer], &ParseOptions::default()).unwrap();
    let mut rng = StdRng::seed_from_u64(42);

    // Four answers with Enter after each, retry, answer the trick question
    // wrong again, then quit from the result screen.
    let script = "1\n\n1\n\n1\n\n1\n\nr\n1\n\n\n";
    let mut out = Vec::new();
    let report = run_session(&bank, SessionConfig::default(), &mut rng, script.as_bytes(), &mut out)
        .unwrap()
        .unwrap();
    let text = output(out);

    assert!(text.contains("Question 1/4 [IT]"));
    assert!(text.contains("Wrong. The answer is: Right"));
    assert!(text.contains("Note: remember this"));
    assert!(text.contains("  Rate:    75.0%"));
    assert!(text.contains("Question 1/1 (retry) [Customer]"));
    assert_eq!(report.correct_count, 0);
    assert_eq!(report.wrong_count, 1);
    assert_eq!(report.correct_rate, CorrectRate::Percent(0.0));
    assert_eq!(report.wrong_questions[0].selected_answer.as_deref(), Some("Wrong"));
}

#[test]
fn test_quit_early_reports_answered_only() {
    let ctx = TestContext::new();
    bank_dir(&ctx);
    let source = DirectorySource::new(ctx.dir());
    let bank = load_question_bank(&source, &[Field::It], &ParseOptions::default()).unwrap();
    let mut rng = StdRng::seed_from_u64(42);

    let mut out = Vec::new();
    let report = run_session(&bank, SessionConfig::default(), &mut rng, "1\nq\n".as_bytes(), &mut out)
        .unwrap()
        .unwrap();

    assert_eq!(report.correct_count, 1);
    assert_eq!(report.wrong_count, 0);
    assert!(report.is_perfect());
    assert!(!output(out).contains("Question 2/2"));
}

#[test]
fn test_invalid_choice_prompts_again() {
    let ctx = TestContext::new();
    bank_dir(&ctx);
    let source = DirectorySource::new(ctx.dir());
    let bank = load_question_bank(&source, &[Field::It], &ParseOptions::default()).unwrap();
    let mut rng = StdRng::seed_from_u64(42);

    let mut out = Vec::new();
    let report = run_session(&bank, SessionConfig::default(), &mut rng, "7\nabc\n1\n".as_bytes(), &mut out)
        .unwrap()
        .unwrap();

    assert_eq!(output(out).matches("Enter a number between 1 and 1.").count(), 2);
    assert_eq!(report.correct_count, 1);
}

#[test]
fn test_start_index_past_end_is_explained() {
    let ctx = TestContext::new();
    bank_dir(&ctx);
    let source = DirectorySource::new(ctx.dir());
    let bank = load_question_bank(&source, &[Field::It], &ParseOptions::default()).unwrap();
    let config = SessionConfig {
        start_index: Some(10),
        ..SessionConfig::default()
    };

    let mut out = Vec::new();
    let report = run_session(&bank, config, &mut StdRng::seed_from_u64(1), "".as_bytes(), &mut out).unwrap();

    assert_eq!(report, None);
    assert_eq!(output(out), "No question found at the requested start position.\n");
}

#[test]
fn test_show_answers_mode_grades_nothing() {
    let ctx = TestContext::new();
    bank_dir(&ctx);
    let source = DirectorySource::new(ctx.dir());
    let bank = load_question_bank(&source, &[Field::Customer], &ParseOptions::default()).unwrap();
    let config = SessionConfig {
        show_answers_always: true,
        ..SessionConfig::default()
    };

    let mut out = Vec::new();
    let report = run_session(&bank, config, &mut StdRng::seed_from_u64(7), "\n\n".as_bytes(), &mut out)
        .unwrap()
        .unwrap();
    let text = output(out);

    assert!(text.contains("Answer: Right"));
    assert_eq!(report.correct_rate, CorrectRate::NotApplicable);
    assert!(text.contains("  Rate:    N/A"));
}

#[test]
fn test_missing_field_file_fails_the_load() {
    let ctx = TestContext::new();
    bank_dir(&ctx);
    let args = quiz_args(ctx.dir().to_path_buf(), vec![Field::It, Field::Product]);

    let err = run(&args, &ParseOptions::default(), "".as_bytes(), &mut Vec::new()).unwrap_err();
    let tool_error = err.downcast_ref::<ToolError>().unwrap();

    assert!(matches!(tool_error, ToolError::Load(message) if message.contains("product")));
    assert_eq!(tool_error.exit_code(), 1);
}

#[test]
fn test_run_loads_from_directory() {
    let ctx = TestContext::new();
    bank_dir(&ctx);
    let args = quiz_args(ctx.dir().to_path_buf(), vec![Field::It]);

    let mut out = Vec::new();
    run(&args, &ParseOptions::default(), "1\n\n1\n\n".as_bytes(), &mut out).unwrap();
    let text = output(out);

    assert!(text.contains("Question 2/2 [IT]"));
    assert!(text.contains("  Rate:    100.0%"));
}

#[test]
fn test_session_status_after_load() {
    let ctx = TestContext::new();
    bank_dir(&ctx);
    let source = DirectorySource::new(ctx.dir());
    let bank = load_question_bank(&source, &[Field::Customer, Field::It], &ParseOptions::default()).unwrap();

    let state = quiz_core::SessionState::start(bank.sets(), SessionConfig::default(), &mut StdRng::seed_from_u64(3));

    assert_eq!(state.status(), SessionStatus::InProgress);
    assert_eq!(state.total_questions(), 4);
    assert_eq!(state.current_question().unwrap().category, "customer");
}

#[test]
fn test_no_fields_is_a_usage_error() {
    let ctx = TestContext::new();
    let args = quiz_args(ctx.dir().to_path_buf(), Vec::new());

    let err = run(&args, &ParseOptions::default(), "".as_bytes(), &mut Vec::new()).unwrap_err();
    let tool_error = err.downcast_ref::<ToolError>().unwrap();

    assert!(matches!(tool_error, ToolError::Usage(_)));
    assert_eq!(tool_error.exit_code(), 2);
}

#[test]
fn test_question_without_options_can_only_finish() {
    let ctx = TestContext::new();
    ctx.write("product.csv", &fixtures::csv(&["1,,product,Empty?,,,,,x", "2,,product,Next?,y,,,,y"]));
    let source = DirectorySource::new(ctx.dir());
    let bank = load_question_bank(&source, &[Field::Product], &ParseOptions::default()).unwrap();

    let mut out = Vec::new();
    let report = run_session(
        &bank,
        SessionConfig::default(),
        &mut StdRng::seed_from_u64(5),
        "1\n\nq\n".as_bytes(),
        &mut out,
    )
    .unwrap()
    .unwrap();
    let text = output(out);

    assert!(text.contains("Question 1/2 [Product]"));
    assert!(text.contains("This question offers no options."));
    assert_eq!(text.matches("Enter q to finish: ").count(), 3);
    assert!(!text.contains("Answer [1-0]"));
    assert!(!text.contains("Next?"));
    assert_eq!(report.correct_rate, CorrectRate::NotApplicable);
}

#[test]
fn test_run_notes_unanswerable_questions() {
    let ctx = TestContext::new();
    bank_dir(&ctx);
    let args = quiz_args(ctx.dir().to_path_buf(), vec![Field::Customer]);

    let mut out = Vec::new();
    run(&args, &ParseOptions::default(), "q\n".as_bytes(), &mut out).unwrap();
    let text = output(out);

    assert!(text.starts_with("Note: 1 question(s) have an answer that is not among their options.\n"));
    assert!(text.contains("Question 1/2 [Customer]"));
}
