//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use quiz_core::{AnalyzeOptions, Field, IdStrategy, ParseOptions, QuizSettings};

#[derive(Debug, Parser)]
#[command(name = "quiz-tools")]
#[command(about = "Maintain CSV question banks and run quizzes from them", version)]
pub struct Cli {
    /// How question ids are generated: "sequential" or "category"
    #[arg(long, global = true, env = "QUIZ_ID_STRATEGY", default_value = "sequential", value_parser = parse_id_strategy)]
    pub id_strategy: IdStrategy,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse options for the maintenance commands (fixed canonical columns).
    pub fn maintenance_options(&self) -> ParseOptions {
        ParseOptions::maintenance().with_id_strategy(self.id_strategy)
    }

    /// Parse options for quiz assets (columns by header name).
    pub fn quiz_options(&self) -> ParseOptions {
        ParseOptions::default().with_id_strategy(self.id_strategy)
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List questions in ORIGINAL whose text is not in BACKUP
    Compare {
        original: PathBuf,
        backup: PathBuf,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List groups of questions sharing the same answer
    Duplicates {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Print the reports as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rewrite exported CSV files in place to the canonical schema
    Format {
        /// Files to format; defaults to every field file in the CSV directory
        paths: Vec<PathBuf>,
        #[arg(long, env = "QUIZ_CSV_DIR", default_value = "public/csv")]
        csv_dir: PathBuf,
    },

    /// Compare against a backup and detect duplicates in one run
    Analyze(AnalyzeArgs),

    /// Run an interactive quiz in the terminal
    Quiz(QuizArgs),
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    pub original: PathBuf,
    pub backup: Option<PathBuf>,
    /// Skip the comparison against the backup
    #[arg(long)]
    pub no_comparison: bool,
    /// Skip duplicate detection
    #[arg(long)]
    pub no_duplicates: bool,
    /// Skip the overall summary
    #[arg(long)]
    pub no_summary: bool,
}

impl AnalyzeArgs {
    pub fn options(&self) -> AnalyzeOptions {
        AnalyzeOptions {
            comparison: !self.no_comparison,
            duplicates: !self.no_duplicates,
            summary: !self.no_summary,
        }
    }
}

#[derive(Debug, Args)]
pub struct QuizArgs {
    /// Field to include (repeatable, in order): it, customer, product
    #[arg(short, long = "field", required = true)]
    pub fields: Vec<Field>,
    /// Shuffle the combined question list
    #[arg(long)]
    pub random: bool,
    /// Zero-based position of the first question
    #[arg(long)]
    pub start_index: Option<usize>,
    /// Preselect and show the correct answer for every question
    #[arg(long)]
    pub show_answers: bool,
    /// Seed for reproducible shuffling
    #[arg(long)]
    pub seed: Option<u64>,
    #[arg(long, env = "QUIZ_CSV_DIR", default_value = "public/csv")]
    pub csv_dir: PathBuf,
}

impl QuizArgs {
    pub fn settings(&self) -> QuizSettings {
        QuizSettings {
            selected_fields: self.fields.clone(),
            is_random: self.random,
            start_index: self.start_index,
            use_start_index: self.start_index.is_some(),
            show_answers: self.show_answers,
        }
    }
}

fn parse_id_strategy(value: &str) -> Result<IdStrategy, String> {
    IdStrategy::from_key(value)
        .ok_or_else(|| format!("unknown id strategy '{value}' (expected sequential or category)"))
}
