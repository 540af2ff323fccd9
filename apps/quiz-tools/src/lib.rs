pub mod cli;
pub mod commands;
pub mod error;
pub mod source;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Command};
use crate::error::ToolError;

pub fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    tracing::debug!(?cli, "parsed arguments");
    dispatch(&cli)
}

/// Run one parsed command against the real stdin/stdout.
pub fn dispatch(cli: &Cli) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Command::Compare { original, backup, json } => {
            commands::compare::run(original, backup, *json, &cli.maintenance_options(), &mut out)
        }
        Command::Duplicates { paths, json } => {
            commands::duplicates::run(paths, *json, &cli.maintenance_options(), &mut out)
        }
        Command::Format { paths, csv_dir } => commands::format::run(paths, csv_dir, &mut out),
        Command::Analyze(args) => commands::analyze::run(args, &cli.maintenance_options(), &mut out),
        Command::Quiz(args) => {
            let stdin = std::io::stdin();
            commands::quiz::run(args, &cli.quiz_options(), stdin.lock(), &mut out)
        }
    }
}

/// Process exit status for an error returned by [`run`].
pub fn exit_code(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<ToolError>() {
        Some(tool_error) => ExitCode::from(tool_error.exit_code()),
        None => ExitCode::FAILURE,
    }
}
