use std::io::Write;

use quiz_core::{analyze, AnalysisReport, ParseOptions};

use crate::cli::AnalyzeArgs;

use super::{compare, duplicates};

pub fn run<W: Write>(args: &AnalyzeArgs, options: &ParseOptions, out: &mut W) -> anyhow::Result<()> {
    let report = analyze(&args.original, args.backup.as_deref(), args.options(), options);
    render(&report, args.options().comparison, out)?;
    Ok(())
}

pub fn render<W: Write>(report: &AnalysisReport, comparison_requested: bool, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "Analyzing {}", report.original.display())?;

    match &report.comparison {
        Some(result) => {
            writeln!(out)?;
            writeln!(out, "-- Comparison --")?;
            match result {
                Ok(comparison) => compare::render(comparison, out)?,
                Err(err) => writeln!(out, "Error: {err}")?,
            }
        }
        None if comparison_requested && report.backup.is_none() => {
            writeln!(out)?;
            writeln!(out, "No backup file given; comparison skipped.")?;
        }
        None => {}
    }

    if let Some(result) = &report.duplicates {
        writeln!(out)?;
        writeln!(out, "-- Duplicates --")?;
        match result {
            Ok(found) => duplicates::render_report(found, out)?,
            Err(err) => writeln!(out, "Error: {err}")?,
        }
    }

    if let Some(summary) = &report.summary {
        writeln!(out)?;
        writeln!(out, "-- Summary --")?;
        if let Some(count) = summary.new_questions {
            writeln!(out, "New questions: {count}")?;
        }
        if let Some(count) = summary.duplicate_groups {
            writeln!(out, "Duplicate answer groups: {count}")?;
        }
    }
    Ok(())
}
