//! Replay command for running a club day and reporting the result.
//!
//! The text report is the open time, one line per logged event, the close
//! time, then one `<table> <revenue> <HH:MM usage>` line per table.

use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use club_core::{ReplayReport, format_usage, replay};

use super::load_input;
use crate::OutputFormat;

/// Formats a report in the line-oriented text form.
pub fn format_report(report: &ReplayReport) -> String {
    let mut output = String::new();

    writeln!(output, "{}", report.open).unwrap();
    for event in &report.log {
        writeln!(output, "{event}").unwrap();
    }
    writeln!(output, "{}", report.close).unwrap();
    for table in &report.tables {
        writeln!(
            output,
            "{} {} {}",
            table.number,
            table.revenue,
            format_usage(table.occupied_minutes)
        )
        .unwrap();
    }

    output
}

/// Formats a report as pretty-printed JSON.
pub fn format_report_json(report: &ReplayReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Runs the replay command.
pub fn run<W: Write>(writer: &mut W, path: &Path, format: OutputFormat) -> Result<()> {
    let input = load_input(writer, path)?;
    let report = replay(input.config, input.events);

    match format {
        OutputFormat::Text => write!(writer, "{}", format_report(&report))?,
        OutputFormat::Json => writeln!(writer, "{}", format_report_json(&report)?)?,
    }

    Ok(())
}
