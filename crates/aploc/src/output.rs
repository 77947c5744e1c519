//! Terminal output: notices on stderr, the run summary on stdout.
//!
//! The summary table uses `tabled`; result labels are colored with
//! `owo-colors` when stdout is an interactive terminal and `NO_COLOR` is
//! unset.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use aploc_core::{RowResult, RunReport};

/// Whether stdout should carry ANSI colors.
pub fn should_color() -> bool {
    io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Result")]
    result: String,
    #[tabled(rename = "Rows")]
    rows: usize,
}

fn label(result: RowResult, color: bool) -> String {
    let text = result.as_ref();
    if !color {
        return text.to_owned();
    }
    match result {
        RowResult::Success => text.green().to_string(),
        RowResult::Failed => text.red().to_string(),
        RowResult::NotFound => text.yellow().to_string(),
    }
}

/// Render the per-result counts and the results file location.
pub fn render_summary(report: &RunReport, color: bool) -> String {
    let summary = &report.summary;
    let rows = [
        SummaryRow {
            result: label(RowResult::Success, color),
            rows: summary.succeeded,
        },
        SummaryRow {
            result: label(RowResult::Failed, color),
            rows: summary.failed,
        },
        SummaryRow {
            result: label(RowResult::NotFound, color),
            rows: summary.not_found,
        },
    ];

    let table = Table::new(rows).with(Style::rounded()).to_string();
    format!(
        "{table}\n{} rows processed, results written to {}",
        summary.total(),
        report.output.display()
    )
}

/// Print to stdout unless quiet.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

/// Print an informational notice to stderr unless quiet.
pub fn notice(message: &str, quiet: bool) {
    if quiet {
        return;
    }
    let mut stderr = io::stderr().lock();
    let _ = writeln!(stderr, "{message}");
}
