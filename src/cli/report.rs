//! Report formatting and printing utilities.
//!
//! Issues are displayed in cargo-style format on stderr; command results go
//! to stdout so they can be piped into other tools.

use std::io::{self, Write};

use anyhow::{Context, Result};
use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::{
    args::OutputFormat,
    commands::{CommandResult, CommandSummary, GraphSummary, InitSummary, OrderSummary},
};
use crate::analyzer::HintIndex;
use crate::issues::{Issue, Report, ReportLocation, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format to stderr.
pub fn report(issues: &[Issue]) {
    report_to(issues, &mut io::stderr().lock());
}

/// Print issues to a custom writer.
///
/// Useful for testing or redirecting output.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort_by(compare_issues);

    // Calculate max line number width for alignment
    let max_line_width = calculate_max_line_width(&sorted);

    for issue in &sorted {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(&sorted, writer);
}

/// Print a success message when no issues are found.
pub fn print_success(classes: usize) {
    print_success_to(classes, &mut io::stderr().lock());
}

/// Print a success message to a custom writer.
pub fn print_success_to<W: Write>(classes: usize, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Analyzed {} {} - no issues found",
            classes,
            if classes == 1 { "class" } else { "classes" }
        )
        .green()
    );
}

/// Print the command's result in the requested format.
pub fn print_output_to<W: Write>(result: &CommandResult, writer: &mut W) -> Result<()> {
    match (&result.summary, result.format) {
        (CommandSummary::Failed, _) => Ok(()),
        (CommandSummary::Init(summary), _) => print_init(summary, writer),
        (summary, OutputFormat::Json) => print_json(summary, writer),
        (CommandSummary::Order(summary), OutputFormat::Text) => print_order(summary, writer),
        (CommandSummary::Paths(paths), OutputFormat::Text) => {
            for path in paths {
                writeln!(writer, "{}", path.display())?;
            }
            Ok(())
        }
        (CommandSummary::Hints(index), OutputFormat::Text) => print_hints(index, writer),
        (CommandSummary::Graph(summary), OutputFormat::Text) => print_graph(summary, writer),
    }
}

pub fn print(result: &CommandResult, verbose: bool) -> Result<()> {
    print_output_to(result, &mut io::stdout().lock()).context("Failed to write output")?;

    if result.issues.is_empty() {
        if verbose {
            print_success(result.classes_scanned);
        }
    } else {
        report(&result.issues);
    }

    Ok(())
}

// ============================================================
// Internal Functions
// ============================================================

fn print_order<W: Write>(summary: &OrderSummary, writer: &mut W) -> Result<()> {
    for id in &summary.classes {
        writeln!(writer, "{}", id)?;
    }
    Ok(())
}

fn print_hints<W: Write>(index: &HintIndex, writer: &mut W) -> Result<()> {
    for (kind, classes) in index {
        writeln!(writer, "{}:", kind.bold())?;
        for id in classes {
            writeln!(writer, "  {}", id)?;
        }
    }
    Ok(())
}

fn print_graph<W: Write>(summary: &GraphSummary, writer: &mut W) -> Result<()> {
    for node in &summary.classes {
        writeln!(writer, "{} {}", node.id.to_string().bold(), node.path.dimmed())?;
        if !node.load.is_empty() {
            writeln!(writer, "  {} {}", "load:".cyan(), join_ids(&node.load))?;
        }
        if !node.uses.is_empty() {
            writeln!(writer, "  {} {}", "use:".cyan(), join_ids(&node.uses))?;
        }
    }
    Ok(())
}

fn print_json<W: Write>(summary: &CommandSummary, writer: &mut W) -> Result<()> {
    let json = match summary {
        CommandSummary::Order(summary) => serde_json::to_string_pretty(&summary.classes),
        CommandSummary::Paths(paths) => serde_json::to_string_pretty(paths),
        CommandSummary::Hints(index) => serde_json::to_string_pretty(index),
        CommandSummary::Graph(summary) => serde_json::to_string_pretty(summary),
        CommandSummary::Init(_) | CommandSummary::Failed => return Ok(()),
    }
    .context("Failed to serialize output")?;
    writeln!(writer, "{}", json)?;
    Ok(())
}

fn print_init<W: Write>(summary: &InitSummary, writer: &mut W) -> Result<()> {
    writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", summary.path.display()).green()
    )?;
    Ok(())
}

fn join_ids(ids: &[crate::analyzer::ClassId]) -> String {
    ids.iter()
        .map(|id| id.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let loc = issue.location();
    let (location, line, col, source_line) = extract_location_info(&loc);

    // Print severity and message (cargo-style)
    let severity = issue.report_severity();
    let severity_str = match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: {}  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    // Print clickable location: --> path:line:col (or the class id)
    if line > 0 {
        let _ = writeln!(writer, "  {} {}:{}:{}", "-->".blue(), location, line, col);
    } else if !location.is_empty() {
        let _ = writeln!(writer, "  {} {}", "-->".blue(), location);
    }

    // Print source context if available
    if let Some(source_line) = source_line {
        let caret_char = match severity {
            Severity::Error => "^".red(),
            Severity::Warning => "^".yellow(),
        };

        let _ = writeln!(
            writer,
            "{:>width$} {}",
            "",
            "|".blue(),
            width = max_line_width
        );
        let _ = writeln!(
            writer,
            "{:>width$} {} {}",
            line.to_string().blue(),
            "|".blue(),
            source_line,
            width = max_line_width
        );

        // Caret pointing to the column (col is 1-based)
        let prefix = if col > 1 {
            source_line.chars().take(col - 1).collect::<String>()
        } else {
            String::new()
        };
        let caret_padding = UnicodeWidthStr::width(prefix.as_str());
        let _ = writeln!(
            writer,
            "{:>width$} {} {:>padding$}{}",
            "",
            "|".blue(),
            "",
            caret_char,
            width = max_line_width,
            padding = caret_padding
        );
    }

    // Print details if present (cargo-style note)
    if let Some(details) = issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    // Print hint if present
    if let Some(hint) = issue.hint() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "hint:".bold().cyan(),
            hint,
            width = max_line_width
        );
    }

    let _ = writeln!(writer); // Empty line between issues
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues.len() - total_errors;
    let total_problems = total_errors + total_warnings;

    if total_problems > 0 {
        let _ = writeln!(
            writer,
            "{} {} {} ({} {}, {} {})",
            FAILURE_MARK.red(),
            total_problems,
            if total_problems == 1 {
                "problem"
            } else {
                "problems"
            },
            total_errors,
            if total_errors == 1 { "error" } else { "errors" }.red(),
            total_warnings,
            if total_warnings == 1 {
                "warning"
            } else {
                "warnings"
            }
            .yellow()
        );
    }
}

fn extract_location_info<'a>(
    loc: &'a ReportLocation<'a>,
) -> (&'a str, usize, usize, Option<&'a str>) {
    match loc {
        ReportLocation::Source(ctx) => (
            ctx.file_path.as_str(),
            ctx.line,
            ctx.col,
            Some(ctx.source_line.as_str()),
        ),
        ReportLocation::File { path } => (path, 0, 0, None),
        ReportLocation::Class { id } => (id.as_str(), 0, 0, None),
    }
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter_map(|i| match i.location() {
            ReportLocation::Source(ctx) => Some(ctx.line),
            ReportLocation::File { .. } | ReportLocation::Class { .. } => None,
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

/// Errors first, then by location; ties keep discovery order.
fn compare_issues(a: &Issue, b: &Issue) -> std::cmp::Ordering {
    let a_loc = a.location();
    let b_loc = b.location();
    let (a_path, a_line, a_col, _) = extract_location_info(&a_loc);
    let (b_path, b_line, b_col, _) = extract_location_info(&b_loc);

    a.report_severity()
        .cmp(&b.report_severity())
        .then_with(|| a_path.cmp(b_path))
        .then_with(|| a_line.cmp(&b_line))
        .then_with(|| a_col.cmp(&b_col))
}

// ============================================================
// Tests
// ============================================================
