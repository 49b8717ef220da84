//! Report formatting and printing utilities.
//!
//! Issues are displayed in cargo-style format, followed by per-language
//! counts and a summary line.

use std::io::{self, Write};

use anyhow::{Context, Result};
use colored::Colorize;

use super::{
    args::OutputFormat,
    commands::{
        CheckSummary, CommandResult, CommandSummary, InitSummary, LanguageCounts,
        UntranslatedSummary,
    },
};
use crate::issues::{Issue, Report, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues to a custom writer.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort();

    for issue in &sorted {
        print_issue(issue, writer);
    }
}

fn print_issue<W: Write>(issue: &Issue, writer: &mut W) {
    let severity_str = match issue.report_severity() {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    let loc = issue.location();
    if loc.line > 0 {
        let _ = writeln!(writer, "  {} {}:{}", "-->".blue(), loc.file_path, loc.line);
    } else {
        let _ = writeln!(writer, "  {} {}", "-->".blue(), loc.file_path);
    }

    if let Some(details) = issue.details() {
        let _ = writeln!(writer, "  {} {} {}", "=".blue(), "note:".bold(), details);
    }

    if let Some(hint) = issue.hint() {
        let _ = writeln!(writer, "  {} {} {}", "=".blue(), "hint:".bold().cyan(), hint);
    }

    let _ = writeln!(writer);
}

/// One line per language with at least one problem.
pub fn print_language_counts_to<W: Write>(summary: &CheckSummary, writer: &mut W) {
    for (language, counts) in &summary.counts {
        if counts.total() == 0 {
            continue;
        }
        let _ = writeln!(
            writer,
            "{}: {}",
            format!("{:>8}", language).bold(),
            describe_counts(counts, summary.history)
        );
    }
}

fn describe_counts(counts: &LanguageCounts, history: bool) -> String {
    let mut parts = vec![format!("{} missing", counts.missing_in_language)];
    if history {
        parts.push(format!("{} outdated", counts.outdated));
    }
    parts.push(format!("{} not in master", counts.missing_in_master));
    parts.join(", ")
}

fn print_summary<W: Write>(result: &CommandResult, writer: &mut W) {
    let total_problems = result.error_count + result.warning_count;
    if total_problems == 0 {
        return;
    }

    let _ = writeln!(
        writer,
        "\n{} {} problems ({} {}, {} {})",
        FAILURE_MARK.red(),
        total_problems,
        result.error_count,
        if result.error_count == 1 { "error" } else { "errors" }.red(),
        result.warning_count,
        if result.warning_count == 1 {
            "warning"
        } else {
            "warnings"
        }
        .yellow()
    );
}

/// Print a success message to a custom writer.
pub fn print_success_to<W: Write>(summary: &CheckSummary, writer: &mut W) {
    let languages = summary.counts.len();
    let msg = format!(
        "Checked {} {} against '{}' - no issues found",
        languages,
        if languages == 1 { "language" } else { "languages" },
        summary.master
    );
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), msg.green());
}

fn print_history_note<W: Write>(summary: &CheckSummary, verbose: bool, writer: &mut W) {
    if !summary.history && verbose {
        let _ = writeln!(
            writer,
            "{} outdated check skipped ({})",
            "note:".bold(),
            "--no-history".cyan()
        );
    }
}

/// Untranslated keys as text (`fr (2)` followed by indented keys) or JSON.
pub fn print_untranslated_to<W: Write>(summary: &UntranslatedSummary, writer: &mut W) -> Result<()> {
    match summary.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&summary.keys)
                .context("Failed to serialize untranslated keys")?;
            writeln!(writer, "{}", json)?;
        }
        OutputFormat::Text => {
            for (language, keys) in &summary.keys {
                if keys.is_empty() {
                    continue;
                }
                writeln!(writer, "{} ({})", language.bold(), keys.len())?;
                for key in keys {
                    writeln!(writer, "  {}", key)?;
                }
            }
        }
    }
    Ok(())
}

fn print_init_to<W: Write>(summary: &InitSummary, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", summary.path).green()
    );
}

pub fn print(result: &CommandResult, verbose: bool) -> Result<()> {
    let stdout = &mut io::stdout().lock();

    match &result.summary {
        CommandSummary::Check(summary) => {
            report_to(&result.issues, stdout);
            print_language_counts_to(summary, stdout);
            print_summary(result, stdout);
            if result.error_count == 0 {
                print_success_to(summary, stdout);
            }
            print_history_note(summary, verbose, &mut io::stderr().lock());
        }
        CommandSummary::Untranslated(summary) => print_untranslated_to(summary, stdout)?,
        CommandSummary::Init(summary) => print_init_to(summary, stdout),
    }
    Ok(())
}
