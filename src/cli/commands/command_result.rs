use std::collections::{BTreeMap, BTreeSet};

use crate::cli::args::OutputFormat;
use crate::issues::Issue;

#[derive(Debug)]
pub enum CommandSummary {
    Check(CheckSummary),
    Untranslated(UntranslatedSummary),
    Init(InitSummary),
}

/// Per-language issue counts for the check summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LanguageCounts {
    pub missing_in_language: usize,
    pub missing_in_master: usize,
    pub outdated: usize,
}

impl LanguageCounts {
    pub fn total(&self) -> usize {
        self.missing_in_language + self.missing_in_master + self.outdated
    }
}

#[derive(Debug)]
pub struct CheckSummary {
    pub master: String,
    /// False when the outdated check was skipped (`--no-history`).
    pub history: bool,
    pub counts: BTreeMap<String, LanguageCounts>,
}

#[derive(Debug)]
pub struct UntranslatedSummary {
    pub format: OutputFormat,
    pub keys: BTreeMap<String, BTreeSet<String>>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub path: String,
}

/// Result of running a command
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// If true, exit code 1 should be returned when error_count > 0.
    pub exit_on_errors: bool,
    /// Issues found by `check`; empty for other commands.
    pub issues: Vec<Issue>,
}
