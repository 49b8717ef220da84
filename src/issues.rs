//! Issue types for validation results.
//!
//! The engine reports key names per language; issues add the file and line
//! a reader needs to act on them and are what the reporter prints.

use enum_dispatch::enum_dispatch;

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    MissingInLanguage,
    MissingInMaster,
    Outdated,
    Unattributed,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::MissingInLanguage => write!(f, "missing-in-language"),
            Rule::MissingInMaster => write!(f, "missing-in-master"),
            Rule::Outdated => write!(f, "outdated"),
            Rule::Unattributed => write!(f, "unattributed"),
        }
    }
}

/// Where an entry is defined. `line` is 0 when the entry could not be located.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct EntryLocation {
    pub file_path: String,
    pub line: usize,
}

impl EntryLocation {
    pub fn new(file_path: impl Into<String>, line: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
        }
    }
}

// ============================================================
// Issue Types
// ============================================================

/// Key exists in the master but not in a language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingInLanguageIssue {
    /// Location of the master entry.
    pub location: EntryLocation,
    pub key: String,
    pub language: String,
}

impl MissingInLanguageIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::MissingInLanguage
    }
}

/// Key exists in a language but not in the master.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingInMasterIssue {
    /// Location of the language entry.
    pub location: EntryLocation,
    pub key: String,
    pub language: String,
}

impl MissingInMasterIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::MissingInMaster
    }
}

/// The master text changed after the translation was last aligned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutdatedIssue {
    /// Location of the language entry.
    pub location: EntryLocation,
    pub key: String,
    pub language: String,
    /// Whether the entry is a `KEEP_PARENT` annotation.
    pub inherits_from_parent: bool,
}

impl OutdatedIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::Outdated
    }
}

/// Shared key without revision information on one side; not compared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnattributedIssue {
    pub location: EntryLocation,
    pub key: String,
    pub language: String,
}

impl UnattributedIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::Unattributed
    }
}

// ============================================================
// Issue Enum
// ============================================================

#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    MissingInLanguage(MissingInLanguageIssue),
    MissingInMaster(MissingInMasterIssue),
    Outdated(OutdatedIssue),
    Unattributed(UnattributedIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        self.report_severity()
    }

    pub fn rule(&self) -> Rule {
        self.report_rule()
    }

    pub fn language(&self) -> &str {
        match self {
            Issue::MissingInLanguage(i) => &i.language,
            Issue::MissingInMaster(i) => &i.language,
            Issue::Outdated(i) => &i.language,
            Issue::Unattributed(i) => &i.language,
        }
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Issue {
    /// File, then line, then rule, then key.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.location()
            .cmp(other.location())
            .then_with(|| self.rule().cmp(&other.rule()))
            .then_with(|| self.message().cmp(&other.message()))
            .then_with(|| self.language().cmp(other.language()))
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Trait for types that can be reported to CLI.
#[enum_dispatch]
pub trait Report {
    fn location(&self) -> &EntryLocation;

    /// Primary message to display (the key name).
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<&str> {
        None
    }
}

impl Report for MissingInLanguageIssue {
    fn location(&self) -> &EntryLocation {
        &self.location
    }

    fn message(&self) -> String {
        self.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("not translated in '{}'", self.language))
    }
}

impl Report for MissingInMasterIssue {
    fn location(&self) -> &EntryLocation {
        &self.location
    }

    fn message(&self) -> String {
        self.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "defined in '{}' but not in the master file",
            self.language
        ))
    }

    fn hint(&self) -> Option<&str> {
        Some("remove the key or add it to the master file")
    }
}

impl Report for OutdatedIssue {
    fn location(&self) -> &EntryLocation {
        &self.location
    }

    fn message(&self) -> String {
        self.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "master text changed after the '{}' translation",
            self.language
        ))
    }

    fn hint(&self) -> Option<&str> {
        if self.inherits_from_parent {
            Some("pin the KEEP_PARENT annotation to the current master revision with rev=\"...\"")
        } else {
            None
        }
    }
}

impl Report for UnattributedIssue {
    fn location(&self) -> &EntryLocation {
        &self.location
    }

    fn message(&self) -> String {
        self.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "no revision information in '{}' or master; outdated check skipped",
            self.language
        ))
    }
}
