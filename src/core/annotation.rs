//! `KEEP_PARENT` comment annotations.
//!
//! A language file may declare that a key intentionally reuses the master text
//! instead of repeating it:
//!
//! ```xml
//! <!-- KEEP_PARENT name="app_name" -->
//! <!-- KEEP_PARENT name="app_name" rev="a1b2c3d4e5f6" -->
//! ```
//!
//! The optional revision pins the declaration so that staleness checks treat
//! the key as current as of that revision.

use regex::Regex;
use std::sync::LazyLock;

use super::RevisionId;

// Capture group 1: entry name, group 2: optional revision.
static KEEP_PARENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*KEEP_PARENT\s+name\s*=\s*"([a-z0-9_]+)"(?:\s+rev\s*=\s*"([0-9a-fA-F]+)")?\s*$"#)
        .unwrap()
});

/// A parsed `KEEP_PARENT` annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeepParent {
    pub name: String,
    pub revision: Option<RevisionId>,
}

impl KeepParent {
    /// Parse the text between `<!--` and `-->`.
    /// Returns None if the comment is not an annotation.
    pub fn parse(comment: &str) -> Option<Self> {
        let captures = KEEP_PARENT_REGEX.captures(comment)?;
        let name = captures.get(1)?.as_str().to_string();
        let revision = captures.get(2).map(|m| RevisionId::new(m.as_str()));
        Some(Self { name, revision })
    }
}
