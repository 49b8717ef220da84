use std::{collections::HashSet, ffi::OsStr, path::Path, time::Duration};

use super::{
    History,
    process::{is_hex_id, run_query},
    split_path,
};
use crate::core::{
    RevisionId,
    error::{Result, ValidationError},
};

const HG: &str = "hg";

/// Mercurial backend: `hg annotate -c` and `hg log -r "ancestors(REV)" FILE`.
/// Declared revisions are resolved with `hg log -r REV`.
#[derive(Debug, Clone)]
pub struct Mercurial {
    timeout: Duration,
}

impl Mercurial {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl History for Mercurial {
    fn blame(&self, path: &Path) -> Result<Vec<RevisionId>> {
        let (dir, file) = split_path(path);
        let output = run_query(
            HG,
            [
                OsStr::new("annotate"),
                OsStr::new("--changeset"),
                OsStr::new("--"),
                file,
            ],
            dir,
            self.timeout,
            path,
        )?;
        parse_annotate(&output, path)
    }

    fn ancestors(&self, path: &Path, revision: &RevisionId) -> Result<HashSet<RevisionId>> {
        let (dir, file) = split_path(path);
        let revset = format!("ancestors({})", revision);
        let output = run_query(
            HG,
            [
                OsStr::new("log"),
                OsStr::new("--template"),
                OsStr::new("{node|short}\\n"),
                OsStr::new("--rev"),
                OsStr::new(&revset),
                OsStr::new("--"),
                file,
            ],
            dir,
            self.timeout,
            path,
        )?;
        parse_revision_list(&output, path)
    }

    /// Resolve a declared id (full node, prefix, local number) to the
    /// short node `annotate` and `log` report.
    fn normalize(&self, path: &Path, revision: &RevisionId) -> Result<RevisionId> {
        let (dir, _) = split_path(path);
        let output = run_query(
            HG,
            [
                OsStr::new("log"),
                OsStr::new("--template"),
                OsStr::new("{node|short}\\n"),
                OsStr::new("--rev"),
                OsStr::new(revision.as_str()),
            ],
            dir,
            self.timeout,
            path,
        )?;
        parse_single_node(&output, path, revision)
    }
}

/// Parse `hg annotate --changeset` output: `<node>[+]: <line text>`.
///
/// A `+` marks lines changed in the working directory; they are attributed
/// to the working directory parent.
fn parse_annotate(output: &str, path: &Path) -> Result<Vec<RevisionId>> {
    output
        .lines()
        .enumerate()
        .map(|(i, line)| {
            let node = line
                .split_once(':')
                .map(|(node, _)| node.trim().trim_end_matches('+'))
                .filter(|node| is_hex_id(node))
                .ok_or_else(|| {
                    ValidationError::history(
                        path,
                        format!("unexpected annotate output on line {}: {:?}", i + 1, line),
                    )
                })?;
            Ok(RevisionId::new(node))
        })
        .collect()
}

/// Parse one changeset id per line.
pub(super) fn parse_revision_list(output: &str, path: &Path) -> Result<HashSet<RevisionId>> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            if is_hex_id(line) {
                Ok(RevisionId::new(line))
            } else {
                Err(ValidationError::history(
                    path,
                    format!("unexpected revision in log output: {:?}", line),
                ))
            }
        })
        .collect()
}

/// Expect exactly one changeset id in `output`.
fn parse_single_node(output: &str, path: &Path, revision: &RevisionId) -> Result<RevisionId> {
    let mut nodes = output.lines().map(str::trim).filter(|line| !line.is_empty());
    match (nodes.next(), nodes.next()) {
        (Some(node), None) if is_hex_id(node) => Ok(RevisionId::new(node)),
        _ => Err(ValidationError::history(
            path,
            format!("cannot resolve revision {revision}"),
        )),
    }
}
