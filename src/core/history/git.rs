use std::{collections::HashSet, ffi::OsStr, path::Path, time::Duration};

use super::{
    History,
    mercurial::parse_revision_list,
    process::{is_hex_id, run_query},
    split_path,
};
use crate::core::{
    RevisionId,
    error::{Result, ValidationError},
};

const GIT: &str = "git";

/// Git backend: `git blame` and `git rev-list REV -- FILE`.
///
/// Revisions are full commit ids; abbreviated ids written in resource files
/// are expanded through `git rev-parse`.
#[derive(Debug, Clone)]
pub struct Git {
    timeout: Duration,
}

impl Git {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl History for Git {
    fn blame(&self, path: &Path) -> Result<Vec<RevisionId>> {
        let (dir, file) = split_path(path);
        let output = run_query(
            GIT,
            [
                OsStr::new("blame"),
                OsStr::new("--root"),
                OsStr::new("-l"),
                OsStr::new("-s"),
                OsStr::new("--"),
                file,
            ],
            dir,
            self.timeout,
            path,
        )?;
        parse_blame(&output, path)
    }

    fn ancestors(&self, path: &Path, revision: &RevisionId) -> Result<HashSet<RevisionId>> {
        let (dir, file) = split_path(path);
        let output = run_query(
            GIT,
            [
                OsStr::new("rev-list"),
                OsStr::new(revision.as_str()),
                OsStr::new("--"),
                file,
            ],
            dir,
            self.timeout,
            path,
        )?;
        parse_revision_list(&output, path)
    }

    fn normalize(&self, path: &Path, revision: &RevisionId) -> Result<RevisionId> {
        let (dir, _) = split_path(path);
        let rev_arg = format!("{}^{{commit}}", revision);
        let output = run_query(
            GIT,
            [
                OsStr::new("rev-parse"),
                OsStr::new("--verify"),
                OsStr::new("--quiet"),
                OsStr::new(&rev_arg),
            ],
            dir,
            self.timeout,
            path,
        )?;
        let id = output.trim();
        if is_hex_id(id) {
            Ok(RevisionId::new(id))
        } else {
            Err(ValidationError::history(
                path,
                format!("cannot resolve revision {revision}"),
            ))
        }
    }
}

/// Parse `git blame -l -s` output: `[^]<commit> <line>) <text>`.
///
/// Uncommitted lines carry the all-zero id and boundary commits of shallow
/// clones a leading `^`.
fn parse_blame(output: &str, path: &Path) -> Result<Vec<RevisionId>> {
    output
        .lines()
        .enumerate()
        .map(|(i, line)| {
            let commit = line
                .split_whitespace()
                .next()
                .map(|token| token.trim_start_matches('^'))
                .filter(|token| is_hex_id(token))
                .ok_or_else(|| {
                    ValidationError::history(
                        path,
                        format!("unexpected blame output on line {}: {:?}", i + 1, line),
                    )
                })?;
            Ok(RevisionId::new(commit))
        })
        .collect()
}
