//! Version-control backends.
//!
//! The engine needs exactly two read-only queries from the repository
//! holding the resource files: a per-line annotation of a file, and the set
//! of ancestors of a revision restricted to one file's history. Both are
//! answered by spawning the VCS command line tool.

mod git;
mod mercurial;
mod process;

use std::{collections::HashSet, path::Path, time::Duration};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub use git::Git;
pub use mercurial::Mercurial;

use super::{RevisionId, error::Result};

/// Read-only queries against a single-head, DAG-structured history.
///
/// Implementations must be safe to call concurrently against the same
/// working copy.
pub trait History: Send + Sync {
    /// The revision that last modified each line of `path`, in line order.
    fn blame(&self, path: &Path) -> Result<Vec<RevisionId>>;

    /// All ancestors of `revision` (itself included) that touched `path`.
    fn ancestors(&self, path: &Path, revision: &RevisionId) -> Result<HashSet<RevisionId>>;

    /// Map a user-written revision (e.g. an abbreviated hash in a `rev`
    /// attribute) to the form `blame` and `ancestors` report.
    fn normalize(&self, _path: &Path, revision: &RevisionId) -> Result<RevisionId> {
        Ok(revision.clone())
    }
}

/// Supported version-control systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum VcsKind {
    #[default]
    Hg,
    Git,
}

impl std::fmt::Display for VcsKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VcsKind::Hg => write!(f, "hg"),
            VcsKind::Git => write!(f, "git"),
        }
    }
}

/// Build the backend for `kind`; every query is bounded by `timeout`.
pub fn backend(kind: VcsKind, timeout: Duration) -> Box<dyn History> {
    match kind {
        VcsKind::Hg => Box::new(Mercurial::new(timeout)),
        VcsKind::Git => Box::new(Git::new(timeout)),
    }
}

/// Split `path` into the directory the VCS command runs in and the file
/// argument relative to it.
fn split_path(path: &Path) -> (&Path, &std::ffi::OsStr) {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file = path.file_name().unwrap_or(path.as_os_str());
    (dir, file)
}
