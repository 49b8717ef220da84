use std::{
    collections::{BTreeSet, HashMap},
    fmt,
    path::{Path, PathBuf},
};

/// Opaque revision identifier as printed by the history backend
/// (a short changeset hash for Mercurial, a full commit id for git).
///
/// Revisions are only ordered by ancestry; the derived `Ord` is lexical and
/// exists so that revision sets iterate deterministically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RevisionId(String);

impl RevisionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The all-zero id git blame reports for lines not yet committed.
    pub fn is_uncommitted(&self) -> bool {
        !self.0.is_empty() && self.0.bytes().all(|b| b == b'0')
    }
}

impl fmt::Display for RevisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RevisionId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// One named, translatable string of a resource file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringEntry {
    pub name: String,
    /// Concatenated character data of the element.
    pub value: String,
    /// 1-based, inclusive.
    pub start_line: usize,
    /// 1-based, inclusive.
    pub end_line: usize,
    /// Empty until attribution runs, except for explicitly declared revisions.
    pub revisions: BTreeSet<RevisionId>,
    /// Declared through a `KEEP_PARENT` annotation instead of a literal element.
    pub inherits_from_parent: bool,
}

impl StringEntry {
    pub fn new(name: impl Into<String>, start_line: usize) -> Self {
        Self {
            name: name.into(),
            value: String::new(),
            start_line,
            end_line: start_line,
            revisions: BTreeSet::new(),
            inherits_from_parent: false,
        }
    }

    pub fn with_revision(mut self, revision: impl Into<RevisionId>) -> Self {
        self.revisions.insert(revision.into());
        self
    }
}

/// All entries of one resource file, keyed by entry name.
#[derive(Debug, Clone, Default)]
pub struct ParsedFile {
    pub path: PathBuf,
    pub entries: HashMap<String, StringEntry>,
}

impl ParsedFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: HashMap::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, name: &str) -> Option<&StringEntry> {
        self.entries.get(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Insert an entry, replacing any earlier entry with the same name.
    /// Returns the replaced entry.
    pub fn insert(&mut self, entry: StringEntry) -> Option<StringEntry> {
        self.entries.insert(entry.name.clone(), entry)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
