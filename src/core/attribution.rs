//! Revision attribution: stamp each entry with the revisions that last
//! touched its source lines.

use std::{collections::BTreeSet, path::Path};

use super::{ParsedFile, RevisionId, error::Result, history::History};

/// Per-line revisions of one file, as reported by `blame`.
#[derive(Debug, Clone, Default)]
pub struct LineRevisions {
    lines: Vec<RevisionId>,
}

impl LineRevisions {
    pub fn new(lines: Vec<RevisionId>) -> Self {
        Self { lines }
    }

    pub fn load(history: &dyn History, path: &Path) -> Result<Self> {
        Ok(Self::new(history.blame(path)?))
    }

    /// Revisions of lines `start..=end` (1-based). Lines outside the file
    /// and uncommitted lines contribute nothing.
    pub fn span(&self, start: usize, end: usize) -> BTreeSet<RevisionId> {
        if start == 0 || start > end {
            return BTreeSet::new();
        }
        self.lines
            .iter()
            .skip(start - 1)
            .take(end - start + 1)
            .filter(|revision| !revision.is_uncommitted())
            .cloned()
            .collect()
    }
}

/// Fill in `revisions` for every entry of `file`.
///
/// The final set is the union of the span's line revisions and the
/// revisions the entry declared itself; declared revisions are normalized
/// through the backend and never dropped.
pub fn attribute(history: &dyn History, path: &Path, mut file: ParsedFile) -> Result<ParsedFile> {
    let lines = LineRevisions::load(history, path)?;

    for entry in file.entries.values_mut() {
        let declared = std::mem::take(&mut entry.revisions);
        let mut revisions = lines.span(entry.start_line, entry.end_line);
        for revision in &declared {
            revisions.insert(history.normalize(path, revision)?);
        }
        entry.revisions = revisions;
    }

    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{StringEntry, ValidationError, ordering::tests::FakeHistory};
    use pretty_assertions::assert_eq;

    const PATH: &str = "values-fr/strings.xml";

    fn revs(ids: &[&str]) -> BTreeSet<RevisionId> {
        ids.iter().map(|id| RevisionId::new(*id)).collect()
    }

    fn file_with(entries: Vec<StringEntry>) -> ParsedFile {
        let mut file = ParsedFile::new(PATH);
        for entry in entries {
            file.insert(entry);
        }
        file
    }

    fn span_entry(name: &str, start: usize, end: usize) -> StringEntry {
        let mut entry = StringEntry::new(name, start);
        entry.end_line = end;
        entry
    }

    #[test]
    fn test_span() {
        let lines = LineRevisions::new(vec![
            RevisionId::new("r1"),
            RevisionId::new("r2"),
            RevisionId::new("r2"),
        ]);

        assert_eq!(lines.span(1, 1), revs(&["r1"]));
        assert_eq!(lines.span(1, 3), revs(&["r1", "r2"]));
        assert_eq!(lines.span(3, 10), revs(&["r2"]));
        assert!(lines.span(4, 5).is_empty());
        assert!(lines.span(0, 0).is_empty());
        assert!(lines.span(3, 2).is_empty());
    }

    #[test]
    fn test_attribute_collects_span_revisions() {
        let history = FakeHistory::default().with_blame(PATH, &["r1", "r1", "r2", "r3", "r1"]);
        let file = file_with(vec![span_entry("single", 2, 2), span_entry("multi", 2, 4)]);

        let file = attribute(&history, Path::new(PATH), file).unwrap();

        assert_eq!(file.get("single").unwrap().revisions, revs(&["r1"]));
        assert_eq!(file.get("multi").unwrap().revisions, revs(&["r1", "r2", "r3"]));
    }

    #[test]
    fn test_declared_revision_survives_disagreeing_blame() {
        let history = FakeHistory::default().with_blame(PATH, &["r1", "r1", "r1"]);
        let mut annotated = span_entry("greeting", 2, 2).with_revision("r2");
        annotated.inherits_from_parent = true;

        let file = attribute(&history, Path::new(PATH), file_with(vec![annotated])).unwrap();

        assert_eq!(file.get("greeting").unwrap().revisions, revs(&["r1", "r2"]));
    }

    #[test]
    fn test_out_of_range_span_yields_empty_set() {
        let history = FakeHistory::default().with_blame(PATH, &["r1"]);
        let file = file_with(vec![span_entry("late", 5, 6)]);

        let file = attribute(&history, Path::new(PATH), file).unwrap();

        assert!(file.get("late").unwrap().revisions.is_empty());
    }

    #[test]
    fn test_uncommitted_lines_are_not_attributed() {
        let zero = "0".repeat(40);
        let history = FakeHistory::default().with_blame(PATH, &["r1", &zero, &zero, "r2"]);
        let file = file_with(vec![
            span_entry("edited", 2, 3),
            span_entry("mixed", 3, 4),
            span_entry("pinned", 2, 2).with_revision("r1"),
        ]);

        let file = attribute(&history, Path::new(PATH), file).unwrap();

        assert!(file.get("edited").unwrap().revisions.is_empty());
        assert_eq!(file.get("mixed").unwrap().revisions, revs(&["r2"]));
        assert_eq!(file.get("pinned").unwrap().revisions, revs(&["r1"]));
    }

    #[test]
    fn test_blame_failure_is_history_error() {
        let history = FakeHistory::default();
        let err = attribute(&history, Path::new(PATH), file_with(vec![])).unwrap_err();

        assert!(matches!(err, ValidationError::HistoryUnavailable { .. }));
    }
}
