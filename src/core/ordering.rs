//! Ancestry-based ordering of revisions.
//!
//! Revisions form a partial order: one revision supersedes another when the
//! other is in its history. The engine assumes a single linear head per file,
//! under which every pair is comparable. Branched histories are tolerated:
//! an unrelated pair never fails, it resolves to the second argument and is
//! reported as [`Relation::Unrelated`].

use std::{
    collections::{BTreeSet, HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use super::{RevisionId, error::Result, history::History};

/// How revision `a` relates to revision `b` within one file's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Same,
    /// `b` is an ancestor of `a`.
    Descendant,
    /// `a` is an ancestor of `b`.
    Ancestor,
    /// Neither is reachable from the other.
    Unrelated,
}

type AncestorCache = HashMap<(PathBuf, RevisionId), Arc<HashSet<RevisionId>>>;

/// Ordering queries over a [`History`], memoizing ancestor sets for the
/// lifetime of one validation run.
pub struct RevisionGraph<'h> {
    history: &'h dyn History,
    cache: Mutex<AncestorCache>,
}

impl<'h> RevisionGraph<'h> {
    pub fn new(history: &'h dyn History) -> Self {
        Self {
            history,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// True iff `a == b` or `b` is in the history of `a` restricted to `path`.
    pub fn supersedes(&self, path: &Path, a: &RevisionId, b: &RevisionId) -> Result<bool> {
        if a == b {
            return Ok(true);
        }
        Ok(self.ancestors(path, a)?.contains(b))
    }

    /// `a` if it supersedes `b`, otherwise `b`.
    pub fn newer<'r>(
        &self,
        path: &Path,
        a: &'r RevisionId,
        b: &'r RevisionId,
    ) -> Result<&'r RevisionId> {
        if self.supersedes(path, a, b)? {
            Ok(a)
        } else {
            Ok(b)
        }
    }

    /// Classify the pair. Costs up to two ancestor queries.
    pub fn relation(&self, path: &Path, a: &RevisionId, b: &RevisionId) -> Result<Relation> {
        if a == b {
            Ok(Relation::Same)
        } else if self.ancestors(path, a)?.contains(b) {
            Ok(Relation::Descendant)
        } else if self.ancestors(path, b)?.contains(a) {
            Ok(Relation::Ancestor)
        } else {
            Ok(Relation::Unrelated)
        }
    }

    /// Reduce a revision set to its newest member by folding [`Self::newer`]
    /// over it in sorted order. Returns None for an empty set.
    ///
    /// With branched history the result depends on fold order; every
    /// unrelated pair met during the fold is logged.
    pub fn representative(
        &self,
        path: &Path,
        revisions: &BTreeSet<RevisionId>,
    ) -> Result<Option<RevisionId>> {
        let mut iter = revisions.iter();
        let Some(mut newest) = iter.next() else {
            return Ok(None);
        };

        for candidate in iter {
            match self.relation(path, newest, candidate)? {
                Relation::Same | Relation::Descendant => {}
                Relation::Ancestor => newest = candidate,
                Relation::Unrelated => {
                    tracing::warn!(
                        file = %path.display(),
                        a = %newest,
                        b = %candidate,
                        "revisions are not related by ancestry; history may be branched"
                    );
                    newest = self.newer(path, newest, candidate)?;
                }
            }
        }

        Ok(Some(newest.clone()))
    }

    fn ancestors(&self, path: &Path, revision: &RevisionId) -> Result<Arc<HashSet<RevisionId>>> {
        let key = (path.to_path_buf(), revision.clone());
        if let Some(hit) = self.lock().get(&key) {
            return Ok(Arc::clone(hit));
        }

        // Query outside the lock so concurrent workers do not serialize on it.
        let ancestors = Arc::new(self.history.ancestors(path, revision)?);
        self.lock().insert(key, Arc::clone(&ancestors));
        Ok(ancestors)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, AncestorCache> {
        self.cache.lock().unwrap_or_else(|e| e.into_inner())
    }
}
