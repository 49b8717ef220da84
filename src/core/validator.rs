//! Compare every translation against the master file.
//!
//! Three result sets are computed per language: keys only the language has,
//! keys only the master has, and shared keys whose translation predates the
//! master revision it was derived from.

use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    path::Path,
};

use rayon::prelude::*;
use serde::Serialize;

use super::{
    LanguageSet, ParsedFile, RevisionId, StringFileParser,
    attribution::attribute,
    error::Result,
    history::History,
    ordering::RevisionGraph,
};

/// Language id → entry names.
pub type KeysByLanguage = BTreeMap<String, BTreeSet<String>>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// Keys present in a language but not in the master.
    pub missing_in_master: KeysByLanguage,
    /// Keys present in the master but not in a language.
    pub missing_in_language: KeysByLanguage,
    /// Shared keys whose master text changed after the translation.
    pub outdated_in_language: KeysByLanguage,
    /// Shared keys left out of the staleness check for lack of revisions.
    /// Informational only; does not affect validity.
    pub unattributed: KeysByLanguage,
}

impl ValidationResult {
    /// True iff all three result maps are empty for every language.
    pub fn is_valid(&self) -> bool {
        [
            &self.missing_in_master,
            &self.missing_in_language,
            &self.outdated_in_language,
        ]
        .iter()
        .all(|map| map.values().all(BTreeSet::is_empty))
    }

    /// Keys a translator has to work on: missing plus outdated.
    pub fn untranslated(&self, language: &str) -> BTreeSet<String> {
        let mut keys = keys_for(&self.missing_in_language, language);
        keys.extend(keys_for(&self.outdated_in_language, language));
        keys
    }
}

fn keys_for(map: &KeysByLanguage, language: &str) -> BTreeSet<String> {
    map.get(language).cloned().unwrap_or_default()
}

/// Validates one [`LanguageSet`]. Accessors read the last computed result
/// and are all-empty before the first [`Validator::validate`].
pub struct Validator<'h> {
    languages: LanguageSet,
    parser: StringFileParser,
    history: Option<&'h dyn History>,
    result: ValidationResult,
}

impl<'h> Validator<'h> {
    /// A validator comparing key sets only. Add a history backend with
    /// [`Validator::with_history`] to detect outdated translations.
    pub fn new(languages: LanguageSet) -> Self {
        Self {
            languages,
            parser: StringFileParser::default(),
            history: None,
            result: ValidationResult::default(),
        }
    }

    pub fn with_history(mut self, history: &'h dyn History) -> Self {
        self.history = Some(history);
        self
    }

    pub fn with_parser(mut self, parser: StringFileParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn languages(&self) -> &LanguageSet {
        &self.languages
    }

    /// Recompute the result from scratch. On error the result is left empty.
    pub fn validate(&mut self) -> Result<&ValidationResult> {
        self.result = ValidationResult::default();
        self.result = validate(&self.languages, &self.parser, self.history)?;
        Ok(&self.result)
    }

    pub fn result(&self) -> &ValidationResult {
        &self.result
    }

    pub fn is_valid(&self) -> bool {
        self.result.is_valid()
    }

    pub fn missing_in_master(&self) -> &KeysByLanguage {
        &self.result.missing_in_master
    }

    pub fn missing_in_language(&self) -> &KeysByLanguage {
        &self.result.missing_in_language
    }

    pub fn outdated_in_language(&self) -> &KeysByLanguage {
        &self.result.outdated_in_language
    }
}

/// Per-language findings, merged into the shared result once every
/// language has been processed.
#[derive(Debug, Default)]
struct LanguageFindings {
    missing_in_master: BTreeSet<String>,
    missing_in_language: BTreeSet<String>,
    outdated: BTreeSet<String>,
    unattributed: BTreeSet<String>,
}

/// Parse and attribute every file of `languages`, then compare each
/// translation with the master. Without `history` the staleness check is
/// skipped.
pub fn validate(
    languages: &LanguageSet,
    parser: &StringFileParser,
    history: Option<&dyn History>,
) -> Result<ValidationResult> {
    let master_path = languages.master_file();
    let master = load(parser, history, master_path)?;

    let files: Vec<(String, ParsedFile)> = languages
        .languages()
        .collect::<Vec<_>>()
        .into_par_iter()
        .map(|(language, path)| Ok((language.to_string(), load(parser, history, path)?)))
        .collect::<Result<_>>()?;

    let graph = history.map(RevisionGraph::new);
    let master_revisions = match &graph {
        Some(graph) => representatives(graph, &master)?,
        None => HashMap::new(),
    };

    let findings: Vec<(String, LanguageFindings)> = files
        .par_iter()
        .map(|(language, file)| {
            let findings = compare(language, &master, file, graph.as_ref(), &master_revisions)?;
            Ok((language.clone(), findings))
        })
        .collect::<Result<_>>()?;

    let mut result = ValidationResult::default();
    for (language, findings) in findings {
        result
            .missing_in_master
            .insert(language.clone(), findings.missing_in_master);
        result
            .missing_in_language
            .insert(language.clone(), findings.missing_in_language);
        result
            .outdated_in_language
            .insert(language.clone(), findings.outdated);
        if !findings.unattributed.is_empty() {
            result.unattributed.insert(language, findings.unattributed);
        }
    }

    tracing::debug!(
        languages = languages.len(),
        valid = result.is_valid(),
        "validation finished"
    );
    Ok(result)
}

fn load(parser: &StringFileParser, history: Option<&dyn History>, path: &Path) -> Result<ParsedFile> {
    let file = parser.parse(path)?;
    tracing::debug!(file = %path.display(), entries = file.len(), "parsed string file");
    match history {
        Some(history) => attribute(history, path, file),
        None => Ok(file),
    }
}

/// Newest revision of each master entry; None for entries without revisions.
fn representatives(
    graph: &RevisionGraph<'_>,
    file: &ParsedFile,
) -> Result<HashMap<String, Option<RevisionId>>> {
    file.entries
        .par_iter()
        .map(|(name, entry)| Ok((name.clone(), graph.representative(&file.path, &entry.revisions)?)))
        .collect()
}

fn compare(
    language: &str,
    master: &ParsedFile,
    file: &ParsedFile,
    graph: Option<&RevisionGraph<'_>>,
    master_revisions: &HashMap<String, Option<RevisionId>>,
) -> Result<LanguageFindings> {
    let mut findings = LanguageFindings {
        missing_in_master: file
            .keys()
            .filter(|key| !master.contains_key(key))
            .map(str::to_string)
            .collect(),
        missing_in_language: master
            .keys()
            .filter(|key| !file.contains_key(key))
            .map(str::to_string)
            .collect(),
        ..Default::default()
    };

    let Some(graph) = graph else {
        return Ok(findings);
    };

    let mut shared: Vec<&str> = file.keys().filter(|key| master.contains_key(key)).collect();
    shared.sort_unstable();

    for key in shared {
        let master_rev = master_revisions.get(key).cloned().flatten();
        let language_rev = match file.get(key) {
            Some(entry) => graph.representative(&file.path, &entry.revisions)?,
            None => None,
        };

        let (Some(master_rev), Some(language_rev)) = (master_rev, language_rev) else {
            tracing::warn!(
                language,
                key,
                "no revision information for entry; skipping outdated check"
            );
            findings.unattributed.insert(key.to_string());
            continue;
        };

        if is_outdated(graph, &file.path, &master_rev, &language_rev)? {
            findings.outdated.insert(key.to_string());
        }
    }

    Ok(findings)
}

/// The translation is outdated when the master revision has the translation
/// revision in its history. Identical revisions mean the translation was
/// aligned with exactly that master edit.
fn is_outdated(
    graph: &RevisionGraph<'_>,
    language_path: &Path,
    master_rev: &RevisionId,
    language_rev: &RevisionId,
) -> Result<bool> {
    if master_rev == language_rev {
        return Ok(false);
    }
    graph.supersedes(language_path, master_rev, language_rev)
}
