//! Language discovery and the set of files taking part in one validation.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use walkdir::WalkDir;

use super::error::{Result, ValidationError};

pub const DEFAULT_MASTER_LANGUAGE: &str = "en";
pub const DEFAULT_FILE_NAME: &str = "strings.xml";

/// Language id → string file, with exactly one master.
#[derive(Debug, Clone)]
pub struct LanguageSet {
    master: String,
    master_file: PathBuf,
    languages: BTreeMap<String, PathBuf>,
}

impl LanguageSet {
    pub fn new(master: impl Into<String>, master_file: impl Into<PathBuf>) -> Self {
        Self {
            master: master.into(),
            master_file: master_file.into(),
            languages: BTreeMap::new(),
        }
    }

    /// Add a non-master language. Reusing the master id or an existing id is
    /// a configuration error.
    pub fn insert(&mut self, language: impl Into<String>, file: impl Into<PathBuf>) -> Result<()> {
        let language = language.into();
        if language == self.master {
            return Err(ValidationError::configuration(format!(
                "'{language}' is the master language"
            )));
        }
        if self.languages.contains_key(&language) {
            return Err(ValidationError::configuration(format!(
                "language '{language}' listed twice"
            )));
        }
        self.languages.insert(language, file.into());
        Ok(())
    }

    pub fn with(mut self, language: impl Into<String>, file: impl Into<PathBuf>) -> Result<Self> {
        self.insert(language, file)?;
        Ok(self)
    }

    pub fn master(&self) -> &str {
        &self.master
    }

    pub fn master_file(&self) -> &Path {
        &self.master_file
    }

    /// Non-master languages in id order.
    pub fn languages(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.languages
            .iter()
            .map(|(lang, path)| (lang.as_str(), path.as_path()))
    }

    pub fn get(&self, language: &str) -> Option<&Path> {
        if language == self.master {
            Some(&self.master_file)
        } else {
            self.languages.get(language).map(PathBuf::as_path)
        }
    }

    /// Number of non-master languages.
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// Restrict to `requested`; every requested id must be a known
    /// non-master language.
    pub fn select(&self, requested: &[String]) -> Result<Self> {
        let mut selected = Self::new(self.master.clone(), self.master_file.clone());
        for language in requested {
            let Some(file) = self.languages.get(language) else {
                return Err(ValidationError::configuration(format!(
                    "language '{language}' not found (available: {})",
                    self.languages.keys().cloned().collect::<Vec<_>>().join(", ")
                )));
            };
            selected.insert(language.clone(), file.clone())?;
        }
        Ok(selected)
    }

    /// Drop every non-master language for which `skip` returns true.
    pub fn without(mut self, skip: impl Fn(&str) -> bool) -> Self {
        self.languages.retain(|language, _| !skip(language));
        self
    }
}

/// Finds the string file of each language.
pub trait Locator {
    /// Directory holding `language`'s string file.
    fn resolve(&self, language: &str) -> PathBuf;

    /// Fixed file name inside each language directory.
    fn file_name(&self) -> &str;

    /// Every language present, the master included, with the directory
    /// it was found in.
    fn languages(&self) -> Result<Vec<(String, PathBuf)>>;

    fn discover(&self, master: &str) -> Result<LanguageSet> {
        let mut languages = self.languages()?;
        if languages.is_empty() {
            return Err(ValidationError::configuration("no languages found"));
        }
        let Some(index) = languages.iter().position(|(l, _)| l == master) else {
            return Err(ValidationError::configuration(format!(
                "master language '{master}' not found"
            )));
        };

        let (_, master_dir) = languages.remove(index);
        let mut set = LanguageSet::new(master, master_dir.join(self.file_name()));
        for (language, dir) in languages {
            set.insert(language, dir.join(self.file_name()))?;
        }
        Ok(set)
    }
}

/// Android resource layout: `values/` for the master, `values-fr/`,
/// `values-pt-rBR/`, `values-b+sr+Latn/` for translations.
#[derive(Debug, Clone)]
pub struct AndroidResources {
    root: PathBuf,
    file_name: String,
    master: String,
}

impl AndroidResources {
    pub fn new(root: impl Into<PathBuf>, file_name: impl Into<String>, master: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            file_name: file_name.into(),
            master: master.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Locator for AndroidResources {
    fn resolve(&self, language: &str) -> PathBuf {
        if language == self.master {
            return self.root.join("values");
        }
        let qualifier = match language.split_once('-') {
            Some((lang, region)) if is_region(region) => format!("{lang}-r{region}"),
            Some(_) => format!("b+{}", language.replace('-', "+")),
            None => language.to_string(),
        };
        self.root.join(format!("values-{qualifier}"))
    }

    fn file_name(&self) -> &str {
        &self.file_name
    }

    fn languages(&self) -> Result<Vec<(String, PathBuf)>> {
        if !self.root.is_dir() {
            return Err(ValidationError::configuration(format!(
                "resource directory '{}' does not exist",
                self.root.display()
            )));
        }

        let mut languages = Vec::new();
        for entry in WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| ValidationError::Io {
                path: self.root.clone(),
                source: e.into(),
            })?;
            if !entry.file_type().is_dir() || !entry.path().join(&self.file_name).is_file() {
                continue;
            }
            let Some(dir_name) = entry.file_name().to_str() else {
                continue;
            };
            let language = if dir_name == "values" {
                Some(self.master.clone())
            } else {
                language_from_qualifiers(dir_name)
            };
            if let Some(language) = language {
                languages.push((language, entry.into_path()));
            }
        }
        Ok(languages)
    }
}

/// Map a `values-*` directory name to a language id. Only pure locale
/// directories qualify: anything carrying a further qualifier
/// (`values-fr-land`, `values-night`, `values-v21`) is None.
fn language_from_qualifiers(dir_name: &str) -> Option<String> {
    let qualifiers = dir_name.strip_prefix("values-")?;

    if let Some(tag) = qualifiers.strip_prefix("b+") {
        let subtags: Vec<&str> = tag.split('+').collect();
        let valid = is_language(subtags[0]) && subtags[1..].iter().all(|s| is_subtag(s));
        return valid.then(|| subtags.join("-"));
    }

    match qualifiers.split('-').collect::<Vec<_>>().as_slice() {
        [language] if is_language(language) => Some(language.to_string()),
        [language, region] if is_language(language) => {
            let region = region.strip_prefix('r').filter(|r| is_region(r))?;
            Some(format!("{language}-{region}"))
        }
        _ => None,
    }
}

fn is_language(s: &str) -> bool {
    (2..=3).contains(&s.len()) && s.chars().all(|c| c.is_ascii_lowercase())
}

fn is_subtag(s: &str) -> bool {
    (1..=8).contains(&s.len()) && s.chars().all(|c| c.is_ascii_alphanumeric())
}

fn is_region(s: &str) -> bool {
    (s.len() == 2 && s.chars().all(|c| c.is_ascii_uppercase()))
        || (s.len() == 3 && s.chars().all(|c| c.is_ascii_digit()))
}
