use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::{
    VcsKind,
    languages::{DEFAULT_FILE_NAME, DEFAULT_MASTER_LANGUAGE},
};

pub const CONFIG_FILE_NAME: &str = ".xlaterc.json";

/// Directories that mark a repository root; the config search stops there.
const REPOSITORY_MARKERS: &[&str] = &[".git", ".hg"];

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_resources_root")]
    pub resources_root: String,
    #[serde(default = "default_file_name")]
    pub file_name: String,
    #[serde(default = "default_master_language")]
    pub master_language: String,
    #[serde(default)]
    pub vcs: VcsKind,
    #[serde(default = "default_history_timeout_secs")]
    pub history_timeout_secs: u64,
    #[serde(default = "default_string_elements")]
    pub string_elements: Vec<String>,
    /// Glob patterns over language ids (`zh-*`).
    #[serde(default)]
    pub ignore_languages: Vec<String>,
}

fn default_resources_root() -> String {
    "./res".to_string()
}

fn default_file_name() -> String {
    DEFAULT_FILE_NAME.to_string()
}

fn default_master_language() -> String {
    DEFAULT_MASTER_LANGUAGE.to_string()
}

fn default_history_timeout_secs() -> u64 {
    60
}

fn default_string_elements() -> Vec<String> {
    vec!["string".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resources_root: default_resources_root(),
            file_name: default_file_name(),
            master_language: default_master_language(),
            vcs: VcsKind::default(),
            history_timeout_secs: default_history_timeout_secs(),
            string_elements: default_string_elements(),
            ignore_languages: Vec::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignore_languages {
            Pattern::new(pattern).with_context(|| {
                format!("Invalid glob pattern in 'ignoreLanguages': \"{}\"", pattern)
            })?;
        }
        if self.history_timeout_secs == 0 {
            bail!("'historyTimeoutSecs' must be greater than zero");
        }
        if self.string_elements.is_empty() {
            bail!("'stringElements' must name at least one element");
        }
        Ok(())
    }

    /// Compiled `ignoreLanguages` patterns. Call after [`Config::validate`].
    pub fn ignore_patterns(&self) -> Vec<Pattern> {
        self.ignore_languages
            .iter()
            .filter_map(|p| Pattern::new(p).ok())
            .collect()
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if REPOSITORY_MARKERS.iter().any(|m| current.join(m).exists()) {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Directory relative paths in the config resolve against.
    pub base_dir: PathBuf,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            tracing::debug!(path = %path.display(), "loaded config");
            let base_dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            Ok(ConfigLoadResult {
                config,
                base_dir,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            base_dir: start_dir.to_path_buf(),
            from_file: false,
        }),
    }
}
