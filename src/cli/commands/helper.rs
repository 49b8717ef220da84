use std::{
    env,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};

use super::{CommandResult, CommandSummary};
use crate::{
    cli::args::CommonArgs,
    config::{Config, load_config},
    core::{
        AndroidResources, History, LanguageSet, Locator, StringFileParser, ValidationResult,
        Validator, history::backend,
    },
    issues::{Issue, Severity},
};

/// Everything one validating command needs, resolved from the config file
/// and the command-line overrides.
pub struct AuditContext {
    pub languages: LanguageSet,
    pub parser: StringFileParser,
    pub history: Option<Box<dyn History>>,
    /// Directory report paths are shown relative to.
    pub base_dir: PathBuf,
}

impl AuditContext {
    pub fn new(common: &CommonArgs, requested: &[String]) -> Result<Self> {
        let cwd = env::current_dir().context("Failed to read current directory")?;
        let loaded = load_config(&cwd)?;
        Self::from_config(&loaded.config, &loaded.base_dir, &cwd, common, requested)
    }

    fn from_config(
        config: &Config,
        config_dir: &Path,
        base_dir: &Path,
        common: &CommonArgs,
        requested: &[String],
    ) -> Result<Self> {
        let root = match &common.resources_root {
            Some(root) => root.clone(),
            None => {
                let relative = Path::new(&config.resources_root);
                config_dir.join(relative.strip_prefix(".").unwrap_or(relative))
            }
        };
        let master = common
            .master
            .clone()
            .unwrap_or_else(|| config.master_language.clone());
        let file_name = common
            .file_name
            .clone()
            .unwrap_or_else(|| config.file_name.clone());

        let discovered = AndroidResources::new(&root, file_name, master.as_str())
            .discover(&master)
            .with_context(|| format!("Failed to discover languages in {}", root.display()))?;

        let languages = if requested.is_empty() {
            let patterns = config.ignore_patterns();
            discovered.without(|language| patterns.iter().any(|p| p.matches(language)))
        } else {
            discovered.select(requested)?
        };

        let history = if common.no_history {
            None
        } else {
            let vcs = common.vcs.unwrap_or(config.vcs);
            tracing::debug!(%vcs, timeout = config.history_timeout_secs, "using history backend");
            Some(backend(
                vcs,
                Duration::from_secs(config.history_timeout_secs),
            ))
        };

        Ok(Self {
            languages,
            parser: StringFileParser::new(config.string_elements.clone()),
            history,
            base_dir: base_dir.to_path_buf(),
        })
    }

    pub fn validate(&self) -> Result<ValidationResult> {
        let mut validator =
            Validator::new(self.languages.clone()).with_parser(self.parser.clone());
        if let Some(history) = &self.history {
            validator = validator.with_history(history.as_ref());
        }
        let result = validator.validate()?;
        Ok(result.clone())
    }

    /// `path` relative to the working directory when it lies below it.
    pub fn display_path(&self, path: &Path) -> String {
        let path = path.strip_prefix(&self.base_dir).unwrap_or(path);
        let path = path.strip_prefix(".").unwrap_or(path);
        path.display().to_string()
    }
}

pub fn finish(summary: CommandSummary, mut issues: Vec<Issue>, exit_on_errors: bool) -> CommandResult {
    issues.sort();

    let error_count = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .count();
    let warning_count = issues.len() - error_count;

    CommandResult {
        summary,
        error_count,
        warning_count,
        exit_on_errors,
        issues,
    }
}
