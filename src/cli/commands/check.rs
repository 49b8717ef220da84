use std::collections::BTreeMap;

use anyhow::Result;

use super::super::args::CheckCommand;
use super::{
    CheckSummary, CommandResult, CommandSummary, LanguageCounts,
    helper::{AuditContext, finish},
};
use crate::{
    core::{ParsedFile, ValidationResult},
    issues::{
        EntryLocation, Issue, MissingInLanguageIssue, MissingInMasterIssue, OutdatedIssue,
        UnattributedIssue,
    },
};

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let ctx = AuditContext::new(&cmd.common, &cmd.languages)?;
    let result = ctx.validate()?;

    let issues = collect_issues(&ctx, &result)?;
    let summary = CheckSummary {
        master: ctx.languages.master().to_string(),
        history: ctx.history.is_some(),
        counts: language_counts(&ctx, &result),
    };

    Ok(finish(CommandSummary::Check(summary), issues, true))
}

fn language_counts(ctx: &AuditContext, result: &ValidationResult) -> BTreeMap<String, LanguageCounts> {
    let count = |map: &crate::core::KeysByLanguage, language: &str| {
        map.get(language).map_or(0, |keys| keys.len())
    };

    ctx.languages
        .languages()
        .map(|(language, _)| {
            let counts = LanguageCounts {
                missing_in_language: count(&result.missing_in_language, language),
                missing_in_master: count(&result.missing_in_master, language),
                outdated: count(&result.outdated_in_language, language),
            };
            (language.to_string(), counts)
        })
        .collect()
}

/// Turn key names into located issues. Files are parsed again for line
/// numbers; the validator result only carries names.
fn collect_issues(ctx: &AuditContext, result: &ValidationResult) -> Result<Vec<Issue>> {
    let master = ctx.parser.parse(ctx.languages.master_file())?;
    let mut issues = Vec::new();

    for (language, path) in ctx.languages.languages() {
        let file = ctx.parser.parse(path)?;

        for key in result.missing_in_language.get(language).into_iter().flatten() {
            issues.push(Issue::MissingInLanguage(MissingInLanguageIssue {
                location: locate(ctx, &master, key),
                key: key.clone(),
                language: language.to_string(),
            }));
        }
        for key in result.missing_in_master.get(language).into_iter().flatten() {
            issues.push(Issue::MissingInMaster(MissingInMasterIssue {
                location: locate(ctx, &file, key),
                key: key.clone(),
                language: language.to_string(),
            }));
        }
        for key in result.outdated_in_language.get(language).into_iter().flatten() {
            issues.push(Issue::Outdated(OutdatedIssue {
                location: locate(ctx, &file, key),
                key: key.clone(),
                language: language.to_string(),
                inherits_from_parent: file
                    .get(key)
                    .is_some_and(|entry| entry.inherits_from_parent),
            }));
        }
        for key in result.unattributed.get(language).into_iter().flatten() {
            issues.push(Issue::Unattributed(UnattributedIssue {
                location: locate(ctx, &file, key),
                key: key.clone(),
                language: language.to_string(),
            }));
        }
    }

    Ok(issues)
}

fn locate(ctx: &AuditContext, file: &ParsedFile, key: &str) -> EntryLocation {
    let line = file.get(key).map_or(0, |entry| entry.start_line);
    EntryLocation::new(ctx.display_path(file.path()), line)
}
