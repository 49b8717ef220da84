use anyhow::Result;

use super::super::args::UntranslatedCommand;
use super::{
    CommandResult, CommandSummary, UntranslatedSummary,
    helper::{AuditContext, finish},
};

/// Keys each language still needs translated: missing plus outdated.
pub fn untranslated(cmd: UntranslatedCommand) -> Result<CommandResult> {
    let ctx = AuditContext::new(&cmd.common, &cmd.languages)?;
    let result = ctx.validate()?;

    let keys = ctx
        .languages
        .languages()
        .map(|(language, _)| (language.to_string(), result.untranslated(language)))
        .collect();

    let summary = UntranslatedSummary {
        format: cmd.format,
        keys,
    };
    Ok(finish(CommandSummary::Untranslated(summary), Vec::new(), false))
}
