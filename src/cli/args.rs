//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `check`: Report missing and outdated translations
//! - `untranslated`: List keys each language still has to translate
//! - `init`: Initialize the configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

use crate::core::VcsKind;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Check(cmd)) => cmd.common.verbose,
            Some(Command::Untranslated(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by the validating commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Directory holding the `values*` directories (overrides config file)
    #[arg(long)]
    pub resources_root: Option<PathBuf>,

    /// Master language id (overrides config file)
    #[arg(long)]
    pub master: Option<String>,

    /// String file name inside each language directory (overrides config file)
    #[arg(long)]
    pub file_name: Option<String>,

    /// Version control system holding the resources (overrides config file)
    #[arg(long, value_enum)]
    pub vcs: Option<VcsKind>,

    /// Compare key sets only; skip the outdated check
    #[arg(long)]
    pub no_history: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Languages to check (default: all discovered)
    pub languages: Vec<String>,
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Args)]
pub struct UntranslatedCommand {
    /// Languages to list (default: all discovered)
    pub languages: Vec<String>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check translations for missing and outdated strings
    Check(CheckCommand),
    /// List missing and outdated keys per language
    Untranslated(UntranslatedCommand),
    /// Initialize a new .xlaterc.json configuration file
    Init,
}
