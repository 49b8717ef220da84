//! Validation engine.
//!
//! Leaf first:
//!
//! - `parser`: annotated string-resource file → [`ParsedFile`]
//! - `attribution`: stamp entries with the revisions of their source lines
//! - `ordering`: ancestry queries (`supersedes`, `newer`)
//! - `validator`: missing and outdated keys per language
//!
//! `history` holds the VCS backends and `languages` the resource layout.

mod annotation;
pub mod attribution;
mod entry;
mod error;
pub mod history;
pub mod languages;
pub mod ordering;
pub mod parser;
pub mod validator;

pub use annotation::KeepParent;
pub use attribution::{LineRevisions, attribute};
pub use entry::{ParsedFile, RevisionId, StringEntry};
pub use error::{Result, ValidationError};
pub use history::{Git, History, Mercurial, VcsKind};
pub use languages::{AndroidResources, LanguageSet, Locator};
pub use ordering::{Relation, RevisionGraph};
pub use parser::StringFileParser;
pub use validator::{KeysByLanguage, ValidationResult, Validator, validate};
