//! Error taxonomy of the validation engine.
//!
//! A missing revision on a single entry is not an error; it is logged and the
//! entry is left out of the staleness comparison.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = ValidationError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ValidationError {
    /// The resource document is malformed. Aborts processing of that file.
    #[error("{path}:{line}: malformed string resource: {message}")]
    Format {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// An external history query failed or produced output that could not be parsed.
    #[error("history unavailable for {path}: {message}")]
    HistoryUnavailable { path: PathBuf, message: String },

    /// No languages found, master missing, or an unknown language requested.
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ValidationError {
    pub fn history(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::HistoryUnavailable {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}
