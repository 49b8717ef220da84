use std::process::ExitCode;

/// Process exit status, following the usual linter conventions.
///
/// - `Success` (0): every checked language is complete and current
/// - `Failure` (1): the check ran and found missing or outdated strings
/// - `Error` (2): the check could not run (bad config, unreadable file, VCS failure)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl ExitStatus {
    pub fn from_error_count(exit_on_errors: bool, error_count: usize) -> Self {
        if exit_on_errors && error_count > 0 {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
