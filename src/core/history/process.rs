use std::{
    ffi::OsStr,
    io::Read,
    path::Path,
    process::{Command, Stdio},
    thread,
    time::{Duration, Instant},
};

use crate::core::error::{Result, ValidationError};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Run `program` in `dir` and return its stdout.
///
/// A non-zero exit, a spawn failure or exceeding `timeout` all map to
/// `HistoryUnavailable` for `subject`.
pub(super) fn run_query<I, S>(
    program: &str,
    args: I,
    dir: &Path,
    timeout: Duration,
    subject: &Path,
) -> Result<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let args: Vec<_> = args
        .into_iter()
        .map(|a| a.as_ref().to_os_string())
        .collect();
    tracing::debug!(program, ?args, dir = %dir.display(), "running history query");

    let mut child = Command::new(program)
        .args(&args)
        .current_dir(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| ValidationError::history(subject, format!("failed to run {program}: {e}")))?;

    // Drain both pipes while polling so a large annotation cannot block the child.
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    let stdout_reader = thread::spawn(move || read_all(stdout));
    let stderr_reader = thread::spawn(move || read_all(stderr));

    let start = Instant::now();
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) if start.elapsed() >= timeout => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(ValidationError::history(
                    subject,
                    format!("{program} timed out after {}s", timeout.as_secs_f32()),
                ));
            }
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(e) => {
                return Err(ValidationError::history(
                    subject,
                    format!("failed to wait for {program}: {e}"),
                ));
            }
        }
    };

    let stdout = stdout_reader.join().unwrap_or_default();
    let stderr = stderr_reader.join().unwrap_or_default();

    if !status.success() {
        let stderr = String::from_utf8_lossy(&stderr);
        return Err(ValidationError::history(
            subject,
            format!("{program} exited with {status}: {}", stderr.trim()),
        ));
    }

    Ok(String::from_utf8_lossy(&stdout).into_owned())
}

fn read_all<R: Read>(source: Option<R>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(mut source) = source {
        let _ = source.read_to_end(&mut buf);
    }
    buf
}

/// True if `token` looks like a changeset hash.
pub(super) fn is_hex_id(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_hexdigit())
}
