use std::process::{Command, Stdio};

use tracing::debug;

use crate::LOG_TARGET_LOAD;
use crate::error::LoadError;

/// Runs `command` with `extra` appended and returns its stdout. Stderr is passed
/// through so the external tool's own diagnostics reach the user.
pub(crate) fn run_captured(
    step: &'static str,
    command: &[String],
    extra: &[String],
) -> Result<String, LoadError> {
    let Some((program, args)) = command.split_first() else {
        return Err(LoadError::EmptyCommand { step });
    };
    let shown = command.iter().chain(extra).cloned().collect::<Vec<_>>().join(" ");
    debug!(target: LOG_TARGET_LOAD, "{step}: running `{shown}`");

    let output = Command::new(program)
        .args(args)
        .args(extra)
        .stdin(Stdio::null())
        .stderr(Stdio::inherit())
        .output()
        .map_err(|source| LoadError::Spawn {
            step,
            program: program.clone(),
            source,
        })?;

    if !output.status.success() {
        return Err(LoadError::CommandFailed {
            step,
            command: shown,
            status: output.status,
        });
    }
    String::from_utf8(output.stdout).map_err(|_| LoadError::NotUtf8 {
        step,
        command: shown,
    })
}
