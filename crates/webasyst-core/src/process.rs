//! Running external programs (`php`, `msgfmt`, `zip`).
//!
//! The exit status alone decides success. A program that cannot be spawned
//! is reported with an installation hint.

use crate::{Error, Result};
use std::path::Path;
use std::process::Command;

/// Captured output of a successful program run.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    /// Standard output, lossily decoded
    pub stdout: String,
    /// Standard error, lossily decoded
    pub stderr: String,
}

/// Runs `program` with `args` in `cwd` and waits for it to exit.
///
/// # Errors
///
/// Returns [`Error::ExternalTool`] if the program cannot be started or
/// exits with a non-zero status. `install_hint` is used as the message in
/// the first case.
pub fn run_program(
    program: &str,
    args: &[&str],
    cwd: &Path,
    install_hint: &str,
) -> Result<CommandOutput> {
    tracing::debug!(program, ?args, cwd = %cwd.display(), "spawning external program");

    let output = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .output()
        .map_err(|e| Error::ExternalTool {
            tool: program.to_string(),
            message: format!("{install_hint} ({e})"),
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if !output.status.success() {
        let detail = if stderr.trim().is_empty() {
            stdout.trim().to_string()
        } else {
            stderr.trim().to_string()
        };
        return Err(Error::ExternalTool {
            tool: program.to_string(),
            message: format!("exited with {}: {detail}", output.status),
        });
    }

    Ok(CommandOutput { stdout, stderr })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_program_reports_hint() {
        let temp = TempDir::new().unwrap();
        let err = run_program(
            "definitely-not-a-real-program-4242",
            &[],
            temp.path(),
            "install it first",
        )
        .unwrap_err();

        assert!(err.is_external_tool_error());
        assert!(err.to_string().contains("install it first"));
    }
}
