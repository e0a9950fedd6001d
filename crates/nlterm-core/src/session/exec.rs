//! Command execution against the host shell.
//!
//! Built-ins that mutate session state (`cd`) are handled here instead of
//! being delegated to a spawned process; everything else runs through the
//! dialect's shell with stdout/stderr captured separately. Nothing raises
//! past this boundary - spawn failures and timeouts come back as error
//! text, never as `Err`.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use crate::dialect::Dialect;

/// Result of executing one command: the (possibly updated) working
/// directory, the combined text to render, and whether it is an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOutcome {
    pub cwd: PathBuf,
    pub text: String,
    pub is_error: bool,
}

impl ExecOutcome {
    fn output(cwd: PathBuf, text: String) -> Self {
        Self {
            cwd,
            text,
            is_error: false,
        }
    }

    fn error(cwd: PathBuf, text: String) -> Self {
        Self {
            cwd,
            text,
            is_error: true,
        }
    }
}

/// Executes a command line with the working directory pinned to `cwd`.
pub async fn execute(
    command: &str,
    cwd: &Path,
    dialect: Dialect,
    timeout: Option<Duration>,
) -> ExecOutcome {
    let trimmed = command.trim();

    if trimmed == "cd" || trimmed.starts_with("cd ") {
        let target = trimmed.strip_prefix("cd").unwrap_or_default().trim();
        return change_directory(target, cwd, dialect);
    }

    run_shell_command(trimmed, cwd, dialect, timeout).await
}

/// The directory-change built-in.
///
/// Resolves empty/home-marker/parent/absolute/relative targets against
/// `cwd`; succeeds only if the result exists and is a directory.
fn change_directory(target: &str, cwd: &Path, dialect: Dialect) -> ExecOutcome {
    let Some(resolved) = resolve_cd_target(target, cwd) else {
        return ExecOutcome::error(cwd.to_path_buf(), format!("{}\n", dialect.cd_error(target)));
    };

    if resolved.is_dir() {
        // Canonicalize so `cd ..` chains keep the prompt absolute and clean.
        let new_cwd = std::fs::canonicalize(&resolved).unwrap_or(resolved);
        let text = format!("Changed directory to {}\n", new_cwd.display());
        ExecOutcome::output(new_cwd, text)
    } else {
        ExecOutcome::error(cwd.to_path_buf(), format!("{}\n", dialect.cd_error(target)))
    }
}

fn resolve_cd_target(target: &str, cwd: &Path) -> Option<PathBuf> {
    if target.is_empty() || target == "~" {
        return dirs::home_dir();
    }
    if let Some(rest) = target.strip_prefix("~/") {
        return dirs::home_dir().map(|home| home.join(rest));
    }
    if target == ".." {
        return cwd.parent().map(Path::to_path_buf);
    }
    let path = Path::new(target);
    if path.is_absolute() {
        Some(path.to_path_buf())
    } else {
        Some(cwd.join(path))
    }
}

/// Delegates a command line to the host shell.
async fn run_shell_command(
    command: &str,
    cwd: &Path,
    dialect: Dialect,
    timeout: Option<Duration>,
) -> ExecOutcome {
    let (program, flag) = dialect.shell_invocation();

    let child = tokio::process::Command::new(program)
        .arg(flag)
        .arg(command)
        .current_dir(cwd)
        // Signal to programs that we are a non-interactive, dumb terminal.
        // This suppresses ANSI escape sequences and progress bars in most
        // well-behaved CLI tools.
        .env("TERM", "dumb")
        .env("NO_COLOR", "1")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn();

    let child = match child {
        Ok(child) => child,
        Err(e) => {
            tracing::warn!(error = %e, %command, "failed to spawn shell");
            return ExecOutcome::error(
                cwd.to_path_buf(),
                format!("Error executing command: {e}\n"),
            );
        }
    };

    let output_fut = child.wait_with_output();
    let output = match timeout {
        Some(timeout) => match tokio::time::timeout(timeout, output_fut).await {
            Ok(result) => result,
            Err(_) => {
                return ExecOutcome::error(
                    cwd.to_path_buf(),
                    format!("Command timed out after {} seconds\n", timeout.as_secs()),
                );
            }
        },
        None => output_fut.await,
    };

    let output = match output {
        Ok(output) => output,
        Err(e) => {
            return ExecOutcome::error(
                cwd.to_path_buf(),
                format!("Error executing command: {e}\n"),
            );
        }
    };

    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    if !stderr.trim().is_empty() {
        // Nonempty stderr is surfaced as the error segment; a nonzero exit
        // status alone is not treated as a hard error.
        return ExecOutcome::error(cwd.to_path_buf(), ensure_newline(stderr));
    }

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    if stdout.is_empty() {
        ExecOutcome::output(cwd.to_path_buf(), String::new())
    } else {
        ExecOutcome::output(cwd.to_path_buf(), ensure_newline(stdout))
    }
}

fn ensure_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn test_cd_parent() {
        let temp = TempDir::new().unwrap();
        let child = temp.path().join("sub");
        std::fs::create_dir(&child).unwrap();

        let outcome = execute("cd ..", &child, Dialect::Bash, None).await;
        assert!(!outcome.is_error);
        assert_eq!(outcome.cwd, std::fs::canonicalize(temp.path()).unwrap());
        assert!(outcome.text.starts_with("Changed directory to "));
    }

    #[tokio::test]
    async fn test_cd_nonexistent_leaves_cwd_unchanged() {
        let temp = TempDir::new().unwrap();

        let outcome = execute("cd /nonexistent", temp.path(), Dialect::Bash, None).await;
        assert!(outcome.is_error);
        assert_eq!(outcome.cwd, temp.path());
        assert_eq!(
            outcome.text,
            "bash: cd: /nonexistent: No such file or directory\n"
        );
    }

    #[tokio::test]
    async fn test_cd_relative() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("sub")).unwrap();

        let outcome = execute("cd sub", temp.path(), Dialect::Bash, None).await;
        assert!(!outcome.is_error);
        assert!(outcome.cwd.ends_with("sub"));
    }

    #[tokio::test]
    async fn test_cd_bare_goes_home() {
        let temp = TempDir::new().unwrap();

        let outcome = execute("cd", temp.path(), Dialect::Bash, None).await;
        if let Some(home) = dirs::home_dir() {
            assert!(!outcome.is_error);
            assert_eq!(outcome.cwd, std::fs::canonicalize(home).unwrap());
        }
    }

    #[tokio::test]
    async fn test_command_captures_stdout() {
        let temp = TempDir::new().unwrap();

        let outcome = execute("echo hello", temp.path(), Dialect::Bash, None).await;
        assert!(!outcome.is_error);
        assert_eq!(outcome.text, "hello\n");
        assert_eq!(outcome.cwd, temp.path());
    }

    #[tokio::test]
    async fn test_stderr_surfaces_as_error() {
        let temp = TempDir::new().unwrap();

        let outcome = execute("echo oops >&2", temp.path(), Dialect::Bash, None).await;
        assert!(outcome.is_error);
        assert!(outcome.text.contains("oops"));
    }

    #[tokio::test]
    async fn test_nonzero_exit_without_stderr_is_not_error() {
        let temp = TempDir::new().unwrap();

        let outcome = execute("exit 3", temp.path(), Dialect::Bash, None).await;
        assert!(!outcome.is_error);
        assert_eq!(outcome.text, "");
    }

    #[tokio::test]
    async fn test_timeout_surfaces_as_error() {
        let temp = TempDir::new().unwrap();

        let outcome = execute(
            "sleep 5",
            temp.path(),
            Dialect::Bash,
            Some(Duration::from_millis(100)),
        )
        .await;
        assert!(outcome.is_error);
        assert!(outcome.text.contains("timed out"));
    }

    #[tokio::test]
    async fn test_runs_in_given_cwd() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("marker.txt"), "x").unwrap();

        let outcome = execute("ls", temp.path(), Dialect::Bash, None).await;
        assert!(outcome.text.contains("marker.txt"));
    }
}
