use crate::model::command::CommandResult;
use crate::model::report::StepOutcome;
use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, trace};
use std::ffi::{OsStr, OsString};
use tokio::process::Command;

const RULE_WIDTH: usize = 60;

/// Executes a single command line and captures what it printed.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn execute(&self, command_line: &str) -> Result<CommandResult>;
}

/// Runs command lines through `<shell> -c`.
pub struct ShellRunner {
    shell: OsString,
}

impl ShellRunner {
    pub fn new(shell: impl AsRef<OsStr>) -> Self {
        Self {
            shell: shell.as_ref().to_os_string(),
        }
    }
}

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn execute(&self, command_line: &str) -> Result<CommandResult> {
        trace!("Spawning: {:?} -c {:?}", self.shell, command_line);

        // No timeout: a hung command hangs the run until the operator interrupts it.
        let output = Command::new(&self.shell)
            .arg("-c")
            .arg(command_line)
            .kill_on_drop(true)
            .output()
            .await
            .with_context(|| format!("Failed to execute `{}`", command_line))?;

        Ok(CommandResult {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code(),
            success: output.status.success(),
        })
    }
}

/// Prints commands instead of running them, except for the read-only ones
/// listed in `passthrough`.
pub struct DryRunner<R: CommandRunner> {
    inner: R,
    passthrough: Vec<String>,
}

impl<R: CommandRunner> DryRunner<R> {
    pub fn new(inner: R, passthrough: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            inner,
            passthrough: passthrough.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl<R: CommandRunner> CommandRunner for DryRunner<R> {
    async fn execute(&self, command_line: &str) -> Result<CommandResult> {
        if self.passthrough.iter().any(|p| p == command_line) {
            return self.inner.execute(command_line).await;
        }

        println!("[dry-run] {}", command_line);
        Ok(CommandResult::ok(""))
    }
}

/// Horizontal rule framing operator banners.
pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

pub fn banner(title: impl AsRef<str>) {
    let rule = rule();
    println!("\n{}\n{}\n{}", rule, title.as_ref(), rule);
}

/// Runs one step with an operator banner around it.
///
/// With `check` set, a non-zero exit is reported on stderr together with the
/// captured output. Without it, failures stay silent; `killall` finding
/// nothing to kill is the usual case.
pub async fn run_command<R>(
    runner: &R,
    command_line: String,
    description: impl Into<String>,
    check: bool,
) -> Result<StepOutcome>
where
    R: CommandRunner + ?Sized,
{
    let description = description.into();
    banner(&description);
    println!("Running: {}", command_line);

    let result = runner.execute(&command_line).await?;

    if result.success || !check {
        if !result.stdout.is_empty() {
            println!("{}", result.stdout);
        }

        if !result.success {
            debug!(
                "`{}` exited with {:?} (ignored): {}",
                command_line,
                result.exit_code,
                result.stderr.trim()
            );
        } else if !result.stderr.is_empty() {
            eprintln!("Warning: {}", result.stderr);
        }
    } else {
        match result.exit_code {
            Some(code) => eprintln!(
                "Error: Command '{}' returned non-zero exit status {}.",
                command_line, code
            ),
            None => eprintln!("Error: Command '{}' was terminated by a signal.", command_line),
        }
        if !result.stdout.is_empty() {
            println!("{}", result.stdout);
        }
        if !result.stderr.is_empty() {
            eprintln!("{}", result.stderr);
        }
    }

    Ok(StepOutcome {
        description,
        command: command_line,
        check,
        result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testing::FakeRunner;

    #[tokio::test]
    async fn test_shell_runner_captures_streams() {
        let runner = ShellRunner::new("/bin/sh");
        let result = runner.execute("echo out; echo err >&2; exit 3").await.unwrap();

        assert_eq!(result.stdout, "out\n");
        assert_eq!(result.stderr, "err\n");
        assert_eq!(result.exit_code, Some(3));
        assert!(!result.success);
    }

    #[tokio::test]
    async fn test_shell_runner_missing_shell_is_error() {
        let runner = ShellRunner::new("/nonexistent/shell");
        assert!(runner.execute("true").await.is_err());
    }

    #[tokio::test]
    async fn test_unchecked_failure_is_tolerated() {
        let runner = FakeRunner::new().with_response(
            "sudo killall iperf3",
            CommandResult::failed(1, "iperf3: no process found"),
        );

        let outcome = run_command(&runner, "sudo killall iperf3".to_string(), "Killing", false)
            .await
            .unwrap();

        assert!(!outcome.failed());
        assert_eq!(outcome.result.exit_code, Some(1));
    }

    #[tokio::test]
    async fn test_checked_failure_is_reported() {
        let runner = FakeRunner::new().with_response(
            "sudo ip mptcp endpoint flush",
            CommandResult::failed(2, "RTNETLINK answers: Operation not permitted"),
        );

        let outcome = run_command(
            &runner,
            "sudo ip mptcp endpoint flush".to_string(),
            "Flushing",
            true,
        )
        .await
        .unwrap();

        assert!(outcome.failed());
        assert_eq!(outcome.output(), None);
    }

    #[tokio::test]
    async fn test_spawn_error_propagates() {
        let runner = FakeRunner::new().with_error("sudo ip mptcp endpoint flush");

        let result = run_command(
            &runner,
            "sudo ip mptcp endpoint flush".to_string(),
            "Flushing",
            true,
        )
        .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_dry_runner_only_passes_through_listed_commands() {
        let inner =
            FakeRunner::new().with_response("ip -4 -o addr show", CommandResult::ok("listing"));
        let runner = DryRunner::new(inner, ["ip -4 -o addr show"]);

        let listing = runner.execute("ip -4 -o addr show").await.unwrap();
        let flush = runner.execute("sudo ip mptcp endpoint flush").await.unwrap();

        assert_eq!(listing.stdout, "listing");
        assert!(flush.success);
        assert_eq!(runner.inner.calls(), vec!["ip -4 -o addr show"]);
    }
}
