use crate::model::report::RunReport;
use crate::service::command_runner::{run_command, CommandRunner};
use anyhow::Result;
use log::{debug, warn};

/// Prints the value only, e.g. `default clientportsched`.
pub const AVAILABLE_COMMAND: &str = "sysctl -n net.mptcp.available_schedulers";

/// Scheduler names from the first meaningful line of `available_schedulers`.
///
/// Blank lines and lines starting with `_` are skipped.
pub fn parse_available_schedulers(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('_'))
        .map(|line| line.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Checks that the kernel offers `scheduler`.
///
/// Returns `None` when the kernel list could not be read. An unknown
/// scheduler only produces a warning; the caller still tries to set it.
pub async fn check_scheduler<R>(
    runner: &R,
    scheduler: &str,
    report: &mut RunReport,
) -> Result<Option<bool>>
where
    R: CommandRunner + ?Sized,
{
    let step = run_command(
        runner,
        AVAILABLE_COMMAND.to_string(),
        "Checking available MPTCP schedulers",
        false,
    )
    .await?;

    let available = parse_available_schedulers(step.output().unwrap_or_default());
    report.record(step);

    if available.is_empty() {
        debug!("Kernel did not report any MPTCP scheduler");
        return Ok(None);
    }

    let listed = available.iter().any(|s| s == scheduler);
    if !listed {
        warn!(
            "Scheduler `{}` is not offered by the kernel (available: {})",
            scheduler,
            available.join(", ")
        );
    }

    Ok(Some(listed))
}
