use crate::config::AppConfig;
use crate::model::report::RunReport;
use crate::service::command_runner::{banner, run_command, CommandRunner};
use anyhow::Result;
use log::warn;

/// A `killall` invocation for one helper process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KillCommand {
    pub description: String,
    pub command_line: String,
}

/// Builds one kill per helper. Anything that would mention the reserved port
/// is dropped: that port belongs to a service this tool must leave alone.
pub fn kill_commands(config: &AppConfig) -> Vec<KillCommand> {
    config
        .command
        .helpers
        .iter()
        .filter_map(|helper| {
            let command_line = config.command.privileged(format!("killall {}", helper));
            if command_line
                .split_whitespace()
                .any(|token| config.mptcp.names_reserved_port(token))
            {
                warn!(
                    "Refusing `{}`: reserved port {} stays open",
                    command_line, config.mptcp.reserved_port
                );
                return None;
            }

            Some(KillCommand {
                description: format!("Killing {} processes", helper),
                command_line,
            })
        })
        .collect()
}

/// Stops leftover helpers, pausing after each so their sockets are released.
pub async fn reset_connections<R>(
    runner: &R,
    config: &AppConfig,
    report: &mut RunReport,
) -> Result<()>
where
    R: CommandRunner + ?Sized,
{
    banner("Killing existing connections and releasing ports");

    for kill in kill_commands(config) {
        let step = run_command(runner, kill.command_line, kill.description, false).await?;
        report.record(step);

        tokio::time::sleep(config.command.settle_delay()).await;
    }

    println!("Existing connections terminated");

    Ok(())
}
