use crate::config::AppConfig;
use crate::error_code::ErrorCode;
use crate::model::interface::InterfaceRecord;
use crate::model::report::RunReport;
use crate::service::command_runner::{banner, rule, run_command, CommandRunner};
use crate::service::{discovery, reset, scheduler};
use anyhow::Result;
use log::{info, warn};

pub struct MptcpConfigurator<R: CommandRunner> {
    runner: R,
    config: AppConfig,
}

impl<R: CommandRunner> MptcpConfigurator<R> {
    pub fn new(runner: R, config: AppConfig) -> Self {
        Self { runner, config }
    }

    #[cfg(test)]
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Applies the full endpoint, scheduler and limit configuration.
    ///
    /// Only a host without usable interfaces stops the run early. Every other
    /// command failure is recorded in the report and the run carries on.
    pub async fn run(&self) -> Result<RunReport> {
        let mut report = RunReport::new();

        banner("MPTCP COMPLETE CONFIGURATION SCRIPT");

        reset::reset_connections(&self.runner, &self.config, &mut report).await?;

        let interfaces = discovery::discover_interfaces(&self.runner, &mut report).await?;
        if interfaces.is_empty() {
            println!("\nError: {}", ErrorCode::NoInterfaces.message());
            report.status = ErrorCode::NoInterfaces;
            return Ok(report);
        }

        println!("\nFound {} network interface(s):", interfaces.len());
        for interface in &interfaces {
            println!("  - {}", interface);
        }
        report.interfaces = interfaces;

        self.step(
            &mut report,
            self.privileged("ip mptcp endpoint flush"),
            "Flushing all existing MPTCP endpoints",
        )
        .await?;

        banner("Adding endpoints with 'signal' flag");
        for interface in report.interfaces.clone() {
            self.add_signal_endpoint(&mut report, &interface).await?;
        }

        let mptcp = &self.config.mptcp;
        let available =
            scheduler::check_scheduler(&self.runner, &mptcp.scheduler, &mut report).await?;
        report.scheduler_available = available;

        self.step(
            &mut report,
            self.privileged(format!("sysctl -w net.mptcp.scheduler={}", mptcp.scheduler)),
            format!("Setting MPTCP scheduler to {}", mptcp.scheduler),
        )
        .await?;

        self.step(
            &mut report,
            self.privileged(format!(
                "ip mptcp limits set add_addr_accepted {}",
                mptcp.add_addr_accepted
            )),
            format!(
                "Setting MPTCP limits (add_addr_accepted={})",
                mptcp.add_addr_accepted
            ),
        )
        .await?;

        banner("FINAL MPTCP CONFIGURATION");
        self.step(
            &mut report,
            "ip mptcp endpoint show".to_string(),
            "Current MPTCP Endpoints",
        )
        .await?;
        self.step(
            &mut report,
            "ip mptcp limits show".to_string(),
            "Current MPTCP Limits",
        )
        .await?;
        self.step(
            &mut report,
            "sysctl net.mptcp.scheduler".to_string(),
            "Current MPTCP Scheduler",
        )
        .await?;

        banner(ErrorCode::NoError.message());
        println!("\nReady for MPTCP connections");
        println!("{}", rule());

        let failures = report.failures().count();
        if failures > 0 {
            for step in report.failures() {
                warn!("{} failed: `{}`", step.description, step.command);
            }
            warn!(
                "{} of {} commands failed; check privileges and kernel MPTCP support",
                failures,
                report.steps.len()
            );
        } else {
            info!("Registered {} signal endpoint(s)", report.interfaces.len());
        }

        report.status = ErrorCode::NoError;
        Ok(report)
    }

    async fn add_signal_endpoint(
        &self,
        report: &mut RunReport,
        interface: &InterfaceRecord,
    ) -> Result<()> {
        self.step(
            report,
            self.privileged(format!(
                "ip mptcp endpoint add {} dev {} signal",
                interface.ip, interface.device
            )),
            format!(
                "Adding {} ({}) as signal endpoint",
                interface.ip, interface.device
            ),
        )
        .await
    }

    async fn step(
        &self,
        report: &mut RunReport,
        command_line: String,
        description: impl Into<String>,
    ) -> Result<()> {
        let outcome = run_command(&self.runner, command_line, description, true).await?;
        report.record(outcome);

        Ok(())
    }

    fn privileged(&self, command_line: impl AsRef<str>) -> String {
        self.config.command.privileged(command_line)
    }
}
