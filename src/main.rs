use crate::args::Args;
use crate::error_code::ErrorCode;
use crate::service::command_runner::{CommandRunner, DryRunner, ShellRunner};
use crate::service::configurator::MptcpConfigurator;
use crate::service::{discovery, scheduler};
use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::future::Future;
use std::io;
use std::process::ExitCode;

mod args;
mod config;
mod error_code;
mod logging;
mod model;
mod service;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run(args).await {
        Ok(status) => status.into(),
        Err(error) => {
            eprintln!("\n{}: {:#}", ErrorCode::UnexpectedError.message(), error);
            ErrorCode::UnexpectedError.into()
        }
    }
}

async fn run(args: Args) -> Result<ErrorCode> {
    // Initialize the logging system with the specified debug level
    logging::init(args.debug)?;
    log::debug!("debug mode enabled");

    let config = config::load_config(args.config.as_deref())
        .context("Failed to load configuration")?
        .prepare(args.scheduler, args.add_addr_accepted)
        .context("Invalid configuration")?;
    info!(
        "Configuration loaded: scheduler={}, add_addr_accepted={}",
        config.mptcp.scheduler, config.mptcp.add_addr_accepted
    );

    let shell = ShellRunner::new(&config.command.shell);

    if args.dry_run {
        info!("Dry run: only the read-only listings are executed");
        let runner = DryRunner::new(
            shell,
            [discovery::LIST_COMMAND, scheduler::AVAILABLE_COMMAND],
        );
        configure(
            MptcpConfigurator::new(runner, config),
            tokio::signal::ctrl_c(),
        )
        .await
    } else {
        configure(
            MptcpConfigurator::new(shell, config),
            tokio::signal::ctrl_c(),
        )
        .await
    }
}

/// Runs the configurator until it finishes or `interrupt` resolves.
async fn configure<R, I>(configurator: MptcpConfigurator<R>, interrupt: I) -> Result<ErrorCode>
where
    R: CommandRunner,
    I: Future<Output = io::Result<()>>,
{
    tokio::select! {
        report = configurator.run() => Ok(report?.status),
        signal = interrupt => {
            signal.context("Failed to listen for Ctrl-C")?;
            println!("\n\n{}", ErrorCode::Interrupted.message());
            Ok(ErrorCode::Interrupted)
        }
    }
}
