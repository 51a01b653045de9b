use crate::config::command::CommandConfig;
use crate::config::mptcp::MptcpConfig;
use crate::config::traits::ConfigEntity;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

mod command;
mod mptcp;
mod traits;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub mptcp: MptcpConfig,

    #[serde(default)]
    pub command: CommandConfig,
}

impl ConfigEntity for AppConfig {
    fn finalize(&mut self) -> Result<()> {
        self.mptcp.finalize()?;
        self.command.finalize()?;

        Ok(())
    }

    fn validate(&self) -> Result<()> {
        self.mptcp.validate()?;
        self.command.validate()?;

        // A helper named after the reserved port would turn the reset into a port kill.
        if let Some(helper) = self
            .command
            .helpers
            .iter()
            .find(|h| self.mptcp.names_reserved_port(h))
        {
            bail!(
                "Helper `{}` refers to reserved port {}",
                helper,
                self.mptcp.reserved_port
            );
        }

        Ok(())
    }
}

impl AppConfig {
    /// Applies command line overrides, then finalizes and validates.
    pub fn prepare(
        mut self,
        scheduler: Option<String>,
        add_addr_accepted: Option<u32>,
    ) -> Result<Self> {
        if let Some(scheduler) = scheduler {
            self.mptcp.scheduler = scheduler;
        }

        if let Some(limit) = add_addr_accepted {
            self.mptcp.add_addr_accepted = limit;
        }

        self.apply()?;

        Ok(self)
    }
}

/// Reads a configuration file. Without a path, the built-in defaults are used.
pub fn load_config(file_path: Option<&str>) -> Result<AppConfig> {
    let Some(file_path) = file_path else {
        return Ok(AppConfig::default());
    };

    // Check if the file exists.
    if !Path::new(file_path).exists() {
        bail!("File `{}` does not exist.", file_path);
    }

    let config_content = fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read `{}`", file_path))?;

    toml::from_str(&config_content).with_context(|| format!("Failed to parse `{}`", file_path))
}
