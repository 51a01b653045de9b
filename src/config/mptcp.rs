use crate::config::traits::ConfigEntity;
use anyhow::{bail, Result};
use serde::Deserialize;

/// Kernel upper bound for the MPTCP path-manager limits.
pub const MPTCP_PM_ADDR_MAX: u32 = 8;

#[derive(Debug, Clone, Deserialize)]
pub struct MptcpConfig {
    #[serde(default = "default_scheduler")]
    pub scheduler: String,
    #[serde(default = "default_add_addr_accepted")]
    pub add_addr_accepted: u32,
    /// Port owned by an unrelated service; nothing here may release it.
    #[serde(default = "default_reserved_port")]
    pub reserved_port: u16,
}

impl MptcpConfig {
    /// True when `token` designates the reserved port: `5000`, `5000/tcp`,
    /// `:5000` or `host:5000`.
    pub fn names_reserved_port(&self, token: &str) -> bool {
        let port = token.rsplit(':').next().unwrap_or(token);
        let port = port.split('/').next().unwrap_or(port);

        port.parse::<u16>() == Ok(self.reserved_port)
    }
}

impl Default for MptcpConfig {
    fn default() -> Self {
        MptcpConfig {
            scheduler: default_scheduler(),
            add_addr_accepted: default_add_addr_accepted(),
            reserved_port: default_reserved_port(),
        }
    }
}

impl ConfigEntity for MptcpConfig {
    fn finalize(&mut self) -> Result<()> {
        self.scheduler = self.scheduler.trim().to_string();

        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.scheduler.is_empty() {
            bail!("MPTCP scheduler is empty");
        }

        if !self
            .scheduler
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            bail!("Invalid MPTCP scheduler name: {}", self.scheduler);
        }

        if self.add_addr_accepted > MPTCP_PM_ADDR_MAX {
            bail!(
                "add_addr_accepted must be at most {}, got {}",
                MPTCP_PM_ADDR_MAX,
                self.add_addr_accepted
            );
        }

        if self.reserved_port == 0 {
            bail!("Reserved port must not be 0");
        }

        Ok(())
    }
}

fn default_scheduler() -> String {
    "clientportsched".to_string()
}

fn default_add_addr_accepted() -> u32 {
    2
}

fn default_reserved_port() -> u16 {
    5000
}
