use crate::config::traits::ConfigEntity;
use anyhow::bail;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct CommandConfig {
    #[serde(default = "default_shell")]
    pub shell: String,
    #[serde(default = "default_privilege_prefix")]
    pub privilege_prefix: String,
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
    #[serde(default = "default_helpers")]
    pub helpers: Vec<String>,
}

impl CommandConfig {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Prepends the privilege prefix, if any, to a command line.
    pub fn privileged(&self, command_line: impl AsRef<str>) -> String {
        if self.privilege_prefix.is_empty() {
            command_line.as_ref().to_string()
        } else {
            format!("{} {}", self.privilege_prefix, command_line.as_ref())
        }
    }
}

impl ConfigEntity for CommandConfig {
    fn finalize(&mut self) -> anyhow::Result<()> {
        self.shell = self.shell.trim().to_string();
        self.privilege_prefix = self.privilege_prefix.trim().to_string();
        self.helpers = self
            .helpers
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        Ok(())
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.shell.is_empty() {
            bail!("Shell is empty");
        }

        if !Path::new(&self.shell).exists() {
            bail!("Shell `{}` does not exist", self.shell);
        }

        for helper in &self.helpers {
            let unusable = helper.is_empty()
                || helper
                    .chars()
                    .any(|c| c.is_whitespace() || c == '/' || c == ':');
            if unusable {
                bail!("Invalid helper process name: `{}`", helper);
            }
        }

        Ok(())
    }
}

impl Default for CommandConfig {
    fn default() -> Self {
        CommandConfig {
            shell: default_shell(),
            privilege_prefix: default_privilege_prefix(),
            settle_delay_ms: default_settle_delay_ms(),
            helpers: default_helpers(),
        }
    }
}

fn default_shell() -> String {
    "/bin/sh".to_string()
}

fn default_privilege_prefix() -> String {
    "sudo".to_string()
}

fn default_settle_delay_ms() -> u64 {
    500
}

fn default_helpers() -> Vec<String> {
    vec!["iperf3".to_string(), "mptcpize".to_string()]
}
