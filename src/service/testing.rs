use crate::model::command::CommandResult;
use crate::service::command_runner::CommandRunner;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::Mutex;

enum Response {
    Result(CommandResult),
    /// The command cannot be started at all.
    Error,
    /// The command never returns.
    Pending,
}

/// Records command lines and answers them from a script keyed by prefix.
/// Unscripted commands succeed with empty output.
pub struct FakeRunner {
    responses: Vec<(String, Response)>,
    calls: Mutex<Vec<String>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self {
            responses: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_response(mut self, prefix: impl Into<String>, result: CommandResult) -> Self {
        self.responses.push((prefix.into(), Response::Result(result)));
        self
    }

    pub fn with_error(mut self, prefix: impl Into<String>) -> Self {
        self.responses.push((prefix.into(), Response::Error));
        self
    }

    pub fn with_pending(mut self, prefix: impl Into<String>) -> Self {
        self.responses.push((prefix.into(), Response::Pending));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for FakeRunner {
    async fn execute(&self, command_line: &str) -> Result<CommandResult> {
        self.calls.lock().unwrap().push(command_line.to_string());

        let response = self
            .responses
            .iter()
            .find(|(prefix, _)| command_line.starts_with(prefix.as_str()))
            .map(|(_, response)| response);

        match response {
            Some(Response::Result(result)) => Ok(result.clone()),
            Some(Response::Error) => Err(anyhow!("Failed to execute `{}`", command_line)),
            Some(Response::Pending) => std::future::pending().await,
            None => Ok(CommandResult::ok("")),
        }
    }
}
