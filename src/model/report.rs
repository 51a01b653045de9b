use crate::error_code::ErrorCode;
use crate::model::command::CommandResult;
use crate::model::interface::InterfaceRecord;

/// One external invocation and what came back from it.
#[derive(Debug, Clone)]
pub struct StepOutcome {
    pub description: String,
    pub command: String,
    /// Whether a non-zero exit counts as a failure.
    pub check: bool,
    pub result: CommandResult,
}

impl StepOutcome {
    pub fn failed(&self) -> bool {
        self.check && !self.result.success
    }

    /// Captured stdout, or `None` for a failed checked step.
    pub fn output(&self) -> Option<&str> {
        if self.failed() {
            None
        } else {
            Some(&self.result.stdout)
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub interfaces: Vec<InterfaceRecord>,
    pub steps: Vec<StepOutcome>,
    /// Whether the kernel lists the configured scheduler; `None` if unknown.
    pub scheduler_available: Option<bool>,
    pub status: ErrorCode,
}

impl RunReport {
    pub fn new() -> Self {
        Self {
            interfaces: Vec::new(),
            steps: Vec::new(),
            scheduler_available: None,
            status: ErrorCode::NoError,
        }
    }

    pub fn record(&mut self, step: StepOutcome) {
        self.steps.push(step);
    }

    pub fn failures(&self) -> impl Iterator<Item = &StepOutcome> {
        self.steps.iter().filter(|s| s.failed())
    }

    #[cfg(test)]
    pub fn commands(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|s| s.command.as_str())
    }
}

impl Default for RunReport {
    fn default() -> Self {
        Self::new()
    }
}
