use std::process::ExitCode;

/// Outcome of a configuration run as seen by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    NoError,
    NoInterfaces,
    Interrupted,

    UnexpectedError,
}

impl ErrorCode {
    pub fn code(&self) -> u8 {
        match self {
            ErrorCode::NoError => 0,
            ErrorCode::NoInterfaces => 1,
            ErrorCode::Interrupted => 1,
            ErrorCode::UnexpectedError => 1,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::NoError => "Configuration complete!",
            ErrorCode::NoInterfaces => "No network interfaces found!",
            ErrorCode::Interrupted => "Script interrupted by user.",
            ErrorCode::UnexpectedError => "Unexpected error",
        }
    }
}

impl From<ErrorCode> for ExitCode {
    fn from(code: ErrorCode) -> Self {
        ExitCode::from(code.code())
    }
}
