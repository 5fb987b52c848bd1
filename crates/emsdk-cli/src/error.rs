//! CLI-specific error types and mappings.
//!
//! Maps domain errors to exit codes and user-facing messages.

use emsdk_core::{ConfigError, PathError};
use emsdk_runtime::SdkError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// General failure.
    #[error("{0}")]
    Core(String),

    /// Argument or input misuse.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration or install path error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A child process failed; its exit code becomes ours.
    ///
    /// `from_child` is false when no child ever ran (e.g. spawn failure).
    #[error("{message}")]
    Process {
        code: i32,
        message: String,
        from_child: bool,
    },
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error, or a child that exited without a code
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 74/78: IO and configuration errors (see sysexits.h)
    /// - anything else: the failing child's own exit code
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Core(_) => 1,
            Self::Arguments(_) => 2, // EX_USAGE
            Self::Io(_) => 74,       // EX_IOERR
            Self::Config(_) => 78,   // EX_CONFIG
            Self::Process { code, .. } => *code,
        }
    }

    /// Whether a child process already told the user what went wrong.
    ///
    /// A child that exited with its own code printed its diagnostics on the
    /// inherited stderr; anything else still needs reporting.
    #[must_use]
    pub const fn already_reported(&self) -> bool {
        matches!(self, Self::Process { from_child: true, .. })
    }
}

impl From<PathError> for CliError {
    fn from(err: PathError) -> Self {
        match err {
            PathError::Io { .. } => Self::Io(err.to_string()),
            PathError::NoHomeDir | PathError::CurrentDirError(_) | PathError::ModuleBase(_) => {
                Self::Core(err.to_string())
            }
            _ => Self::Config(err.to_string()),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<SdkError> for CliError {
    fn from(err: SdkError) -> Self {
        match err {
            SdkError::Path(path_err) => path_err.into(),
            SdkError::Config(config_err) => config_err.into(),
            SdkError::Process(failure) => Self::Process {
                code: failure.exit_status(),
                message: failure.to_string(),
                from_child: failure.exit_code.is_some(),
            },
            SdkError::EmptyCommand | SdkError::UnsafeShellArgument(_) => {
                Self::Arguments(err.to_string())
            }
            SdkError::Io { .. } | SdkError::CurrentDir(_) => Self::Io(err.to_string()),
            SdkError::ToolMissing { .. } => Self::Core(err.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
