//! Process runner trait definition.
//!
//! This port defines the interface for executing external commands (git,
//! the SDK's scripts, arbitrary user commands). Implementations handle all
//! spawning details internally.

use async_trait::async_trait;
use std::fmt;
use std::path::PathBuf;

/// How the command line is handed to the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecMode {
    /// `program` is executed directly with `args` as its argv.
    #[default]
    Argv,
    /// `program` is a complete script run by the platform shell.
    ///
    /// Needed when one command must observe environment changes made by a
    /// previous one in the same invocation.
    Shell,
}

/// What happens to the child's standard streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StdioMode {
    /// Streams are shared with the caller, so progress output stays live.
    #[default]
    Inherit,
    /// stdout and stderr are captured and returned.
    Capture,
}

/// Per-invocation options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Working directory for the child (defaults to the caller's).
    pub cwd: Option<PathBuf>,
    /// Extra environment variables.
    pub env: Vec<(String, String)>,
    pub stdio: StdioMode,
}

/// A single subprocess request. Built per call and discarded afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    pub program: String,
    pub args: Vec<String>,
    pub mode: ExecMode,
    pub options: RunOptions,
}

impl CommandInvocation {
    /// Execute `program` directly with `args`.
    pub fn argv<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            mode: ExecMode::Argv,
            options: RunOptions::default(),
        }
    }

    /// Run `script` through the platform shell.
    pub fn shell(script: impl Into<String>) -> Self {
        Self {
            program: script.into(),
            args: Vec::new(),
            mode: ExecMode::Shell,
            options: RunOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: RunOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.options.cwd = Some(cwd.into());
        self
    }

    #[must_use]
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.env.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub const fn captured(mut self) -> Self {
        self.options.stdio = StdioMode::Capture;
        self
    }
}

impl fmt::Display for CommandInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Result of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Captured stdout (empty when streams are inherited).
    pub stdout: String,
    /// Captured stderr (empty when streams are inherited).
    pub stderr: String,
}

/// A subprocess could not be started or exited non-zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessFailure {
    pub program: String,
    /// Exit code, if the process ran and exited normally.
    pub exit_code: Option<i32>,
    /// Captured stderr, or the spawn error message.
    pub stderr: String,
}

impl fmt::Display for ProcessFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed", self.program)?;
        if let Some(code) = self.exit_code {
            write!(f, " with exit code {code}")?;
        }
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            write!(f, ": {stderr}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ProcessFailure {}

impl ProcessFailure {
    /// Exit code a CLI should terminate with: the child's, or `1`.
    #[must_use]
    pub fn exit_status(&self) -> i32 {
        match self.exit_code {
            Some(code) if code != 0 => code,
            _ => 1,
        }
    }
}

/// Executes external commands.
///
/// This trait abstracts process spawning for testability.
///
/// # Design Rules
///
/// - Non-zero exit is an `Err`, never an `Ok` with a status to inspect
/// - Streams are inherited unless the invocation asks for capture
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run the invocation to completion.
    async fn run(&self, invocation: &CommandInvocation) -> Result<ProcessOutput, ProcessFailure>;
}
