//! `ProcessRunner` implementation over `tokio::process`.

use async_trait::async_trait;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
use tracing::debug;

use emsdk_core::{
    CommandInvocation, ExecMode, Platform, ProcessFailure, ProcessOutput, ProcessRunner, StdioMode,
};

/// Spawns real child processes.
///
/// Argv-mode invocations are executed directly; shell-mode invocations go
/// through `sh -c` or `cmd /c` depending on the platform.
#[derive(Debug, Clone)]
pub struct TokioProcessRunner {
    platform: Platform,
}

impl TokioProcessRunner {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            platform: Platform::current(),
        }
    }

    fn build_command(&self, invocation: &CommandInvocation) -> Command {
        let mut cmd = match invocation.mode {
            ExecMode::Argv => {
                let mut cmd = Command::new(&invocation.program);
                cmd.args(&invocation.args);
                cmd
            }
            ExecMode::Shell => {
                let mut script = invocation.program.clone();
                for arg in &invocation.args {
                    script.push(' ');
                    script.push_str(arg);
                }
                self.shell_command(&script)
            }
        };

        if let Some(cwd) = &invocation.options.cwd {
            cmd.current_dir(cwd);
        }
        for (key, value) in &invocation.options.env {
            cmd.env(key, value);
        }

        match invocation.options.stdio {
            StdioMode::Inherit => {
                cmd.stdin(Stdio::inherit())
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit());
            }
            StdioMode::Capture => {
                cmd.stdin(Stdio::null())
                    .stdout(Stdio::piped())
                    .stderr(Stdio::piped());
            }
        }

        cmd
    }

    fn shell_command(&self, script: &str) -> Command {
        match self.platform {
            Platform::Unix => {
                let mut cmd = Command::new("sh");
                cmd.arg("-c").arg(script);
                cmd
            }
            Platform::Windows => {
                let mut cmd = Command::new("cmd");
                #[cfg(windows)]
                cmd.raw_arg(format!("/d /s /c \"{script}\""));
                #[cfg(not(windows))]
                cmd.args(["/d", "/s", "/c", script]);
                cmd
            }
        }
    }
}

impl Default for TokioProcessRunner {
    fn default() -> Self {
        Self::new()
    }
}

fn failure(invocation: &CommandInvocation, status: ExitStatus, stderr: String) -> ProcessFailure {
    ProcessFailure {
        program: invocation.program.clone(),
        exit_code: status.code(),
        stderr,
    }
}

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn run(&self, invocation: &CommandInvocation) -> Result<ProcessOutput, ProcessFailure> {
        debug!(command = %invocation, mode = ?invocation.mode, "Running command");
        let mut cmd = self.build_command(invocation);

        let spawn_failure = |e: std::io::Error| ProcessFailure {
            program: invocation.program.clone(),
            exit_code: None,
            stderr: e.to_string(),
        };

        match invocation.options.stdio {
            StdioMode::Inherit => {
                let status = cmd.status().await.map_err(spawn_failure)?;
                if status.success() {
                    Ok(ProcessOutput::default())
                } else {
                    Err(failure(invocation, status, String::new()))
                }
            }
            StdioMode::Capture => {
                let output = cmd.output().await.map_err(spawn_failure)?;
                let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
                let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
                if output.status.success() {
                    Ok(ProcessOutput { stdout, stderr })
                } else {
                    Err(failure(invocation, output.status, stderr))
                }
            }
        }
    }
}
