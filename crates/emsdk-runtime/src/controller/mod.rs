//! Emscripten SDK lifecycle operations.
//!
//! `SdkController` drives the external SDK against one resolved install path:
//! - Checkout (git clone) and removal
//! - Tag refresh (`git pull` + `emsdk update-tags`)
//! - Install / activate through the SDK's own script
//! - Running arbitrary commands inside the SDK environment
//!
//! Operations are awaited one at a time; nothing here locks the install path
//! against other processes.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info};

use emsdk_core::sdk::layout::DEFAULT_SDK_REPO;
use emsdk_core::{
    CommandInvocation, InstallPath, Platform, ProcessOutput, ProcessRunner, RunOptions,
    SdkVersionTag, is_installed,
};

use crate::error::{SdkError, SdkResult};
use crate::shell::compose_env_command;

/// Orchestrates the SDK checkout at a single install path.
pub struct SdkController {
    install: InstallPath,
    runner: Arc<dyn ProcessRunner>,
    platform: Platform,
    repo_url: String,
    git: Option<PathBuf>,
}

impl SdkController {
    /// Create a controller for `install`, cloning from the upstream repository.
    pub fn new(install: InstallPath, runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            install,
            runner,
            platform: Platform::current(),
            repo_url: DEFAULT_SDK_REPO.to_string(),
            git: None,
        }
    }

    /// Override the platform used for script names and shell syntax.
    #[must_use]
    pub const fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    #[must_use]
    pub fn with_repo_url(mut self, url: impl Into<String>) -> Self {
        self.repo_url = url.into();
        self
    }

    /// Repository `checkout` clones from.
    #[must_use]
    pub fn repo_url(&self) -> &str {
        &self.repo_url
    }

    /// Use `git` instead of searching PATH for it.
    #[must_use]
    pub fn with_git(mut self, git: impl Into<PathBuf>) -> Self {
        self.git = Some(git.into());
        self
    }

    #[must_use]
    pub const fn install_path(&self) -> &InstallPath {
        &self.install
    }

    fn exists(&self) -> SdkResult<bool> {
        self.install
            .as_path()
            .try_exists()
            .map_err(|e| SdkError::io(self.install.as_path(), e))
    }

    fn git_program(&self) -> SdkResult<String> {
        let git = match &self.git {
            Some(git) => git.clone(),
            None => which::which("git").map_err(|_| SdkError::ToolMissing {
                tool: "git",
                purpose: "download the Emscripten SDK",
            })?,
        };
        Ok(git.to_string_lossy().into_owned())
    }

    fn path_arg(&self) -> String {
        self.install.as_path().to_string_lossy().into_owned()
    }

    /// Clone the SDK unless it is already present.
    ///
    /// With `force`, an existing checkout is deleted and cloned again.
    pub async fn checkout(&self, force: bool) -> SdkResult<()> {
        if self.exists()? {
            if !force {
                debug!(path = %self.install, "SDK checkout already present");
                return Ok(());
            }
            self.remove().await?;
        }

        let git = self.git_program()?;
        if let Some(parent) = self.install.as_path().parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| SdkError::io(parent, e))?;
        }

        info!(path = %self.install, repo = %self.repo_url, "Cloning Emscripten SDK");
        let clone = CommandInvocation::argv(
            git,
            ["clone".to_string(), self.repo_url.clone(), self.path_arg()],
        );
        self.runner.run(&clone).await?;
        Ok(())
    }

    /// Delete the checkout if it exists.
    pub async fn remove(&self) -> SdkResult<()> {
        if !self.exists()? {
            return Ok(());
        }

        info!(path = %self.install, "Removing Emscripten SDK checkout");
        tokio::fs::remove_dir_all(self.install.as_path())
            .await
            .map_err(|e| SdkError::io(self.install.as_path(), e))
    }

    /// Refresh the release tags, checking out first if needed.
    pub async fn update(&self) -> SdkResult<()> {
        self.checkout(false).await?;

        // The tag manifest is tracked in git, so pull before asking the SDK.
        let git = self.git_program()?;
        let pull = CommandInvocation::argv(git, ["-C".to_string(), self.path_arg(), "pull".to_string()]);
        self.runner.run(&pull).await?;

        self.run_sdk(["update-tags"]).await?;
        Ok(())
    }

    /// Whether `version` is already the active build.
    pub fn is_installed(&self, version: &SdkVersionTag) -> bool {
        matches!(self.exists(), Ok(true)) && is_installed(&self.install, version)
    }

    /// Install `version`, skipping the work when it is already active.
    ///
    /// `force` bypasses the active-build check.
    pub async fn install(&self, version: &SdkVersionTag, force: bool) -> SdkResult<()> {
        if !force && self.is_installed(version) {
            info!(%version, "Emscripten SDK version already installed");
            return Ok(());
        }

        self.checkout(false).await?;
        self.run_sdk(["install", version.as_str()]).await?;
        Ok(())
    }

    /// Activate `version` through the SDK.
    pub async fn activate(&self, version: &SdkVersionTag) -> SdkResult<()> {
        self.run_sdk(["activate", version.as_str()]).await?;
        Ok(())
    }

    /// Invoke the SDK's main script with `args`.
    pub async fn run_sdk<I, S>(&self, args: I) -> SdkResult<ProcessOutput>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let script = self.install.main_script(self.platform);
        let invocation = CommandInvocation::argv(script.to_string_lossy().into_owned(), args);
        Ok(self.runner.run(&invocation).await?)
    }

    /// Run `command` with the SDK environment active.
    ///
    /// The command runs in `options.cwd`, or the caller's directory.
    pub async fn run(
        &self,
        command: &str,
        args: &[String],
        options: RunOptions,
    ) -> SdkResult<ProcessOutput> {
        if command.trim().is_empty() {
            return Err(SdkError::EmptyCommand);
        }

        let return_dir = match &options.cwd {
            Some(cwd) => cwd.clone(),
            None => env::current_dir().map_err(SdkError::CurrentDir)?,
        };

        let script = compose_env_command(&self.install, &return_dir, command, args, self.platform)?;
        let invocation = CommandInvocation::shell(script).with_options(options);
        Ok(self.runner.run(&invocation).await?)
    }
}

#[cfg(test)]
mod tests;
