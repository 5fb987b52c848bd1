//! CLI bootstrap - the composition root.
//!
//! This is the only place where concrete implementations are wired
//! together: the layered `npmrc` store, the path resolver and the tokio
//! process runner. Handlers receive the composed [`CliContext`].

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use emsdk_core::sdk::layout::{DEFAULT_SDK_REPO, sdk_repo_url};
use emsdk_core::{
    ConfigStore, EnvSnapshot, NpmrcStore, PathResolver, Platform, ProcessRunner, Resolution,
    module_base,
};
use emsdk_runtime::{SdkController, TokioProcessRunner};

use crate::error::CliError;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Install path given with `--emsdk`, beating every config layer.
    pub emsdk_override: Option<String>,
    /// Repository cloned by `checkout`; upstream when unset.
    pub repo_url: Option<String>,
}

/// Fully composed context for CLI commands.
pub struct CliContext {
    /// Layered configuration store.
    pub store: Arc<dyn ConfigStore>,
    /// Resolver for the SDK install path; owns the warn-once flag.
    pub resolver: PathResolver,
    /// Process runner used by every SDK operation.
    pub runner: Arc<dyn ProcessRunner>,
    emsdk_override: Option<String>,
    repo_url: String,
}

impl CliContext {
    /// Assemble a context from explicit parts.
    pub fn new(
        store: Arc<dyn ConfigStore>,
        module_base: PathBuf,
        platform: Platform,
        runner: Arc<dyn ProcessRunner>,
        config: CliConfig,
    ) -> Self {
        let resolver = PathResolver::new(store.clone(), module_base, platform);
        Self {
            store,
            resolver,
            runner,
            emsdk_override: config.emsdk_override,
            repo_url: config
                .repo_url
                .unwrap_or_else(|| DEFAULT_SDK_REPO.to_string()),
        }
    }

    #[must_use]
    pub fn emsdk_override(&self) -> Option<&str> {
        self.emsdk_override.as_deref()
    }

    /// Resolve the install path, honouring `--emsdk`.
    pub fn resolve(&self, emit_messages: bool) -> Result<Resolution, CliError> {
        Ok(self.resolver.resolve(self.emsdk_override(), emit_messages)?)
    }

    /// Controller bound to the resolved install path.
    pub fn controller(&self) -> Result<SdkController, CliError> {
        let resolution = self.resolve(true)?;
        Ok(SdkController::new(resolution.path, self.runner.clone())
            .with_platform(self.resolver.platform())
            .with_repo_url(&self.repo_url))
    }
}

/// Bootstrap the CLI context from the process environment.
pub fn bootstrap(mut config: CliConfig) -> Result<CliContext, CliError> {
    let env = EnvSnapshot::from_process();
    if config.repo_url.is_none() {
        config.repo_url = Some(sdk_repo_url(&env));
    }

    let store = NpmrcStore::from_env(env)?;
    debug!(user_config = %store.user_config_path().display(), "Using npm configuration");

    let base = module_base()?;
    debug!(module_base = %base.display(), "Resolved shim location");

    Ok(CliContext::new(
        Arc::new(store),
        base,
        Platform::current(),
        Arc::new(TokioProcessRunner::new()),
        config,
    ))
}
