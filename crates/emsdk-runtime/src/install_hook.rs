//! Post-install hook.
//!
//! Runs once from the host package manager's install lifecycle. It resolves
//! the install path with diagnostics enabled and records the result in the
//! user configuration so later invocations find the same SDK. Nothing here
//! may fail the host's installation: errors are logged and reported in the
//! returned [`HookOutcome`].

use tracing::{debug, error, warn};

use emsdk_core::{ConfigStore, EMSDK_KEY, GLOBAL_KEY, InstallPath, PathResolver};

/// What the hook ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookOutcome {
    /// The resolved path was written to the user configuration.
    Persisted(InstallPath),
    /// The path lives inside the shim's own tree and was left unrecorded.
    LocalInstall(InstallPath),
    /// Resolution or persistence failed; the message was already logged.
    Aborted(String),
}

impl HookOutcome {
    #[must_use]
    pub const fn install_path(&self) -> Option<&InstallPath> {
        match self {
            Self::Persisted(path) | Self::LocalInstall(path) => Some(path),
            Self::Aborted(_) => None,
        }
    }
}

/// Resolve the install path and persist it when it should outlive this
/// package: for global installs, or whenever it points outside the shim.
///
/// `override_path` is an explicit path given on the command line.
pub fn run_install_hook(
    resolver: &PathResolver,
    store: &dyn ConfigStore,
    override_path: Option<&str>,
) -> HookOutcome {
    let resolution = match resolver.resolve(override_path, true) {
        Ok(resolution) => resolution,
        Err(e) => {
            error!("Emscripten SDK path is unusable, not saving it: {e}");
            return HookOutcome::Aborted(e.to_string());
        }
    };
    let path = resolution.path;

    let global = match store.read_flag(GLOBAL_KEY) {
        Ok(flag) => flag.unwrap_or(false),
        Err(e) => {
            warn!("Ignoring unreadable '{GLOBAL_KEY}' setting: {e}");
            false
        }
    };
    let inside_shim = path.as_path().starts_with(resolver.module_base());

    if !global && inside_shim {
        debug!(path = %path, "Install path is local to the shim, not persisting");
        return HookOutcome::LocalInstall(path);
    }

    if let Err(e) = store.write(EMSDK_KEY, &path.as_path().to_string_lossy()) {
        error!("Failed to save the Emscripten SDK path: {e}");
        return HookOutcome::Aborted(e.to_string());
    }

    println!("Emscripten SDK installation path is set to:\n\n    {path}\n");
    HookOutcome::Persisted(path)
}
