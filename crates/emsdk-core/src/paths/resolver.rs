//! Install path resolution with auto-correction.
//!
//! Resolution is a pure function of the configuration, the shim location and
//! the filesystem snapshot. Diagnostics are collected as [`PathNotice`]s and
//! only logged when the caller asks for them, at most once per resolver.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, warn};

use super::error::PathError;
use super::install_path::InstallPath;
use super::platform::{Platform, normalize_user_path};
use crate::config::{ConfigStore, EMSDK_KEY};
use crate::sdk::layout::{SDK_DIR_NAME, is_sdk_checkout};

/// Upper bound on `emsdk` segments appended during auto-correction.
pub const MAX_CORRECTION_DEPTH: usize = 8;

/// Where the starting candidate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallPathSource {
    /// Explicit override passed by the caller.
    Override,
    /// The `emsdk` configuration setting.
    Config,
    /// Default location inside the shim's own install tree.
    Default,
}

/// Advisory diagnostics produced while resolving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathNotice {
    /// A configured path pointed at a non-empty directory and was extended.
    Corrected { from: PathBuf, to: PathBuf },
    /// No path configured, so the SDK lands inside the shim's tree.
    DefaultLocation { path: PathBuf },
    /// A path is configured but an old checkout still sits in the shim's tree.
    LegacyCheckout { legacy: PathBuf, configured: PathBuf },
    /// The resolved path is over the platform budget.
    TooLong { path: PathBuf, limit: usize },
}

impl fmt::Display for PathNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Corrected { to, .. } => write!(
                f,
                "Changing the EMSDK path because it pointed to a non-empty directory. \
                 The path is now: {}",
                to.display()
            ),
            Self::DefaultLocation { path } => write!(
                f,
                "Emscripten SDK will be installed inside this package ({}). To save disk \
                 space, set an installation path manually: npm config set emsdk \"/your/install/path\"",
                path.display()
            ),
            Self::LegacyCheckout { legacy, configured } => write!(
                f,
                "An emsdk installation exists inside this package! You should delete {} \
                 (your configured installation path is {})",
                legacy.display(),
                configured.display()
            ),
            Self::TooLong { path, limit } => write!(
                f,
                "The path {} exceeds {limit} characters, so Emscripten SDK installation will \
                 FAIL. Set a shorter install path: npm config set emsdk \"your/installation/path\"",
                path.display()
            ),
        }
    }
}

/// Outcome of a successful resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub path: InstallPath,
    pub source: InstallPathSource,
    /// Number of `emsdk` segments appended by auto-correction.
    pub corrections: usize,
    pub notices: Vec<PathNotice>,
}

/// Computes and validates the SDK install directory.
///
/// Owns the "already warned" flag for its session, so repeated resolutions
/// with `emit_messages` only log diagnostics the first time.
pub struct PathResolver {
    store: Arc<dyn ConfigStore>,
    module_base: PathBuf,
    platform: Platform,
    warned: AtomicBool,
}

impl PathResolver {
    /// Create a resolver for a shim installed at `module_base`.
    pub fn new(store: Arc<dyn ConfigStore>, module_base: PathBuf, platform: Platform) -> Self {
        Self {
            store,
            module_base,
            platform,
            warned: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn module_base(&self) -> &Path {
        &self.module_base
    }

    #[must_use]
    pub const fn platform(&self) -> Platform {
        self.platform
    }

    /// The checkout location used when nothing is configured.
    #[must_use]
    pub fn legacy_checkout_path(&self) -> PathBuf {
        self.module_base.join(SDK_DIR_NAME)
    }

    /// Resolve the install path.
    ///
    /// `override_path` takes precedence over the `emsdk` setting. When
    /// `emit_messages` is set, advisory notices are logged once per resolver.
    pub fn resolve(
        &self,
        override_path: Option<&str>,
        emit_messages: bool,
    ) -> Result<Resolution, PathError> {
        let (configured, source) = self.starting_point(override_path)?;

        let start = match &configured {
            Some(raw) => normalize_user_path(raw)?,
            None => self.module_base.clone(),
        };

        let (candidate, corrections) = auto_correct(start.clone())?;
        let mut notices = Vec::new();

        if configured.is_some() && corrections > 0 {
            notices.push(PathNotice::Corrected {
                from: start,
                to: candidate.clone(),
            });
        }

        let path = InstallPath::new(candidate)?;

        if let Some(limit) = self.platform.max_install_path_len()
            && path.char_len() > limit
        {
            notices.push(PathNotice::TooLong {
                path: path.as_path().to_path_buf(),
                limit,
            });
            self.emit(&notices, emit_messages);
            return Err(PathError::TooLong {
                path: path.into_path_buf(),
                limit,
            });
        }

        if configured.is_none() {
            notices.push(PathNotice::DefaultLocation {
                path: path.as_path().to_path_buf(),
            });
        } else {
            let legacy = self.legacy_checkout_path();
            let exists = legacy
                .try_exists()
                .map_err(|e| PathError::io(&legacy, e))?;
            if exists && legacy != path.as_path() {
                notices.push(PathNotice::LegacyCheckout {
                    legacy,
                    configured: path.as_path().to_path_buf(),
                });
            }
        }

        self.emit(&notices, emit_messages);
        debug!(path = %path, ?source, corrections, "Resolved install path");

        Ok(Resolution {
            path,
            source,
            corrections,
            notices,
        })
    }

    fn starting_point(
        &self,
        override_path: Option<&str>,
    ) -> Result<(Option<String>, InstallPathSource), PathError> {
        if let Some(path) = override_path.filter(|p| !p.trim().is_empty()) {
            return Ok((Some(path.to_string()), InstallPathSource::Override));
        }

        match self.store.read(EMSDK_KEY)? {
            Some(path) if !path.trim().is_empty() => Ok((Some(path), InstallPathSource::Config)),
            _ => Ok((None, InstallPathSource::Default)),
        }
    }

    fn emit(&self, notices: &[PathNotice], emit_messages: bool) {
        if !emit_messages || notices.is_empty() || self.warned.swap(true, Ordering::SeqCst) {
            return;
        }

        // All notices are user-facing, so they share the default log level.
        for notice in notices {
            warn!("{notice}");
        }
    }
}

/// Descend into `emsdk` subdirectories until the candidate is either free or
/// already an SDK checkout.
fn auto_correct(mut candidate: PathBuf) -> Result<(PathBuf, usize), PathError> {
    let mut corrections = 0;

    loop {
        let exists = candidate
            .try_exists()
            .map_err(|e| PathError::io(&candidate, e))?;
        if !exists || is_sdk_checkout(&candidate).map_err(|e| PathError::io(&candidate, e))? {
            return Ok((candidate, corrections));
        }

        if corrections == MAX_CORRECTION_DEPTH {
            return Err(PathError::CorrectionLimit {
                path: candidate,
                depth: corrections,
            });
        }

        candidate.push(SDK_DIR_NAME);
        corrections += 1;
    }
}
