//! Path-related error types.
//!
//! Provides semantic errors for install path resolution without exposing
//! adapter-specific concerns.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur during install path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    /// The resolved path exceeds the platform's character budget.
    ///
    /// The SDK's own install step fails past this length, so callers must
    /// abort without persisting or proceeding.
    #[error("Emscripten SDK install path exceeds {limit} characters: {path}")]
    TooLong { path: PathBuf, limit: usize },

    /// Auto-correction appended the `emsdk` segment too many times.
    #[error("Emscripten SDK install path kept resolving to non-empty directories after {depth} corrections: {path}")]
    CorrectionLimit { path: PathBuf, depth: usize },

    /// An existence check on the candidate failed.
    #[error("Failed to inspect {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not determine the user's home directory.
    #[error("Cannot determine home directory")]
    NoHomeDir,

    /// An empty path was provided.
    #[error("Path cannot be empty")]
    EmptyPath,

    /// Failed to get the current working directory.
    #[error("Cannot determine current directory: {0}")]
    CurrentDirError(String),

    /// The shim's own install location could not be determined.
    #[error("Cannot determine shim install location: {0}")]
    ModuleBase(String),

    /// Reading the configured override failed.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl PathError {
    /// Wrap an I/O error raised while inspecting `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
