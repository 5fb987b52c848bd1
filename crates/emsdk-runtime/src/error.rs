//! Error types for SDK management.
//!
//! This module provides a unified error type for all controller operations,
//! keeping error plumbing out of orchestration code.

use std::path::PathBuf;
use thiserror::Error;

use emsdk_core::{ConfigError, PathError, ProcessFailure};

/// Errors that can occur while managing the SDK checkout.
#[derive(Debug, Error)]
pub enum SdkError {
    // === Path & config ===
    /// Install path resolution failed
    #[error(transparent)]
    Path(#[from] PathError),

    /// Configuration store failed
    #[error(transparent)]
    Config(#[from] ConfigError),

    // === Process ===
    /// A subprocess failed to start or exited non-zero
    #[error(transparent)]
    Process(#[from] ProcessFailure),

    /// A required external tool is not on PATH
    #[error("{tool} was not found on PATH; it is required to {purpose}")]
    ToolMissing {
        tool: &'static str,
        purpose: &'static str,
    },

    // === Shell composition ===
    /// `run` was called without a command
    #[error("No command passed to EMSDK")]
    EmptyCommand,

    /// A value cannot be interpolated into a shell command safely
    #[error("Refusing to pass {0:?} through the shell")]
    UnsafeShellArgument(String),

    // === IO ===
    /// Filesystem operation on the install path failed
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to get the current working directory
    #[error("Cannot determine current directory: {0}")]
    CurrentDir(#[source] std::io::Error),
}

impl SdkError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for SDK operations
pub type SdkResult<T> = Result<T, SdkError>;
