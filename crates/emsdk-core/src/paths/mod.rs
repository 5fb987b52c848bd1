//! Install path resolution for the Emscripten SDK.
//!
//! This module provides the canonical answer to "where does the SDK live":
//! - The override / configured / default starting candidate
//! - Auto-correction into `emsdk` subdirectories
//! - The Windows path-length budget
//!
//! # Design
//!
//! - Returns `InstallPath` and `PathError` for clear error handling
//! - No terminal I/O - diagnostics are `PathNotice` values logged via tracing
//! - Platform is an explicit input so constrained-platform rules are testable

mod error;
mod install_path;
mod platform;
mod resolver;

// Error type
pub use error::PathError;

// Resolved directory
pub use install_path::InstallPath;

// Platform detection and shim location
pub use platform::{MAX_BASE_PATH, Platform, SHIM_HOME_ENV, module_base, normalize_user_path};

// Resolver
pub use resolver::{
    InstallPathSource, MAX_CORRECTION_DEPTH, PathNotice, PathResolver, Resolution,
};
