//! Configuration store port and implementations.
//!
//! The host package manager keeps settings in layered `npmrc` files plus
//! per-invocation environment variables. This module exposes the effective
//! value of a key without callers needing to know which layer supplied it.
//!
//! # Design
//!
//! - Reads resolve precedence internally: per-invocation > user > global
//! - Writes always target the user layer, since a read-back value cannot be
//!   attributed to a layer reliably
//! - Boolean-like settings go through an explicit parse step

mod memory;
mod npmrc;

use std::path::PathBuf;
use thiserror::Error;

pub use memory::MemoryConfigStore;
pub use npmrc::{EnvSnapshot, NpmrcStore};

/// Setting holding the SDK install path override.
pub const EMSDK_KEY: &str = "emsdk";

/// Setting the host package manager raises for global installs.
pub const GLOBAL_KEY: &str = "global";

/// Errors raised by configuration stores.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A configuration file exists but could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The user configuration file could not be written.
    #[error("Failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A boolean-like setting held something else.
    #[error("Setting '{key}' is not a boolean: '{value}'")]
    InvalidFlag { key: String, value: String },

    /// No location for the user configuration file could be determined.
    #[error("Cannot determine user config location")]
    NoUserConfig,
}

/// Key/value view over the host package manager's configuration.
pub trait ConfigStore: Send + Sync {
    /// Effective value for `key`, or `None` when no layer sets it.
    fn read(&self, key: &str) -> Result<Option<String>, ConfigError>;

    /// Persist `key = value` in the user layer.
    fn write(&self, key: &str, value: &str) -> Result<(), ConfigError>;

    /// Read a boolean-like setting. Absent keys yield `None`.
    fn read_flag(&self, key: &str) -> Result<Option<bool>, ConfigError> {
        self.read(key)?
            .map(|value| parse_flag(key, &value))
            .transpose()
    }
}

/// Parse a boolean-like setting value.
///
/// The host package manager exports unset flags as empty strings, so an empty
/// value reads as `false`.
pub fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
