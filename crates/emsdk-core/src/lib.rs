//! Core domain types and port definitions for emsdk-shim.
//!
//! The shim locates, fetches and invokes the Emscripten SDK on behalf of a
//! host package manager. This crate holds everything that does not spawn
//! processes: install path resolution, the configuration store, the process
//! runner port and the SDK's on-disk layout.
#![deny(unused_crate_dependencies)]

pub mod config;
pub mod paths;
pub mod ports;
pub mod sdk;

// Re-export commonly used types for convenience
pub use config::{
    ConfigError, ConfigStore, EMSDK_KEY, EnvSnapshot, GLOBAL_KEY, MemoryConfigStore, NpmrcStore,
    parse_flag,
};
pub use paths::{
    InstallPath, InstallPathSource, PathError, PathNotice, PathResolver, Platform, Resolution,
    module_base,
};
pub use ports::{
    CommandInvocation, ExecMode, ProcessFailure, ProcessOutput, ProcessRunner, RunOptions,
    StdioMode,
};
pub use sdk::{SdkVersionTag, Variant, VersionLookupError, is_installed};
