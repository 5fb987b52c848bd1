//! Process runtime and OS-level concerns for emsdk-shim.
//!
//! Implements the process runner port over `tokio::process`, composes the
//! environment-script shell chain, and drives the SDK checkout through
//! [`SdkController`].
#![deny(unsafe_code)]

mod controller;
mod error;
pub mod install_hook;
mod runner;
pub mod shell;

// Re-export the SDK orchestration entry point
pub use controller::SdkController;

// Re-export error types
pub use error::{SdkError, SdkResult};

// Re-export the ProcessRunner implementation
pub use runner::TokioProcessRunner;

pub use install_hook::{HookOutcome, run_install_hook};
