//! Port definitions for external collaborators.
//!
//! Ports are traits that adapters implement. Core code depends only on these
//! abstractions, never on a concrete spawning mechanism.

mod process_runner;

pub use process_runner::{
    CommandInvocation, ExecMode, ProcessFailure, ProcessOutput, ProcessRunner, RunOptions,
    StdioMode,
};
