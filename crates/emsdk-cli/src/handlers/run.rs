//! Run command handler.
//!
//! Executes a program with the SDK environment sourced. Streams are
//! inherited so compiler output reaches the terminal as it happens.

use emsdk_core::RunOptions;
use tracing::debug;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Execute `command` with `args` inside the SDK environment.
///
/// A non-zero exit surfaces as [`CliError::Process`] carrying the child's code.
pub async fn execute(ctx: &CliContext, command: &str, args: &[String]) -> Result<(), CliError> {
    let sdk = ctx.controller()?;
    debug!(install = %sdk.install_path(), command, "Running inside SDK environment");
    sdk.run(command, args, RunOptions::default()).await?;
    Ok(())
}
