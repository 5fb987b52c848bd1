//! Path command handler.

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Print the resolved SDK install path on stdout.
///
/// Diagnostics are suppressed so the output can be captured by scripts.
pub fn execute(ctx: &CliContext) -> Result<(), CliError> {
    let resolution = ctx.resolve(false)?;
    println!("{}", resolution.path);
    Ok(())
}
