//! Command handlers.
//!
//! Handlers follow one pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<(), CliError>`
//! - Resolve the install path through the context, call the controller,
//!   and print any user-facing output
//!
//! Domain decisions stay in `emsdk-core` and `emsdk-runtime`.

pub mod path;
pub mod postinstall;
pub mod run;
pub mod sdk;
