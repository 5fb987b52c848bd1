//! Postinstall command handler.

use emsdk_runtime::{HookOutcome, run_install_hook};

use crate::bootstrap::CliContext;

/// Run the install hook. Never fails; the outcome is returned for callers
/// that want to report on it.
pub fn execute(ctx: &CliContext) -> HookOutcome {
    run_install_hook(&ctx.resolver, ctx.store.as_ref(), ctx.emsdk_override())
}
