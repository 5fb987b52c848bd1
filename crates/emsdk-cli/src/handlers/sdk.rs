//! SDK lifecycle command handlers.
//!
//! Thin wrappers over [`SdkController`](emsdk_runtime::SdkController)
//! operations, each bound to the resolved install path.

use tracing::info;

use emsdk_core::SdkVersionTag;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Clone the SDK if missing (or again, with `force`).
pub async fn checkout(ctx: &CliContext, force: bool) -> Result<(), CliError> {
    ctx.controller()?.checkout(force).await?;
    Ok(())
}

/// Refresh the release tags.
pub async fn update(ctx: &CliContext) -> Result<(), CliError> {
    ctx.controller()?.update().await?;
    Ok(())
}

/// Install `version` unless it is already active.
pub async fn install(ctx: &CliContext, version: &str, force: bool) -> Result<(), CliError> {
    let sdk = ctx.controller()?;
    let version = SdkVersionTag::from(version);
    sdk.install(&version, force).await?;
    info!(%version, path = %sdk.install_path(), "Emscripten SDK ready");
    Ok(())
}

pub async fn activate(ctx: &CliContext, version: &str) -> Result<(), CliError> {
    ctx.controller()?
        .activate(&SdkVersionTag::from(version))
        .await?;
    Ok(())
}

/// Delete the checkout.
pub async fn remove(ctx: &CliContext) -> Result<(), CliError> {
    let sdk = ctx.controller()?;
    sdk.remove().await?;
    println!("Removed {}", sdk.install_path());
    Ok(())
}

/// Hand `args` to the SDK's own script unchanged.
pub async fn passthrough(ctx: &CliContext, args: &[String]) -> Result<(), CliError> {
    ctx.controller()?.run_sdk(args.iter().cloned()).await?;
    Ok(())
}
