//! CLI entry point.
//!
//! Loads `.env`, installs logging, bootstraps the context and dispatches
//! to a handler. Errors become exit codes via [`CliError::exit_code`].

use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use emsdk_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before the filter reads RUST_LOG
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    if let Err(err) = run(cli).await {
        if err.already_reported() {
            debug!("{err}");
        } else {
            eprintln!("Error: {err}");
        }
        std::process::exit(err.exit_code());
    }

    Ok(())
}

fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise logging: {e}"))
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = CliConfig {
        emsdk_override: cli.emsdk,
        ..CliConfig::default()
    };

    // Install hooks must never abort the host's installation
    if matches!(cli.command, Commands::Postinstall) {
        match bootstrap(config) {
            Ok(ctx) => {
                handlers::postinstall::execute(&ctx);
            }
            Err(e) => error!("Skipping Emscripten SDK path setup: {e}"),
        }
        return Ok(());
    }

    let ctx = bootstrap(config)?;

    match cli.command {
        Commands::Postinstall => Ok(()),
        Commands::Path => handlers::path::execute(&ctx),
        Commands::Checkout { force } => handlers::sdk::checkout(&ctx, force).await,
        Commands::Update => handlers::sdk::update(&ctx).await,
        Commands::Install { version, force } => {
            handlers::sdk::install(&ctx, &version, force).await
        }
        Commands::Activate { version } => handlers::sdk::activate(&ctx, &version).await,
        Commands::Remove => handlers::sdk::remove(&ctx).await,
        Commands::Run { command, args } => handlers::run::execute(&ctx, &command, &args).await,
        Commands::Emsdk { args } => handlers::sdk::passthrough(&ctx, &args).await,
    }
}
