//! Root CLI structure with global options.

use clap::Parser;

use crate::commands::Commands;

/// Installs, locates and runs the Emscripten SDK for a host package.
#[derive(Debug, Parser)]
#[command(name = "emsdk-shim")]
#[command(about = "Install and run the Emscripten SDK")]
#[command(version)]
pub struct Cli {
    /// Use this SDK install path instead of the configured one
    #[arg(long = "emsdk", value_name = "PATH", global = true)]
    pub emsdk: Option<String>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from(["emsdk-shim", "path", "--emsdk", "/opt/sdk", "-v"]);
        assert!(cli.verbose);
        assert_eq!(cli.emsdk.as_deref(), Some("/opt/sdk"));
        assert!(matches!(cli.command, Commands::Path));
    }

    #[test]
    fn test_run_keeps_hyphenated_args() {
        let cli = Cli::parse_from(["emsdk-shim", "run", "emcc", "-O2", "-o", "a.js", "--verbose"]);
        match cli.command {
            Commands::Run { command, args } => {
                assert_eq!(command, "emcc");
                assert_eq!(args, ["-O2", "-o", "a.js", "--verbose"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_versions_default_to_latest() {
        let cli = Cli::parse_from(["emsdk-shim", "install"]);
        assert!(matches!(
            cli.command,
            Commands::Install { ref version, force: false } if version == "latest"
        ));

        let cli = Cli::parse_from(["emsdk-shim", "activate", "3.1.0"]);
        assert!(matches!(cli.command, Commands::Activate { ref version } if version == "3.1.0"));
    }

    #[test]
    fn test_run_requires_command() {
        assert!(Cli::try_parse_from(["emsdk-shim", "run"]).is_err());
    }
}
