//! Subcommands of the `emsdk-shim` binary.

use clap::Subcommand;

use emsdk_core::sdk::DEFAULT_VERSION;

/// Available commands.
///
/// Every command except `postinstall` and `path` resolves the install path
/// first and fails if it is unusable.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve the SDK install path and save it to the user config
    ///
    /// Meant for the host package's install lifecycle; always exits 0.
    Postinstall,

    /// Print the resolved SDK install path
    Path,

    /// Clone the SDK into the install path
    Checkout {
        /// Delete an existing checkout and clone again
        #[arg(short, long)]
        force: bool,
    },

    /// Refresh the SDK's release tags
    Update,

    /// Install an SDK version
    Install {
        /// Release tag, build hash, `latest` or `tot`
        #[arg(default_value = DEFAULT_VERSION)]
        version: String,
        /// Install even if this version is already active
        #[arg(short, long)]
        force: bool,
    },

    /// Activate an installed SDK version
    Activate {
        /// Release tag, build hash, `latest` or `tot`
        #[arg(default_value = DEFAULT_VERSION)]
        version: String,
    },

    /// Delete the SDK checkout
    Remove,

    /// Run a command with the SDK environment active
    Run {
        /// Program to run, e.g. `emcc`
        command: String,
        /// Arguments passed through to the program
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Pass arguments straight to the SDK's own script
    Emsdk {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}
