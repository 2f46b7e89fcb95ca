//! Command-line interface definitions for till.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use logging::LogArgs;

/// Command-line interface for the `till` binary.
#[derive(Parser, Debug)]
#[command(
    name = "till",
    about = "Inspect and exercise cash-register keymaps",
    version
)]
pub struct Cli {
    /// Logging controls shared across till binaries.
    #[command(flatten)]
    pub log: LogArgs,

    /// Which command to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the help catalog for a keymap and a set of handlers.
    Catalog(CatalogArgs),
    /// Feed simulated key presses through the engine and report each outcome.
    Run(RunArgs),
    /// Validate a keymap file.
    Check(CheckArgs),
}

/// Where the keymap comes from.
#[derive(Args, Debug, Clone, Default)]
pub struct KeymapArgs {
    /// Keymap file (RON). Defaults to ~/.till/keymap.ron if present, else the built-in keymap.
    #[arg(long, value_name = "PATH")]
    pub keymap: Option<PathBuf>,
}

/// What the simulated screen supplies.
#[derive(Args, Debug, Clone, Default)]
pub struct HostArgs {
    /// Commands the screen handles, comma separated (e.g. `payment,cancel`), or `all`.
    #[arg(long, value_name = "LIST", default_value = "all")]
    pub handlers: String,

    /// Commands whose handler fails, comma separated.
    #[arg(long, value_name = "LIST")]
    pub fail: Option<String>,

    /// A blocking dialog is open.
    #[arg(long)]
    pub blocking: bool,

    /// The product search overlay is open.
    #[arg(long)]
    pub search: bool,
}

/// Arguments for the `catalog` subcommand.
#[derive(Args, Debug, Clone)]
pub struct CatalogArgs {
    /// Keymap source.
    #[command(flatten)]
    pub keymap: KeymapArgs,

    /// Screen configuration.
    #[command(flatten)]
    pub host: HostArgs,
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Keys to press, in order, e.g. `f1 + suppr échap`.
    #[arg(value_name = "KEY", num_args = 1.., required = true)]
    pub keys: Vec<String>,

    /// Keymap source.
    #[command(flatten)]
    pub keymap: KeymapArgs,

    /// Screen configuration.
    #[command(flatten)]
    pub host: HostArgs,

    /// A free-text field has focus.
    #[arg(long)]
    pub text_entry: bool,

    /// Modifiers held for every key, e.g. `ctrl+shift`.
    #[arg(long, value_name = "LIST")]
    pub mods: Option<String>,

    /// Start with the help overlay shown.
    #[arg(long)]
    pub help_visible: bool,

    /// Keep going after a failing handler instead of stopping.
    #[arg(long)]
    pub keep_going: bool,

    /// Print what the engine logged while handling each key (combine with --debug).
    #[arg(long)]
    pub journal: bool,
}

/// Arguments for the `check` subcommand.
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Keymap file to validate.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,
}
