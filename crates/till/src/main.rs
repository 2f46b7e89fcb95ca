#![warn(missing_docs)]

//! Entry point for the `till` binary.

mod catalog;
mod cli;
mod error;
mod host;
mod session;

use std::{
    io::{self, Write},
    process,
};

use clap::Parser;
use tracing::{error, info};

use crate::{
    cli::{CheckArgs, Cli, Commands},
    error::Result,
};

fn main() {
    if let Err(err) = run() {
        error!("{err}");
        eprintln!("error: {}", err.pretty());
        process::exit(1);
    }
}

/// Parse CLI arguments, install logging, and dispatch to the chosen subcommand.
fn run() -> Result<()> {
    let Cli { log, command } = Cli::parse();
    let log_spec = logging::init(&log);
    tracing::debug!(spec = %log_spec, "logging_initialized");

    match command {
        Commands::Catalog(args) => catalog::run(&args),
        Commands::Run(args) => session::run(&args),
        Commands::Check(args) => check(&args),
    }
}

/// Validate a keymap file and summarize it.
fn check(args: &CheckArgs) -> Result<()> {
    let keymap = till_config::load_from_path(&args.path)?;
    info!(path = %args.path.display(), "keymap_valid");
    let keys: usize = keymap.commands.iter().map(|c| c.keys.len()).sum();
    writeln!(
        io::stdout().lock(),
        "{}: {} commands, {} keys",
        args.path.display(),
        keymap.commands.len(),
        keys
    )?;
    Ok(())
}
