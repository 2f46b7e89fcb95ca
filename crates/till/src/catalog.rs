//! `till catalog`: print the help overlay rows.

use std::io::{self, Write};

use till_config::resolve_keymap;
use till_engine::Engine;

use crate::{cli::CatalogArgs, error::Result, host};

/// Print one line per command: keys, caption, enabled state, description.
pub fn run(args: &CatalogArgs) -> Result<()> {
    let keymap = resolve_keymap(args.keymap.keymap.as_deref())?;
    let host = host::build(&args.host)?;
    let engine = Engine::new(keymap);
    engine.configure(host);

    let mut out = io::stdout().lock();
    for entry in engine.catalog() {
        let state = if entry.enabled { "on" } else { "off" };
        writeln!(
            out,
            "{:<16} {:<22} {:<3} {}",
            entry.key_label, entry.label, state, entry.description
        )?;
    }
    Ok(())
}
