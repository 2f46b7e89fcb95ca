//! Keymap configuration for the till terminal: command inventory, bindings,
//! eligibility flags, RON loading and validation.

use std::{
    env,
    path::{Path, PathBuf},
};

mod command;
mod defaults;
mod error;
mod keymap;
mod loader;

pub use command::CommandId;
pub use error::{Error, excerpt_at};
pub use keymap::{CommandSpec, Keymap};
pub use loader::{load_from_path, load_from_str};
pub use till_keycode::{Key, Modifiers};

/// Determine the preferred user keymap path (`~/.till/keymap.ron`).
pub fn default_keymap_path() -> PathBuf {
    let mut p = PathBuf::from(env::var_os("HOME").unwrap_or_default());
    p.push(".till");
    p.push("keymap.ron");
    p
}

/// Resolve the effective keymap using the default policy.
///
/// Policy:
/// 1) Load `explicit` when provided; any error is returned.
/// 2) Else load `~/.till/keymap.ron` when it exists.
/// 3) Else use the built-in French keymap.
pub fn resolve_keymap(explicit: Option<&Path>) -> Result<Keymap, Error> {
    if let Some(path) = explicit {
        return load_from_path(path);
    }
    let preferred = default_keymap_path();
    if preferred.exists() {
        return load_from_path(&preferred);
    }
    Ok(Keymap::default())
}
