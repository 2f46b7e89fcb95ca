//! Keymap: the ordered set of command bindings and their eligibility flags.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use till_keycode::Key;

use crate::{CommandId, Error};

/// One command binding as written in a keymap file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandSpec {
    /// Which semantic command these keys trigger.
    pub command: CommandId,
    /// Physical keys bound to the command, first one is the primary key.
    pub keys: Vec<Key>,
    /// Short caption for the help catalog (e.g. "Payer").
    pub label: String,
    /// One-line description for the help catalog.
    #[serde(default)]
    pub description: String,
    /// Keys stay live while a free-text control has focus.
    #[serde(default)]
    pub text_entry: bool,
    /// Keys stay live while a blocking dialog (or the search surface) is open.
    #[serde(default)]
    pub blocking_dialog: bool,
}

impl CommandSpec {
    /// Build a spec with both eligibility flags cleared.
    pub fn new(command: CommandId, keys: &[Key], label: &str, description: &str) -> Self {
        Self {
            command,
            keys: keys.to_vec(),
            label: label.to_string(),
            description: description.to_string(),
            text_entry: false,
            blocking_dialog: false,
        }
    }

    /// Allow the keys while a free-text control has focus.
    pub fn during_text_entry(mut self) -> Self {
        self.text_entry = true;
        self
    }

    /// Allow the keys while a blocking dialog is open.
    pub fn during_blocking_dialog(mut self) -> Self {
        self.blocking_dialog = true;
        self
    }

    /// Catalog caption for the bound keys, e.g. `"+ / ="`.
    pub fn key_label(&self) -> String {
        self.keys
            .iter()
            .map(|k| k.label())
            .collect::<Vec<_>>()
            .join(" / ")
    }
}

/// Validated keymap. Every physical key maps to at most one command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Keymap {
    /// Let events carrying Control/Alt/Meta through untouched.
    #[serde(default = "default_pass_modified")]
    pub pass_modified: bool,
    /// Command bindings in catalog order.
    pub commands: Vec<CommandSpec>,
}

const fn default_pass_modified() -> bool {
    true
}

impl Keymap {
    /// Build and validate a keymap from command specs.
    pub fn new(commands: Vec<CommandSpec>) -> Result<Self, Error> {
        let km = Self {
            pass_modified: true,
            commands,
        };
        km.validate()?;
        Ok(km)
    }

    /// Check the keymap invariants: non-empty key lists, one spec per
    /// command, and no physical key bound twice.
    pub fn validate(&self) -> Result<(), Error> {
        let mut seen_cmds: HashSet<CommandId> = HashSet::new();
        let mut seen_keys: HashMap<Key, CommandId> = HashMap::new();
        for spec in &self.commands {
            if spec.keys.is_empty() {
                return Err(Error::validation(format!(
                    "command '{}' has no keys",
                    spec.command
                )));
            }
            if !seen_cmds.insert(spec.command) {
                return Err(Error::validation(format!(
                    "command '{}' is bound more than once",
                    spec.command
                )));
            }
            for key in &spec.keys {
                if let Some(prev) = seen_keys.insert(*key, spec.command) {
                    return Err(Error::validation(format!(
                        "key '{}' is bound to both '{}' and '{}'",
                        key.to_spec(),
                        prev,
                        spec.command
                    )));
                }
            }
        }
        Ok(())
    }

    /// Find the spec for a command.
    pub fn get(&self, command: CommandId) -> Option<&CommandSpec> {
        self.commands.iter().find(|s| s.command == command)
    }

    /// Find the spec bound to a physical key.
    pub fn binding(&self, key: Key) -> Option<&CommandSpec> {
        self.commands.iter().find(|s| s.keys.contains(&key))
    }

    /// Keys flagged to stay live while a blocking dialog is open.
    pub fn blocking_exempt_keys(&self) -> HashSet<Key> {
        self.commands
            .iter()
            .filter(|s| s.blocking_dialog)
            .flat_map(|s| s.keys.iter().copied())
            .collect()
    }

    /// Keys flagged to stay live while a free-text control has focus.
    ///
    /// Always includes the blocking-exempt keys: a key that may cancel a
    /// payment dialog may also cancel a half-typed product code.
    pub fn text_entry_keys(&self) -> HashSet<Key> {
        self.commands
            .iter()
            .filter(|s| s.text_entry || s.blocking_dialog)
            .flat_map(|s| s.keys.iter().copied())
            .collect()
    }
}
