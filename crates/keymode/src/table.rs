//! Command table: keymap bindings joined with the host's current handlers.

use std::collections::HashMap;

use till_keycode::Key;

use crate::{CommandId, Handler, HostConfig, Keymap, KeymodeError, Policy};

/// A command as seen by one dispatch cycle.
#[derive(Debug, Clone)]
pub struct Command {
    /// Semantic identifier.
    pub id: CommandId,
    /// Bound physical keys, primary first.
    pub keys: Vec<Key>,
    /// Catalog caption.
    pub label: String,
    /// Catalog description.
    pub description: String,
    /// Keys stay live during text entry.
    pub allowed_during_text_entry: bool,
    /// Keys stay live while a blocking dialog is open.
    pub allowed_during_blocking_dialog: bool,
    handler: Option<Handler>,
}

impl Command {
    /// True when the host supplied a handler. Informational only: dispatching
    /// a disabled command is a silent no-op.
    pub fn enabled(&self) -> bool {
        self.handler.is_some()
    }

    /// Host handler, if supplied.
    pub fn handler(&self) -> Option<&Handler> {
        self.handler.as_ref()
    }

    /// Invoke the handler if present; returns whether anything ran.
    pub fn invoke(&self) -> Result<bool, KeymodeError> {
        let Some(handler) = &self.handler else {
            return Ok(false);
        };
        handler
            .call()
            .map_err(|source| KeymodeError::Handler {
                command: self.id,
                source,
            })?;
        Ok(true)
    }
}

/// One row of the help overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Command identifier.
    pub command: CommandId,
    /// Keycap caption(s).
    pub key_label: String,
    /// Command caption.
    pub label: String,
    /// Command description.
    pub description: String,
    /// Whether the host currently supplies a handler.
    pub enabled: bool,
}

/// Deterministic key→command map for one dispatch cycle.
#[derive(Debug, Clone)]
pub struct CommandTable {
    commands: Vec<Command>,
    index: HashMap<Key, usize>,
    policy: Policy,
    pass_modified: bool,
}

impl CommandTable {
    /// Join a (validated) keymap with a host snapshot.
    pub fn build(keymap: &Keymap, host: &HostConfig) -> Self {
        let mut commands = Vec::with_capacity(keymap.commands.len());
        let mut index = HashMap::new();
        for spec in &keymap.commands {
            let slot = commands.len();
            for key in &spec.keys {
                // Validation guarantees uniqueness; keep the first binding regardless.
                index.entry(*key).or_insert(slot);
            }
            commands.push(Command {
                id: spec.command,
                keys: spec.keys.clone(),
                label: spec.label.clone(),
                description: spec.description.clone(),
                allowed_during_text_entry: spec.text_entry,
                allowed_during_blocking_dialog: spec.blocking_dialog,
                handler: host.handler(spec.command).cloned(),
            });
        }
        Self {
            commands,
            index,
            policy: Policy::from_keymap(keymap),
            pass_modified: keymap.pass_modified,
        }
    }

    /// Command bound to exactly this key.
    pub fn lookup(&self, key: Key) -> Option<&Command> {
        self.index.get(&key).and_then(|i| self.commands.get(*i))
    }

    /// Command by identifier.
    pub fn get(&self, id: CommandId) -> Option<&Command> {
        self.commands.iter().find(|c| c.id == id)
    }

    /// All commands in keymap order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Eligibility allow-lists for this table.
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Whether Control/Alt/Meta events bypass the table.
    pub fn pass_modified(&self) -> bool {
        self.pass_modified
    }
}

/// Help overlay rows for a keymap and host snapshot, in keymap order.
pub fn catalog(keymap: &Keymap, host: &HostConfig) -> Vec<CatalogEntry> {
    keymap
        .commands
        .iter()
        .map(|spec| CatalogEntry {
            command: spec.command,
            key_label: spec.key_label(),
            label: spec.label.clone(),
            description: spec.description.clone(),
            enabled: host.provides(spec.command),
        })
        .collect()
}
