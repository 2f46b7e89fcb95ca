//! Pass/suppress decision taken before a key event may resolve to a command.

use std::collections::HashSet;

use till_keycode::{Key, Modifiers};

use crate::Keymap;

/// Per-event dispatch inputs, recomputed for every key-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchContext {
    /// Key identifier of the event.
    pub key: Key,
    /// Modifiers held during the event.
    pub modifiers: Modifiers,
    /// A free-text control (input, textarea, editable) has focus.
    pub text_entry_focused: bool,
    /// The host reports a blocking dialog.
    pub blocking_dialog_open: bool,
    /// The host reports the auxiliary search surface open.
    pub search_open: bool,
}

impl DispatchContext {
    /// Context for a bare key press: no modifiers, no focus, nothing open.
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::empty(),
            text_entry_focused: false,
            blocking_dialog_open: false,
            search_open: false,
        }
    }

    /// Set the held modifiers.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Set the text-entry focus flag.
    pub fn text_entry(mut self, focused: bool) -> Self {
        self.text_entry_focused = focused;
        self
    }

    /// Set the blocking dialog flag.
    pub fn blocking_dialog(mut self, open: bool) -> Self {
        self.blocking_dialog_open = open;
        self
    }

    /// Set the search surface flag.
    pub fn search_open(mut self, open: bool) -> Self {
        self.search_open = open;
        self
    }

    /// Any blocking flag set.
    pub fn is_blocked(&self) -> bool {
        self.blocking_dialog_open || self.search_open
    }
}

/// Why an event was kept away from the command table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuppressReason {
    /// A free-text control has focus and the key is not text-entry safe.
    TextEntry,
    /// A blocking dialog is open and the key is not exempt.
    BlockingDialog,
}

/// Outcome of the eligibility filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    /// The event may resolve to a command.
    Eligible,
    /// The event must not reach any handler.
    Suppressed(SuppressReason),
}

/// Keys live in every context, whatever the keymap flags say.
const ALWAYS_LIVE: [Key; 1] = [Key::Escape];

/// Allow-lists consulted by the filter, derived from the keymap flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Policy {
    text_entry_keys: HashSet<Key>,
    blocking_exempt_keys: HashSet<Key>,
}

impl Policy {
    /// Derive the allow-lists from a keymap. Escape is always live so a
    /// dialog or a half-typed entry can be cancelled.
    pub fn from_keymap(keymap: &Keymap) -> Self {
        let mut text_entry_keys = keymap.text_entry_keys();
        let mut blocking_exempt_keys = keymap.blocking_exempt_keys();
        text_entry_keys.extend(ALWAYS_LIVE);
        blocking_exempt_keys.extend(ALWAYS_LIVE);
        Self {
            text_entry_keys,
            blocking_exempt_keys,
        }
    }

    /// Keys that stay live during text entry.
    pub fn text_entry_keys(&self) -> &HashSet<Key> {
        &self.text_entry_keys
    }

    /// Keys that stay live while a blocking dialog is open.
    pub fn blocking_exempt_keys(&self) -> &HashSet<Key> {
        &self.blocking_exempt_keys
    }

    /// Classify an event. Rules apply in order:
    ///
    /// 1. text entry focused and key not text-entry safe: suppress
    /// 2. blocking flag set and key not exempt: suppress
    /// 3. otherwise eligible
    pub fn classify(&self, ctx: &DispatchContext) -> Eligibility {
        if ctx.text_entry_focused && !self.text_entry_keys.contains(&ctx.key) {
            return Eligibility::Suppressed(SuppressReason::TextEntry);
        }
        if ctx.is_blocked() && !self.blocking_exempt_keys.contains(&ctx.key) {
            return Eligibility::Suppressed(SuppressReason::BlockingDialog);
        }
        Eligibility::Eligible
    }
}
