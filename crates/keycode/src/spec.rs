use crate::Key;

// Word aliases accepted when parsing specs (never emitted by to_spec).
// Extend this list as the terminal's keymaps grow new spellings.
macro_rules! key_spec_aliases {
    ($m:ident, $arg:expr) => {
        $m! { $arg,
            // cancel / confirm
            Key::Escape => "esc",
            Key::Escape => "echap",
            Key::Escape => "échap",
            Key::Enter => "return",
            Key::Enter => "ret",
            Key::Enter => "entree",
            Key::Enter => "entrée",

            // deletion
            Key::Delete => "del",
            Key::Delete => "suppr",
            Key::Backspace => "bksp",
            Key::Backspace => "retour",
            Key::Insert => "ins",
            Key::Insert => "inser",

            // navigation
            Key::ArrowUp => "up",
            Key::ArrowDown => "down",
            Key::ArrowLeft => "left",
            Key::ArrowRight => "right",
            Key::PageUp => "pgup",
            Key::PageDown => "pgdn",
            Key::Space => "spacebar",
            Key::Space => "espace",

            // quantity keys, spelled out for keymap files
            Key::Char('+') => "plus",
            Key::Char('=') => "equal",
            Key::Char('=') => "equals",
            Key::Char('-') => "minus",
        }
    };
}

macro_rules! from_spec_match {
    ( $s:expr, $( $k:expr => $v:literal, )* ) => {{
        match $s {
            $( $v => Some($k), )*
            _ => None,
        }
    }}
}

/// Parses a key specification into a `Key`.
///
/// A single character is taken literally (`"+"`, `"a"`, `" "`). Longer specs
/// try a case-insensitive variant name first, then the alias words defined
/// in `key_spec_aliases`.
pub fn from_spec(s: &str) -> Option<Key> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(Key::char(c));
    }
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Some(k) = Key::from_name(trimmed) {
        return Some(k);
    }
    let lowered = trimmed.to_lowercase();
    key_spec_aliases!(from_spec_match, lowered.as_str())
}

/// Returns the canonical spec string for a `Key`.
///
/// Characters emit themselves; named keys emit their lowercased variant name.
pub fn to_spec(key: Key) -> String {
    match key {
        Key::Char(c) => c.to_string(),
        Key::Space => " ".to_string(),
        named => named.name().unwrap_or_default().to_ascii_lowercase(),
    }
}

impl Key {
    /// Parses a key specification string into a `Key`.
    ///
    /// - Any single character is a literal key (`"+"` is `Char('+')`, `" "` is `Space`).
    /// - Variant names are accepted case-insensitively (`"escape"`, `"F12"`).
    /// - Common alias words are accepted, including French keycap names:
    ///   esc, echap, entree, del, suppr, retour, bksp, pgup, pgdn, plus, minus, equal.
    ///
    /// Returns `None` if no mapping matches.
    pub fn from_spec(s: &str) -> Option<Self> {
        from_spec(s)
    }

    /// Returns the canonical spec string for this `Key`.
    pub fn to_spec(self) -> String {
        to_spec(self)
    }
}
