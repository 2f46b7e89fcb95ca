use std::fmt;

use serde::{Deserialize, Serialize};

/// A physical key identifier as delivered by the terminal's key-down stream.
///
/// Named keys cover the non-printing keys a cash register uses; every
/// printable character (including `+`, `=` and `-` on the numeric pad) is a
/// `Char`. Space is always the named `Space` variant, never `Char(' ')`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[allow(missing_docs)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Space,
    Backspace,
    Delete,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    /// A printable character, matched exactly (case-sensitive).
    Char(char),
}

// Variant name and French keycap label for every named key.
macro_rules! named_keys {
    ($m:ident, $arg:tt) => {
        $m! { $arg,
            Escape => ("Escape", "Échap"),
            Enter => ("Enter", "Entrée"),
            Tab => ("Tab", "Tab"),
            Space => ("Space", "Espace"),
            Backspace => ("Backspace", "Retour"),
            Delete => ("Delete", "Suppr"),
            Insert => ("Insert", "Inser"),
            Home => ("Home", "Début"),
            End => ("End", "Fin"),
            PageUp => ("PageUp", "Pg préc"),
            PageDown => ("PageDown", "Pg suiv"),
            ArrowUp => ("ArrowUp", "↑"),
            ArrowDown => ("ArrowDown", "↓"),
            ArrowLeft => ("ArrowLeft", "←"),
            ArrowRight => ("ArrowRight", "→"),
            F1 => ("F1", "F1"),
            F2 => ("F2", "F2"),
            F3 => ("F3", "F3"),
            F4 => ("F4", "F4"),
            F5 => ("F5", "F5"),
            F6 => ("F6", "F6"),
            F7 => ("F7", "F7"),
            F8 => ("F8", "F8"),
            F9 => ("F9", "F9"),
            F10 => ("F10", "F10"),
            F11 => ("F11", "F11"),
            F12 => ("F12", "F12"),
        }
    };
}

macro_rules! name_match {
    ( $key:expr, $( $k:ident => ($name:expr, $label:expr), )* ) => {
        match $key {
            $( Key::$k => Some($name), )*
            Key::Char(_) => None,
        }
    }
}

macro_rules! label_match {
    ( $key:expr, $( $k:ident => ($name:expr, $label:expr), )* ) => {
        match $key {
            $( Key::$k => Some($label), )*
            Key::Char(_) => None,
        }
    }
}

macro_rules! from_name_match {
    ( $s:expr, $( $k:ident => ($name:expr, $label:expr), )* ) => {{
        $( if $s.eq_ignore_ascii_case($name) { return Some(Key::$k); } )*
        None
    }}
}

impl Key {
    /// Build a key from a printable character, folding `' '` into `Space`.
    pub fn char(c: char) -> Self {
        if c == ' ' { Self::Space } else { Self::Char(c) }
    }

    /// Variant name for named keys (`"Escape"`, `"F12"`); `None` for characters.
    pub fn name(self) -> Option<&'static str> {
        named_keys!(name_match, self)
    }

    /// Case-insensitive lookup by variant name. Characters are not names.
    pub fn from_name(s: &str) -> Option<Self> {
        named_keys!(from_name_match, s)
    }

    /// Keycap caption shown in the help overlay, e.g. `Suppr` or `+`.
    pub fn label(self) -> String {
        match self {
            Self::Char(c) => c.to_uppercase().collect(),
            named => named_keys!(label_match, named)
                .unwrap_or_default()
                .to_string(),
        }
    }

    /// All named keys, in declaration order.
    #[cfg(test)]
    pub(crate) fn named() -> &'static [Self] {
        &[
            Self::Escape,
            Self::Enter,
            Self::Tab,
            Self::Space,
            Self::Backspace,
            Self::Delete,
            Self::Insert,
            Self::Home,
            Self::End,
            Self::PageUp,
            Self::PageDown,
            Self::ArrowUp,
            Self::ArrowDown,
            Self::ArrowLeft,
            Self::ArrowRight,
            Self::F1,
            Self::F2,
            Self::F3,
            Self::F4,
            Self::F5,
            Self::F6,
            Self::F7,
            Self::F8,
            Self::F9,
            Self::F10,
            Self::F11,
            Self::F12,
        ]
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_spec())
    }
}

impl TryFrom<String> for Key {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_spec(&s).ok_or_else(|| format!("unknown key spec '{s}'"))
    }
}

impl From<Key> for String {
    fn from(k: Key) -> Self {
        k.to_spec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_french_keycaps() {
        assert_eq!(Key::Escape.label(), "Échap");
        assert_eq!(Key::Delete.label(), "Suppr");
        assert_eq!(Key::Backspace.label(), "Retour");
        assert_eq!(Key::F12.label(), "F12");
        assert_eq!(Key::Char('+').label(), "+");
        assert_eq!(Key::Char('a').label(), "A");
    }

    #[test]
    fn names_are_case_insensitive() {
        assert_eq!(Key::from_name("escape"), Some(Key::Escape));
        assert_eq!(Key::from_name("PAGEDOWN"), Some(Key::PageDown));
        assert_eq!(Key::from_name("f9"), Some(Key::F9));
        assert_eq!(Key::from_name("+"), None);
        assert_eq!(Key::Char('x').name(), None);
    }

    #[test]
    fn space_is_never_a_char() {
        assert_eq!(Key::char(' '), Key::Space);
        assert_eq!(Key::char('-'), Key::Char('-'));
    }

    #[test]
    fn serde_uses_spec_strings() {
        let keys: Vec<Key> = ron::from_str(r#"["f12", "+", "suppr", "esc"]"#).unwrap();
        assert_eq!(keys, vec![Key::F12, Key::Char('+'), Key::Delete, Key::Escape]);
        let out = ron::to_string(&Key::PageUp).unwrap();
        assert_eq!(out, "\"pageup\"");
        assert!(ron::from_str::<Key>("\"nope\"").is_err());
    }
}
