use bitflags::bitflags;

bitflags! {
    /// Modifier keys held while a key-down event was produced.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Either Shift key.
        const SHIFT = 1 << 0;
        /// Either Control key.
        const CONTROL = 1 << 1;
        /// Alt / AltGr.
        const ALT = 1 << 2;
        /// Meta / Windows / Command.
        const META = 1 << 3;
    }
}

impl Modifiers {
    /// Modifiers that turn a key into a platform shortcut (copy, paste, tab switching...).
    pub const SHORTCUT: Self = Self::CONTROL.union(Self::ALT).union(Self::META);

    /// Parses a single modifier word (case-insensitive).
    ///
    /// Accepts shift, ctrl/control, alt/opt/option, meta/cmd/command/super/win.
    pub fn from_spec(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shift" => Some(Self::SHIFT),
            "ctrl" | "control" => Some(Self::CONTROL),
            "alt" | "opt" | "option" => Some(Self::ALT),
            "meta" | "cmd" | "command" | "super" | "win" => Some(Self::META),
            _ => None,
        }
    }

    /// Parses a `+`-separated modifier list such as `"ctrl+shift"`.
    pub fn parse_list(s: &str) -> Option<Self> {
        if s.trim().is_empty() {
            return Some(Self::empty());
        }
        s.split('+')
            .try_fold(Self::empty(), |acc, part| Some(acc | Self::from_spec(part)?))
    }

    /// True when a platform-shortcut modifier is held. Shift alone never counts.
    pub fn is_shortcut(self) -> bool {
        self.intersects(Self::SHORTCUT)
    }
}
