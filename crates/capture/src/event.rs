use till_keycode::{Key, Modifiers};

/// What kind of element had focus when a key went down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Nothing focusable (the sale screen itself).
    #[default]
    None,
    /// Single-line text input (product code, quantity field).
    TextInput,
    /// Multi-line text area (sale note).
    TextArea,
    /// Any other free-text editable surface.
    Editable,
    /// A non-text control: button, select, checkbox.
    Control,
}

impl Focus {
    /// True for free-text controls, where single-character shortcuts must not fire.
    pub fn is_text_entry(self) -> bool {
        matches!(self, Self::TextInput | Self::TextArea | Self::Editable)
    }
}

/// A key-down event travelling through a `KeyStream`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// Key identifier.
    pub key: Key,
    /// Modifiers held.
    pub modifiers: Modifiers,
    /// Focused element at delivery time.
    pub focus: Focus,
    /// OS auto-repeat.
    pub repeat: bool,
    default_prevented: bool,
}

impl KeyEvent {
    /// A bare key-down with nothing focused.
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::empty(),
            focus: Focus::None,
            repeat: false,
            default_prevented: false,
        }
    }

    /// Set modifiers.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Set the focused element.
    pub fn with_focus(mut self, focus: Focus) -> Self {
        self.focus = focus;
        self
    }

    /// Mark as an auto-repeat.
    pub fn repeated(mut self) -> Self {
        self.repeat = true;
        self
    }

    /// Suppress the platform default action (character insertion, browser
    /// help, back navigation...). Sticky for the rest of delivery.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether some listener suppressed the default action.
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}
