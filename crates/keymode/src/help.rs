use crate::CommandId;

/// Visibility of the help overlay. Starts hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HelpState {
    /// Overlay hidden.
    #[default]
    Hidden,
    /// Overlay shown.
    Visible,
}

/// How a dispatched command affects help visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpEffect {
    /// Leave visibility alone.
    None,
    /// Flip visibility.
    Toggle,
    /// Force hidden, whatever the current state.
    Hide,
}

impl HelpEffect {
    /// Effect attached to a command: help toggles, cancel hides.
    pub fn for_command(command: CommandId) -> Self {
        match command {
            CommandId::Help => Self::Toggle,
            CommandId::Cancel => Self::Hide,
            _ => Self::None,
        }
    }
}

impl HelpState {
    /// True when the overlay is shown.
    pub fn is_visible(self) -> bool {
        self == Self::Visible
    }

    /// Build from a boolean.
    pub fn from_visible(visible: bool) -> Self {
        if visible { Self::Visible } else { Self::Hidden }
    }

    /// Flip visibility.
    pub fn toggle(&mut self) {
        *self = match self {
            Self::Hidden => Self::Visible,
            Self::Visible => Self::Hidden,
        };
    }

    /// Force hidden.
    pub fn hide(&mut self) {
        *self = Self::Hidden;
    }

    /// Set visibility; returns true if it changed.
    pub fn set(&mut self, visible: bool) -> bool {
        let next = Self::from_visible(visible);
        let changed = *self != next;
        *self = next;
        changed
    }

    /// Apply a command's effect; returns true if visibility changed.
    pub fn apply(&mut self, effect: HelpEffect) -> bool {
        let before = *self;
        match effect {
            HelpEffect::None => {}
            HelpEffect::Toggle => self.toggle(),
            HelpEffect::Hide => self.hide(),
        }
        before != *self
    }
}
