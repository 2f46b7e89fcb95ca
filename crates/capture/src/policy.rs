use till_keycode::Key;

use crate::KeyEvent;

/// Options for a single-key binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindOptions {
    /// Suppress the platform default action when the key matches.
    pub intercept: bool,
    /// Ignore the key while a free-text control has focus.
    pub skip_text_entry: bool,
}

impl Default for BindOptions {
    fn default() -> Self {
        Self {
            intercept: true,
            skip_text_entry: false,
        }
    }
}

/// What a single-key listener does with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    /// Run the bound handler.
    pub emit: bool,
    /// Suppress the platform default action.
    pub intercept: bool,
}

/// Classify how a single-key binding should handle a given event.
///
/// - If the key differs, nothing is emitted or intercepted.
/// - If text entry has focus and the binding skips text entry, nothing is
///   emitted or intercepted.
/// - Otherwise emit; interception follows the binding options. Modifiers and
///   OS auto-repeat do not affect the decision.
pub fn classify(key: Key, opts: BindOptions, event: &KeyEvent) -> Decision {
    if event.key != key {
        return Decision {
            emit: false,
            intercept: false,
        };
    }
    if opts.skip_text_entry && event.focus.is_text_entry() {
        return Decision {
            emit: false,
            intercept: false,
        };
    }
    Decision {
        emit: true,
        intercept: opts.intercept,
    }
}
