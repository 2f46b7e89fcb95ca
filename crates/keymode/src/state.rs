use tracing::{debug, trace};

use crate::{
    CommandId, CommandTable, DispatchContext, Eligibility, HelpEffect, HelpState, KeymodeError,
    SuppressReason,
};

/// Where an event goes after filtering and lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// No command claims the event; it must reach the platform untouched.
    PassThrough,
    /// The filter kept the event away from every handler.
    Suppressed(SuppressReason),
    /// The event resolves to this command.
    Command(CommandId),
}

impl Resolution {
    /// Recognized keys have their platform default action suppressed.
    pub fn prevents_default(self) -> bool {
        matches!(self, Self::Command(_))
    }
}

/// Resolve an event to at most one command.
///
/// The eligibility filter runs first; then, if the keymap lets modified
/// events through, any Control/Alt/Meta chord passes; finally the key is
/// looked up by exact identifier.
pub fn resolve(table: &CommandTable, ctx: &DispatchContext) -> Resolution {
    if let Eligibility::Suppressed(reason) = table.policy().classify(ctx) {
        trace!(key = %ctx.key, ?reason, "key_suppressed");
        return Resolution::Suppressed(reason);
    }
    if table.pass_modified() && ctx.modifiers.is_shortcut() {
        trace!(key = %ctx.key, modifiers = ?ctx.modifiers, "key_modified_passthrough");
        return Resolution::PassThrough;
    }
    match table.lookup(ctx.key) {
        Some(cmd) => Resolution::Command(cmd.id),
        None => Resolution::PassThrough,
    }
}

/// Result of handling a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResponse {
    /// Unbound key; the event was not touched.
    PassThrough,
    /// Bound or not, the filter suppressed the event; nothing ran.
    Suppressed {
        /// Which filter rule applied.
        reason: SuppressReason,
    },
    /// The event resolved to a command.
    Dispatched {
        /// The command.
        command: CommandId,
        /// False when the host supplied no handler (silent no-op).
        invoked: bool,
    },
}

impl KeyResponse {
    /// True when the event resolved to a command.
    pub fn is_dispatched(&self) -> bool {
        matches!(self, Self::Dispatched { .. })
    }

    /// True when a host handler actually ran.
    pub fn invoked(&self) -> bool {
        matches!(self, Self::Dispatched { invoked: true, .. })
    }
}

/// Engine-owned mutable state: only help visibility.
#[derive(Debug, Default)]
pub struct State {
    help: HelpState,
}

impl State {
    /// Create a new state (help hidden).
    pub fn new() -> Self {
        Self {
            help: HelpState::Hidden,
        }
    }

    /// Current help visibility.
    pub fn help(&self) -> HelpState {
        self.help
    }

    /// True when the help overlay is shown.
    pub fn is_help_visible(&self) -> bool {
        self.help.is_visible()
    }

    /// Presentation-layer setter; returns true if visibility changed.
    pub fn set_help_visible(&mut self, visible: bool) -> bool {
        self.help.set(visible)
    }

    /// Apply the help effect of a dispatched command; returns true if visibility changed.
    pub fn apply_command(&mut self, command: CommandId) -> bool {
        let changed = self.help.apply(HelpEffect::for_command(command));
        if changed {
            debug!(%command, visible = self.help.is_visible(), "help_visibility_changed");
        }
        changed
    }

    /// Resolve an event and apply the resolved command's help effect.
    ///
    /// The handler does not run here: pass the resolution to [`invoke`]
    /// once this state is unlocked. Help therefore changes before the
    /// handler runs and survives its failure.
    pub fn resolve_key(&mut self, table: &CommandTable, ctx: &DispatchContext) -> Step {
        let resolution = resolve(table, ctx);
        let help_changed = match resolution {
            Resolution::Command(command) => self.apply_command(command),
            Resolution::PassThrough | Resolution::Suppressed(_) => false,
        };
        Step {
            resolution,
            help_changed,
        }
    }
}

/// Outcome of [`State::resolve_key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Where the event goes.
    pub resolution: Resolution,
    /// Help visibility changed.
    pub help_changed: bool,
}

/// Run the handler of a resolved event and report what happened.
///
/// Handler errors are returned as-is.
pub fn invoke(table: &CommandTable, resolution: Resolution) -> Result<KeyResponse, KeymodeError> {
    match resolution {
        Resolution::PassThrough => Ok(KeyResponse::PassThrough),
        Resolution::Suppressed(reason) => Ok(KeyResponse::Suppressed { reason }),
        Resolution::Command(command) => {
            let invoked = match table.get(command) {
                Some(cmd) => cmd.invoke()?,
                None => false,
            };
            debug!(%command, invoked, "command_dispatched");
            Ok(KeyResponse::Dispatched { command, invoked })
        }
    }
}
