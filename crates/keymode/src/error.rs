use thiserror::Error;

use crate::{BoxError, CommandId};

/// Error type for keymode dispatch
#[derive(Debug, Error)]
pub enum KeymodeError {
    /// A host handler failed. Never retried; the host decides what to do.
    #[error("handler for '{command}' failed: {source}")]
    Handler {
        /// Command whose handler failed.
        command: CommandId,
        /// The handler's own error.
        #[source]
        source: BoxError,
    },
}

impl KeymodeError {
    /// Command whose handler failed.
    pub fn command(&self) -> CommandId {
        match self {
            Self::Handler { command, .. } => *command,
        }
    }
}
