use std::result::Result as StdResult;

use thiserror::Error;
use till_config::CommandId;
use till_keymode::{BoxError, KeymodeError};

/// Convenient result type for the engine crate.
pub type Result<T> = StdResult<T, Error>;

/// Unified error type for the till engine.
#[derive(Debug, Error)]
pub enum Error {
    /// A host handler failed. The key's default action was already suppressed
    /// and help state already updated.
    #[error("Handler for '{command}' failed: {source}")]
    Handler {
        /// Command whose handler failed.
        command: CommandId,
        /// The handler's own error.
        #[source]
        source: BoxError,
    },

    /// Errors originating from the key capture layer.
    #[error("Key capture error: {0}")]
    Capture(#[from] till_capture::Error),

    /// Keymap could not be loaded.
    #[error("Keymap error: {0}")]
    Config(#[from] till_config::Error),
}

impl From<KeymodeError> for Error {
    fn from(e: KeymodeError) -> Self {
        match e {
            KeymodeError::Handler { command, source } => Self::Handler { command, source },
        }
    }
}

impl Error {
    /// The command whose handler failed, if any.
    pub fn command(&self) -> Option<CommandId> {
        match self {
            Self::Handler { command, .. } => Some(*command),
            _ => None,
        }
    }
}
