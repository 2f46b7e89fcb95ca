//! Error types and result alias for the till-capture crate.
use std::{error::Error as StdError, result::Result as StdResult};

use thiserror::Error;

/// Convenient result type used throughout this crate.
pub type Result<T> = StdResult<T, Error>;

/// Boxed error a listener may return.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Error variants produced by this crate.
#[derive(Error, Debug)]
pub enum Error {
    /// The stream has no input device (headless or non-interactive context).
    #[error("Key stream unavailable: no input device")]
    Unavailable,
    /// No active registration exists for the provided id.
    #[error("Invalid registration id")]
    InvalidId,
    /// A listener failed while handling an event; delivery stopped there.
    #[error("Key listener failed: {0}")]
    Listener(#[source] BoxError),
}

impl Error {
    /// The listener's own error, if this is a listener failure.
    pub fn listener_error(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        match self {
            Self::Listener(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}
