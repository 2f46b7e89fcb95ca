//! Error handling for the till binary.

use std::{io, result};

use thiserror::Error;
use till_engine::Error as EngineError;

/// Convenient result type for till operations.
pub type Result<T> = result::Result<T, Error>;

/// Errors that can occur while running a till command.
#[derive(Debug, Error)]
pub enum Error {
    /// Wrapper for standard I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Keymap loading or validation errors.
    #[error("Keymap error: {0}")]
    Config(#[from] till_config::Error),
    /// Errors surfaced by the engine.
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
    /// A key, modifier or command name could not be parsed.
    #[error("Invalid key spec: {0}")]
    KeySpec(String),
}

impl Error {
    /// Helper to build a key spec error from an arbitrary message.
    pub fn key_spec<M: Into<String>>(msg: M) -> Self {
        Self::KeySpec(msg.into())
    }

    /// Multi-line rendering for the terminal; keymap parse errors include
    /// the offending excerpt.
    pub fn pretty(&self) -> String {
        match self {
            Self::Config(e) => e.pretty(),
            Self::Engine(EngineError::Config(e)) => e.pretty(),
            other => other.to_string(),
        }
    }
}
