//! Key capture for the till terminal.
//!
//! A [`KeyStream`] is the key-down stream of one terminal window. Screens
//! register listeners on it and receive a [`Subscription`] that removes the
//! listener exactly once, on `cancel` or on drop, so repeated mount/unmount
//! cycles never accumulate listeners.
//!
//! [`SingleKey`] is the lightweight sibling of the command engine: one key,
//! one callback, no eligibility rules.
//!
//! A stream created with [`KeyStream::unavailable`] models a non-interactive
//! context; registration then fails with [`Error::Unavailable`].

mod error;
mod event;
mod policy;
mod single;
mod stream;

pub use error::{BoxError, Error, Result};
pub use event::{Focus, KeyEvent};
pub use policy::{BindOptions, Decision, classify};
pub use single::SingleKey;
pub use stream::{Delivery, KeyStream, ListenerResult, Subscription};
