//! Pure dispatch core: host configuration, command table, eligibility
//! filter, help state and key resolution. No I/O and no listeners; the
//! engine crate wires this to a key stream.
mod eligibility;
mod error;
mod help;
mod host;
mod state;
mod table;

pub use eligibility::{DispatchContext, Eligibility, Policy, SuppressReason};
pub use error::KeymodeError;
pub use help::{HelpEffect, HelpState};
pub use host::{BoxError, Handler, HandlerResult, HostConfig};
pub use state::{KeyResponse, Resolution, State, Step, invoke, resolve};
pub use table::{CatalogEntry, Command, CommandTable, catalog};
pub use till_config::{CommandId, CommandSpec, Keymap};
