//! till-keycode: key identifiers and modifier state for the till terminal.
//!
//! - `Key`: named keys (Escape, Delete, F1..F12, ...) plus `Key::Char` for
//!   printable characters.
//! - `Modifiers`: bitflags for Shift, Control, Alt and Meta.
//! - Spec helpers: `Key::from_spec`, `Key::to_spec`, and `Modifiers::from_spec`.
//! - Display labels: `Key::label`, the French caption printed on the help
//!   overlay and on the physical keycaps of the terminal.
//!
//! Keys serialize as their canonical spec string, so keymaps written in RON
//! read `["f12"]` or `["+", "="]`.

mod key;
pub use key::Key;

mod spec;

mod modifiers;
pub use modifiers::Modifiers;
