//! Ad hoc single-key bindings that live outside the command table.

use std::sync::Arc;

use till_keycode::Key;
use tracing::trace;

use crate::{
    KeyEvent, KeyStream, ListenerResult, Result, Subscription,
    policy::{self, BindOptions},
};

type Callback = Arc<dyn Fn() -> ListenerResult + Send + Sync>;

/// A one-key listener, e.g. a scanner trigger or a screen-local shortcut.
///
/// Independent of command tables, eligibility rules and help state: it only
/// compares key identifiers.
///
/// ```
/// use till_capture::{KeyEvent, KeyStream, SingleKey};
/// use till_keycode::Key;
///
/// let stream = KeyStream::new();
/// let _sub = SingleKey::new(Key::F5, || Ok(()))
///     .skip_text_entry(true)
///     .attach(&stream)
///     .unwrap();
/// let d = stream.emit(&mut KeyEvent::new(Key::F5)).unwrap();
/// assert!(d.default_prevented);
/// ```
#[derive(Clone)]
pub struct SingleKey {
    /// Bound key.
    key: Key,
    /// Interception and text-entry behaviour.
    opts: BindOptions,
    /// Handler run on match.
    callback: Callback,
}

impl SingleKey {
    /// Bind `f` to `key`. Defaults: prevent default, fire during text entry.
    pub fn new<F>(key: Key, f: F) -> Self
    where
        F: Fn() -> ListenerResult + Send + Sync + 'static,
    {
        Self {
            key,
            opts: BindOptions::default(),
            callback: Arc::new(f),
        }
    }

    /// Whether a match suppresses the platform default action.
    pub fn prevent_default(mut self, yes: bool) -> Self {
        self.opts.intercept = yes;
        self
    }

    /// Whether the binding sleeps while a free-text control has focus.
    pub fn skip_text_entry(mut self, yes: bool) -> Self {
        self.opts.skip_text_entry = yes;
        self
    }

    /// Bound key.
    pub fn key(&self) -> Key {
        self.key
    }

    /// Register on `stream`. Fails with `Error::Unavailable` on a stream
    /// without input device; callers that mount opportunistically treat that
    /// as a no-op.
    pub fn attach(self, stream: &KeyStream) -> Result<Subscription> {
        let Self {
            key,
            opts,
            callback,
        } = self;
        stream.subscribe(move |event: &mut KeyEvent| {
            let d = policy::classify(key, opts, event);
            if !d.emit {
                return Ok(());
            }
            if d.intercept {
                event.prevent_default();
            }
            trace!(%key, "single_key_fired");
            callback()
        })
    }
}
