//! till Engine
//!
//! The engine binds a keymap and the host's current configuration to a
//! [`KeyStream`]:
//! - resolves each key-down to at most one command and invokes its handler
//! - suppresses the platform default action for recognized keys
//! - owns help-overlay visibility and publishes it with the command catalog
//!
//! Dispatch is synchronous on the emitting thread. No engine lock is held
//! while a host handler runs, so handlers may read the catalog or
//! reconfigure the engine.
use std::{
    path::Path,
    sync::{Arc, Weak},
    time::{Duration, Instant},
};

mod error;
mod view;

use parking_lot::{Mutex, RwLock};
use till_capture::{BoxError, Error as CaptureError, KeyEvent, KeyStream, Subscription};
use till_config::{CommandId, Keymap};
use till_keymode::{
    CatalogEntry, CommandTable, DispatchContext, HostConfig, KeyResponse, State, invoke,
};
use tokio::sync::watch;
use tracing::{debug, trace, warn};

pub use error::{Error, Result};
pub use view::HelpView;

use view::ViewPublisher;

// Timing constant for the slow-dispatch warning
const KEY_PROC_WARN_MS: u64 = 5;

/// State reachable from the capture listener.
struct Shared {
    /// Current keymap snapshot.
    keymap: RwLock<Arc<Keymap>>,
    /// Host configuration of the latest render.
    host: RwLock<Arc<HostConfig>>,
    /// Help visibility.
    state: Mutex<State>,
    /// Help view publisher
    view: ViewPublisher,
}

impl Shared {
    fn snapshot(&self) -> (Arc<Keymap>, Arc<HostConfig>) {
        (self.keymap.read().clone(), self.host.read().clone())
    }

    fn current_view(&self) -> HelpView {
        let (keymap, host) = self.snapshot();
        HelpView {
            visible: self.state.lock().is_help_visible(),
            catalog: till_keymode::catalog(&keymap, &host),
        }
    }

    fn refresh_view(&self) {
        self.view.publish(self.current_view());
    }

    /// One dispatch cycle against the configuration current at this instant.
    fn dispatch(&self, event: &mut KeyEvent) -> Result<KeyResponse> {
        let start = Instant::now();
        let (keymap, host) = self.snapshot();
        let table = CommandTable::build(&keymap, &host);
        let ctx = DispatchContext::new(event.key)
            .with_modifiers(event.modifiers)
            .text_entry(event.focus.is_text_entry())
            .blocking_dialog(host.is_blocking_dialog_open())
            .search_open(host.is_search_open());

        let step = self.state.lock().resolve_key(&table, &ctx);
        if step.resolution.prevents_default() {
            event.prevent_default();
        }
        if step.help_changed {
            self.refresh_view();
        }
        // State lock released: the handler may re-enter the engine.
        let response = invoke(&table, step.resolution)?;

        let processing_time = start.elapsed();
        if processing_time > Duration::from_millis(KEY_PROC_WARN_MS) {
            warn!(key = %event.key, ?processing_time, "key_processing_slow");
        } else {
            trace!(
                key = %event.key,
                repeat = event.repeat,
                ?response,
                ?processing_time,
                "key_processed"
            );
        }
        Ok(response)
    }
}

/// Engine coordinates command resolution, handler invocation and help state.
///
/// Construct via [`Engine::new`], publish the screen's handlers with
/// [`Engine::configure`] on every render, and attach to a window with
/// [`Engine::mount`]. Hosts without a key stream can call
/// [`Engine::handle`] directly.
pub struct Engine {
    /// State shared with the stream listener (held weakly there).
    shared: Arc<Shared>,
    /// Active stream registration, if mounted.
    subscription: Mutex<Option<Subscription>>,
}

impl Engine {
    /// Create an engine for `keymap` with no handlers and help hidden.
    pub fn new(keymap: Keymap) -> Self {
        let host = HostConfig::new();
        let initial = HelpView {
            visible: false,
            catalog: till_keymode::catalog(&keymap, &host),
        };
        Self {
            shared: Arc::new(Shared {
                keymap: RwLock::new(Arc::new(keymap)),
                host: RwLock::new(Arc::new(host)),
                state: Mutex::new(State::new()),
                view: ViewPublisher::new(initial),
            }),
            subscription: Mutex::new(None),
        }
    }

    /// Create an engine from a `.ron` keymap file.
    pub fn from_path(path: &Path) -> Result<Self> {
        Ok(Self::new(till_config::load_from_path(path)?))
    }

    /// Publish the host configuration of the latest render.
    ///
    /// Takes effect for the next event; a mounted listener never sees an
    /// older snapshot.
    pub fn configure(&self, host: HostConfig) {
        *self.shared.host.write() = Arc::new(host);
        trace!("host_config_updated");
        self.shared.refresh_view();
    }

    /// Replace the keymap. The stream registration is unaffected.
    pub fn set_keymap(&self, keymap: Keymap) {
        debug!(commands = keymap.commands.len(), "keymap_replaced");
        *self.shared.keymap.write() = Arc::new(keymap);
        self.shared.refresh_view();
    }

    /// Current keymap.
    pub fn keymap(&self) -> Arc<Keymap> {
        self.shared.keymap.read().clone()
    }

    /// Current host configuration.
    pub fn host(&self) -> Arc<HostConfig> {
        self.shared.host.read().clone()
    }

    /// Attach to `stream`, releasing any previous registration first.
    ///
    /// On a stream without input device this is a no-op and the engine stays
    /// unmounted.
    pub fn mount(&self, stream: &KeyStream) -> Result<()> {
        let mut slot = self.subscription.lock();
        if let Some(mut old) = slot.take() {
            debug!(id = old.id(), "engine_remount");
            old.cancel();
        }
        let weak: Weak<Shared> = Arc::downgrade(&self.shared);
        let registered = stream.subscribe(move |event: &mut KeyEvent| {
            let Some(shared) = weak.upgrade() else {
                return Ok(());
            };
            shared.dispatch(event).map(|_| ()).map_err(BoxError::from)
        });
        match registered {
            Ok(sub) => {
                debug!(id = sub.id(), "engine_mounted");
                *slot = Some(sub);
                Ok(())
            }
            Err(CaptureError::Unavailable) => {
                debug!("engine_mount_skipped_no_input");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Release the stream registration. Calling again is a no-op.
    pub fn unmount(&self) {
        if let Some(mut sub) = self.subscription.lock().take() {
            debug!(id = sub.id(), "engine_unmounted");
            sub.cancel();
        }
    }

    /// True while a listener is registered.
    pub fn is_mounted(&self) -> bool {
        self.subscription
            .lock()
            .as_ref()
            .is_some_and(Subscription::is_active)
    }

    /// Run one dispatch cycle for `event`.
    ///
    /// Recognized keys have `prevent_default` called before their handler
    /// runs; a failing handler is reported as [`Error::Handler`].
    pub fn handle(&self, event: &mut KeyEvent) -> Result<KeyResponse> {
        self.shared.dispatch(event)
    }

    /// Whether the help overlay is shown.
    pub fn help_visible(&self) -> bool {
        self.shared.state.lock().is_help_visible()
    }

    /// Set help visibility from the presentation layer (e.g. overlay closed
    /// by pointer).
    pub fn set_help_visible(&self, visible: bool) {
        let changed = self.shared.state.lock().set_help_visible(visible);
        if changed {
            debug!(visible, "help_visibility_set");
            self.shared.refresh_view();
        }
    }

    /// Help overlay rows for the current keymap and host configuration.
    pub fn catalog(&self) -> Vec<CatalogEntry> {
        let (keymap, host) = self.shared.snapshot();
        till_keymode::catalog(&keymap, &host)
    }

    /// True when the host currently supplies a handler for `command`.
    pub fn is_enabled(&self, command: CommandId) -> bool {
        self.shared.host.read().provides(command)
    }

    /// Current help view.
    pub fn view(&self) -> HelpView {
        self.shared.view.current()
    }

    /// Subscribe to help view changes.
    pub fn watch(&self) -> watch::Receiver<HelpView> {
        self.shared.view.subscribe()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Keymap::default())
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.unmount();
    }
}
