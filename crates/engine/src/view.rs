use till_keymode::CatalogEntry;
use tokio::sync::watch;
use tracing::trace;

/// What the presentation layer needs to render the help overlay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelpView {
    /// Overlay shown.
    pub visible: bool,
    /// Rows in keymap order, with current enabled flags.
    pub catalog: Vec<CatalogEntry>,
}

/// Publishes help views to subscribers, skipping unchanged values.
pub(crate) struct ViewPublisher {
    /// Latest view; receivers subscribe from here.
    tx: watch::Sender<HelpView>,
}

impl ViewPublisher {
    pub(crate) fn new(initial: HelpView) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Replace the current view; subscribers are woken only on change.
    pub(crate) fn publish(&self, next: HelpView) -> bool {
        let changed = self.tx.send_if_modified(|cur| {
            if *cur == next {
                return false;
            }
            *cur = next;
            true
        });
        if changed {
            trace!(receivers = self.tx.receiver_count(), "help_view_published");
        }
        changed
    }

    pub(crate) fn current(&self) -> HelpView {
        self.tx.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<HelpView> {
        self.tx.subscribe()
    }
}
