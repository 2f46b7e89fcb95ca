//! In-process key-down stream with paired listener registration.

use std::{
    fmt,
    result::Result as StdResult,
    sync::{Arc, Weak},
};

use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::{BoxError, Error, KeyEvent, Result};

/// Result returned by a listener.
pub type ListenerResult = StdResult<(), BoxError>;

type ListenerFn = Arc<dyn Fn(&mut KeyEvent) -> ListenerResult + Send + Sync>;

struct Inner {
    /// Active listeners in registration order.
    listeners: Vec<(u64, ListenerFn)>,
    /// Next registration id.
    next_id: u64,
    /// False for a stream without input device.
    available: bool,
}

impl Inner {
    fn contains(&self, id: u64) -> bool {
        self.listeners.iter().any(|(i, _)| *i == id)
    }
}

/// Outcome of delivering one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delivery {
    /// Listeners that saw the event.
    pub listeners: usize,
    /// Whether any listener suppressed the default action.
    pub default_prevented: bool,
}

/// The key-down stream of one terminal window.
///
/// Listeners run synchronously on the emitting thread, in registration
/// order. No lock is held while a listener runs, so a listener may
/// subscribe or cancel other listeners; a listener cancelled before its turn
/// does not see the event.
#[derive(Clone)]
pub struct KeyStream {
    inner: Arc<Mutex<Inner>>,
}

impl KeyStream {
    /// An interactive stream with an input device attached.
    pub fn new() -> Self {
        Self::with_availability(true)
    }

    /// A stream with no input device; every `subscribe` fails with `Error::Unavailable`.
    pub fn unavailable() -> Self {
        Self::with_availability(false)
    }

    fn with_availability(available: bool) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                listeners: Vec::new(),
                next_id: 1,
                available,
            })),
        }
    }

    /// True when listeners can be registered.
    pub fn is_available(&self) -> bool {
        self.inner.lock().available
    }

    /// Number of active listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.lock().listeners.len()
    }

    /// Register a listener. The returned `Subscription` removes it when
    /// cancelled or dropped.
    pub fn subscribe<F>(&self, listener: F) -> Result<Subscription>
    where
        F: Fn(&mut KeyEvent) -> ListenerResult + Send + Sync + 'static,
    {
        let mut inner = self.inner.lock();
        if !inner.available {
            debug!("key_stream_unavailable");
            return Err(Error::Unavailable);
        }
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, Arc::new(listener)));
        debug!(id, count = inner.listeners.len(), "listener_subscribed");
        Ok(Subscription {
            id,
            stream: Arc::downgrade(&self.inner),
            active: true,
        })
    }

    /// Deliver an event to every active listener.
    ///
    /// A listener error stops delivery and is returned as `Error::Listener`;
    /// listeners after it do not see the event.
    pub fn emit(&self, event: &mut KeyEvent) -> Result<Delivery> {
        let snapshot: Vec<(u64, ListenerFn)> = self.inner.lock().listeners.clone();
        trace!(key = %event.key, listeners = snapshot.len(), "key_event_emit");
        let mut delivered = 0;
        for (id, listener) in snapshot {
            if !self.inner.lock().contains(id) {
                trace!(id, "listener_cancelled_mid_delivery");
                continue;
            }
            delivered += 1;
            if let Err(e) = listener(event) {
                warn!(id, key = %event.key, error = %e, "listener_failed");
                return Err(Error::Listener(e));
            }
        }
        Ok(Delivery {
            listeners: delivered,
            default_prevented: event.default_prevented(),
        })
    }
}

impl Default for KeyStream {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for KeyStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("KeyStream")
            .field("available", &inner.available)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

fn unregister(inner: &Mutex<Inner>, id: u64) -> Result<()> {
    let mut g = inner.lock();
    let before = g.listeners.len();
    g.listeners.retain(|(i, _)| *i != id);
    if g.listeners.len() == before {
        return Err(Error::InvalidId);
    }
    debug!(id, count = g.listeners.len(), "listener_unsubscribed");
    Ok(())
}

/// A live listener registration.
///
/// Exactly one deregistration per registration: `cancel` is idempotent and
/// `Drop` cancels. Holds the stream weakly, so an outlived stream is fine.
pub struct Subscription {
    id: u64,
    stream: Weak<Mutex<Inner>>,
    active: bool,
}

impl Subscription {
    /// Registration id.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// False once cancelled.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Remove the listener. Calling again is a no-op.
    pub fn cancel(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        if let Some(inner) = self.stream.upgrade()
            && let Err(e) = unregister(&inner, self.id)
        {
            warn!(id = self.id, error = %e, "listener_unsubscribe_failed");
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.active)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use till_keycode::Key;

    use super::*;

    fn counting(
        n: &Arc<AtomicUsize>,
    ) -> impl Fn(&mut KeyEvent) -> ListenerResult + Send + Sync + use<> {
        let n = n.clone();
        move |_ev: &mut KeyEvent| {
            n.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn subscribe_and_drop_are_paired() {
        let stream = KeyStream::new();
        let hits = Arc::new(AtomicUsize::new(0));
        for _ in 0..10 {
            let sub = stream.subscribe(counting(&hits)).unwrap();
            assert_eq!(stream.listener_count(), 1);
            drop(sub);
            assert_eq!(stream.listener_count(), 0);
        }
    }

    #[test]
    fn cancel_is_idempotent() {
        let stream = KeyStream::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let keep = stream.subscribe(counting(&hits)).unwrap();
        let mut sub = stream.subscribe(counting(&hits)).unwrap();
        sub.cancel();
        sub.cancel();
        assert!(!sub.is_active());
        drop(sub);
        assert_eq!(stream.listener_count(), 1);
        assert!(keep.is_active());
    }

    #[test]
    fn unavailable_stream_refuses_listeners() {
        let stream = KeyStream::unavailable();
        let hits = Arc::new(AtomicUsize::new(0));
        assert!(matches!(
            stream.subscribe(counting(&hits)),
            Err(Error::Unavailable)
        ));
        let mut ev = KeyEvent::new(Key::F1);
        let d = stream.emit(&mut ev).unwrap();
        assert_eq!(d.listeners, 0);
    }

    #[test]
    fn delivery_in_registration_order() {
        let stream = KeyStream::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        let (a, b) = (order.clone(), order.clone());
        let _s1 = stream
            .subscribe(move |_| {
                a.lock().push(1);
                Ok(())
            })
            .unwrap();
        let _s2 = stream
            .subscribe(move |ev| {
                b.lock().push(2);
                ev.prevent_default();
                Ok(())
            })
            .unwrap();
        let mut ev = KeyEvent::new(Key::Char('+'));
        let d = stream.emit(&mut ev).unwrap();
        assert_eq!(*order.lock(), vec![1, 2]);
        assert_eq!(d.listeners, 2);
        assert!(d.default_prevented);
    }

    #[test]
    fn listener_error_stops_delivery() {
        let stream = KeyStream::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let _s1 = stream.subscribe(|_| Err("till offline".into())).unwrap();
        let _s2 = stream.subscribe(counting(&hits)).unwrap();
        let mut ev = KeyEvent::new(Key::F8);
        let err = stream.emit(&mut ev).unwrap_err();
        assert!(err.to_string().contains("till offline"));
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn subscription_outliving_stream_is_harmless() {
        let stream = KeyStream::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let mut sub = stream.subscribe(counting(&hits)).unwrap();
        drop(stream);
        sub.cancel();
        assert!(!sub.is_active());
    }
}
