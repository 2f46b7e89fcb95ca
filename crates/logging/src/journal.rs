//! Copy tracing events to an in-process receiver.
//!
//! A small tracing [`Layer`] that renders events with [`fmt::render_event`]
//! and hands them to a channel when a sink is set. The `till` CLI uses it to
//! print, after each simulated key, what the engine logged while handling it.
//!
//! Usage:
//! - Install the [`layer`] in your subscriber (done by [`crate::init`]).
//! - Call [`set_sink`] with a `tokio::sync::mpsc::Sender<LogRecord>`.
//! - Call [`clear_sink`] when done.
//!
//! The layer no-ops when no sink is set.

use std::sync::{
    OnceLock,
    atomic::{AtomicU64, Ordering},
};

use parking_lot::Mutex;
use tokio::sync::mpsc::{Sender, error::TrySendError};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use crate::fmt::{self, LogRecord};

/// The sink that, when present, receives rendered events.
static JOURNAL_SINK: OnceLock<Mutex<Option<Sender<LogRecord>>>> = OnceLock::new();

/// Count of records dropped due to a full channel.
static JOURNAL_DROPS: AtomicU64 = AtomicU64::new(0);

fn sink() -> &'static Mutex<Option<Sender<LogRecord>>> {
    JOURNAL_SINK.get_or_init(|| Mutex::new(None))
}

/// Start copying events to `tx`.
pub fn set_sink(tx: Sender<LogRecord>) {
    *sink().lock() = Some(tx);
}

/// Stop copying events.
pub fn clear_sink() {
    *sink().lock() = None;
}

/// Records dropped so far because the receiver fell behind.
pub fn dropped() -> u64 {
    JOURNAL_DROPS.load(Ordering::Relaxed)
}

/// Tracing layer that copies events to the journal sink.
pub struct JournalLayer;

impl<S> Layer<S> for JournalLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let tx_opt = { sink().lock().clone() };
        let Some(tx) = tx_opt else { return };

        match tx.try_send(fmt::render_event(event)) {
            Ok(()) => {}
            Err(TrySendError::Closed(_)) => clear_sink(),
            Err(TrySendError::Full(_)) => {
                JOURNAL_DROPS.fetch_add(1, Ordering::Relaxed);
            }
        }
    }
}

/// Create the journal layer instance to add to your subscriber.
pub fn layer() -> JournalLayer {
    JournalLayer
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;
    use tracing::{info, subscriber::with_default};
    use tracing_subscriber::{prelude::*, registry};

    use super::*;

    #[test]
    fn forwards_only_while_sink_is_set() {
        let subscriber = registry().with(layer());
        let (tx, mut rx) = mpsc::channel(8);
        with_default(subscriber, || {
            info!("before_sink");
            set_sink(tx);
            info!(key = "f12", "key_seen");
            clear_sink();
            info!("after_sink");
        });
        let rec = rx.try_recv().unwrap();
        assert_eq!(rec.message, "key_seen");
        assert_eq!(rec.fields, "key=\"f12\"");
        assert!(rx.try_recv().is_err());
    }
}
