use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use proptest::prelude::*;
use till_capture::{KeyEvent, KeyStream, SingleKey, Subscription};
use till_keycode::Key;

fn attach_counter(stream: &KeyStream, hits: &Arc<AtomicUsize>) -> Subscription {
    let h = hits.clone();
    SingleKey::new(Key::F5, move || {
        h.fetch_add(1, Ordering::SeqCst);
        Ok(())
    })
    .attach(stream)
    .unwrap()
}

proptest! {
    #[test]
    fn mount_unmount_cycles_never_leak(cycles in 1usize..40) {
        let stream = KeyStream::new();
        let hits = Arc::new(AtomicUsize::new(0));
        for _ in 0..cycles {
            let sub = attach_counter(&stream, &hits);
            prop_assert_eq!(stream.listener_count(), 1);
            drop(sub);
            prop_assert_eq!(stream.listener_count(), 0);
        }
        stream.emit(&mut KeyEvent::new(Key::F5)).unwrap();
        prop_assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn remounting_replaces_the_listener(cycles in 1usize..20) {
        let stream = KeyStream::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let mut current = Some(attach_counter(&stream, &hits));
        for _ in 0..cycles {
            current.take();
            current = Some(attach_counter(&stream, &hits));
        }
        prop_assert_eq!(stream.listener_count(), 1);
        stream.emit(&mut KeyEvent::new(Key::F5)).unwrap();
        prop_assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}

#[test]
fn listener_may_cancel_a_later_listener() {
    let stream = KeyStream::new();
    let hits = Arc::new(AtomicUsize::new(0));
    let victim = Arc::new(parking_lot::Mutex::new(None::<Subscription>));
    let v = victim.clone();
    let _first = stream
        .subscribe(move |_ev: &mut KeyEvent| {
            if let Some(mut sub) = v.lock().take() {
                sub.cancel();
            }
            Ok(())
        })
        .unwrap();
    *victim.lock() = Some(attach_counter(&stream, &hits));

    let d = stream.emit(&mut KeyEvent::new(Key::F5)).unwrap();
    assert_eq!(d.listeners, 1);
    assert_eq!(hits.load(Ordering::SeqCst), 0);
    assert_eq!(stream.listener_count(), 1);
}
