use std::{
    path::Path,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use parking_lot::Mutex;
use till_capture::{Focus, KeyEvent, KeyStream};
use till_config::{CommandId, CommandSpec, Keymap};
use till_engine::{Engine, Error};
use till_keycode::{Key, Modifiers};
use till_keymode::{HandlerResult, HostConfig, KeyResponse, SuppressReason};

/// Handler that records its command into a shared log.
fn recorder(
    log: &Arc<Mutex<Vec<CommandId>>>,
    command: CommandId,
) -> impl Fn() -> HandlerResult + Send + Sync + use<> {
    let log = log.clone();
    move || {
        log.lock().push(command);
        Ok(())
    }
}

/// Host supplying a recording handler for every command.
fn recording_host(log: &Arc<Mutex<Vec<CommandId>>>) -> HostConfig {
    CommandId::ALL
        .iter()
        .fold(HostConfig::new(), |host, &c| host.on(c, recorder(log, c)))
}

fn mounted(host: HostConfig) -> (Engine, KeyStream) {
    let engine = Engine::default();
    engine.configure(host);
    let stream = KeyStream::new();
    engine.mount(&stream).unwrap();
    (engine, stream)
}

#[test]
fn every_bound_key_dispatches_once_with_default_prevented() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let (engine, stream) = mounted(recording_host(&log));
    let keymap = engine.keymap();
    for spec in &keymap.commands {
        for key in &spec.keys {
            log.lock().clear();
            engine.set_help_visible(false);
            let mut ev = KeyEvent::new(*key);
            let d = stream.emit(&mut ev).unwrap();
            assert!(d.default_prevented, "{key} should be intercepted");
            assert_eq!(*log.lock(), vec![spec.command], "{key}");
        }
    }
}

#[test]
fn payment_only_host() {
    let pays = Arc::new(AtomicUsize::new(0));
    let p = pays.clone();
    let (engine, stream) = mounted(HostConfig::new().on_payment(move || {
        p.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }));

    let catalog = engine.catalog();
    assert_eq!(catalog.len(), Keymap::default().commands.len());
    for entry in &catalog {
        assert_eq!(entry.enabled, entry.command == CommandId::Payment);
    }

    let mut ev = KeyEvent::new(Key::F12);
    assert!(stream.emit(&mut ev).unwrap().default_prevented);
    assert_eq!(pays.load(Ordering::SeqCst), 1);

    // A disabled command is still recognized: default suppressed, nothing runs.
    let mut ev = KeyEvent::new(Key::F9);
    assert!(stream.emit(&mut ev).unwrap().default_prevented);
    assert_eq!(pays.load(Ordering::SeqCst), 1);
}

#[test]
fn text_entry_plus_then_escape() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let (engine, _stream) = mounted(recording_host(&log));
    engine.set_help_visible(true);

    let mut plus = KeyEvent::new(Key::Char('+')).with_focus(Focus::TextInput);
    let resp = engine.handle(&mut plus).unwrap();
    assert_eq!(
        resp,
        KeyResponse::Suppressed {
            reason: SuppressReason::TextEntry
        }
    );
    assert!(!plus.default_prevented());
    assert!(log.lock().is_empty());

    let mut esc = KeyEvent::new(Key::Escape).with_focus(Focus::TextInput);
    let resp = engine.handle(&mut esc).unwrap();
    assert!(resp.invoked());
    assert!(esc.default_prevented());
    assert_eq!(*log.lock(), vec![CommandId::Cancel]);
    assert!(!engine.help_visible());
}

#[test]
fn help_key_works_during_text_entry() {
    let (engine, stream) = mounted(HostConfig::new());
    let mut ev = KeyEvent::new(Key::F1).with_focus(Focus::TextArea);
    stream.emit(&mut ev).unwrap();
    assert!(engine.help_visible());
}

#[test]
fn blocking_dialog_suppr_then_escape() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let (engine, stream) = mounted(recording_host(&log).blocking_dialog(true));
    engine.set_help_visible(true);

    for key in [Key::Delete, Key::F1, Key::F12, Key::Char('+')] {
        let mut ev = KeyEvent::new(key);
        let d = stream.emit(&mut ev).unwrap();
        assert!(!d.default_prevented, "{key}");
    }
    assert!(log.lock().is_empty());
    assert!(engine.help_visible());

    let mut esc = KeyEvent::new(Key::Escape);
    assert!(stream.emit(&mut esc).unwrap().default_prevented);
    assert_eq!(*log.lock(), vec![CommandId::Cancel]);
    assert!(!engine.help_visible());
}

#[test]
fn escape_cancels_even_when_keymap_omits_flags() {
    let km = Keymap::from_ron(
        r#"(commands: [
            (command: cancel, keys: ["escape"], label: "Annuler"),
            (command: payment, keys: ["f12"], label: "Payer"),
        ])"#,
    )
    .unwrap();
    let cancels = Arc::new(AtomicUsize::new(0));
    let c = cancels.clone();
    let engine = Engine::new(km);
    engine.configure(
        HostConfig::new()
            .on_cancel(move || {
                c.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .blocking_dialog(true),
    );
    engine.set_help_visible(true);

    let resp = engine.handle(&mut KeyEvent::new(Key::Escape)).unwrap();
    assert!(resp.invoked());
    assert!(!engine.help_visible());

    let mut typing = KeyEvent::new(Key::Escape).with_focus(Focus::TextInput);
    assert!(engine.handle(&mut typing).unwrap().invoked());
    assert!(typing.default_prevented());
    assert_eq!(cancels.load(Ordering::SeqCst), 2);

    let resp = engine.handle(&mut KeyEvent::new(Key::F12)).unwrap();
    assert_eq!(
        resp,
        KeyResponse::Suppressed {
            reason: SuppressReason::BlockingDialog
        }
    );
}

#[test]
fn open_search_blocks_like_a_dialog() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let (engine, _stream) = mounted(recording_host(&log).search_open(true));
    let resp = engine.handle(&mut KeyEvent::new(Key::F2)).unwrap();
    assert_eq!(
        resp,
        KeyResponse::Suppressed {
            reason: SuppressReason::BlockingDialog
        }
    );
    assert!(log.lock().is_empty());
}

#[test]
fn unbound_keys_pass_through_untouched() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let (engine, stream) = mounted(recording_host(&log));
    for key in [Key::Char('a'), Key::Char('7'), Key::F5, Key::Tab, Key::Enter] {
        let mut ev = KeyEvent::new(key);
        let d = stream.emit(&mut ev).unwrap();
        assert!(!d.default_prevented);
    }
    assert!(log.lock().is_empty());
    assert!(!engine.help_visible());
}

#[test]
fn shortcut_chords_pass_through() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let (_engine, stream) = mounted(recording_host(&log));
    let mut ev = KeyEvent::new(Key::F12).with_modifiers(Modifiers::CONTROL);
    assert!(!stream.emit(&mut ev).unwrap().default_prevented);
    let mut ev = KeyEvent::new(Key::Char('+')).with_modifiers(Modifiers::SHIFT);
    assert!(stream.emit(&mut ev).unwrap().default_prevented);
    assert_eq!(*log.lock(), vec![CommandId::IncreaseQuantity]);
}

#[test]
fn mount_unmount_cycles_pair_registrations() {
    let stream = KeyStream::new();
    let engine = Engine::default();
    for _ in 0..25 {
        engine.mount(&stream).unwrap();
        assert!(engine.is_mounted());
        assert_eq!(stream.listener_count(), 1);
        engine.unmount();
        engine.unmount();
        assert!(!engine.is_mounted());
        assert_eq!(stream.listener_count(), 0);
    }
}

#[test]
fn remount_replaces_registration() {
    let stream = KeyStream::new();
    let helps = Arc::new(AtomicUsize::new(0));
    let h = helps.clone();
    let engine = Engine::default();
    engine.configure(HostConfig::new().on_help(move || {
        h.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }));
    for _ in 0..5 {
        engine.mount(&stream).unwrap();
    }
    assert_eq!(stream.listener_count(), 1);
    stream.emit(&mut KeyEvent::new(Key::F1)).unwrap();
    assert_eq!(helps.load(Ordering::SeqCst), 1);
}

#[test]
fn dropping_engine_unmounts() {
    let stream = KeyStream::new();
    {
        let engine = Engine::default();
        engine.mount(&stream).unwrap();
        assert_eq!(stream.listener_count(), 1);
    }
    assert_eq!(stream.listener_count(), 0);
}

#[test]
fn unavailable_stream_mount_is_noop() {
    let engine = Engine::default();
    engine.mount(&KeyStream::unavailable()).unwrap();
    assert!(!engine.is_mounted());
    // Direct dispatch still works.
    engine.handle(&mut KeyEvent::new(Key::F1)).unwrap();
    assert!(engine.help_visible());
}

#[test]
fn latest_configuration_is_always_used() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let (engine, stream) = mounted(HostConfig::new());
    for round in 0..3 {
        let tag = if round % 2 == 0 {
            CommandId::Payment
        } else {
            CommandId::OpenDrawer
        };
        // Re-render: same command, different handler identity.
        engine.configure(HostConfig::new().on_payment(recorder(&log, tag)));
        stream.emit(&mut KeyEvent::new(Key::F12)).unwrap();
        assert_eq!(log.lock().last(), Some(&tag));
    }
    assert_eq!(engine.keymap().commands.len(), Keymap::default().commands.len());

    engine.configure(HostConfig::new());
    log.lock().clear();
    stream.emit(&mut KeyEvent::new(Key::F12)).unwrap();
    assert!(log.lock().is_empty());
}

#[test]
fn handler_failure_propagates() {
    let (engine, stream) = mounted(HostConfig::new().on_open_drawer(|| Err("drawer jammed".into())));

    let mut ev = KeyEvent::new(Key::F8);
    let err = engine.handle(&mut ev).unwrap_err();
    assert!(ev.default_prevented());
    assert_eq!(err.command(), Some(CommandId::OpenDrawer));
    assert!(err.to_string().contains("drawer jammed"));

    let mut ev = KeyEvent::new(Key::F8);
    let err = stream.emit(&mut ev).unwrap_err();
    let inner = err
        .listener_error()
        .and_then(|e| e.downcast_ref::<Error>())
        .unwrap();
    assert!(matches!(
        inner,
        Error::Handler {
            command: CommandId::OpenDrawer,
            ..
        }
    ));
}

#[test]
fn failing_cancel_still_hides_help() {
    let (engine, _stream) = mounted(HostConfig::new().on_cancel(|| Err("nope".into())));
    engine.set_help_visible(true);
    assert!(engine.handle(&mut KeyEvent::new(Key::Escape)).is_err());
    assert!(!engine.help_visible());
}

#[test]
fn custom_keymap_rebinds_without_remount() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let (engine, stream) = mounted(recording_host(&log));
    let km = Keymap::new(vec![CommandSpec::new(
        CommandId::Payment,
        &[Key::F10],
        "Payer",
        "",
    )])
    .unwrap();
    engine.set_keymap(km);
    assert!(engine.is_mounted());

    assert!(!stream.emit(&mut KeyEvent::new(Key::F12)).unwrap().default_prevented);
    assert!(stream.emit(&mut KeyEvent::new(Key::F10)).unwrap().default_prevented);
    assert_eq!(*log.lock(), vec![CommandId::Payment]);
}

#[test]
fn keymap_file_errors_surface_as_config() {
    let err = Engine::from_path(Path::new("/nonexistent/keymap.ron"))
        .err()
        .unwrap();
    assert!(matches!(err, Error::Config(_)));
}

#[tokio::test]
async fn watch_publishes_help_changes() {
    let engine = Engine::default();
    let mut rx = engine.watch();
    assert!(!rx.borrow_and_update().visible);

    engine.handle(&mut KeyEvent::new(Key::F1)).unwrap();
    rx.changed().await.unwrap();
    assert!(rx.borrow_and_update().visible);

    // Same value again: no wake-up.
    engine.set_help_visible(true);
    assert!(!rx.has_changed().unwrap());

    engine.configure(HostConfig::new().on_payment(|| Ok(())));
    rx.changed().await.unwrap();
    let view = rx.borrow_and_update().clone();
    assert!(view.visible);
    assert!(
        view.catalog
            .iter()
            .any(|e| e.command == CommandId::Payment && e.enabled)
    );

    engine.handle(&mut KeyEvent::new(Key::Escape)).unwrap();
    rx.changed().await.unwrap();
    assert!(!rx.borrow().visible);
}
