//! `till run`: press simulated keys on an engine and report outcomes.

use std::io::{self, Write};

use logging::{fmt::LogRecord, journal};
use till_capture::{Focus, KeyEvent};
use till_config::resolve_keymap;
use till_engine::Engine;
use till_keycode::{Key, Modifiers};
use till_keymode::{KeyResponse, SuppressReason};
use tokio::sync::mpsc;
use tracing::debug;

use crate::{
    cli::RunArgs,
    error::{Error, Result},
    host,
};

/// Parse the key arguments; each must be a key spec like `f12`, `+` or `suppr`.
pub fn parse_keys(specs: &[String]) -> Result<Vec<Key>> {
    specs
        .iter()
        .map(|s| Key::from_spec(s).ok_or_else(|| Error::key_spec(format!("unknown key '{s}'"))))
        .collect()
}

fn parse_mods(list: Option<&str>) -> Result<Modifiers> {
    match list {
        None => Ok(Modifiers::empty()),
        Some(s) => Modifiers::parse_list(s)
            .ok_or_else(|| Error::key_spec(format!("unknown modifier in '{s}'"))),
    }
}

/// One report line for a handled key.
fn describe(response: KeyResponse, default_prevented: bool) -> String {
    let mut line = match response {
        KeyResponse::PassThrough => "passed through".to_string(),
        KeyResponse::Suppressed {
            reason: SuppressReason::TextEntry,
        } => "suppressed (text entry)".to_string(),
        KeyResponse::Suppressed {
            reason: SuppressReason::BlockingDialog,
        } => "suppressed (blocking dialog)".to_string(),
        KeyResponse::Dispatched {
            command,
            invoked: false,
        } => format!("{command} (no handler)"),
        KeyResponse::Dispatched {
            command,
            invoked: true,
        } => format!("{command} ran"),
    };
    if default_prevented {
        line.push_str(", default prevented");
    }
    line
}

/// An engine plus the simulated screen state around it.
struct Session<'a> {
    /// Parsed command-line flags.
    args: &'a RunArgs,
    /// Engine under test.
    engine: Engine,
    /// Modifiers held for every key.
    modifiers: Modifiers,
    /// Focused element for every key.
    focus: Focus,
    /// Log records captured while handling keys.
    journal: Option<mpsc::Receiver<LogRecord>>,
}

impl Session<'_> {
    /// Press one key and write its report line.
    fn press(&mut self, out: &mut impl Write, spec: &str, key: Key) -> Result<()> {
        let mut event = KeyEvent::new(key)
            .with_modifiers(self.modifiers)
            .with_focus(self.focus);
        let handled = self.engine.handle(&mut event);
        let help = if self.engine.help_visible() { " [aide]" } else { "" };
        let failed = match handled {
            Ok(response) => {
                let line = describe(response, event.default_prevented());
                writeln!(out, "{spec:<8} {line}{help}")?;
                None
            }
            Err(e) => {
                writeln!(out, "{spec:<8} error: {e}{help}")?;
                Some(e)
            }
        };
        if let Some(rx) = self.journal.as_mut() {
            while let Ok(rec) = rx.try_recv() {
                writeln!(out, "    {rec}")?;
            }
            let dropped = journal::dropped();
            if dropped > 0 {
                writeln!(out, "    ({dropped} log records dropped)")?;
            }
        }
        match failed {
            Some(e) if !self.args.keep_going => Err(e.into()),
            _ => Ok(()),
        }
    }
}

impl Drop for Session<'_> {
    fn drop(&mut self) {
        if self.journal.is_some() {
            journal::clear_sink();
        }
    }
}

/// Run the key sequence.
pub fn run(args: &RunArgs) -> Result<()> {
    let keys = parse_keys(&args.keys)?;
    let modifiers = parse_mods(args.mods.as_deref())?;
    let focus = if args.text_entry {
        Focus::TextInput
    } else {
        Focus::None
    };

    let keymap = resolve_keymap(args.keymap.keymap.as_deref())?;
    let engine = Engine::new(keymap);
    engine.configure(host::build(&args.host)?);
    engine.set_help_visible(args.help_visible);
    debug!(keys = keys.len(), "session_start");

    let records = args.journal.then(|| {
        let (tx, rx) = mpsc::channel(1024);
        journal::set_sink(tx);
        rx
    });

    let mut session = Session {
        args,
        engine,
        modifiers,
        focus,
        journal: records,
    };
    let mut out = io::stdout().lock();
    for (spec, key) in args.keys.iter().zip(keys) {
        session.press(&mut out, spec, key)?;
    }
    Ok(())
}
