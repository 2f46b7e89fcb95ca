//! Render `tracing` events into concise logfmt records.
//!
//! Events in this workspace carry a snake_case event name as their message
//! and structured fields (`debug!(%command, invoked, "command_dispatched")`).
//! [`render_event`] keeps both: the message, then the fields as `key=value`.

use std::fmt::{self as stdfmt, Debug, Write};

use tracing::{
    Event, Metadata,
    field::{Field, Visit},
};

/// Rendered fields extracted from a tracing Event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Severity level (e.g., INFO, WARN) for the event.
    pub level: String,
    /// Event target (typically the module path).
    pub target: String,
    /// Event message, or empty when the event has none.
    pub message: String,
    /// Remaining fields rendered as `key=value` pairs.
    pub fields: String,
}

impl stdfmt::Display for LogRecord {
    fn fmt(&self, f: &mut stdfmt::Formatter<'_>) -> stdfmt::Result {
        write!(f, "{:>5} {}:", self.level, self.target)?;
        if !self.message.is_empty() {
            write!(f, " {}", self.message)?;
        }
        if !self.fields.is_empty() {
            write!(f, " {}", self.fields)?;
        }
        Ok(())
    }
}

#[derive(Default)]
struct FieldVisitor {
    /// Captured `message` field, if present.
    msg: Option<String>,
    /// Accumulated non-message fields rendered as `key=value`.
    fields: String,
}

impl FieldVisitor {
    fn push(&mut self, name: &str, value: stdfmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ignored = write!(&mut self.fields, "{name}={value}");
    }
}

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.msg = Some(value.to_string());
        } else {
            self.push(field.name(), format_args!("\"{value}\""));
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.push(field.name(), format_args!("{value}"));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.push(field.name(), format_args!("{value}"));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        if field.name() == "message" {
            self.msg = Some(format!("{:?}", value));
        } else {
            self.push(field.name(), format_args!("{value:?}"));
        }
    }
}

/// Extract level, target, message and fields from a tracing Event.
pub fn render_event(event: &Event<'_>) -> LogRecord {
    let meta: &Metadata<'_> = event.metadata();
    let mut vis = FieldVisitor::default();
    event.record(&mut vis);
    LogRecord {
        level: meta.level().to_string(),
        target: meta.target().to_string(),
        message: vis.msg.unwrap_or_default(),
        fields: vis.fields,
    }
}
