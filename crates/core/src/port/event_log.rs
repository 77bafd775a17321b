// Event Log Port - structured key/value event emission
//
// Logging is a side channel: `log` has no error return and callers never
// branch on it.

use tracing::{debug, error, info, warn};

/// Severity annotation. Entries without one are plain informational events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Debug,
    Info,
    Warn,
    Error,
}

/// A single key/value pair
pub type LogField = (&'static str, String);

/// Structured logger interface
pub trait EventLog: Send + Sync {
    fn log(&self, severity: Option<Severity>, fields: &[LogField]);
}

const TARGET: &str = "petadoption::events";

/// Forwards events to `tracing` (production)
///
/// `method`, `trace_id` and `err` become tracing fields of their own; any
/// other pairs are rendered as logfmt into `extra`.
pub struct TracingEventLog;

impl EventLog for TracingEventLog {
    fn log(&self, severity: Option<Severity>, fields: &[LogField]) {
        let event = EventFields::split(fields);
        let (method, trace_id, err) = (event.method, event.trace_id, event.err);
        let extra = event.extra.as_deref();

        match severity {
            Some(Severity::Error) => {
                error!(target: TARGET, method = method, trace_id = trace_id, err = err, extra = extra)
            }
            Some(Severity::Warn) => {
                warn!(target: TARGET, method = method, trace_id = trace_id, err = err, extra = extra)
            }
            Some(Severity::Debug) => {
                debug!(target: TARGET, method = method, trace_id = trace_id, err = err, extra = extra)
            }
            Some(Severity::Info) | None => {
                info!(target: TARGET, method = method, trace_id = trace_id, err = err, extra = extra)
            }
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct EventFields<'a> {
    method: Option<&'a str>,
    trace_id: Option<&'a str>,
    err: Option<&'a str>,
    extra: Option<String>,
}

impl<'a> EventFields<'a> {
    fn split(fields: &'a [LogField]) -> Self {
        let mut event = EventFields::default();
        let mut rest: Vec<LogField> = Vec::new();

        for (key, value) in fields {
            match *key {
                "method" => event.method = Some(value.as_str()),
                "trace_id" => event.trace_id = Some(value.as_str()),
                "err" => event.err = Some(value.as_str()),
                _ => rest.push((*key, value.clone())),
            }
        }

        if !rest.is_empty() {
            event.extra = Some(render_fields(&rest));
        }
        event
    }
}

/// Render fields as logfmt (`key=value`, quoted when needed)
pub fn render_fields(fields: &[LogField]) -> String {
    fields
        .iter()
        .map(|(key, value)| {
            if value.is_empty() || value.contains([' ', '"', '=']) {
                format!("{}={:?}", key, value)
            } else {
                format!("{}={}", key, value)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
