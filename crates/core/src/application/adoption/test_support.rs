//! Stub ports for service tests

use crate::context::RequestContext;
use crate::domain::Adoption;
use crate::error::{AppError, Result};
use crate::port::{EventLog, LogField, RecordStore, Severity, TimeProvider};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Record store stub with per-operation failure injection and call counters
#[derive(Default)]
pub(crate) struct StubStore {
    create_err: Option<&'static str>,
    update_err: Option<&'static str>,
    drop_err: Option<&'static str>,
    pub create_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
    pub drop_calls: AtomicUsize,
    pub created: Mutex<Vec<Adoption>>,
    pub trace_ids: Mutex<Vec<Option<String>>>,
}

impl StubStore {
    pub fn failing_create(msg: &'static str) -> Self {
        Self {
            create_err: Some(msg),
            ..Default::default()
        }
    }

    pub fn failing_update(msg: &'static str) -> Self {
        Self {
            update_err: Some(msg),
            ..Default::default()
        }
    }

    pub fn failing_drop(msg: &'static str) -> Self {
        Self {
            drop_err: Some(msg),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> (usize, usize, usize) {
        (
            self.create_calls.load(Ordering::SeqCst),
            self.update_calls.load(Ordering::SeqCst),
            self.drop_calls.load(Ordering::SeqCst),
        )
    }

    fn outcome(err: Option<&'static str>) -> Result<()> {
        match err {
            Some(msg) => Err(AppError::Database(msg.to_string())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RecordStore for StubStore {
    async fn create_transaction(&self, ctx: &RequestContext, adoption: &Adoption) -> Result<()> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.trace_ids
            .lock()
            .unwrap()
            .push(ctx.trace_id().map(str::to_string));
        Self::outcome(self.create_err)?;
        self.created.lock().unwrap().push(adoption.clone());
        Ok(())
    }

    async fn update_availability(&self, ctx: &RequestContext, _adoption: &Adoption) -> Result<()> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.trace_ids
            .lock()
            .unwrap()
            .push(ctx.trace_id().map(str::to_string));
        Self::outcome(self.update_err)
    }

    async fn drop_transactions(&self, _ctx: &RequestContext) -> Result<()> {
        self.drop_calls.fetch_add(1, Ordering::SeqCst);
        Self::outcome(self.drop_err)
    }
}

/// One captured log entry
#[derive(Debug, Clone)]
pub(crate) struct Entry {
    pub severity: Option<Severity>,
    pub fields: Vec<(String, String)>,
}

impl Entry {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Event log that keeps every entry in memory
#[derive(Default)]
pub(crate) struct RecordingLog {
    entries: Mutex<Vec<Entry>>,
}

impl RecordingLog {
    pub fn entries(&self) -> Vec<Entry> {
        self.entries.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<Entry> {
        self.entries()
            .into_iter()
            .filter(|e| e.severity == Some(Severity::Error))
            .collect()
    }
}

impl EventLog for RecordingLog {
    fn log(&self, severity: Option<Severity>, fields: &[LogField]) {
        let fields = fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        self.entries.lock().unwrap().push(Entry { severity, fields });
    }
}

/// Clock frozen at a given instant
pub(crate) struct FixedClock(pub DateTime<Utc>);

impl TimeProvider for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
