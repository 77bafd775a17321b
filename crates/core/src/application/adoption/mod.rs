// Adoption Service - orchestrates the adoption use cases over the ports

mod cleanup;
mod complete;

use crate::context::RequestContext;
use crate::domain::Adoption;
use crate::error::{AdoptionError, Result};
use crate::port::{EventLog, IdProvider, LogField, RecordStore, Severity, TimeProvider};
use std::sync::Arc;

/// Status reported by the liveness probe
pub const HEALTH_STATUS: &str = "alive";

/// Adoption Service
///
/// Holds no mutable state, so one instance is shared across all requests.
pub struct AdoptionService {
    store: Arc<dyn RecordStore>,
    event_log: Arc<dyn EventLog>,
    id_provider: Arc<dyn IdProvider>,
    time_provider: Arc<dyn TimeProvider>,
}

impl AdoptionService {
    pub fn new(
        store: Arc<dyn RecordStore>,
        event_log: Arc<dyn EventLog>,
        id_provider: Arc<dyn IdProvider>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            store,
            event_log,
            id_provider,
            time_provider,
        }
    }

    /// Liveness probe. Ignores the context entirely.
    pub async fn health_check(&self, _ctx: &RequestContext) -> Result<String> {
        Ok(HEALTH_STATUS.to_string())
    }

    /// Record a completed adoption and mark the pet unavailable
    pub async fn complete_adoption(
        &self,
        ctx: &RequestContext,
        pet_id: &str,
        pet_type: &str,
    ) -> std::result::Result<Adoption, AdoptionError> {
        complete::execute(
            self.store.as_ref(),
            &MethodLog::new(self.event_log.as_ref(), ctx, complete::METHOD),
            self.id_provider.as_ref(),
            self.time_provider.as_ref(),
            ctx,
            pet_id,
            pet_type,
        )
        .await
    }

    /// Remove every adoption record
    pub async fn cleanup_adoptions(&self, ctx: &RequestContext) -> Result<String> {
        cleanup::execute(
            self.store.as_ref(),
            &MethodLog::new(self.event_log.as_ref(), ctx, cleanup::METHOD),
            ctx,
        )
        .await
    }
}

/// Event log scoped to one method call: every entry carries `method` and `trace_id`
pub(crate) struct MethodLog<'a> {
    inner: &'a dyn EventLog,
    method: &'static str,
    trace_id: String,
}

impl<'a> MethodLog<'a> {
    pub(crate) fn new(inner: &'a dyn EventLog, ctx: &RequestContext, method: &'static str) -> Self {
        Self {
            inner,
            method,
            trace_id: ctx.trace_id().unwrap_or_default().to_string(),
        }
    }

    pub(crate) fn info(&self, extra: Vec<LogField>) {
        self.emit(None, extra);
    }

    pub(crate) fn error(&self, err: &dyn std::error::Error) {
        self.emit(Some(Severity::Error), vec![("err", err.to_string())]);
    }

    fn emit(&self, severity: Option<Severity>, extra: Vec<LogField>) {
        let mut fields: Vec<LogField> = Vec::with_capacity(extra.len() + 2);
        fields.push(("method", self.method.to_string()));
        fields.push(("trace_id", self.trace_id.clone()));
        fields.extend(extra);
        self.inner.log(severity, &fields);
    }
}

#[cfg(test)]
pub(crate) mod test_support;
