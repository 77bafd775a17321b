// Port Layer - Interfaces for external dependencies

pub mod event_log;
pub mod id_provider; // For deterministic testing
pub mod record_store;
pub mod time_provider;

// Re-exports
pub use event_log::{EventLog, LogField, Severity, TracingEventLog};
pub use id_provider::IdProvider;
pub use record_store::RecordStore;
pub use time_provider::TimeProvider;
