//! Shared fixtures for the cross-crate tests

use async_trait::async_trait;
use petadoption_core::application::AdoptionService;
use petadoption_core::context::RequestContext;
use petadoption_core::domain::Adoption;
use petadoption_core::error::{AppError, Result};
use petadoption_core::port::id_provider::UuidProvider;
use petadoption_core::port::time_provider::SystemTimeProvider;
use petadoption_core::port::{RecordStore, TracingEventLog};
use petadoption_infra_sqlite::{create_pool, run_migrations, SqliteRecordStore};
use std::sync::Arc;

/// Migrated in-memory store
pub async fn memory_store() -> Arc<SqliteRecordStore> {
    store_at("sqlite::memory:").await
}

/// Migrated store at `url`
pub async fn store_at(url: &str) -> Arc<SqliteRecordStore> {
    let pool = create_pool(url).await.expect("pool");
    run_migrations(&pool).await.expect("migrations");
    Arc::new(SqliteRecordStore::new(pool, Arc::new(SystemTimeProvider)))
}

/// Production wiring over the given store
pub fn service_over(store: Arc<dyn RecordStore>) -> AdoptionService {
    AdoptionService::new(
        store,
        Arc::new(TracingEventLog),
        Arc::new(UuidProvider),
        Arc::new(SystemTimeProvider),
    )
}

/// Real store whose availability update always fails
pub struct BrokenAvailability {
    pub inner: Arc<SqliteRecordStore>,
}

#[async_trait]
impl RecordStore for BrokenAvailability {
    async fn create_transaction(&self, ctx: &RequestContext, adoption: &Adoption) -> Result<()> {
        self.inner.create_transaction(ctx, adoption).await
    }

    async fn update_availability(&self, _ctx: &RequestContext, _adoption: &Adoption) -> Result<()> {
        Err(AppError::Database("sync failed".to_string()))
    }

    async fn drop_transactions(&self, ctx: &RequestContext) -> Result<()> {
        self.inner.drop_transactions(ctx).await
    }
}

/// Unique temp file path for on-disk databases
pub fn temp_db_path(name: &str) -> std::path::PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    std::env::temp_dir().join(format!("petadoption_{}_{}_{}.db", name, std::process::id(), nanos))
}
