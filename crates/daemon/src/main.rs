//! Pet Adoption Service - Main Entry Point
//! Composition root: config, logging, database, DI wiring, JSON-RPC server

mod config;
mod logging;
mod telemetry;

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use config::DaemonConfig;
use petadoption_api_rpc::{RpcServer, RpcServerConfig};
use petadoption_core::application::AdoptionService;
use petadoption_core::port::id_provider::UuidProvider;
use petadoption_core::port::time_provider::SystemTimeProvider;
use petadoption_core::port::TracingEventLog;
use petadoption_infra_sqlite::{create_pool, run_migrations, SqliteRecordStore};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load configuration
    let config = DaemonConfig::from_env()?;

    // 2. Initialize logging
    let (_log_guard, telemetry_status) = logging::init(&config)?;
    telemetry_status.report();

    info!("PetAdoption service v{} starting...", VERSION);

    // 3. Initialize database
    if let Some(parent) = std::path::Path::new(&config.db_path).parent() {
        if !config.db_path.starts_with("sqlite:") && !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    info!(db_path = %config.db_path, "Initializing database...");

    let pool = create_pool(&config.database_url())
        .await
        .map_err(|e| anyhow::anyhow!("DB pool creation failed: {}", e))?;
    run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;

    // 4. Setup dependencies (DI wiring)
    let time_provider = Arc::new(SystemTimeProvider);
    let record_store = Arc::new(SqliteRecordStore::new(pool.clone(), time_provider.clone()));

    let service = Arc::new(AdoptionService::new(
        record_store,
        Arc::new(TracingEventLog),
        Arc::new(UuidProvider),
        time_provider,
    ));

    // 5. Start JSON-RPC server
    let rpc_config = RpcServerConfig {
        host: config.rpc_host.clone(),
        port: config.rpc_port,
        request_timeout: config.request_timeout,
    };
    let (addr, rpc_handle) = RpcServer::new(rpc_config, service)
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("RPC server start failed: {}", e))?;

    info!(%addr, "System ready. Press Ctrl+C to shutdown");

    // 6. Wait for shutdown signal
    tokio::signal::ctrl_c().await?;

    info!("Shutdown signal received. Exiting gracefully...");

    // 7. Graceful shutdown
    rpc_handle
        .stop()
        .map_err(|e| anyhow::anyhow!("RPC server stop failed: {}", e))?;
    rpc_handle.stopped().await;
    pool.close().await;

    info!("Shutdown complete.");

    Ok(())
}
