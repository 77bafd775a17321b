//! JSON-RPC API Layer
//!
//! Exposes the adoption service over JSON-RPC 2.0. Method names follow the
//! HTTP routes they replace (`/health/status`, `/api/completeadoption`,
//! `/api/cleanupadoptions`).

pub mod error;
pub mod handler;
pub mod server;
pub mod types;

pub use server::{RpcServer, RpcServerConfig};

/// Registered method names
pub mod methods {
    pub const HEALTH_STATUS: &str = "health.status.v1";
    pub const COMPLETE_ADOPTION: &str = "adoption.complete.v1";
    pub const CLEANUP_ADOPTIONS: &str = "adoption.cleanup.v1";
}
