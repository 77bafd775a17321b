//! JSON-RPC Server
//!
//! JSON-RPC 2.0 over HTTP on localhost.

use crate::handler::{parse_complete_params, RpcHandler};
use crate::methods;
use jsonrpsee::server::{Server, ServerHandle};
use jsonrpsee::RpcModule;
use petadoption_core::application::AdoptionService;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

const DEFAULT_RPC_HOST: &str = "127.0.0.1";
const DEFAULT_RPC_PORT: u16 = 9528;
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// RPC Server Configuration
#[derive(Debug, Clone)]
pub struct RpcServerConfig {
    pub host: String,
    /// 0 picks an ephemeral port
    pub port: u16,
    /// Deadline applied to every request context
    pub request_timeout: Duration,
}

impl Default for RpcServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_RPC_HOST.to_string(),
            port: DEFAULT_RPC_PORT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// RPC Server
pub struct RpcServer {
    config: RpcServerConfig,
    handler: Arc<RpcHandler>,
}

impl RpcServer {
    pub fn new(config: RpcServerConfig, service: Arc<AdoptionService>) -> Self {
        let handler = Arc::new(RpcHandler::new(service, config.request_timeout));
        Self { config, handler }
    }

    /// Start the JSON-RPC server
    ///
    /// Returns the bound address (useful with port 0) and the stop handle.
    pub async fn start(self) -> Result<(SocketAddr, ServerHandle), String> {
        let addr = format!("{}:{}", self.config.host, self.config.port);

        let server = Server::builder()
            .build(&addr)
            .await
            .map_err(|e| format!("Failed to build server on {}: {}", addr, e))?;

        let local_addr = server
            .local_addr()
            .map_err(|e| format!("Failed to read bound address: {}", e))?;

        let mut module = RpcModule::new(());

        // Register methods
        let handler = self.handler.clone();
        module
            .register_async_method(methods::HEALTH_STATUS, move |_, _, _| {
                let handler = handler.clone();
                async move { handler.health().await }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method(methods::COMPLETE_ADOPTION, move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req = parse_complete_params(params)?;
                    handler.complete_adoption(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method(methods::CLEANUP_ADOPTIONS, move |_, _, _| {
                let handler = handler.clone();
                async move { handler.cleanup_adoptions().await }
            })
            .map_err(|e| e.to_string())?;

        info!(
            addr = %local_addr,
            request_timeout_ms = self.config.request_timeout.as_millis() as u64,
            "JSON-RPC server started"
        );

        let handle = server.start(module);
        Ok((local_addr, handle))
    }
}
