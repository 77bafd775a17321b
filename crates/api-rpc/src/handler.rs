//! RPC Method Handlers
//!
//! Builds a request context per call and delegates to the adoption service.

use crate::error::{adoption_error_to_rpc, to_rpc_error};
use crate::types::{AdoptionResponse, CleanupResponse, CompleteAdoptionRequest, HealthResponse};
use jsonrpsee::types::{ErrorObjectOwned, Params};
use petadoption_core::application::AdoptionService;
use petadoption_core::context::RequestContext;
use petadoption_core::error::AppError;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Decode `adoption.complete.v1` params; malformed input is a validation error
pub fn parse_complete_params(
    params: Params<'_>,
) -> Result<CompleteAdoptionRequest, ErrorObjectOwned> {
    params
        .parse()
        .map_err(|e| to_rpc_error(AppError::Validation(e.message().to_string())))
}

/// RPC Handler with injected dependencies
pub struct RpcHandler {
    service: Arc<AdoptionService>,
    request_timeout: Duration,
}

impl RpcHandler {
    pub fn new(service: Arc<AdoptionService>, request_timeout: Duration) -> Self {
        Self {
            service,
            request_timeout,
        }
    }

    /// Fresh context: new trace id, configured deadline
    fn context(&self) -> RequestContext {
        RequestContext::background()
            .with_trace_id(uuid::Uuid::new_v4().to_string())
            .with_timeout(self.request_timeout)
    }

    /// health.status.v1
    pub async fn health(&self) -> Result<HealthResponse, ErrorObjectOwned> {
        let status = self
            .service
            .health_check(&self.context())
            .await
            .map_err(to_rpc_error)?;

        Ok(HealthResponse { status })
    }

    /// adoption.complete.v1
    pub async fn complete_adoption(
        &self,
        params: CompleteAdoptionRequest,
    ) -> Result<AdoptionResponse, ErrorObjectOwned> {
        let ctx = self.context();
        debug!(
            trace_id = ctx.trace_id().unwrap_or_default(),
            pet_id = %params.pet_id,
            "complete adoption requested"
        );

        let adoption = self
            .service
            .complete_adoption(&ctx, &params.pet_id, &params.pet_type)
            .await
            .map_err(|e| {
                warn!(trace_id = ctx.trace_id().unwrap_or_default(), error = %e, "complete adoption failed");
                adoption_error_to_rpc(e)
            })?;

        Ok(adoption.into())
    }

    /// adoption.cleanup.v1
    pub async fn cleanup_adoptions(&self) -> Result<CleanupResponse, ErrorObjectOwned> {
        let ctx = self.context();

        let result = self
            .service
            .cleanup_adoptions(&ctx)
            .await
            .map_err(|e| {
                warn!(trace_id = ctx.trace_id().unwrap_or_default(), error = %e, "cleanup failed");
                to_rpc_error(e)
            })?;

        Ok(CleanupResponse { result })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::code;
    use async_trait::async_trait;
    use petadoption_core::domain::Adoption;
    use petadoption_core::error::Result;
    use petadoption_core::port::id_provider::UuidProvider;
    use petadoption_core::port::time_provider::SystemTimeProvider;
    use petadoption_core::port::{RecordStore, TracingEventLog};

    /// Store whose availability update fails; optionally slow on create
    struct FlakyStore {
        create_delay: Duration,
    }

    #[async_trait]
    impl RecordStore for FlakyStore {
        async fn create_transaction(&self, ctx: &RequestContext, _a: &Adoption) -> Result<()> {
            let delay = self.create_delay;
            ctx.run(async move {
                tokio::time::sleep(delay).await;
                Ok::<(), AppError>(())
            })
            .await
        }

        async fn update_availability(&self, _ctx: &RequestContext, _a: &Adoption) -> Result<()> {
            Err(AppError::Database("sync failed".into()))
        }

        async fn drop_transactions(&self, _ctx: &RequestContext) -> Result<()> {
            Ok(())
        }
    }

    fn handler(create_delay: Duration, timeout: Duration) -> RpcHandler {
        let service = AdoptionService::new(
            Arc::new(FlakyStore { create_delay }),
            Arc::new(TracingEventLog),
            Arc::new(UuidProvider),
            Arc::new(SystemTimeProvider),
        );
        RpcHandler::new(Arc::new(service), timeout)
    }

    #[test]
    fn test_complete_params_decoded() {
        let raw = r#"{"pet_id":"pet-7","pet_type":"puppy"}"#;
        let req = parse_complete_params(Params::new(Some(raw))).unwrap();
        assert_eq!(req.pet_id, "pet-7");
        assert_eq!(req.pet_type, "puppy");

        // Missing fields default to empty strings
        let req = parse_complete_params(Params::new(Some(r#"{"pet_id":"pet-8"}"#))).unwrap();
        assert_eq!(req.pet_type, "");
    }

    #[test]
    fn test_malformed_complete_params_are_validation_errors() {
        let err = parse_complete_params(Params::new(Some(r#"{"pet_id":5}"#))).unwrap_err();
        assert_eq!(err.code(), code::VALIDATION_ERROR);

        let err = parse_complete_params(Params::new(Some(r#"["pet-1""#))).unwrap_err();
        assert_eq!(err.code(), code::VALIDATION_ERROR);
    }

    #[tokio::test]
    async fn test_health() {
        let h = handler(Duration::ZERO, Duration::from_secs(5));
        assert_eq!(h.health().await.unwrap().status, "alive");
    }

    #[tokio::test]
    async fn test_cleanup_returns_empty_result() {
        let h = handler(Duration::ZERO, Duration::from_secs(5));
        assert_eq!(h.cleanup_adoptions().await.unwrap().result, "");
    }

    #[tokio::test]
    async fn test_availability_failure_maps_to_sync_code() {
        let h = handler(Duration::ZERO, Duration::from_secs(5));
        let err = h
            .complete_adoption(CompleteAdoptionRequest {
                pet_id: "pet-1".into(),
                pet_type: "puppy".into(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), code::AVAILABILITY_SYNC_FAILED);
        assert!(err.data().is_some());
    }

    #[tokio::test]
    async fn test_request_timeout_applies_to_store() {
        let h = handler(Duration::from_secs(30), Duration::from_millis(20));
        let err = h
            .complete_adoption(CompleteAdoptionRequest {
                pet_id: "pet-2".into(),
                pet_type: "kitten".into(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), code::CANCELLED);
        assert_eq!(err.message(), "Deadline exceeded");
    }
}
