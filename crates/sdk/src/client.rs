//! PetAdoption Client Implementation

use crate::error::{Result, SdkError};
use crate::types::{AdoptionResponse, CleanupResponse, CompleteAdoptionRequest, HealthResponse};
use jsonrpsee::core::client::ClientT;
use jsonrpsee::core::params::ObjectParams;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use jsonrpsee::rpc_params;
use std::time::Duration;

const HEALTH_STATUS: &str = "health.status.v1";
const COMPLETE_ADOPTION: &str = "adoption.complete.v1";
const CLEANUP_ADOPTIONS: &str = "adoption.cleanup.v1";

/// Pet adoption service client
pub struct PetAdoptionClient {
    client: HttpClient,
}

impl PetAdoptionClient {
    /// Connect to the service
    ///
    /// # Arguments
    ///
    /// * `url` - RPC endpoint URL (e.g., `http://127.0.0.1:9528`)
    pub async fn connect(url: impl AsRef<str>) -> Result<Self> {
        let url = url.as_ref();

        let client = HttpClientBuilder::default()
            .request_timeout(Duration::from_secs(30))
            .build(url)
            .map_err(|e| SdkError::Connection(format!("Failed to create client: {}", e)))?;

        Ok(Self { client })
    }

    /// Liveness probe, returns "alive"
    pub async fn health(&self) -> Result<String> {
        let response: HealthResponse = self.client.request(HEALTH_STATUS, rpc_params![]).await?;
        Ok(response.status)
    }

    /// Record a completed adoption
    ///
    /// If the adoption is stored but the availability update fails, the
    /// error is an `SdkError::Rpc` whose `partial_adoption()` is set.
    pub async fn complete_adoption(
        &self,
        pet_id: impl Into<String>,
        pet_type: impl Into<String>,
    ) -> Result<AdoptionResponse> {
        let request = CompleteAdoptionRequest {
            pet_id: pet_id.into(),
            pet_type: pet_type.into(),
        };

        let mut params = ObjectParams::new();
        params.insert("pet_id", &request.pet_id)?;
        params.insert("pet_type", &request.pet_type)?;

        let response: AdoptionResponse = self.client.request(COMPLETE_ADOPTION, params).await?;
        Ok(response)
    }

    /// Remove every adoption record. Irreversible.
    pub async fn cleanup_adoptions(&self) -> Result<String> {
        let response: CleanupResponse =
            self.client.request(CLEANUP_ADOPTIONS, rpc_params![]).await?;
        Ok(response.result)
    }
}
