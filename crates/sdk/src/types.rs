//! SDK Request/Response Types
//!
//! Mirrors the JSON-RPC types from the api-rpc crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Request to record a completed adoption
#[derive(Debug, Clone, Serialize)]
pub struct CompleteAdoptionRequest {
    pub pet_id: String,
    pub pet_type: String,
}

/// A recorded adoption
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdoptionResponse {
    pub transaction_id: String,
    pub pet_id: String,
    pub pet_type: String,
    pub adoption_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CleanupResponse {
    pub result: String,
}
