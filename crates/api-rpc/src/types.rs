//! RPC Request/Response Types

use chrono::{DateTime, Utc};
use petadoption_core::domain::Adoption;
use serde::{Deserialize, Serialize};

/// health.status.v1
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// adoption.complete.v1 - Record a completed adoption
///
/// Fields are opaque and not validated; missing ones default to "".
#[derive(Debug, Deserialize)]
pub struct CompleteAdoptionRequest {
    #[serde(default)]
    pub pet_id: String,
    #[serde(default)]
    pub pet_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdoptionResponse {
    pub transaction_id: String,
    pub pet_id: String,
    pub pet_type: String,
    pub adoption_date: DateTime<Utc>,
}

impl From<Adoption> for AdoptionResponse {
    fn from(adoption: Adoption) -> Self {
        Self {
            transaction_id: adoption.transaction_id,
            pet_id: adoption.pet_id,
            pet_type: adoption.pet_type,
            adoption_date: adoption.adoption_date,
        }
    }
}

/// adoption.cleanup.v1 - Drop every adoption record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanupResponse {
    pub result: String,
}
