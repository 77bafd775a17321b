// Adoption Domain Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Transaction ID (UUID v4)
pub type TransactionId = String;

/// External pet identifier, opaque to this service
pub type PetId = String;

/// A completed adoption.
///
/// Built once per request, persisted once and never mutated afterwards.
/// Rows are only ever removed in bulk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adoption {
    pub transaction_id: TransactionId,
    pub pet_id: PetId,
    pub pet_type: String,
    pub adoption_date: DateTime<Utc>,
}

impl Adoption {
    pub fn new(
        transaction_id: impl Into<String>,
        pet_id: impl Into<String>,
        pet_type: impl Into<String>,
        adoption_date: DateTime<Utc>,
    ) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            pet_id: pet_id.into(),
            pet_type: pet_type.into(),
            adoption_date,
        }
    }

    /// True for the zero value returned alongside a failed create
    pub fn is_zero(&self) -> bool {
        *self == Adoption::default()
    }
}
