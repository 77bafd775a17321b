//! RPC Error Types
//!
//! Maps application errors to JSON-RPC error codes.

use crate::types::AdoptionResponse;
use jsonrpsee::types::ErrorObjectOwned;
use petadoption_core::error::{AdoptionError, AppError};

/// RPC Error Codes
pub mod code {
    pub const VALIDATION_ERROR: i32 = 4000;
    pub const DB_ERROR: i32 = 5001;
    pub const CANCELLED: i32 = 5003;
    pub const AVAILABILITY_SYNC_FAILED: i32 = 5004;
}

/// Convert AppError to JSON-RPC ErrorObject
pub fn to_rpc_error(err: AppError) -> ErrorObjectOwned {
    match err {
        AppError::Validation(msg) => {
            ErrorObjectOwned::owned(code::VALIDATION_ERROR, msg, None::<()>)
        }
        AppError::Database(msg) => ErrorObjectOwned::owned(code::DB_ERROR, msg, None::<()>),
        e @ (AppError::Cancelled | AppError::DeadlineExceeded) => {
            ErrorObjectOwned::owned(code::CANCELLED, e.to_string(), None::<()>)
        }
    }
}

/// Convert AdoptionError to JSON-RPC ErrorObject
///
/// An availability failure carries the persisted adoption in `data`.
pub fn adoption_error_to_rpc(err: AdoptionError) -> ErrorObjectOwned {
    match err {
        AdoptionError::Transaction(e) => to_rpc_error(e),
        AdoptionError::Availability { adoption, source } => ErrorObjectOwned::owned(
            code::AVAILABILITY_SYNC_FAILED,
            source.to_string(),
            Some(AdoptionResponse::from(adoption)),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use petadoption_core::domain::Adoption;

    #[test]
    fn test_database_error_code() {
        let err = to_rpc_error(AppError::Database("store unavailable".into()));
        assert_eq!(err.code(), code::DB_ERROR);
        assert_eq!(err.message(), "store unavailable");
    }

    #[test]
    fn test_validation_error_code() {
        let err = to_rpc_error(AppError::Validation("pet_id must be a string".into()));
        assert_eq!(err.code(), code::VALIDATION_ERROR);
        assert_eq!(err.message(), "pet_id must be a string");
    }

    #[test]
    fn test_deadline_error_code() {
        let err = to_rpc_error(AppError::DeadlineExceeded);
        assert_eq!(err.code(), code::CANCELLED);
    }

    #[test]
    fn test_transaction_failure_has_no_data() {
        let err = adoption_error_to_rpc(AdoptionError::Transaction(AppError::Database(
            "down".into(),
        )));
        assert_eq!(err.code(), code::DB_ERROR);
        assert!(err.data().is_none());
    }

    #[test]
    fn test_availability_failure_carries_adoption() {
        let adoption = Adoption::new("tx-1", "pet-1", "puppy", Utc::now());
        let err = adoption_error_to_rpc(AdoptionError::Availability {
            adoption,
            source: AppError::Database("sync failed".into()),
        });

        assert_eq!(err.code(), code::AVAILABILITY_SYNC_FAILED);
        assert_eq!(err.message(), "Database error: sync failed");

        let data: serde_json::Value = serde_json::from_str(err.data().unwrap().get()).unwrap();
        assert_eq!(data["transaction_id"], "tx-1");
        assert_eq!(data["pet_id"], "pet-1");
    }
}
