// Central Error Types for the Application

use crate::domain::Adoption;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Deadline exceeded")]
    DeadlineExceeded,
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Failure of the complete-adoption use case.
///
/// The store error is carried unchanged; `Display` renders it verbatim.
#[derive(Error, Debug)]
pub enum AdoptionError {
    /// create-transaction failed, nothing was persisted
    #[error(transparent)]
    Transaction(AppError),

    /// The transaction row was persisted but the availability update failed.
    /// No rollback happens, so the adoption is handed back to the caller.
    #[error("{source}")]
    Availability { adoption: Adoption, source: AppError },
}

impl AdoptionError {
    /// The adoption that was persisted, if any
    pub fn adoption(&self) -> Option<&Adoption> {
        match self {
            AdoptionError::Transaction(_) => None,
            AdoptionError::Availability { adoption, .. } => Some(adoption),
        }
    }

    /// The underlying store error
    pub fn cause(&self) -> &AppError {
        match self {
            AdoptionError::Transaction(err) => err,
            AdoptionError::Availability { source, .. } => source,
        }
    }

    /// Split into (adoption, error). A failed create yields the zero-value adoption.
    pub fn into_parts(self) -> (Adoption, AppError) {
        match self {
            AdoptionError::Transaction(err) => (Adoption::default(), err),
            AdoptionError::Availability { adoption, source } => (adoption, source),
        }
    }
}
