// Domain Layer - Pure business entities

pub mod adoption;

// Re-exports
pub use adoption::{Adoption, PetId, TransactionId};
