// Application Layer - Use Cases and Business Logic

pub mod adoption;

// Re-exports
pub use adoption::AdoptionService;
