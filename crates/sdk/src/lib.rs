//! PetAdoption SDK - Rust Client Library
//!
//! # Example
//!
//! ```no_run
//! use petadoption_sdk::PetAdoptionClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PetAdoptionClient::connect("http://127.0.0.1:9528").await?;
//!
//!     let adoption = client.complete_adoption("pet-042", "puppy").await?;
//!     println!("Adopted: {}", adoption.transaction_id);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::PetAdoptionClient;
pub use error::{Result, SdkError};
pub use types::{AdoptionResponse, CleanupResponse, CompleteAdoptionRequest, HealthResponse};
