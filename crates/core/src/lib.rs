// PetAdoption Core - Domain Logic & Ports
// NO infrastructure dependencies (storage, transport and logging sinks are adapters)

pub mod application;
pub mod context;
pub mod domain;
pub mod error;
pub mod port;

pub use context::RequestContext;
pub use error::{AdoptionError, AppError, Result};
