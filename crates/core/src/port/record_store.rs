// Record Store Port (Interface)

use crate::context::RequestContext;
use crate::domain::Adoption;
use crate::error::Result;
use async_trait::async_trait;

/// Persistence of adoption records and pet availability.
///
/// Implementations must be safe for concurrent use and should honour the
/// cancellation and deadline carried by `ctx`.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persist a new adoption transaction
    async fn create_transaction(&self, ctx: &RequestContext, adoption: &Adoption) -> Result<()>;

    /// Mark the adopted pet as no longer available
    async fn update_availability(&self, ctx: &RequestContext, adoption: &Adoption) -> Result<()>;

    /// Remove every adoption transaction (no filter)
    async fn drop_transactions(&self, ctx: &RequestContext) -> Result<()>;
}
