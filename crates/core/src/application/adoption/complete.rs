// Complete Adoption Use Case

use super::MethodLog;
use crate::context::RequestContext;
use crate::domain::Adoption;
use crate::error::AdoptionError;
use crate::port::{IdProvider, RecordStore, TimeProvider};

pub(crate) const METHOD: &str = "CompleteAdoption";

/// Execute complete-adoption
///
/// Order is strict: the availability update only runs after the transaction
/// row was created. A failed availability update is not compensated; the
/// persisted adoption is returned inside the error.
pub(crate) async fn execute(
    store: &dyn RecordStore,
    log: &MethodLog<'_>,
    id_provider: &dyn IdProvider,
    time_provider: &dyn TimeProvider,
    ctx: &RequestContext,
    pet_id: &str,
    pet_type: &str,
) -> Result<Adoption, AdoptionError> {
    let adoption = Adoption::new(
        id_provider.generate_id(),
        pet_id,
        pet_type,
        time_provider.now(),
    );

    // Logged before persistence, regardless of its outcome
    log.info(vec![("transaction", format!("{:?}", adoption))]);

    if let Err(err) = store.create_transaction(ctx, &adoption).await {
        log.error(&err);
        return Err(AdoptionError::Transaction(err));
    }

    if let Err(err) = store.update_availability(ctx, &adoption).await {
        log.error(&err);
        return Err(AdoptionError::Availability {
            adoption,
            source: err,
        });
    }

    Ok(adoption)
}
