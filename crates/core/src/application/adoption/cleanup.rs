// Cleanup Adoptions Use Case

use super::MethodLog;
use crate::context::RequestContext;
use crate::error::Result;
use crate::port::RecordStore;

pub(crate) const METHOD: &str = "CleanupAdoptions";

/// Execute cleanup-adoptions: drops every transaction, no filter, no confirmation
pub(crate) async fn execute(
    store: &dyn RecordStore,
    log: &MethodLog<'_>,
    ctx: &RequestContext,
) -> Result<String> {
    log.info(Vec::new());

    if let Err(err) = store.drop_transactions(ctx).await {
        log.error(&err);
        return Err(err);
    }

    Ok(String::new())
}
