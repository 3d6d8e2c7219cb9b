//! Transactional store ports and the helper that runs component work on them

pub mod ports;

use std::sync::Arc;

use flyball_domain::{ErrorKind, PlannerError, Result};
use tokio::task;
use tracing::error;

pub use ports::*;

/// Run `work` inside one transaction on a blocking thread.
///
/// The transaction commits only when `work` returns `Ok`; any error drops it,
/// which rolls every write back. Storage and runtime failures are logged
/// here; rule violations are left to the calling component.
pub(crate) async fn run_in_transaction<T, F>(
    store: &Arc<dyn PlannerStore>,
    mode: TxMode,
    work: F,
) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(&mut dyn StoreTransaction) -> Result<T> + Send + 'static,
{
    let store = Arc::clone(store);

    task::spawn_blocking(move || -> Result<T> {
        let mut tx = store.begin(mode)?;
        let value = work(&mut *tx)?;
        tx.commit()?;
        Ok(value)
    })
    .await
    .map_err(map_join_error)
    .and_then(|result| result)
    .inspect_err(|err| {
        if err.kind() == ErrorKind::Internal {
            error!(?mode, error = %err, "store transaction failed");
        }
    })
}

/// Map JoinError from spawn_blocking to PlannerError.
fn map_join_error(err: task::JoinError) -> PlannerError {
    if err.is_cancelled() {
        PlannerError::Internal("blocking task cancelled".into())
    } else {
        PlannerError::Internal(format!("blocking task failed: {err}"))
    }
}
