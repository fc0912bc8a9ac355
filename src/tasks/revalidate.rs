//! Stale Revalidation Task
//!
//! Background task refreshing a static store entry after its stale copy has
//! already been served. The task is detached: its outcome never affects the
//! served response, and failures are logged rather than surfaced.

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::cache::SharedRegistry;
use crate::net::{FetchRequest, NetworkFetcher};

/// Spawns a detached refetch of `request`, overwriting the entry in
/// `store_name` if the fetch succeeds.
///
/// Non-success upstream statuses are not written back; the stale entry stays
/// in place. Returns the task handle so callers (mainly tests) can await
/// completion, but the router never does.
pub fn spawn_revalidation<N: NetworkFetcher + Clone>(
    registry: SharedRegistry,
    network: N,
    store_name: String,
    request: FetchRequest,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        match network.fetch(&request).await {
            Ok(response) if response.is_success() => {
                let key = request.key();
                registry
                    .write()
                    .await
                    .open(&store_name)
                    .put(key, response);
                debug!(url = %request.url, store = %store_name, "Revalidated static entry");
            }
            Ok(response) => {
                debug!(
                    url = %request.url,
                    status = response.status,
                    "Revalidation returned non-success status, keeping stale entry"
                );
            }
            Err(e) => {
                warn!(url = %request.url, error = %e, "Background revalidation failed");
            }
        }
    })
}
