//! Health reporting over the catalog store and catalog origin.

use tracing::warn;

use crate::dto::health::HealthResponse;
use crate::services::catalog_service::CatalogOrigin;
use crate::state::SharedState;

/// Report overall health: `ok` when the remote catalog is in use and its
/// store still answers, `degraded` otherwise. Degraded operation is fully
/// playable; this is a diagnostic surface only.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    let catalog = state.catalog_origin().label().to_string();
    let puzzles = state.catalog().len();

    let store_reachable = match state.catalog_store() {
        Some(store) => match store.health_check().await {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "catalog store health check failed");
                false
            }
        },
        None => false,
    };

    if store_reachable && matches!(state.catalog_origin(), CatalogOrigin::Remote) {
        HealthResponse::ok(catalog, puzzles)
    } else {
        HealthResponse::degraded(catalog, puzzles)
    }
}
