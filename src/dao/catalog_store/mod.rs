//! Remote catalog persistence: one puzzle document per calendar date.

#[cfg(feature = "couch-store")]
pub mod couchdb;
#[cfg(feature = "mongo-store")]
pub mod mongodb;

use std::sync::Arc;

use futures::future::BoxFuture;
use tracing::{info, warn};

use crate::dao::models::PuzzleEntity;
use crate::dao::storage::StorageResult;

/// Abstraction over the document database holding the daily puzzle catalog.
pub trait CatalogStore: Send + Sync {
    /// Fetch up to `limit` puzzles with `id <= today`, ordered by id
    /// descending (newest first). `today` is a `YYYY-MM-DD` date string.
    fn fetch_catalog(
        &self,
        today: String,
        limit: usize,
    ) -> BoxFuture<'static, StorageResult<Vec<PuzzleEntity>>>;

    /// Upsert one puzzle document keyed by its date id. Used by the seeding
    /// tool; the game itself never writes to the catalog.
    fn save_puzzle(&self, puzzle: PuzzleEntity) -> BoxFuture<'static, StorageResult<()>>;

    /// Cheap reachability probe for the health endpoint.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
}

/// Environment variable forcing a specific backend (`couch` or `mongo`).
const STORE_ENV: &str = "DAILY_REEL_STORE";

/// Connect a catalog store based on the environment.
///
/// `DAILY_REEL_STORE` picks the backend explicitly; otherwise CouchDB is
/// tried first, then MongoDB, whichever has its variables set. Returns
/// `None` when no backend is configured or the single connection attempt
/// fails — callers degrade to the built-in fallback catalog, there is no
/// retry loop.
pub async fn connect_from_env() -> Option<Arc<dyn CatalogStore>> {
    match std::env::var(STORE_ENV).ok().as_deref() {
        Some("couch") => connect_couch().await,
        Some("mongo") => connect_mongo().await,
        Some(other) => {
            warn!(store = other, "unknown {STORE_ENV} value; no catalog store");
            None
        }
        None => match connect_couch().await {
            Some(store) => Some(store),
            None => connect_mongo().await,
        },
    }
}

#[cfg(feature = "couch-store")]
async fn connect_couch() -> Option<Arc<dyn CatalogStore>> {
    let config = couchdb::CouchConfig::from_env().ok()?;
    match couchdb::CouchCatalogStore::connect(config).await {
        Ok(store) => {
            info!("connected to CouchDB catalog store");
            Some(Arc::new(store))
        }
        Err(err) => {
            warn!(error = %err, "CouchDB catalog store connection failed");
            None
        }
    }
}

#[cfg(not(feature = "couch-store"))]
async fn connect_couch() -> Option<Arc<dyn CatalogStore>> {
    None
}

#[cfg(feature = "mongo-store")]
async fn connect_mongo() -> Option<Arc<dyn CatalogStore>> {
    let config = mongodb::MongoConfig::from_env().await.ok()?;
    match mongodb::MongoCatalogStore::connect(config).await {
        Ok(store) => {
            info!("connected to MongoDB catalog store");
            Some(Arc::new(store))
        }
        Err(err) => {
            warn!(error = %err, "MongoDB catalog store connection failed");
            None
        }
    }
}

#[cfg(not(feature = "mongo-store"))]
async fn connect_mongo() -> Option<Arc<dyn CatalogStore>> {
    None
}
