//! One-shot catalog loading with explicit fallback.

use std::sync::Arc;

use time::OffsetDateTime;
use tracing::{info, warn};

use crate::dao::catalog_store::CatalogStore;
use crate::state::puzzle::{Catalog, fallback_catalog};

/// Where the loaded catalog came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogOrigin {
    /// The remote store answered with a non-empty catalog.
    Remote,
    /// The built-in list is in use.
    Fallback {
        /// Why the remote catalog was not used.
        reason: String,
    },
}

impl CatalogOrigin {
    /// Short label used in health payloads and logs.
    pub fn label(&self) -> &'static str {
        match self {
            CatalogOrigin::Remote => "remote",
            CatalogOrigin::Fallback { .. } => "fallback",
        }
    }
}

/// Result of the startup catalog load: the catalog plus its origin tag.
/// Callers branch on the tag; there is no nullable store handle to probe.
pub struct CatalogLoad {
    /// The resolved catalog, guaranteed non-empty.
    pub catalog: Catalog,
    /// Where it came from.
    pub origin: CatalogOrigin,
}

/// Today's UTC calendar date as a `YYYY-MM-DD` string.
pub fn today_utc() -> String {
    let date = OffsetDateTime::now_utc().date();
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Load the catalog window (`id <= today`, newest first, at most `limit`)
/// from the store, degrading to the built-in fallback list on any failure or
/// an empty result.
///
/// This runs exactly once at startup and is never retried; puzzle selection
/// waits on its outcome.
pub async fn load(
    store: Option<&Arc<dyn CatalogStore>>,
    today: String,
    limit: usize,
) -> CatalogLoad {
    let Some(store) = store else {
        return fall_back("no catalog store configured");
    };

    match store.fetch_catalog(today, limit).await {
        Ok(entities) => {
            let fetched = entities.len();
            let catalog = Catalog::new(entities.into_iter().map(Into::into).collect());
            if catalog.is_empty() {
                if fetched == 0 {
                    fall_back("remote catalog is empty")
                } else {
                    fall_back("remote catalog held no playable puzzles")
                }
            } else {
                info!(puzzles = catalog.len(), "loaded catalog from remote store");
                CatalogLoad {
                    catalog,
                    origin: CatalogOrigin::Remote,
                }
            }
        }
        Err(err) => fall_back(&format!("catalog fetch failed: {err}")),
    }
}

fn fall_back(reason: &str) -> CatalogLoad {
    warn!(reason, "using built-in fallback catalog");
    CatalogLoad {
        catalog: fallback_catalog(),
        origin: CatalogOrigin::Fallback {
            reason: reason.to_owned(),
        },
    }
}
