//! Shared application state and the game's domain types.

pub mod progress;
pub mod puzzle;
pub mod selector;
pub mod session;

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::config::AppConfig;
use crate::dao::catalog_store::CatalogStore;
use crate::dao::progress_store::ProgressStore;
use crate::services::catalog_service::CatalogOrigin;
use crate::services::pacing::PendingAdvance;
use crate::services::suggest_service;
use crate::state::puzzle::Catalog;
use crate::state::session::PuzzleSession;

/// Cheaply clonable handle to the shared application state.
pub type SharedState = Arc<AppState>;

/// Central application state.
///
/// The catalog is immutable once loaded (one fetch at startup, fallback on
/// failure); everything mutable belongs to the single in-memory player
/// session. All state transitions are driven by discrete HTTP requests
/// handled one at a time, so the locks below are coordination for the
/// transport layer, not for background computation — there is none.
pub struct AppState {
    config: AppConfig,
    catalog: Catalog,
    catalog_origin: CatalogOrigin,
    catalog_store: Option<Arc<dyn CatalogStore>>,
    progress_store: Arc<dyn ProgressStore>,
    session: RwLock<Option<PuzzleSession>>,
    pending_advance: Mutex<Option<PendingAdvance>>,
    progress_gate: Mutex<()>,
    suggest_index: Vec<String>,
}

impl AppState {
    /// Construct the shared state from the resolved catalog and stores.
    pub fn new(
        config: AppConfig,
        catalog: Catalog,
        catalog_origin: CatalogOrigin,
        catalog_store: Option<Arc<dyn CatalogStore>>,
        progress_store: Arc<dyn ProgressStore>,
    ) -> SharedState {
        let suggest_index = suggest_service::build_index(&config.suggest_titles, &catalog);
        Arc::new(Self {
            config,
            catalog,
            catalog_origin,
            catalog_store,
            progress_store,
            session: RwLock::new(None),
            pending_advance: Mutex::new(None),
            progress_gate: Mutex::new(()),
            suggest_index,
        })
    }

    /// Runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The loaded puzzle catalog, newest first.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Where the catalog came from (remote store or built-in fallback).
    pub fn catalog_origin(&self) -> &CatalogOrigin {
        &self.catalog_origin
    }

    /// Handle to the remote catalog store, when one was reachable at startup.
    pub fn catalog_store(&self) -> Option<Arc<dyn CatalogStore>> {
        self.catalog_store.clone()
    }

    /// Handle to the durable progress store.
    pub fn progress_store(&self) -> Arc<dyn ProgressStore> {
        Arc::clone(&self.progress_store)
    }

    /// Slot holding the single in-memory player session.
    pub fn session(&self) -> &RwLock<Option<PuzzleSession>> {
        &self.session
    }

    /// Slot holding the pending delayed advance, if one is scheduled.
    pub fn pending_advance(&self) -> &Mutex<Option<PendingAdvance>> {
        &self.pending_advance
    }

    /// Gate serializing progress read-modify-write sequences. Access is
    /// strictly sequential in practice, but the gate keeps the full-map
    /// write atomic with respect to the read that produced it if this ever
    /// runs under real concurrency.
    pub fn progress_gate(&self) -> &Mutex<()> {
        &self.progress_gate
    }

    /// Deduplicated autocomplete title union (curated set, then catalog).
    pub fn suggest_index(&self) -> &[String] {
        &self.suggest_index
    }
}
