//! In-memory progress store used by tests and ephemeral runs.

use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;

use crate::dao::models::ProgressMapEntity;
use crate::dao::progress_store::ProgressStore;
use crate::dao::storage::StorageResult;

/// Progress store holding the blob in memory; contents are lost on drop.
#[derive(Clone, Default)]
pub struct MemoryProgressStore {
    map: Arc<Mutex<ProgressMapEntity>>,
}

impl MemoryProgressStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the stored map, mostly for test assertions.
    pub fn snapshot(&self) -> ProgressMapEntity {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ProgressMapEntity> {
        self.map
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ProgressStore for MemoryProgressStore {
    fn load(&self) -> BoxFuture<'static, StorageResult<ProgressMapEntity>> {
        let map = self.lock().clone();
        Box::pin(async move { Ok(map) })
    }

    fn save(&self, map: ProgressMapEntity) -> BoxFuture<'static, StorageResult<()>> {
        *self.lock() = map;
        Box::pin(async move { Ok(()) })
    }
}
