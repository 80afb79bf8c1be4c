//! Durable per-device progress persistence.
//!
//! The store holds one blob: the full mapping from puzzle id to progress
//! entry. The core always reads the whole map, mutates one entry, and writes
//! the whole map back; callers serialize those read-modify-write sequences
//! through the application state's progress gate.

mod file;
mod memory;

pub use file::FileProgressStore;
pub use memory::MemoryProgressStore;

use futures::future::BoxFuture;

use crate::dao::models::ProgressMapEntity;
use crate::dao::storage::StorageResult;

/// Abstraction over the durable progress blob.
pub trait ProgressStore: Send + Sync {
    /// Load the full progress mapping. Missing or malformed stored data is
    /// not an error: implementations return an empty map for it and only
    /// fail on genuine I/O trouble.
    fn load(&self) -> BoxFuture<'static, StorageResult<ProgressMapEntity>>;

    /// Replace the stored blob with `map`.
    fn save(&self, map: ProgressMapEntity) -> BoxFuture<'static, StorageResult<()>>;
}
