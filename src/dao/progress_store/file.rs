//! JSON-file-backed progress store.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

use futures::future::BoxFuture;
use thiserror::Error;
use tracing::warn;

use crate::dao::models::ProgressMapEntity;
use crate::dao::progress_store::ProgressStore;
use crate::dao::storage::{StorageError, StorageResult};

/// Failures raised while reading or writing the progress file.
#[derive(Debug, Error)]
pub enum ProgressFileError {
    /// The blob could not be read for a reason other than not existing.
    #[error("failed to read progress file `{path}`")]
    Read {
        /// Path of the blob.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The parent directory could not be created.
    #[error("failed to create progress directory `{path}`")]
    CreateDir {
        /// Directory that could not be created.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The blob could not be written.
    #[error("failed to write progress file `{path}`")]
    Write {
        /// Path of the blob.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The map could not be serialized.
    #[error("failed to encode progress map")]
    Encode {
        /// Underlying serialization failure.
        #[source]
        source: serde_json::Error,
    },
}

impl From<ProgressFileError> for StorageError {
    fn from(err: ProgressFileError) -> Self {
        StorageError::unavailable(err.to_string(), err)
    }
}

/// Progress store persisting the full map as one JSON blob on local disk.
///
/// Durable across restarts on one device; never shared across devices.
#[derive(Clone)]
pub struct FileProgressStore {
    path: Arc<PathBuf>,
}

impl FileProgressStore {
    /// Create a store backed by the blob at `path`. Nothing is touched on
    /// disk until the first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
        }
    }

    async fn load_map(path: &PathBuf) -> Result<ProgressMapEntity, ProgressFileError> {
        let contents = match tokio::fs::read_to_string(path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Ok(ProgressMapEntity::new());
            }
            Err(source) => {
                return Err(ProgressFileError::Read {
                    path: path.display().to_string(),
                    source,
                });
            }
        };

        match serde_json::from_str::<ProgressMapEntity>(&contents) {
            Ok(map) => Ok(map),
            Err(err) => {
                // Malformed persisted progress is recovered by starting over,
                // not by failing the load.
                warn!(
                    path = %path.display(),
                    error = %err,
                    "progress file is malformed; treating as empty"
                );
                Ok(ProgressMapEntity::new())
            }
        }
    }

    async fn save_map(path: &PathBuf, map: ProgressMapEntity) -> Result<(), ProgressFileError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await.map_err(|source| {
                ProgressFileError::CreateDir {
                    path: parent.display().to_string(),
                    source,
                }
            })?;
        }

        let payload = serde_json::to_vec_pretty(&map)
            .map_err(|source| ProgressFileError::Encode { source })?;

        tokio::fs::write(path, payload)
            .await
            .map_err(|source| ProgressFileError::Write {
                path: path.display().to_string(),
                source,
            })
    }
}

impl ProgressStore for FileProgressStore {
    fn load(&self) -> BoxFuture<'static, StorageResult<ProgressMapEntity>> {
        let path = Arc::clone(&self.path);
        Box::pin(async move { Self::load_map(&path).await.map_err(Into::into) })
    }

    fn save(&self, map: ProgressMapEntity) -> BoxFuture<'static, StorageResult<()>> {
        let path = Arc::clone(&self.path);
        Box::pin(async move { Self::save_map(&path, map).await.map_err(Into::into) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::models::ProgressEntryEntity;
    use crate::state::progress::PlayStatus;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join("daily-reel-tests")
            .join(format!("{name}-{}.json", std::process::id()))
    }

    #[tokio::test]
    async fn missing_file_loads_as_empty_map() {
        let store = FileProgressStore::new(scratch_path("missing"));
        let map = store.load().await.unwrap();
        assert!(map.is_empty());
    }

    #[tokio::test]
    async fn save_then_load_round_trips_observable_content() {
        let path = scratch_path("round-trip");
        let store = FileProgressStore::new(&path);

        let mut map = ProgressMapEntity::new();
        map.insert(
            "2026-01-24".into(),
            ProgressEntryEntity {
                status: PlayStatus::Won,
                guesses: vec!["Inception".into(), "Dune".into()],
            },
        );
        map.insert(
            "2026-01-25".into(),
            ProgressEntryEntity {
                status: PlayStatus::Playing,
                guesses: vec!["Barbie".into()],
            },
        );

        store.save(map.clone()).await.unwrap();
        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, map);

        // save(load()) is a no-op on the observable content.
        store.save(loaded).await.unwrap();
        assert_eq!(store.load().await.unwrap(), map);

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn malformed_blob_is_treated_as_no_progress() {
        let path = scratch_path("malformed");
        tokio::fs::create_dir_all(path.parent().unwrap())
            .await
            .unwrap();
        tokio::fs::write(&path, b"{ not json").await.unwrap();

        let store = FileProgressStore::new(&path);
        let map = store.load().await.unwrap();
        assert!(map.is_empty());

        let _ = tokio::fs::remove_file(&path).await;
    }
}
