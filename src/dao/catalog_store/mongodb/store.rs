use std::sync::Arc;

use futures::{TryStreamExt, future::BoxFuture};
use mongodb::{Client, Collection, Database, bson::doc};

use super::{
    config::MongoConfig,
    connection::establish_connection,
    error::{MongoDaoError, MongoResult},
    models::MongoPuzzleDocument,
};
use crate::dao::{catalog_store::CatalogStore, models::PuzzleEntity, storage::StorageResult};

const PUZZLE_COLLECTION_NAME: &str = "puzzles";

/// Catalog store backed by a MongoDB `puzzles` collection.
#[derive(Clone)]
pub struct MongoCatalogStore {
    inner: Arc<MongoInner>,
}

struct MongoInner {
    _client: Client,
    database: Database,
}

impl MongoCatalogStore {
    /// Establish a connection to MongoDB and verify reachability.
    pub async fn connect(config: MongoConfig) -> MongoResult<Self> {
        let (client, database) =
            establish_connection(&config.options, &config.database_name).await?;

        Ok(Self {
            inner: Arc::new(MongoInner {
                _client: client,
                database,
            }),
        })
    }

    fn collection(&self) -> Collection<MongoPuzzleDocument> {
        self.inner
            .database
            .collection::<MongoPuzzleDocument>(PUZZLE_COLLECTION_NAME)
    }

    async fn ping(&self) -> MongoResult<()> {
        self.inner
            .database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|source| MongoDaoError::HealthPing { source })?;
        Ok(())
    }

    async fn fetch_window(&self, today: &str, limit: usize) -> MongoResult<Vec<PuzzleEntity>> {
        let documents: Vec<MongoPuzzleDocument> = self
            .collection()
            .find(doc! { "_id": { "$lte": today } })
            .sort(doc! { "_id": -1 })
            .limit(limit as i64)
            .await
            .map_err(|source| MongoDaoError::FetchCatalog { source })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::FetchCatalog { source })?;

        Ok(documents.into_iter().map(Into::into).collect())
    }

    async fn upsert(&self, puzzle: PuzzleEntity) -> MongoResult<()> {
        let id = puzzle.id.clone();
        let document: MongoPuzzleDocument = puzzle.into();
        self.collection()
            .replace_one(doc! { "_id": &id }, &document)
            .upsert(true)
            .await
            .map_err(|source| MongoDaoError::SavePuzzle { id, source })?;

        Ok(())
    }
}

impl CatalogStore for MongoCatalogStore {
    fn fetch_catalog(
        &self,
        today: String,
        limit: usize,
    ) -> BoxFuture<'static, StorageResult<Vec<PuzzleEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.fetch_window(&today, limit).await.map_err(Into::into) })
    }

    fn save_puzzle(&self, puzzle: PuzzleEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.upsert(puzzle).await.map_err(Into::into) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.ping().await.map_err(Into::into) })
    }
}
