//! Archive listing payloads.

use serde::Serialize;
use utoipa::ToSchema;

use crate::state::progress::{PlayStatus, ProgressMap};
use crate::state::puzzle::Catalog;

/// One archive row: a daily puzzle and its local outcome.
#[derive(Debug, Serialize, ToSchema)]
pub struct ArchiveItem {
    /// Date id of the puzzle.
    pub id: String,
    /// Human-facing puzzle number, counted from the oldest puzzle up.
    pub puzzle_number: usize,
    /// Local status, absent when the puzzle was never started.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub status: Option<PlayStatus>,
}

/// The full archive listing, newest puzzle first.
#[derive(Debug, Serialize, ToSchema)]
pub struct ArchiveResponse {
    /// Archive rows in catalog order.
    pub puzzles: Vec<ArchiveItem>,
    /// Whether the catalog came from the remote store or the built-in
    /// fallback list.
    pub catalog_origin: String,
}

impl ArchiveResponse {
    /// Build the listing for `catalog`, joining in per-puzzle progress.
    pub fn build(catalog: &Catalog, progress: &ProgressMap, catalog_origin: String) -> Self {
        let total = catalog.len();
        let puzzles = catalog
            .puzzles()
            .iter()
            .enumerate()
            .map(|(index, puzzle)| ArchiveItem {
                id: puzzle.id.clone(),
                puzzle_number: total - index,
                status: progress.get(&puzzle.id).map(|entry| entry.status),
            })
            .collect();

        Self {
            puzzles,
            catalog_origin,
        }
    }
}
