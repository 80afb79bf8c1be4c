use serde::{Deserialize, Serialize};

use crate::dao::models::{CastMemberEntity, PuzzleEntity};

/// Puzzle document as stored in the `puzzles` collection. The date id is the
/// primary key, which keeps the `_id` index usable for the catalog window
/// query (date strings sort lexicographically in chronological order).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoPuzzleDocument {
    #[serde(rename = "_id")]
    id: String,
    title: String,
    poster: String,
    cast: Vec<CastMemberEntity>,
    director: String,
    #[serde(rename = "releaseYear")]
    release_year: String,
    #[serde(rename = "boxOffice")]
    box_office: String,
    #[serde(rename = "productionCompany")]
    production_company: String,
    genres: Vec<String>,
}

impl From<PuzzleEntity> for MongoPuzzleDocument {
    fn from(value: PuzzleEntity) -> Self {
        Self {
            id: value.id,
            title: value.title,
            poster: value.poster,
            cast: value.cast,
            director: value.director,
            release_year: value.release_year,
            box_office: value.box_office,
            production_company: value.production_company,
            genres: value.genres,
        }
    }
}

impl From<MongoPuzzleDocument> for PuzzleEntity {
    fn from(value: MongoPuzzleDocument) -> Self {
        Self {
            id: value.id,
            title: value.title,
            poster: value.poster,
            cast: value.cast,
            director: value.director,
            release_year: value.release_year,
            box_office: value.box_office,
            production_company: value.production_company,
            genres: value.genres,
        }
    }
}
