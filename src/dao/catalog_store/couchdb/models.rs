use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dao::models::{CastMemberEntity, PuzzleEntity};

#[derive(Debug, Deserialize)]
pub struct AllDocsResponse {
    pub rows: Vec<AllDocsRow>,
}

#[derive(Debug, Deserialize)]
pub struct AllDocsRow {
    pub id: String,
    #[serde(default)]
    pub doc: Option<Value>,
}

/// Puzzle document as stored in CouchDB: the date id doubles as `_id`, the
/// remaining fields are flattened alongside the revision marker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouchPuzzleDocument {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_rev", skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
    #[serde(flatten)]
    pub puzzle: PuzzleBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzleBody {
    pub title: String,
    pub poster: String,
    pub cast: Vec<CastMemberEntity>,
    pub director: String,
    #[serde(rename = "releaseYear")]
    pub release_year: String,
    #[serde(rename = "boxOffice")]
    pub box_office: String,
    #[serde(rename = "productionCompany")]
    pub production_company: String,
    pub genres: Vec<String>,
}

impl From<(PuzzleEntity, Option<String>)> for CouchPuzzleDocument {
    fn from((puzzle, rev): (PuzzleEntity, Option<String>)) -> Self {
        Self {
            id: puzzle.id,
            rev,
            puzzle: PuzzleBody {
                title: puzzle.title,
                poster: puzzle.poster,
                cast: puzzle.cast,
                director: puzzle.director,
                release_year: puzzle.release_year,
                box_office: puzzle.box_office,
                production_company: puzzle.production_company,
                genres: puzzle.genres,
            },
        }
    }
}

impl From<CouchPuzzleDocument> for PuzzleEntity {
    fn from(doc: CouchPuzzleDocument) -> Self {
        Self {
            id: doc.id,
            title: doc.puzzle.title,
            poster: doc.puzzle.poster,
            cast: doc.puzzle.cast,
            director: doc.puzzle.director,
            release_year: doc.puzzle.release_year,
            box_office: doc.puzzle.box_office,
            production_company: doc.puzzle.production_company,
            genres: doc.puzzle.genres,
        }
    }
}
