//! Entities shared between storage backends and the runtime layers.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::state::progress::PlayStatus;

/// Billed cast member as stored in a puzzle document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CastMemberEntity {
    /// Actor display name.
    pub name: String,
    /// Headshot URL.
    pub image: String,
}

/// Daily puzzle document persisted by the catalog store, keyed by date id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PuzzleEntity {
    /// Calendar date string (`YYYY-MM-DD`), the document key.
    pub id: String,
    /// Canonical answer title.
    pub title: String,
    /// Poster URL.
    pub poster: String,
    /// Billed cast in display order.
    pub cast: Vec<CastMemberEntity>,
    /// Director name.
    pub director: String,
    /// Release year as a display string.
    #[serde(rename = "releaseYear")]
    pub release_year: String,
    /// Formatted box-office figure.
    #[serde(rename = "boxOffice")]
    pub box_office: String,
    /// Lead production company.
    #[serde(rename = "productionCompany")]
    pub production_company: String,
    /// Up to three genre names.
    pub genres: Vec<String>,
}

/// Stored per-puzzle outcome and guess history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProgressEntryEntity {
    /// Status of the puzzle for the local player.
    pub status: PlayStatus,
    /// Raw guesses in attempt order.
    pub guesses: Vec<String>,
}

/// The full progress blob as stored on disk: one entry per puzzle id, in
/// insertion order.
pub type ProgressMapEntity = IndexMap<String, ProgressEntryEntity>;

impl Serialize for PlayStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let value = match self {
            PlayStatus::Playing => "playing",
            PlayStatus::Won => "won",
            PlayStatus::Lost => "lost",
        };
        serializer.serialize_str(value)
    }
}

impl<'de> Deserialize<'de> for PlayStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        match value.as_str() {
            "playing" => Ok(PlayStatus::Playing),
            "won" => Ok(PlayStatus::Won),
            "lost" => Ok(PlayStatus::Lost),
            other => Err(serde::de::Error::unknown_variant(
                other,
                &["playing", "won", "lost"],
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_status_round_trips_through_the_stored_spelling() {
        for (status, spelled) in [
            (PlayStatus::Playing, "\"playing\""),
            (PlayStatus::Won, "\"won\""),
            (PlayStatus::Lost, "\"lost\""),
        ] {
            assert_eq!(serde_json::to_string(&status).unwrap(), spelled);
            assert_eq!(
                serde_json::from_str::<PlayStatus>(spelled).unwrap(),
                status
            );
        }
        assert!(serde_json::from_str::<PlayStatus>("\"paused\"").is_err());
    }
}
