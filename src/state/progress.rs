//! Per-puzzle progress: the persisted outcome and guess history for one device.

use indexmap::IndexMap;

use crate::dao::models::ProgressEntryEntity;
use crate::state::session::MAX_GUESSES;

/// Lifecycle status of one puzzle for the local player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayStatus {
    /// Guessing is still open.
    Playing,
    /// The title was found. Terminal.
    Won,
    /// The guess budget was exhausted without a match. Terminal.
    Lost,
}

impl PlayStatus {
    /// True for `Won` and `Lost`; no transition leaves a terminal status.
    pub fn is_terminal(self) -> bool {
        matches!(self, PlayStatus::Won | PlayStatus::Lost)
    }
}

/// Outcome and raw guess history for one puzzle, keyed by puzzle id in the
/// progress map. Created lazily: an absent entry means "not started".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEntry {
    /// Current status; mutated only through the game session.
    pub status: PlayStatus,
    /// Raw guesses as submitted, insertion order = attempt order. Never
    /// trimmed or deduplicated.
    pub guesses: Vec<String>,
}

impl ProgressEntry {
    /// Check the guess-count invariant: a terminal entry holds between 1 and
    /// [`MAX_GUESSES`] guesses, a non-terminal entry strictly fewer than
    /// [`MAX_GUESSES`].
    pub fn is_consistent(&self) -> bool {
        if self.status.is_terminal() {
            (1..=MAX_GUESSES).contains(&self.guesses.len())
        } else {
            self.guesses.len() < MAX_GUESSES
        }
    }
}

/// Full progress mapping persisted as one blob, keyed by puzzle id.
/// Insertion-ordered so repeated save/load round-trips are byte-stable.
pub type ProgressMap = IndexMap<String, ProgressEntry>;

impl From<ProgressEntryEntity> for ProgressEntry {
    fn from(value: ProgressEntryEntity) -> Self {
        Self {
            status: value.status,
            guesses: value.guesses,
        }
    }
}

impl From<ProgressEntry> for ProgressEntryEntity {
    fn from(value: ProgressEntry) -> Self {
        Self {
            status: value.status,
            guesses: value.guesses,
        }
    }
}

/// Convert a stored progress mapping into its runtime form.
pub fn map_from_entities(entities: IndexMap<String, ProgressEntryEntity>) -> ProgressMap {
    entities
        .into_iter()
        .map(|(id, entity)| (id, entity.into()))
        .collect()
}

/// Convert the runtime progress mapping into its stored form.
pub fn map_into_entities(map: ProgressMap) -> IndexMap<String, ProgressEntryEntity> {
    map.into_iter()
        .map(|(id, entry)| (id, entry.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_entry_invariant() {
        let entry = ProgressEntry {
            status: PlayStatus::Won,
            guesses: vec!["Dune".into()],
        };
        assert!(entry.is_consistent());

        let empty_terminal = ProgressEntry {
            status: PlayStatus::Lost,
            guesses: Vec::new(),
        };
        assert!(!empty_terminal.is_consistent());
    }

    #[test]
    fn playing_entry_must_stay_under_budget() {
        let entry = ProgressEntry {
            status: PlayStatus::Playing,
            guesses: (0..MAX_GUESSES).map(|i| format!("guess {i}")).collect(),
        };
        assert!(!entry.is_consistent());
    }
}
