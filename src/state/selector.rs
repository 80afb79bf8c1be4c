//! Puzzle selection policy: which puzzle to present on load and which to
//! present after a finished one.

use rand::seq::IndexedRandom;

use crate::state::progress::ProgressMap;
use crate::state::puzzle::{Catalog, Puzzle};

/// True when the player can still act on `puzzle`: no progress entry yet, or
/// an entry that is still `Playing`.
fn is_open(puzzle: &Puzzle, progress: &ProgressMap) -> bool {
    progress
        .get(&puzzle.id)
        .is_none_or(|entry| !entry.status.is_terminal())
}

/// Pick the puzzle to present at load time.
///
/// Only the newest puzzle is ever auto-selected: it is returned when it has
/// no progress entry or is still in flight, so the most recent puzzle always
/// comes first. `None` means the newest puzzle is already over (or the
/// catalog is empty) and the caller should present the archive instead;
/// older unplayed puzzles are reachable only through explicit choice.
pub fn select_initial<'a>(catalog: &'a Catalog, progress: &ProgressMap) -> Option<&'a Puzzle> {
    catalog
        .newest()
        .filter(|newest| is_open(newest, progress))
}

/// Pick the puzzle to present after `current_id`.
///
/// Candidates are every other puzzle in catalog order (newest first). The
/// first open candidate wins; when all candidates are terminal one is drawn
/// uniformly at random (deterministically so for a single candidate).
/// Returns `None` only for the single-puzzle catalog, where there is nothing
/// to advance to — callers must treat that as an invalid request.
pub fn select_next<'a>(
    catalog: &'a Catalog,
    progress: &ProgressMap,
    current_id: &str,
) -> Option<&'a Puzzle> {
    let candidates: Vec<&Puzzle> = catalog
        .puzzles()
        .iter()
        .filter(|puzzle| puzzle.id != current_id)
        .collect();

    if let Some(open) = candidates
        .iter()
        .copied()
        .find(|puzzle| is_open(puzzle, progress))
    {
        return Some(open);
    }

    candidates.choose(&mut rand::rng()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::progress::{PlayStatus, ProgressEntry};
    use crate::state::puzzle::CastMember;

    fn puzzle(id: &str, title: &str) -> Puzzle {
        Puzzle {
            id: id.into(),
            title: title.into(),
            poster: String::new(),
            cast: (0..4)
                .map(|i| CastMember {
                    name: format!("Actor {i}"),
                    image: String::new(),
                })
                .collect(),
            director: String::new(),
            release_year: String::new(),
            box_office: String::new(),
            production_company: String::new(),
            genres: Vec::new(),
        }
    }

    fn entry(status: PlayStatus, guesses: usize) -> ProgressEntry {
        ProgressEntry {
            status,
            guesses: (0..guesses).map(|i| format!("guess {i}")).collect(),
        }
    }

    fn sample_catalog() -> Catalog {
        Catalog::new(vec![
            puzzle("2026-01-02", "Dune"),
            puzzle("2026-01-01", "Inception"),
        ])
    }

    #[test]
    fn initial_pick_is_the_newest_puzzle_when_untouched() {
        let catalog = sample_catalog();
        let progress = ProgressMap::new();
        let picked = select_initial(&catalog, &progress).unwrap();
        assert_eq!(picked.id, "2026-01-02");
    }

    #[test]
    fn initial_pick_resumes_an_in_flight_newest_puzzle() {
        let catalog = sample_catalog();
        let mut progress = ProgressMap::new();
        progress.insert("2026-01-02".into(), entry(PlayStatus::Playing, 2));
        let picked = select_initial(&catalog, &progress).unwrap();
        assert_eq!(picked.id, "2026-01-02");
    }

    #[test]
    fn initial_pick_never_returns_a_finished_newest_puzzle() {
        let catalog = sample_catalog();
        for status in [PlayStatus::Won, PlayStatus::Lost] {
            let mut progress = ProgressMap::new();
            progress.insert("2026-01-02".into(), entry(status, 3));
            assert!(select_initial(&catalog, &progress).is_none());
        }
    }

    #[test]
    fn initial_pick_ignores_older_unplayed_puzzles() {
        // Even with an older untouched puzzle available, a finished newest
        // puzzle sends the player to the archive rather than auto-selecting.
        let catalog = sample_catalog();
        let mut progress = ProgressMap::new();
        progress.insert("2026-01-02".into(), entry(PlayStatus::Won, 1));
        assert!(select_initial(&catalog, &progress).is_none());
    }

    #[test]
    fn initial_pick_on_empty_catalog_is_none() {
        let catalog = Catalog::new(Vec::new());
        assert!(select_initial(&catalog, &ProgressMap::new()).is_none());
    }

    #[test]
    fn next_prefers_the_first_open_candidate_in_catalog_order() {
        let catalog = Catalog::new(vec![
            puzzle("2026-01-03", "Dune"),
            puzzle("2026-01-02", "Inception"),
            puzzle("2026-01-01", "Titanic"),
        ]);
        let mut progress = ProgressMap::new();
        progress.insert("2026-01-03".into(), entry(PlayStatus::Won, 1));

        // Both older puzzles are open; catalog order (not recency of play)
        // decides.
        let picked = select_next(&catalog, &progress, "2026-01-03").unwrap();
        assert_eq!(picked.id, "2026-01-02");
    }

    #[test]
    fn next_falls_back_to_a_random_terminal_candidate() {
        let catalog = Catalog::new(vec![
            puzzle("2026-01-03", "Dune"),
            puzzle("2026-01-02", "Inception"),
            puzzle("2026-01-01", "Titanic"),
        ]);
        let mut progress = ProgressMap::new();
        for id in ["2026-01-03", "2026-01-02", "2026-01-01"] {
            progress.insert(id.into(), entry(PlayStatus::Lost, 5));
        }

        for _ in 0..20 {
            let picked = select_next(&catalog, &progress, "2026-01-03").unwrap();
            assert_ne!(picked.id, "2026-01-03");
        }
    }

    #[test]
    fn next_is_deterministic_with_a_single_candidate() {
        let catalog = sample_catalog();
        let mut progress = ProgressMap::new();
        progress.insert("2026-01-01".into(), entry(PlayStatus::Won, 2));
        progress.insert("2026-01-02".into(), entry(PlayStatus::Lost, 5));

        for _ in 0..5 {
            let picked = select_next(&catalog, &progress, "2026-01-02").unwrap();
            assert_eq!(picked.id, "2026-01-01");
        }
    }

    #[test]
    fn next_on_single_puzzle_catalog_is_none() {
        let catalog = Catalog::new(vec![puzzle("2026-01-01", "Dune")]);
        assert!(select_next(&catalog, &ProgressMap::new(), "2026-01-01").is_none());
    }
}
