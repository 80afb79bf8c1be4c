//! The per-puzzle guess/reveal state machine.
//!
//! A session starts in `Playing` with an empty guess sequence (or is restored
//! to the exact status and guesses of an existing progress entry) and moves to
//! the terminal `Won`/`Lost` statuses through [`PuzzleSession::submit_guess`].
//! Clue disclosure is a pure function of guess count and status, not state.

use thiserror::Error;

use crate::state::progress::{PlayStatus, ProgressEntry};
use crate::state::puzzle::Puzzle;

/// Maximum number of guesses before a puzzle is lost.
pub const MAX_GUESSES: usize = 5;

/// Progressively revealed attributes of the answer, in unlock order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clue {
    /// Box-office figure and lead production company.
    BoxOffice,
    /// Release year.
    ReleaseYear,
    /// Genre list.
    Genres,
    /// Director name.
    Director,
}

impl Clue {
    /// All clues in unlock order.
    pub const ALL: [Clue; 4] = [
        Clue::BoxOffice,
        Clue::ReleaseYear,
        Clue::Genres,
        Clue::Director,
    ];

    /// Number of guesses required before this clue unlocks.
    fn rank(self) -> usize {
        match self {
            Clue::BoxOffice => 1,
            Clue::ReleaseYear => 2,
            Clue::Genres => 3,
            Clue::Director => 4,
        }
    }
}

/// Error returned when a guess is submitted against a finished puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("puzzle `{puzzle_id}` is already over; no further guesses accepted")]
pub struct SessionOver {
    /// Id of the puzzle whose session is terminal.
    pub puzzle_id: String,
}

/// Result of one [`PuzzleSession::submit_guess`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The text trimmed to nothing: no state change, nothing to persist.
    Rejected,
    /// The guess was recorded and the session transitioned (possibly to the
    /// same `Playing` status). Carries the entry to persist.
    Accepted {
        /// Whether the guess matched the title.
        correct: bool,
        /// Status after the transition.
        status: PlayStatus,
    },
}

/// In-memory state for the puzzle currently being played.
#[derive(Debug, Clone)]
pub struct PuzzleSession {
    puzzle: Puzzle,
    status: PlayStatus,
    guesses: Vec<String>,
}

impl PuzzleSession {
    /// Open a session for `puzzle`, restoring status and guess sequence from
    /// an existing progress entry when one is present.
    pub fn new(puzzle: Puzzle, saved: Option<ProgressEntry>) -> Self {
        match saved {
            Some(entry) => Self {
                puzzle,
                status: entry.status,
                guesses: entry.guesses,
            },
            None => Self {
                puzzle,
                status: PlayStatus::Playing,
                guesses: Vec::new(),
            },
        }
    }

    /// The puzzle this session is playing.
    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    /// Current status.
    pub fn status(&self) -> PlayStatus {
        self.status
    }

    /// Raw guesses in attempt order.
    pub fn guesses(&self) -> &[String] {
        &self.guesses
    }

    /// Guesses left before the puzzle is lost.
    pub fn remaining_guesses(&self) -> usize {
        MAX_GUESSES.saturating_sub(self.guesses.len())
    }

    /// Submit a guess. Only legal while `Playing`.
    ///
    /// Text that trims to nothing is rejected without any state change. An
    /// accepted guess is appended raw and unconditionally (the winning guess
    /// is recorded too), then compared to the title case-insensitively and
    /// whitespace-exactly: a match wins, the [`MAX_GUESSES`]th miss loses,
    /// anything else stays `Playing`.
    pub fn submit_guess(&mut self, text: &str) -> Result<SubmitOutcome, SessionOver> {
        if self.status.is_terminal() {
            return Err(SessionOver {
                puzzle_id: self.puzzle.id.clone(),
            });
        }

        if text.trim().is_empty() {
            return Ok(SubmitOutcome::Rejected);
        }

        let correct = text.to_lowercase() == self.puzzle.title.to_lowercase();
        self.guesses.push(text.to_owned());

        self.status = if correct {
            PlayStatus::Won
        } else if self.guesses.len() >= MAX_GUESSES {
            PlayStatus::Lost
        } else {
            PlayStatus::Playing
        };

        Ok(SubmitOutcome::Accepted {
            correct,
            status: self.status,
        })
    }

    /// Whether `clue` is currently visible: unlocked by enough guesses, or by
    /// the session having reached a terminal status.
    pub fn clue_visible(&self, clue: Clue) -> bool {
        self.guesses.len() >= clue.rank() || self.status.is_terminal()
    }

    /// Progress entry capturing the session's current status and guesses.
    pub fn progress_entry(&self) -> ProgressEntry {
        ProgressEntry {
            status: self.status,
            guesses: self.guesses.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::puzzle::CastMember;

    fn dune() -> Puzzle {
        Puzzle {
            id: "2026-01-24".into(),
            title: "Dune".into(),
            poster: String::new(),
            cast: (0..4)
                .map(|i| CastMember {
                    name: format!("Actor {i}"),
                    image: String::new(),
                })
                .collect(),
            director: "Denis Villeneuve".into(),
            release_year: "2021".into(),
            box_office: "$402,027,830".into(),
            production_company: "Legendary Pictures".into(),
            genres: vec!["Science Fiction".into()],
        }
    }

    fn visible_clues(session: &PuzzleSession) -> [bool; 4] {
        [
            session.clue_visible(Clue::BoxOffice),
            session.clue_visible(Clue::ReleaseYear),
            session.clue_visible(Clue::Genres),
            session.clue_visible(Clue::Director),
        ]
    }

    #[test]
    fn fresh_session_is_playing_with_no_clues() {
        let session = PuzzleSession::new(dune(), None);
        assert_eq!(session.status(), PlayStatus::Playing);
        assert!(session.guesses().is_empty());
        assert_eq!(visible_clues(&session), [false; 4]);
    }

    #[test]
    fn case_insensitive_match_wins_on_first_attempt() {
        let mut session = PuzzleSession::new(dune(), None);
        let outcome = session.submit_guess("dune").unwrap();
        assert_eq!(
            outcome,
            SubmitOutcome::Accepted {
                correct: true,
                status: PlayStatus::Won,
            }
        );
        assert_eq!(session.guesses(), ["dune"]);
        assert_eq!(visible_clues(&session), [true; 4]);
    }

    #[test]
    fn whitespace_is_not_normalized_for_matching() {
        let mut session = PuzzleSession::new(dune(), None);
        let outcome = session.submit_guess(" Dune").unwrap();
        assert_eq!(
            outcome,
            SubmitOutcome::Accepted {
                correct: false,
                status: PlayStatus::Playing,
            }
        );
    }

    #[test]
    fn empty_and_blank_guesses_are_rejected_without_state_change() {
        let mut session = PuzzleSession::new(dune(), None);
        assert_eq!(session.submit_guess("").unwrap(), SubmitOutcome::Rejected);
        assert_eq!(
            session.submit_guess("   \t").unwrap(),
            SubmitOutcome::Rejected
        );
        assert!(session.guesses().is_empty());
        assert_eq!(session.status(), PlayStatus::Playing);
    }

    #[test]
    fn five_misses_lose_and_reveal_every_clue() {
        let mut session = PuzzleSession::new(dune(), None);
        for (i, guess) in ["Inception", "Oppenheimer", "Titanic", "Matrix", "Alien"]
            .iter()
            .enumerate()
        {
            let outcome = session.submit_guess(guess).unwrap();
            let expected = if i + 1 == MAX_GUESSES {
                PlayStatus::Lost
            } else {
                PlayStatus::Playing
            };
            assert_eq!(
                outcome,
                SubmitOutcome::Accepted {
                    correct: false,
                    status: expected,
                }
            );
        }
        assert_eq!(session.status(), PlayStatus::Lost);
        assert_eq!(session.guesses().len(), MAX_GUESSES);
        assert_eq!(visible_clues(&session), [true; 4]);
        assert!(session.progress_entry().is_consistent());
    }

    #[test]
    fn match_on_final_attempt_wins_before_the_cap_applies() {
        let mut session = PuzzleSession::new(dune(), None);
        for guess in ["Inception", "Oppenheimer", "Titanic", "Matrix"] {
            session.submit_guess(guess).unwrap();
        }
        let outcome = session.submit_guess("Dune").unwrap();
        assert_eq!(
            outcome,
            SubmitOutcome::Accepted {
                correct: true,
                status: PlayStatus::Won,
            }
        );
    }

    #[test]
    fn clue_gating_after_two_misses() {
        let mut session = PuzzleSession::new(dune(), None);
        session.submit_guess("Inception").unwrap();
        session.submit_guess("Oppenheimer").unwrap();
        assert_eq!(visible_clues(&session), [true, true, false, false]);
    }

    #[test]
    fn terminal_session_refuses_further_guesses() {
        let mut session = PuzzleSession::new(dune(), None);
        session.submit_guess("Dune").unwrap();
        let err = session.submit_guess("Inception").unwrap_err();
        assert_eq!(err.puzzle_id, "2026-01-24");
        assert_eq!(session.guesses().len(), 1);
    }

    #[test]
    fn restored_session_resumes_exact_status_and_guesses() {
        let saved = ProgressEntry {
            status: PlayStatus::Playing,
            guesses: vec!["Inception".into(), "Titanic".into()],
        };
        let session = PuzzleSession::new(dune(), Some(saved.clone()));
        assert_eq!(session.status(), PlayStatus::Playing);
        assert_eq!(session.guesses(), saved.guesses.as_slice());
        assert_eq!(visible_clues(&session), [true, true, false, false]);

        let finished = ProgressEntry {
            status: PlayStatus::Lost,
            guesses: vec!["a".into(), "b".into(), "c".into(), "d".into(), "e".into()],
        };
        let session = PuzzleSession::new(dune(), Some(finished));
        assert_eq!(session.status(), PlayStatus::Lost);
        assert_eq!(visible_clues(&session), [true; 4]);
    }

    #[test]
    fn progress_entry_stays_consistent_after_every_transition() {
        let mut session = PuzzleSession::new(dune(), None);
        for guess in ["Inception", "Oppenheimer", "dune"] {
            session.submit_guess(guess).unwrap();
            assert!(session.progress_entry().is_consistent());
        }
    }
}
