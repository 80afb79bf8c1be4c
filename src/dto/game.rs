//! Session payloads: start/resume requests, the clue-gated session view,
//! guess submission and the next-puzzle advance.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::dto::validation::validate_puzzle_id;
use crate::state::progress::PlayStatus;
use crate::state::puzzle::CastMember;
use crate::state::session::{Clue, MAX_GUESSES, PuzzleSession};

/// Payload used to start or resume a puzzle session.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct StartSessionRequest {
    /// Explicit puzzle to open. When omitted the newest puzzle is selected,
    /// provided it is not already over.
    #[serde(default)]
    pub puzzle_id: Option<String>,
}

impl Validate for StartSessionRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Some(ref id) = self.puzzle_id
            && let Err(err) = validate_puzzle_id(id)
        {
            errors.add("puzzle_id", err);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Guess submission payload.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct GuessRequest {
    /// Raw guess text. Blank text is silently rejected by the session, not
    /// a validation error.
    #[validate(length(max = 256))]
    pub text: String,
}

/// Payload controlling the advance to the next puzzle.
#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct NextPuzzleRequest {
    /// When present, schedule the advance after this delay instead of
    /// performing it immediately. The pending advance is cancelled by session
    /// teardown, an explicit start, or a newer schedule.
    #[serde(default)]
    #[validate(range(max = 60_000))]
    pub delay_ms: Option<u64>,
}

/// One billed cast member shown on the guess grid.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CastMemberView {
    /// Actor display name.
    pub name: String,
    /// Headshot URL.
    pub image: String,
}

impl From<&CastMember> for CastMemberView {
    fn from(value: &CastMember) -> Self {
        Self {
            name: value.name.clone(),
            image: value.image.clone(),
        }
    }
}

/// The four progressively revealed clues; a locked clue serializes as null.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ClueBoard {
    /// Clue 1: formatted box-office figure.
    pub box_office: Option<String>,
    /// Clue 1: lead production company, revealed together with the figure.
    pub production_company: Option<String>,
    /// Clue 2: release year.
    pub release_year: Option<String>,
    /// Clue 3: genre names.
    pub genres: Option<Vec<String>>,
    /// Clue 4: director name.
    pub director: Option<String>,
}

/// Snapshot of the current session exposed to the client.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SessionView {
    /// Date id of the puzzle being played.
    pub puzzle_id: String,
    /// Session status: `playing`, `won` or `lost`.
    #[schema(value_type = String)]
    pub status: PlayStatus,
    /// Raw guesses in attempt order.
    pub guesses: Vec<String>,
    /// Guesses left before the puzzle is lost.
    pub remaining_guesses: usize,
    /// The fixed guess budget.
    pub max_guesses: usize,
    /// Billed cast photos to guess from.
    pub cast: Vec<CastMemberView>,
    /// Clue board with locked clues nulled out.
    pub clues: ClueBoard,
    /// The answer title, revealed only once the session is over.
    pub title: Option<String>,
    /// Poster URL, revealed only once the session is over.
    pub poster: Option<String>,
}

impl From<&PuzzleSession> for SessionView {
    fn from(session: &PuzzleSession) -> Self {
        let puzzle = session.puzzle();
        let over = session.status().is_terminal();

        let clues = ClueBoard {
            box_office: session
                .clue_visible(Clue::BoxOffice)
                .then(|| puzzle.box_office.clone()),
            production_company: session
                .clue_visible(Clue::BoxOffice)
                .then(|| puzzle.production_company.clone()),
            release_year: session
                .clue_visible(Clue::ReleaseYear)
                .then(|| puzzle.release_year.clone()),
            genres: session
                .clue_visible(Clue::Genres)
                .then(|| puzzle.genres.clone()),
            director: session
                .clue_visible(Clue::Director)
                .then(|| puzzle.director.clone()),
        };

        Self {
            puzzle_id: puzzle.id.clone(),
            status: session.status(),
            guesses: session.guesses().to_vec(),
            remaining_guesses: session.remaining_guesses(),
            max_guesses: MAX_GUESSES,
            cast: puzzle.cast.iter().map(Into::into).collect(),
            clues,
            title: over.then(|| puzzle.title.clone()),
            poster: over.then(|| puzzle.poster.clone()),
        }
    }
}

/// Result of a guess submission.
#[derive(Debug, Serialize, ToSchema)]
pub struct GuessResponse {
    /// False when the text trimmed to nothing and was ignored.
    pub accepted: bool,
    /// Whether the guess matched the answer.
    pub correct: bool,
    /// False only when the progress write failed; the in-memory session has
    /// advanced regardless.
    pub persisted: bool,
    /// Session state after the submission.
    pub session: SessionView,
}

/// Result of a next-puzzle request.
#[derive(Debug, Serialize, ToSchema)]
pub struct NextPuzzleResponse {
    /// Present when the advance was scheduled rather than performed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_in_ms: Option<u64>,
    /// The freshly opened session for an immediate advance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<SessionView>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::puzzle::Puzzle;

    fn dune() -> Puzzle {
        Puzzle {
            id: "2026-01-24".into(),
            title: "Dune".into(),
            poster: "poster.jpg".into(),
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

    #[test]
    fn view_locks_clues_and_answer_for_a_fresh_session() {
        let session = PuzzleSession::new(dune(), None);
        let view = SessionView::from(&session);

        assert_eq!(view.status, PlayStatus::Playing);
        assert!(view.clues.box_office.is_none());
        assert!(view.clues.director.is_none());
        assert!(view.title.is_none());
        assert!(view.poster.is_none());
        assert_eq!(view.remaining_guesses, MAX_GUESSES);
        assert_eq!(view.cast.len(), 4);
    }

    #[test]
    fn view_unlocks_the_first_two_clues_after_two_misses() {
        let mut session = PuzzleSession::new(dune(), None);
        session.submit_guess("Inception").unwrap();
        session.submit_guess("Titanic").unwrap();

        let view = SessionView::from(&session);
        assert_eq!(view.clues.box_office.as_deref(), Some("$402,027,830"));
        assert_eq!(
            view.clues.production_company.as_deref(),
            Some("Legendary Pictures")
        );
        assert_eq!(view.clues.release_year.as_deref(), Some("2021"));
        assert!(view.clues.genres.is_none());
        assert!(view.clues.director.is_none());
        assert!(view.title.is_none());
    }

    #[test]
    fn view_reveals_everything_once_won() {
        let mut session = PuzzleSession::new(dune(), None);
        session.submit_guess("dune").unwrap();

        let view = SessionView::from(&session);
        assert_eq!(view.status, PlayStatus::Won);
        assert_eq!(view.title.as_deref(), Some("Dune"));
        assert_eq!(view.poster.as_deref(), Some("poster.jpg"));
        assert!(view.clues.director.is_some());
    }

    #[test]
    fn start_request_rejects_malformed_puzzle_ids() {
        let request = StartSessionRequest {
            puzzle_id: Some("not-a-date".into()),
        };
        assert!(request.validate().is_err());

        let request = StartSessionRequest {
            puzzle_id: Some("2026-01-24".into()),
        };
        assert!(request.validate().is_ok());

        assert!(StartSessionRequest::default().validate().is_ok());
    }
}
