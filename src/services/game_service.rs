//! Session lifecycle: start/resume, guessing, and puzzle advancing.

use std::time::Duration;

use tracing::{info, warn};

use crate::dto::game::{
    GuessRequest, GuessResponse, NextPuzzleRequest, NextPuzzleResponse, SessionView,
    StartSessionRequest,
};
use crate::error::ServiceError;
use crate::services::pacing;
use crate::state::SharedState;
use crate::state::progress::{ProgressEntry, ProgressMap, map_from_entities};
use crate::state::selector;
use crate::state::session::{PuzzleSession, SubmitOutcome};

/// Start or resume a puzzle session.
///
/// Without an explicit id the newest puzzle is selected; a finished newest
/// puzzle is a conflict and the caller should offer the archive instead. Any
/// pending delayed advance is cancelled first.
pub async fn start_session(
    state: &SharedState,
    request: StartSessionRequest,
) -> Result<SessionView, ServiceError> {
    pacing::cancel(state).await;

    let progress = load_progress(state).await;
    let catalog = state.catalog();

    let puzzle = match request.puzzle_id {
        Some(ref id) => catalog
            .get(id)
            .ok_or_else(|| ServiceError::NotFound(format!("puzzle `{id}` not found")))?,
        None => selector::select_initial(catalog, &progress).ok_or_else(|| {
            ServiceError::InvalidState(
                "the newest puzzle is already finished; choose one from the archive".into(),
            )
        })?,
    };

    let saved = progress.get(&puzzle.id).cloned();
    let session = PuzzleSession::new(puzzle.clone(), saved);
    let view = SessionView::from(&session);

    let mut slot = state.session().write().await;
    *slot = Some(session);

    info!(puzzle = %view.puzzle_id, "opened puzzle session");
    Ok(view)
}

/// Snapshot the current session.
pub async fn current_session(state: &SharedState) -> Result<SessionView, ServiceError> {
    let guard = state.session().read().await;
    let session = guard
        .as_ref()
        .ok_or_else(|| ServiceError::NotFound("no active puzzle session".into()))?;
    Ok(SessionView::from(session))
}

/// Submit a guess against the current session.
///
/// The in-memory transition always happens first; the progress write is
/// best-effort and its failure is reported through the `persisted` flag and
/// a warning log, never as a request error.
pub async fn submit_guess(
    state: &SharedState,
    request: GuessRequest,
) -> Result<GuessResponse, ServiceError> {
    let mut guard = state.session().write().await;
    let session = guard
        .as_mut()
        .ok_or_else(|| ServiceError::NotFound("no active puzzle session".into()))?;

    let outcome = session.submit_guess(&request.text)?;

    match outcome {
        SubmitOutcome::Rejected => Ok(GuessResponse {
            accepted: false,
            correct: false,
            persisted: true,
            session: SessionView::from(&*session),
        }),
        SubmitOutcome::Accepted { correct, .. } => {
            let puzzle_id = session.puzzle().id.clone();
            let entry = session.progress_entry();
            let view = SessionView::from(&*session);

            let persisted = persist_entry(state, &puzzle_id, entry).await;

            Ok(GuessResponse {
                accepted: true,
                correct,
                persisted,
                session: view,
            })
        }
    }
}

/// Advance to the next puzzle, immediately or after a pacing delay.
pub async fn next_puzzle(
    state: &SharedState,
    request: NextPuzzleRequest,
) -> Result<NextPuzzleResponse, ServiceError> {
    match request.delay_ms {
        Some(delay_ms) => {
            {
                let guard = state.session().read().await;
                if guard.is_none() {
                    return Err(ServiceError::NotFound("no active puzzle session".into()));
                }
            }

            pacing::schedule(state, Duration::from_millis(delay_ms)).await;
            Ok(NextPuzzleResponse {
                scheduled_in_ms: Some(delay_ms),
                session: None,
            })
        }
        None => {
            pacing::cancel(state).await;
            let view = advance(state).await?;
            Ok(NextPuzzleResponse {
                scheduled_in_ms: None,
                session: Some(view),
            })
        }
    }
}

/// Replace the current session with the next puzzle per the selection policy.
pub async fn advance(state: &SharedState) -> Result<SessionView, ServiceError> {
    let mut guard = state.session().write().await;
    let current = guard
        .as_ref()
        .ok_or_else(|| ServiceError::NotFound("no active puzzle session".into()))?;
    let current_id = current.puzzle().id.clone();

    let progress = load_progress(state).await;
    let next = selector::select_next(state.catalog(), &progress, &current_id).ok_or_else(|| {
        ServiceError::InvalidState("the catalog holds no other puzzle to advance to".into())
    })?;

    let saved = progress.get(&next.id).cloned();
    let session = PuzzleSession::new(next.clone(), saved);
    let view = SessionView::from(&session);
    *guard = Some(session);

    info!(from = %current_id, to = %view.puzzle_id, "advanced to next puzzle");
    Ok(view)
}

/// Tear the in-memory session down, cancelling any pending delayed advance.
/// Persisted progress is untouched.
pub async fn teardown(state: &SharedState) {
    pacing::cancel(state).await;
    let mut guard = state.session().write().await;
    if guard.take().is_some() {
        info!("puzzle session torn down");
    }
}

/// Load the full progress map, treating storage failure as "no progress".
/// Read-only callers can safely continue with an empty map.
pub async fn load_progress(state: &SharedState) -> ProgressMap {
    match state.progress_store().load().await {
        Ok(entities) => map_from_entities(entities),
        Err(err) => {
            warn!(error = %err, "failed to load progress; treating as empty");
            ProgressMap::new()
        }
    }
}

/// Read-modify-write one progress entry under the progress gate. Returns
/// whether the blob was durably updated.
///
/// A failed read skips the write entirely rather than risking clobbering the
/// stored blob with a partial map.
async fn persist_entry(state: &SharedState, puzzle_id: &str, entry: ProgressEntry) -> bool {
    let _gate = state.progress_gate().lock().await;
    let store = state.progress_store();

    let mut map = match store.load().await {
        Ok(map) => map,
        Err(err) => {
            warn!(
                puzzle = puzzle_id,
                error = %err,
                "failed to read progress before write; guess not persisted"
            );
            return false;
        }
    };

    map.insert(puzzle_id.to_owned(), entry.into());

    match store.save(map).await {
        Ok(()) => true,
        Err(err) => {
            warn!(
                puzzle = puzzle_id,
                error = %err,
                "failed to persist progress; session state advanced in memory only"
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::config::AppConfig;
    use crate::dao::models::ProgressEntryEntity;
    use crate::dao::progress_store::{MemoryProgressStore, ProgressStore};
    use crate::services::catalog_service::CatalogOrigin;
    use crate::state::AppState;
    use crate::state::progress::PlayStatus;
    use crate::state::puzzle::{CastMember, Catalog, Puzzle};

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

    fn test_state() -> (SharedState, MemoryProgressStore) {
        let store = MemoryProgressStore::new();
        let catalog = Catalog::new(vec![
            puzzle("2026-01-02", "Dune"),
            puzzle("2026-01-01", "Inception"),
        ]);
        let state = AppState::new(
            AppConfig::default(),
            catalog,
            CatalogOrigin::Remote,
            None,
            Arc::new(store.clone()),
        );
        (state, store)
    }

    #[tokio::test]
    async fn start_selects_the_newest_puzzle_by_default() {
        let (state, _) = test_state();
        let view = start_session(&state, StartSessionRequest::default())
            .await
            .unwrap();
        assert_eq!(view.puzzle_id, "2026-01-02");
        assert_eq!(view.status, PlayStatus::Playing);
    }

    #[tokio::test]
    async fn start_conflicts_when_the_newest_puzzle_is_over() {
        let (state, store) = test_state();
        let mut map = store.snapshot();
        map.insert(
            "2026-01-02".into(),
            ProgressEntryEntity {
                status: PlayStatus::Won,
                guesses: vec!["Dune".into()],
            },
        );
        store.save(map).await.unwrap();

        let err = start_session(&state, StartSessionRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidState(_)));
    }

    #[tokio::test]
    async fn guesses_persist_synchronously_with_the_transition() {
        let (state, store) = test_state();
        start_session(&state, StartSessionRequest::default())
            .await
            .unwrap();

        let response = submit_guess(
            &state,
            GuessRequest {
                text: "Inception".into(),
            },
        )
        .await
        .unwrap();
        assert!(response.accepted);
        assert!(!response.correct);
        assert!(response.persisted);

        let stored = store.snapshot();
        let entry = stored.get("2026-01-02").unwrap();
        assert_eq!(entry.status, PlayStatus::Playing);
        assert_eq!(entry.guesses, ["Inception"]);

        let response = submit_guess(&state, GuessRequest { text: "dune".into() })
            .await
            .unwrap();
        assert!(response.correct);
        assert_eq!(response.session.status, PlayStatus::Won);
        assert_eq!(response.session.title.as_deref(), Some("Dune"));

        let stored = store.snapshot();
        let entry = stored.get("2026-01-02").unwrap();
        assert_eq!(entry.status, PlayStatus::Won);
        assert_eq!(entry.guesses, ["Inception", "dune"]);
    }

    #[tokio::test]
    async fn blank_guesses_change_nothing_and_write_nothing() {
        let (state, store) = test_state();
        start_session(&state, StartSessionRequest::default())
            .await
            .unwrap();

        let response = submit_guess(
            &state,
            GuessRequest {
                text: "   ".into(),
            },
        )
        .await
        .unwrap();
        assert!(!response.accepted);
        assert!(response.session.guesses.is_empty());
        assert!(store.snapshot().is_empty());
    }

    #[tokio::test]
    async fn restart_resumes_from_persisted_progress() {
        let (state, _) = test_state();
        start_session(&state, StartSessionRequest::default())
            .await
            .unwrap();
        submit_guess(
            &state,
            GuessRequest {
                text: "Titanic".into(),
            },
        )
        .await
        .unwrap();

        // Simulate a reload: drop the in-memory session, start again.
        teardown(&state).await;
        let view = start_session(&state, StartSessionRequest::default())
            .await
            .unwrap();
        assert_eq!(view.guesses, ["Titanic"]);
        assert_eq!(view.status, PlayStatus::Playing);
    }

    #[tokio::test]
    async fn immediate_advance_moves_to_the_next_open_puzzle() {
        let (state, _) = test_state();
        start_session(&state, StartSessionRequest::default())
            .await
            .unwrap();
        for text in ["a", "b", "c", "d", "e"] {
            submit_guess(&state, GuessRequest { text: text.into() })
                .await
                .unwrap();
        }

        let response = next_puzzle(&state, NextPuzzleRequest::default())
            .await
            .unwrap();
        let view = response.session.unwrap();
        assert_eq!(view.puzzle_id, "2026-01-01");
        assert_eq!(view.status, PlayStatus::Playing);
    }

    #[tokio::test]
    async fn guessing_without_a_session_is_not_found() {
        let (state, _) = test_state();
        let err = submit_guess(&state, GuessRequest { text: "Dune".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn explicit_start_of_an_unknown_puzzle_is_not_found() {
        let (state, _) = test_state();
        let err = start_session(
            &state,
            StartSessionRequest {
                puzzle_id: Some("2001-01-01".into()),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
