use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use axum_valid::Valid;

use crate::{
    dto::game::{
        GuessRequest, GuessResponse, NextPuzzleRequest, NextPuzzleResponse, SessionView,
        StartSessionRequest,
    },
    error::AppError,
    services::game_service,
    state::SharedState,
};

/// Routes driving the single in-memory puzzle session.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route(
            "/session",
            post(start_session)
                .get(get_session)
                .delete(teardown_session),
        )
        .route("/session/guess", post(submit_guess))
        .route("/session/next", post(next_puzzle))
}

#[utoipa::path(
    post,
    path = "/session",
    tag = "game",
    request_body = StartSessionRequest,
    responses(
        (status = 200, description = "Session opened or resumed", body = SessionView),
        (status = 404, description = "Requested puzzle does not exist"),
        (status = 409, description = "Newest puzzle already finished; pick from the archive")
    )
)]
/// Start or resume a puzzle session.
pub async fn start_session(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<StartSessionRequest>>,
) -> Result<Json<SessionView>, AppError> {
    let view = game_service::start_session(&state, payload).await?;
    Ok(Json(view))
}

#[utoipa::path(
    get,
    path = "/session",
    tag = "game",
    responses(
        (status = 200, description = "Current session snapshot", body = SessionView),
        (status = 404, description = "No active session")
    )
)]
/// Return the current session with clue gating applied.
pub async fn get_session(
    State(state): State<SharedState>,
) -> Result<Json<SessionView>, AppError> {
    let view = game_service::current_session(&state).await?;
    Ok(Json(view))
}

#[utoipa::path(
    delete,
    path = "/session",
    tag = "game",
    responses((status = 204, description = "Session torn down; pending timers cancelled"))
)]
/// Tear the in-memory session down. Persisted progress is untouched.
pub async fn teardown_session(State(state): State<SharedState>) -> StatusCode {
    game_service::teardown(&state).await;
    StatusCode::NO_CONTENT
}

#[utoipa::path(
    post,
    path = "/session/guess",
    tag = "game",
    request_body = GuessRequest,
    responses(
        (status = 200, description = "Guess processed", body = GuessResponse),
        (status = 404, description = "No active session"),
        (status = 409, description = "Session already over")
    )
)]
/// Submit a guess against the current session.
pub async fn submit_guess(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<GuessRequest>>,
) -> Result<Json<GuessResponse>, AppError> {
    let response = game_service::submit_guess(&state, payload).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/session/next",
    tag = "game",
    request_body = NextPuzzleRequest,
    responses(
        (status = 200, description = "Advanced, or advance scheduled", body = NextPuzzleResponse),
        (status = 404, description = "No active session"),
        (status = 409, description = "No other puzzle to advance to")
    )
)]
/// Advance to the next puzzle, immediately or after a pacing delay.
pub async fn next_puzzle(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<NextPuzzleRequest>>,
) -> Result<Json<NextPuzzleResponse>, AppError> {
    let response = game_service::next_puzzle(&state, payload).await?;
    Ok(Json(response))
}
