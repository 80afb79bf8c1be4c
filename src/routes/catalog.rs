use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::catalog::ArchiveResponse, error::AppError, services::game_service, state::SharedState,
};

/// Archive listing of every loaded puzzle and its local outcome.
pub fn router() -> Router<SharedState> {
    Router::new().route("/catalog", get(get_archive))
}

#[utoipa::path(
    get,
    path = "/catalog",
    tag = "catalog",
    responses((status = 200, description = "Archive listing, newest puzzle first", body = ArchiveResponse))
)]
/// Return the archive: one row per puzzle, joined with local progress.
pub async fn get_archive(
    State(state): State<SharedState>,
) -> Result<Json<ArchiveResponse>, AppError> {
    let progress = game_service::load_progress(&state).await;
    let response = ArchiveResponse::build(
        state.catalog(),
        &progress,
        state.catalog_origin().label().to_string(),
    );
    Ok(Json(response))
}
