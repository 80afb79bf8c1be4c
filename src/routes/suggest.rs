use axum::{Json, Router, extract::Query, extract::State, routing::get};
use axum_valid::Valid;

use crate::{
    dto::suggest::{SuggestParams, SuggestResponse},
    error::AppError,
    services::suggest_service,
    state::SharedState,
};

/// Title autocomplete over the curated/catalog union.
pub fn router() -> Router<SharedState> {
    Router::new().route("/suggest", get(get_suggestions))
}

#[utoipa::path(
    get,
    path = "/suggest",
    tag = "suggest",
    params(SuggestParams),
    responses((status = 200, description = "Matching titles in source order", body = SuggestResponse))
)]
/// Suggest titles containing the typed text.
pub async fn get_suggestions(
    State(state): State<SharedState>,
    Valid(Query(params)): Valid<Query<SuggestParams>>,
) -> Result<Json<SuggestResponse>, AppError> {
    let limit = params.limit.unwrap_or(suggest_service::DEFAULT_LIMIT);
    let suggestions = suggest_service::suggest(state.suggest_index(), &params.prefix, limit);
    Ok(Json(SuggestResponse { suggestions }))
}
