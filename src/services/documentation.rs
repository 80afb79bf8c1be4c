//! OpenAPI aggregation for the Swagger UI.

use utoipa::OpenApi;

/// Aggregated OpenAPI specification for Daily Reel Back.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::catalog::get_archive,
        crate::routes::session::start_session,
        crate::routes::session::get_session,
        crate::routes::session::teardown_session,
        crate::routes::session::submit_guess,
        crate::routes::session::next_puzzle,
        crate::routes::suggest::get_suggestions,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::catalog::ArchiveResponse,
            crate::dto::catalog::ArchiveItem,
            crate::dto::game::StartSessionRequest,
            crate::dto::game::GuessRequest,
            crate::dto::game::NextPuzzleRequest,
            crate::dto::game::SessionView,
            crate::dto::game::CastMemberView,
            crate::dto::game::ClueBoard,
            crate::dto::game::GuessResponse,
            crate::dto::game::NextPuzzleResponse,
            crate::dto::suggest::SuggestResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "catalog", description = "Puzzle archive listing"),
        (name = "game", description = "Puzzle session lifecycle and guessing"),
        (name = "suggest", description = "Title autocomplete"),
    )
)]
pub struct ApiDoc;
