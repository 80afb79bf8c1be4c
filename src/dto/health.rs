//! Health payloads.

use serde::Serialize;
use utoipa::ToSchema;

/// Health response returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status ("ok" or "degraded").
    pub status: String,
    /// Catalog origin ("remote" or "fallback").
    pub catalog: String,
    /// Number of puzzles currently loaded.
    pub puzzles: usize,
}

impl HealthResponse {
    /// Create a health response indicating the system is fully operational.
    pub fn ok(catalog: String, puzzles: usize) -> Self {
        Self {
            status: "ok".to_string(),
            catalog,
            puzzles,
        }
    }

    /// Create a health response indicating degraded operation (fallback
    /// catalog or unreachable store).
    pub fn degraded(catalog: String, puzzles: usize) -> Self {
        Self {
            status: "degraded".to_string(),
            catalog,
            puzzles,
        }
    }
}
