//! Autocomplete payloads.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Query parameters for the suggestion endpoint.
#[derive(Debug, Deserialize, IntoParams, Validate)]
pub struct SuggestParams {
    /// Text typed so far. Suggestions only activate beyond one character.
    #[validate(length(max = 256))]
    pub prefix: String,
    /// Maximum number of suggestions returned.
    #[serde(default)]
    #[validate(range(min = 1, max = 50))]
    pub limit: Option<usize>,
}

/// Ordered title suggestions for the typed text.
#[derive(Debug, Serialize, ToSchema)]
pub struct SuggestResponse {
    /// Matching titles, source order preserved.
    pub suggestions: Vec<String>,
}
