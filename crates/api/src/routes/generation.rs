//! Route definitions for image generation.

use axum::routing::post;
use axum::Router;

use crate::handlers::generation;
use crate::state::AppState;

/// ```text
/// POST /generate   -> generate  (requires auth)
/// POST /transform  -> transform (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate", post(generation::generate))
        .route("/transform", post(generation::transform))
}
