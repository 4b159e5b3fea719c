pub mod auth;
pub mod generation;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /login         POST  login (public)
/// /generate      POST  text-to-image (requires auth)
/// /transform     POST  image-to-image (requires auth)
/// /health        GET   liveness check (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(generation::router())
        .merge(health::router())
}
