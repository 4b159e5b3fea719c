//! Bearer-token authentication guard for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use iconsmith_core::error::CoreError;
use iconsmith_core::types::DbId;

use crate::auth::jwt::{validate_token, JwtConfig};
use crate::error::AppError;
use crate::state::AppState;

/// The only message a rejected request ever sees.
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid or missing token";

/// Authenticated user extracted from a Bearer token in the `Authorization` header.
///
/// Use this as an extractor parameter in any handler that requires authentication.
/// Axum runs it before the body extractor, so a rejected request never reaches
/// the handler:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// Username embedded at login.
    pub username: String,
}

/// Check the `Authorization` header and return the authenticated user.
///
/// Missing header, wrong scheme, malformed token, bad signature and expiry
/// all produce the same 401 [`INVALID_TOKEN_MESSAGE`].
pub fn authenticate(headers: &HeaderMap, config: &JwtConfig) -> Result<AuthUser, AppError> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(rejection)?;

    let claims = validate_token(token, config).map_err(|e| {
        tracing::debug!(error = %e, "Rejected bearer token");
        rejection()
    })?;

    Ok(AuthUser {
        user_id: claims.sub,
        username: claims.username,
    })
}

fn rejection() -> AppError {
    AppError::Core(CoreError::Unauthorized(INVALID_TOKEN_MESSAGE.into()))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authenticate(&parts.headers, &state.config.jwt)
    }
}
