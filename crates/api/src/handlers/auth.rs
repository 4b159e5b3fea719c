//! Handler for `POST /login`.

use std::sync::LazyLock;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use iconsmith_core::error::CoreError;
use iconsmith_db::models::user::UserSummary;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::issue_token;
use crate::auth::password::{hash_password, verify_password, PasswordCheck};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// The only message a failed login ever sees.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password";

/// Hash checked against when the username is unknown, so that path costs the
/// same as a wrong password.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("iconsmith-dummy-password").ok());

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /login`. Both fields are optional on the wire so a
/// missing field gets the same 401 as a wrong one. An unreadable body (wrong
/// content type, malformed JSON, wrong field types) is answered the same way.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Signed session token for the `Authorization: Bearer` header.
    pub token: String,
    pub user: UserSummary,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/login
///
/// Authenticate with username + password and return a session token.
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<LoginResponse>> {
    // 1. The body must parse and both fields must be present and non-empty.
    let Json(input) = body.map_err(|rejection| {
        tracing::info!(error = %rejection, "Login rejected: unreadable body");
        invalid_credentials()
    })?;
    let (Some(username), Some(password)) = (non_empty(input.username), non_empty(input.password))
    else {
        tracing::info!("Login rejected: missing credentials");
        return Err(invalid_credentials());
    };

    // 2. Find user by exact username.
    let Some(user) = state.users.find_by_username(&username).await? else {
        if let Some(dummy) = DUMMY_HASH.as_deref() {
            let _ = verify_password(&password, dummy);
        }
        tracing::info!("Login rejected: unknown username");
        return Err(invalid_credentials());
    };

    // 3. Verify password. A malformed stored hash is answered like a mismatch.
    match verify_password(&password, &user.password_hash) {
        PasswordCheck::Match => {}
        PasswordCheck::Mismatch => {
            tracing::info!(user_id = user.id, "Login rejected: wrong password");
            return Err(invalid_credentials());
        }
        PasswordCheck::MalformedHash => {
            tracing::warn!(user_id = user.id, "Login rejected: stored password hash is malformed");
            return Err(invalid_credentials());
        }
    }

    // 4. Issue the session token.
    let token = issue_token(user.id, &user.username, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(LoginResponse {
        token,
        user: user.summary(),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS_MESSAGE.into()))
}
