//! User entity model and DTOs.

use std::collections::BTreeMap;

use iconsmith_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserSummary`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub password_hash: String,
    pub email: Option<String>,
    /// Raw JSON text of the permission set, if any.
    pub permissions: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// Public view of this user with the permission blob parsed leniently.
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            permissions: Permissions::parse_lenient(self.permissions.as_deref()),
        }
    }
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: DbId,
    pub username: String,
    pub email: Option<String>,
    pub permissions: Permissions,
}

/// DTO for provisioning a user (admin tooling and tests).
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
    pub email: Option<String>,
    pub permissions: Option<String>,
}

/// Sparse map of named permission flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permissions(pub BTreeMap<String, serde_json::Value>);

impl Permissions {
    /// Strict parse. `None` and blank text mean "no permissions".
    ///
    /// Fails if the text is not a JSON object.
    pub fn parse(raw: Option<&str>) -> Result<Self, serde_json::Error> {
        match raw.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(text) => serde_json::from_str(text),
        }
    }

    /// Parse, falling back to an empty set when the text is malformed.
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        Self::parse(raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Ignoring malformed permissions blob");
            Self::default()
        })
    }
}
