//! Request guards.
//!
//! - [`auth::AuthUser`] -- extracts the authenticated user from a Bearer token.

pub mod auth;
