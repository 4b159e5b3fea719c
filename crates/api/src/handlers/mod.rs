pub mod auth;
pub mod generation;
