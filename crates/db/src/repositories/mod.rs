//! Query functions grouped per table.

pub mod user_repo;

pub use user_repo::UserRepo;
