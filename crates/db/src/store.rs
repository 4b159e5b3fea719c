//! User lookup service injected into the HTTP layer.
//!
//! Handlers depend on [`UserStore`] rather than on a pool directly so the
//! login flow can be exercised without a running database.

use async_trait::async_trait;

use crate::models::user::User;
use crate::repositories::UserRepo;
use crate::DbPool;

/// Read-only access to user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Exact, case-sensitive username lookup.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error>;
}

/// [`UserStore`] backed by the PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: DbPool,
}

impl PgUserStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Close all pooled connections. Called once during shutdown.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        UserRepo::find_by_username(&self.pool, username).await
    }
}
