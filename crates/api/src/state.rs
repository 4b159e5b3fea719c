use std::sync::Arc;

use iconsmith_db::store::UserStore;
use iconsmith_genai::ImageGenerator;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (everything is behind `Arc`). Nothing in it is
/// mutated after startup.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (token secret, limits).
    pub config: Arc<ServerConfig>,
    /// User record lookups.
    pub users: Arc<dyn UserStore>,
    /// Image provider client.
    pub generator: Arc<dyn ImageGenerator>,
}
