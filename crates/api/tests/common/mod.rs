#![allow(dead_code)]

use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use image::{ImageFormat, Rgba, RgbaImage};
use tower::ServiceExt;

use iconsmith_api::auth::jwt::JwtConfig;
use iconsmith_api::auth::password::hash_password;
use iconsmith_api::config::ServerConfig;
use iconsmith_api::router::build_app_router;
use iconsmith_api::state::AppState;
use iconsmith_db::models::user::User;
use iconsmith_db::store::UserStore;
use iconsmith_genai::{
    ContentRequest, GeminiConfig, GenAiError, GeneratedImage, ImageGenerator,
};

pub const TEST_SECRET: &str = "integration-test-secret";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        max_body_bytes: 10 * 1024 * 1024,
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
            expiry_hours: 24,
        },
        gemini: GeminiConfig {
            api_key: "unused".to_string(),
            model: "test-model".to_string(),
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 5,
        },
    }
}

// ---------------------------------------------------------------------------
// Test doubles
// ---------------------------------------------------------------------------

/// In-memory [`UserStore`] holding a fixed set of rows.
pub struct StaticUserStore {
    users: Vec<User>,
}

impl StaticUserStore {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl UserStore for StaticUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        Ok(self.users.iter().find(|u| u.username == username).cloned())
    }
}

/// What the stub provider answers with.
#[derive(Debug, Clone)]
pub enum StubReply {
    Image(Vec<u8>),
    TextOnly(String),
    Empty,
}

/// [`ImageGenerator`] that records calls and replays a canned reply.
pub struct StubGenerator {
    reply: StubReply,
    calls: AtomicUsize,
    last_request: Mutex<Option<ContentRequest>>,
}

impl StubGenerator {
    pub fn new(reply: StubReply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<ContentRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageGenerator for StubGenerator {
    async fn generate(&self, request: ContentRequest) -> Result<GeneratedImage, GenAiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request);
        match &self.reply {
            StubReply::Image(bytes) => Ok(GeneratedImage {
                mime_type: "image/png".to_string(),
                bytes: bytes.clone(),
            }),
            StubReply::TextOnly(text) => Err(GenAiError::TextOnly(text.clone())),
            StubReply::Empty => Err(GenAiError::Empty),
        }
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A user row whose stored hash matches `password`.
pub fn user_with_password(id: i64, username: &str, password: &str) -> User {
    let now = chrono::Utc::now();
    User {
        id,
        username: username.to_string(),
        password_hash: hash_password(password).expect("hashing should succeed"),
        email: Some(format!("{username}@example.com")),
        permissions: Some(r#"{"generate": true}"#.to_string()),
        created_at: now,
        updated_at: now,
    }
}

/// Encode a solid-color square as PNG.
pub fn solid_png(size: u32, color: [u8; 4]) -> Vec<u8> {
    let image = RgbaImage::from_pixel(size, size, Rgba(color));
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, ImageFormat::Png)
        .expect("png encoding should succeed");
    out.into_inner()
}

/// Build the full application router around the given doubles.
///
/// Uses [`build_app_router`] so integration tests exercise the same
/// middleware stack production uses.
pub fn build_test_app(users: Vec<User>, generator: Arc<StubGenerator>) -> Router {
    let config = test_config();
    let state = AppState {
        config: Arc::new(config.clone()),
        users: Arc::new(StaticUserStore::new(users)),
        generator,
    };
    build_app_router(state, &config)
}

/// Token signed with the test secret for the given user.
pub fn token_for(user_id: i64, username: &str) -> String {
    iconsmith_api::auth::jwt::issue_token(user_id, username, &test_config().jwt)
        .expect("token issuing should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST an arbitrary body, optionally with a content type and bearer token.
pub async fn post_raw(
    app: Router,
    uri: &str,
    content_type: Option<&str>,
    body: &str,
    token: Option<&str>,
) -> Response {
    let mut builder = Request::builder().method(Method::POST).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(CONTENT_TYPE, content_type);
    }
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
