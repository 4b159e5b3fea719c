//! HTTP-level integration tests for `POST /api/login`.
//!
//! Users live in an in-memory store; no database is needed.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, post_json, post_raw, user_with_password, StubGenerator, StubReply,
};
use iconsmith_api::auth::jwt::validate_token;
use iconsmith_api::auth::password::PasswordCheck;
use iconsmith_api::handlers::auth::INVALID_CREDENTIALS_MESSAGE;

fn app_with_alice() -> axum::Router {
    build_test_app(
        vec![user_with_password(1, "alice", "wonderland")],
        Arc::new(StubGenerator::new(StubReply::Empty)),
    )
}

async fn assert_generic_rejection(response: axum::response::Response) {
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["error"], INVALID_CREDENTIALS_MESSAGE);
}

// ---------------------------------------------------------------------------
// Success
// ---------------------------------------------------------------------------

/// Correct credentials return a token and the public user view.
#[tokio::test]
async fn login_success_returns_token_and_user() {
    let response = post_json(
        app_with_alice(),
        "/api/login",
        serde_json::json!({ "username": "alice", "password": "wonderland" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    let token = json["token"].as_str().expect("response must contain token");
    let claims = validate_token(token, &common::test_config().jwt).unwrap();
    assert_eq!(claims.sub, 1);
    assert_eq!(claims.username, "alice");
    assert_eq!(claims.exp - claims.iat, 24 * 3600);

    assert_eq!(json["user"]["id"], 1);
    assert_eq!(json["user"]["username"], "alice");
    assert_eq!(json["user"]["email"], "alice@example.com");
    assert_eq!(json["user"]["permissions"]["generate"], true);
    assert!(json["user"].get("password_hash").is_none());
}

// ---------------------------------------------------------------------------
// Failures are indistinguishable
// ---------------------------------------------------------------------------

#[tokio::test]
async fn wrong_password_is_rejected() {
    let response = post_json(
        app_with_alice(),
        "/api/login",
        serde_json::json!({ "username": "alice", "password": "looking-glass" }),
    )
    .await;
    assert_generic_rejection(response).await;
}

#[tokio::test]
async fn unknown_user_is_rejected() {
    let response = post_json(
        app_with_alice(),
        "/api/login",
        serde_json::json!({ "username": "bob", "password": "wonderland" }),
    )
    .await;
    assert_generic_rejection(response).await;
}

/// Username lookup is exact and case-sensitive.
#[tokio::test]
async fn username_case_must_match() {
    let response = post_json(
        app_with_alice(),
        "/api/login",
        serde_json::json!({ "username": "Alice", "password": "wonderland" }),
    )
    .await;
    assert_generic_rejection(response).await;
}

#[tokio::test]
async fn missing_or_empty_fields_are_rejected() {
    for body in [
        serde_json::json!({}),
        serde_json::json!({ "username": "alice" }),
        serde_json::json!({ "password": "wonderland" }),
        serde_json::json!({ "username": "", "password": "" }),
    ] {
        let response = post_json(app_with_alice(), "/api/login", body).await;
        assert_generic_rejection(response).await;
    }
}

/// Bodies that never reach the handler's field checks get the same 401.
#[tokio::test]
async fn unreadable_bodies_are_rejected() {
    let cases = [
        (Some("application/json"), r#"{"username":5,"password":"wonderland"}"#),
        (Some("application/json"), r#"{"username":"alice","password":"#),
        (Some("application/json"), r#"["alice","wonderland"]"#),
        (Some("text/plain"), r#"{"username":"alice","password":"wonderland"}"#),
        (None, r#"{"username":"alice","password":"wonderland"}"#),
    ];
    for (content_type, body) in cases {
        let response = post_raw(app_with_alice(), "/api/login", content_type, body, None).await;
        assert_generic_rejection(response).await;
    }
}

/// A corrupt stored hash is answered like a wrong password.
#[tokio::test]
async fn malformed_stored_hash_is_rejected() {
    let mut user = user_with_password(2, "carol", "secret");
    user.password_hash = "not-a-phc-string".to_string();
    assert_eq!(
        iconsmith_api::auth::password::verify_password("secret", &user.password_hash),
        PasswordCheck::MalformedHash
    );

    let app = build_test_app(vec![user], Arc::new(StubGenerator::new(StubReply::Empty)));
    let response = post_json(
        app,
        "/api/login",
        serde_json::json!({ "username": "carol", "password": "secret" }),
    )
    .await;
    assert_generic_rejection(response).await;
}

/// Users migrated from the old service keep their passlib scrypt hashes.
#[tokio::test]
async fn passlib_scrypt_hash_logs_in() {
    let mut user = user_with_password(3, "dinah", "unused");
    user.password_hash =
        "$scrypt$ln=4,r=8,p=1$X.zrZv/IbzjZUnhsbWlseQ$2o4FJNCqC8q93EROiA3ajJQRyCSpR/jVy9Z7nDHzoXU"
            .to_string();
    let app = build_test_app(vec![user], Arc::new(StubGenerator::new(StubReply::Empty)));

    let response = post_json(
        app.clone(),
        "/api/login",
        serde_json::json!({ "username": "dinah", "password": "wonderland" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["user"]["username"], "dinah");

    let response = post_json(
        app,
        "/api/login",
        serde_json::json!({ "username": "dinah", "password": "looking-glass" }),
    )
    .await;
    assert_generic_rejection(response).await;
}
