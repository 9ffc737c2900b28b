//! Test helper module for the asset service integration tests.

#![allow(dead_code)]

use asset_service::{
    build_router,
    config::{AssetConfig, SecurityConfig, TokenConfig},
    services::{Claims, TokenScope},
    AppState,
};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::Value;
use service_core::config::Environment;
use tower::util::ServiceExt;

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Create a test configuration without touching the environment.
pub fn create_test_config() -> AssetConfig {
    AssetConfig {
        environment: Environment::Dev,
        service_name: "asset-service-test".to_string(),
        port: 0,
        log_level: "error".to_string(),
        token: TokenConfig {
            secret: TEST_JWT_SECRET.to_string(),
        },
        security: SecurityConfig {
            allowed_origins: vec!["*".to_string()],
        },
    }
}

/// Build the full router around a fresh in-memory state.
pub fn spawn_app() -> Router {
    build_router(AppState::new(create_test_config()))
}

/// Mint a token the way the identity service would.
pub fn mint_token(sub: &str, scope: TokenScope, ttl_secs: i64) -> String {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: sub.to_string(),
        iat: now,
        exp: now + ttl_secs,
        scope,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

/// A fresh session token for `sub`.
pub fn mint_session(sub: &str) -> String {
    mint_token(sub, TokenScope::Session, 3600)
}

/// Send a JSON request and decode the response body.
pub async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");

    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }

    let request = builder
        .body(match body {
            Some(value) => Body::from(value.to_string()),
            None => Body::empty(),
        })
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, json)
}

/// Create an asset for `token` and return its response body.
pub async fn create_asset(app: &Router, token: &str, name: &str) -> Value {
    let (status, body) = send_json(
        app,
        "POST",
        "/api/assets",
        Some(token),
        Some(serde_json::json!({
            "name": name,
            "type": "property",
            "description": "integration test asset",
            "value": 1000.0,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "asset creation failed: {body}");
    body
}
