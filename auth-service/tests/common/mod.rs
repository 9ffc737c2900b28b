//! Test helper module for the identity service integration tests.

#![allow(dead_code)]

use auth_service::{
    build_router,
    config::{AuthConfig, JwtConfig, MfaConfig, SecurityConfig},
    AppState,
};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use service_core::config::Environment;
use tower::util::ServiceExt;

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Create a test configuration without touching the environment.
pub fn create_test_config() -> AuthConfig {
    AuthConfig {
        environment: Environment::Dev,
        service_name: "auth-service-test".to_string(),
        port: 0,
        log_level: "error".to_string(),
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            session_expiry_hours: 24,
            challenge_expiry_minutes: 5,
        },
        mfa: MfaConfig {
            issuer: "Tokenet".to_string(),
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

/// Register a user and return the session token plus the full body.
pub async fn register_user(
    app: &Router,
    name: &str,
    email: &str,
    password: &str,
) -> (String, Value) {
    let (status, body) = send_json(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(serde_json::json!({
            "name": name,
            "email": email,
            "password": password,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "registration failed: {body}");
    let token = body["token"]
        .as_str()
        .expect("register returns a session token")
        .to_string();
    (token, body)
}
