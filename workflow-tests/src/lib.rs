//! Cross-service workflow integration tests library.
//!
//! Builds the identity and asset routers in-process around a single
//! signing secret, so complete workflows run without deployed services.

use std::sync::Once;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::util::ServiceExt;

use asset_service::config::{AssetConfig, TokenConfig};
use auth_service::config::{AuthConfig, JwtConfig, MfaConfig};
use service_core::config::Environment;

/// Secret shared by both routers, standing in for the deployment-wide
/// `JWT_SECRET` contract.
pub const WORKFLOW_JWT_SECRET: &str = "workflow-test-secret";

static INIT: Once = Once::new();

/// Initialize tracing for tests (only once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("error")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Both services wired around one signing secret, the way a deployment
/// shares `JWT_SECRET`.
#[derive(Clone)]
pub struct WorkflowContext {
    pub auth: Router,
    pub assets: Router,
}

impl WorkflowContext {
    pub fn new() -> Self {
        let auth_config = AuthConfig {
            environment: Environment::Dev,
            service_name: "auth-service".to_string(),
            port: 0,
            log_level: "error".to_string(),
            jwt: JwtConfig {
                secret: WORKFLOW_JWT_SECRET.to_string(),
                session_expiry_hours: 24,
                challenge_expiry_minutes: 5,
            },
            mfa: MfaConfig {
                issuer: "Tokenet".to_string(),
            },
            security: auth_service::config::SecurityConfig {
                allowed_origins: vec!["*".to_string()],
            },
        };

        let asset_config = AssetConfig {
            environment: Environment::Dev,
            service_name: "asset-service".to_string(),
            port: 0,
            log_level: "error".to_string(),
            token: TokenConfig {
                secret: WORKFLOW_JWT_SECRET.to_string(),
            },
            security: asset_service::config::SecurityConfig {
                allowed_origins: vec!["*".to_string()],
            },
        };

        Self {
            auth: auth_service::build_router(auth_service::AppState::new(auth_config)),
            assets: asset_service::build_router(asset_service::AppState::new(asset_config)),
        }
    }
}

impl Default for WorkflowContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Send a JSON request to `app` and decode the response body.
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
