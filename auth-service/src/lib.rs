pub mod config;
pub mod dtos;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

use axum::{
    extract::State,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, patch, post},
    Json, Router,
};
use tower_http::trace::TraceLayer;

use service_core::middleware::{build_cors_layer, request_id_middleware};

use crate::config::AuthConfig;
use crate::services::{AuthService, JwtService, MfaService, UserStore};

#[derive(Clone)]
pub struct AppState {
    pub config: AuthConfig,
    pub store: UserStore,
    pub auth_service: AuthService,
}

impl AppState {
    pub fn new(config: AuthConfig) -> Self {
        let store = UserStore::new();
        let jwt = JwtService::new(&config.jwt);
        let mfa = MfaService::new(store.clone(), config.mfa.issuer.clone());
        let auth_service = AuthService::new(store.clone(), jwt, mfa);

        Self {
            config,
            store,
            auth_service,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/auth/me", get(handlers::auth::get_me))
        .route("/auth/mfa/setup", post(handlers::mfa::setup_mfa))
        .route(
            "/auth/mfa/preferences",
            patch(handlers::mfa::update_mfa_preferences),
        )
        .layer(from_fn_with_state(
            state.clone(),
            middleware::auth_middleware,
        ));

    // MFA verification sits behind the wider middleware so a challenge
    // token can reach it before any session exists.
    let step_up = Router::new()
        .route("/auth/mfa/verify", post(handlers::mfa::verify_mfa))
        .layer(from_fn_with_state(
            state.clone(),
            middleware::mfa_auth_middleware,
        ));

    let api = Router::new()
        .route("/health", get(health_check))
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .merge(protected)
        .merge(step_up);

    let cors = build_cors_layer(&state.config.security.allowed_origins);

    Router::new()
        .nest("/api", api)
        .with_state(state)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .layer(cors)
}

/// Service health check
pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": state.config.service_name,
        "environment": format!("{:?}", state.config.environment),
    }))
}
