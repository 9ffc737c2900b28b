pub mod config;
pub mod dtos;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use axum::{
    extract::State,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Json, Router,
};
use tower_http::trace::TraceLayer;

use service_core::middleware::{build_cors_layer, request_id_middleware};

use crate::config::AssetConfig;
use crate::services::{AssetStore, TokenVerifier};

#[derive(Clone)]
pub struct AppState {
    pub config: AssetConfig,
    pub store: AssetStore,
    pub verifier: TokenVerifier,
}

impl AppState {
    pub fn new(config: AssetConfig) -> Self {
        let store = AssetStore::new();
        let verifier = TokenVerifier::new(&config.token);

        Self {
            config,
            store,
            verifier,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route(
            "/assets",
            get(handlers::assets::list_assets).post(handlers::assets::create_asset),
        )
        .route("/assets/:id", get(handlers::assets::get_asset))
        .route("/assets/:id/transfer", post(handlers::assets::transfer_asset))
        .layer(from_fn_with_state(
            state.clone(),
            middleware::auth_middleware,
        ));

    let api = Router::new()
        .route("/health", get(health_check))
        .merge(protected);

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
