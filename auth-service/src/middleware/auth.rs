use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};

use service_core::error::AppError;

use crate::models::User;
use crate::AppState;

/// Middleware to require a session-scoped bearer token.
///
/// The resolved user lands in request extensions; expired and
/// otherwise invalid tokens reject with distinct messages.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(&req)?;
    let user = state.auth_service.authenticate(&token)?;

    req.extensions_mut().insert(AuthUser(user));
    Ok(next.run(req).await)
}

/// Middleware for MFA verification. A challenge token minted at
/// password login is accepted alongside a full session, so the second
/// factor can be proven before any session exists.
pub async fn mfa_auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(&req)?;
    let user = state.auth_service.authenticate_for_mfa(&token)?;

    req.extensions_mut().insert(AuthUser(user));
    Ok(next.run(req).await)
}

fn bearer_token(req: &Request) -> Result<String, AppError> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
        .ok_or_else(|| {
            AppError::Unauthorized(anyhow::anyhow!("Missing or invalid Authorization header"))
        })
}

/// Extractor to easily get the authenticated user in handlers
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<AuthUser>().cloned().ok_or_else(|| {
            AppError::InternalError(anyhow::anyhow!("Auth user missing from request extensions"))
        })
    }
}
