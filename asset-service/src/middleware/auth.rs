use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};

use service_core::error::AppError;

use crate::services::Claims;
use crate::AppState;

/// Requires a valid session token and stashes its claims for handlers.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(&req)?;
    let claims = state.verifier.verify_session(&token)?;
    req.extensions_mut().insert(AuthUser(claims));
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

/// Claims of the authenticated caller, extracted from request
/// extensions placed there by [`auth_middleware`].
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

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
