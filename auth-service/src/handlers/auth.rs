use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use service_core::error::AppError;
use service_core::utils::ValidatedJson;

use crate::dtos::{AuthResponse, LoginRequest, RegisterRequest};
use crate::middleware::AuthUser;
use crate::models::SanitizedUser;
use crate::services::LoginOutcome;
use crate::utils::Password;
use crate::AppState;

/// Register a new user. A fresh account has no MFA, so the response
/// always carries a session token.
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let password = Password::new(req.password);
    let (token, user) = state
        .auth_service
        .register(req.name, req.email, &password)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse::session(token, user.sanitized())),
    ))
}

/// Check the password factor. Accounts with MFA enabled receive a
/// challenge token and `mfaRequired: true` instead of a session.
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let password = Password::new(req.password);
    let outcome = state.auth_service.login(&req.email, &password)?;

    let response = match outcome {
        LoginOutcome::Session { token, user } => AuthResponse::session(token, user.sanitized()),
        LoginOutcome::MfaRequired {
            challenge_token,
            user,
        } => AuthResponse::mfa_challenge(challenge_token, user.sanitized()),
    };

    Ok(Json(response))
}

/// Return the authenticated user's profile.
pub async fn get_me(AuthUser(user): AuthUser) -> Json<SanitizedUser> {
    Json(user.sanitized())
}
