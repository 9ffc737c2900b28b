use axum::{extract::State, Json};

use service_core::error::AppError;
use service_core::utils::ValidatedJson;

use crate::dtos::{
    AuthResponse, MessageResponse, MfaPreferenceRequest, MfaSetupResponse, MfaVerifyRequest,
};
use crate::middleware::AuthUser;
use crate::AppState;

/// Start (or restart) TOTP enrollment for the authenticated user.
/// Returns the shared secret and the otpauth provisioning URL.
pub async fn setup_mfa(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<MfaSetupResponse>, AppError> {
    let enrollment = state.auth_service.setup_mfa(user.id)?;

    Ok(Json(MfaSetupResponse {
        secret: enrollment.secret,
        qr_code_url: enrollment.otpauth_url,
    }))
}

/// Prove the TOTP factor. On the step-up login path the caller holds
/// only a challenge token; the session token is minted here.
pub async fn verify_mfa(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidatedJson(req): ValidatedJson<MfaVerifyRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let (token, user) = state.auth_service.verify_mfa(user.id, &req.code)?;
    Ok(Json(AuthResponse::session(token, user.sanitized())))
}

/// Toggle the MFA requirement and the preferred channel.
pub async fn update_mfa_preferences(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidatedJson(req): ValidatedJson<MfaPreferenceRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .auth_service
        .set_mfa_preference(user.id, req.enabled, req.preferred_type)?;

    Ok(Json(MessageResponse {
        message: "MFA preferences updated successfully".to_string(),
    }))
}
