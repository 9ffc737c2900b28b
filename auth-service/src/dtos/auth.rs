use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{MfaChannel, SanitizedUser};

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct MfaVerifyRequest {
    #[validate(length(min = 1, message = "Code is required"))]
    pub code: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MfaPreferenceRequest {
    pub enabled: bool,
    pub preferred_type: MfaChannel,
}

/// Response for register, login and MFA verification.
///
/// Exactly one of `token` and `challenge_token` is present: a session
/// token once every required factor passed, or an MFA challenge token
/// after password login when the account demands a second factor.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub user: SanitizedUser,
    pub mfa_required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub challenge_token: Option<String>,
}

impl AuthResponse {
    pub fn session(token: String, user: SanitizedUser) -> Self {
        Self {
            token: Some(token),
            user,
            mfa_required: false,
            challenge_token: None,
        }
    }

    pub fn mfa_challenge(challenge_token: String, user: SanitizedUser) -> Self {
        Self {
            token: None,
            user,
            mfa_required: true,
            challenge_token: Some(challenge_token),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MfaSetupResponse {
    pub secret: String,
    pub qr_code_url: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
