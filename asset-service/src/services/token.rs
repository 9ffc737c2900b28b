//! Session token verification.
//!
//! The identity service mints HS256 tokens; this service only checks
//! them against the shared signing key and never issues its own.

use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::config::TokenConfig;
use crate::services::ServiceError;

/// Scope claim carried by identity service tokens. Only `Session`
/// grants access here; MFA challenge tokens must stay useless outside
/// the step-up flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenScope {
    Session,
    MfaChallenge,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub scope: TokenScope,
}

#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
}

impl TokenVerifier {
    pub fn new(config: &TokenConfig) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
        }
    }

    /// Decodes and validates a session token, rejecting expired
    /// signatures and any non-session scope.
    pub fn verify_session(&self, token: &str) -> Result<Claims, ServiceError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => ServiceError::TokenExpired,
                    _ => ServiceError::InvalidToken,
                }
            })?;

        if token_data.claims.scope != TokenScope::Session {
            return Err(ServiceError::InvalidToken);
        }

        Ok(token_data.claims)
    }
}
