use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::services::ServiceError;

/// What a signed token is good for.
///
/// A `Session` token grants access to protected resources. An
/// `MfaChallenge` token only proves that the password factor passed;
/// it is accepted solely by MFA verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenScope {
    Session,
    MfaChallenge,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Token scope
    pub scope: TokenScope,
}

/// JWT service for token generation and validation
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    session_expiry_hours: i64,
    challenge_expiry_minutes: i64,
}

impl JwtService {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            session_expiry_hours: config.session_expiry_hours,
            challenge_expiry_minutes: config.challenge_expiry_minutes,
        }
    }

    /// Generate a session token for a fully authenticated user
    pub fn issue_session(&self, user_id: Uuid) -> Result<String, ServiceError> {
        self.issue(
            user_id,
            TokenScope::Session,
            Duration::hours(self.session_expiry_hours),
        )
    }

    /// Generate a short-lived challenge token after the password factor
    /// passed but before MFA verification
    pub fn issue_challenge(&self, user_id: Uuid) -> Result<String, ServiceError> {
        self.issue(
            user_id,
            TokenScope::MfaChallenge,
            Duration::minutes(self.challenge_expiry_minutes),
        )
    }

    fn issue(
        &self,
        user_id: Uuid,
        scope: TokenScope,
        ttl: Duration,
    ) -> Result<String, ServiceError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            scope,
        };

        let header = Header::new(Algorithm::HS256);
        let token = encode(&header, &claims, &self.encoding_key)
            .map_err(|e| anyhow::anyhow!("Failed to encode token: {}", e))?;

        Ok(token)
    }

    /// Validate a token and require session scope
    pub fn verify_session(&self, token: &str) -> Result<Claims, ServiceError> {
        let claims = self.verify_any(token)?;
        if claims.scope != TokenScope::Session {
            return Err(ServiceError::InvalidToken);
        }
        Ok(claims)
    }

    /// Validate signature and expiry without constraining the scope.
    /// MFA verification accepts both session and challenge tokens.
    pub fn verify_any(&self, token: &str) -> Result<Claims, ServiceError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        // No clock leeway. Expiry must be strictly in the future.
        validation.leeway = 0;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => ServiceError::TokenExpired,
                    _ => ServiceError::InvalidToken,
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service() -> JwtService {
        JwtService::new(&JwtConfig {
            secret: "unit-test-secret".to_string(),
            session_expiry_hours: 24,
            challenge_expiry_minutes: 5,
        })
    }

    #[test]
    fn session_token_round_trips() {
        let service = test_service();
        let user_id = Uuid::new_v4();

        let token = service.issue_session(user_id).unwrap();
        let claims = service.verify_session(&token).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.scope, TokenScope::Session);
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn challenge_token_carries_short_ttl() {
        let service = test_service();
        let token = service.issue_challenge(Uuid::new_v4()).unwrap();
        let claims = service.verify_any(&token).unwrap();

        assert_eq!(claims.scope, TokenScope::MfaChallenge);
        assert_eq!(claims.exp - claims.iat, 5 * 60);
    }

    #[test]
    fn challenge_token_is_not_a_session() {
        let service = test_service();
        let token = service.issue_challenge(Uuid::new_v4()).unwrap();

        let result = service.verify_session(&token);
        assert!(matches!(result, Err(ServiceError::InvalidToken)));

        // Still valid for endpoints that accept either scope.
        assert!(service.verify_any(&token).is_ok());
    }

    #[test]
    fn expired_token_reports_expiry() {
        let service = test_service();
        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            iat: (now - Duration::hours(2)).timestamp(),
            exp: (now - Duration::hours(1)).timestamp(),
            scope: TokenScope::Session,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &service.encoding_key,
        )
        .unwrap();

        let result = service.verify_session(&token);
        assert!(matches!(result, Err(ServiceError::TokenExpired)));
    }

    #[test]
    fn token_signed_with_other_key_is_rejected() {
        let issuer = test_service();
        let verifier = JwtService::new(&JwtConfig {
            secret: "a-different-secret".to_string(),
            session_expiry_hours: 24,
            challenge_expiry_minutes: 5,
        });

        let token = issuer.issue_session(Uuid::new_v4()).unwrap();
        let result = verifier.verify_session(&token);
        assert!(matches!(result, Err(ServiceError::InvalidToken)));
    }

    #[test]
    fn garbage_token_is_rejected() {
        let service = test_service();
        let result = service.verify_session("not.a.jwt");
        assert!(matches!(result, Err(ServiceError::InvalidToken)));
    }
}
