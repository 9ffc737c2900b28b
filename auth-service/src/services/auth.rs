use uuid::Uuid;

use crate::models::{MfaChannel, User};
use crate::services::{JwtService, MfaEnrollment, MfaService, ServiceError, UserStore};
use crate::utils::{hash_password, verify_password, Password};

/// Result of a successful password check.
///
/// `MfaRequired` carries a challenge token instead of a session token;
/// the session is only minted once the second factor passes.
#[derive(Debug, Clone)]
pub enum LoginOutcome {
    Session { token: String, user: User },
    MfaRequired { challenge_token: String, user: User },
}

/// Orchestrates registration, the login state machine and MFA step-up.
#[derive(Clone)]
pub struct AuthService {
    store: UserStore,
    jwt: JwtService,
    mfa: MfaService,
}

impl AuthService {
    pub fn new(store: UserStore, jwt: JwtService, mfa: MfaService) -> Self {
        Self { store, jwt, mfa }
    }

    /// Create the user and log them in immediately. A fresh account has
    /// no MFA, so registration always yields a full session.
    pub fn register(
        &self,
        name: String,
        email: String,
        password: &Password,
    ) -> Result<(String, User), ServiceError> {
        let password_hash = hash_password(password).map_err(ServiceError::Internal)?;
        let user = self.store.register(name, email, password_hash)?;
        tracing::info!(user_id = %user.id, "User registered");

        let token = self.jwt.issue_session(user.id)?;
        Ok((token, user))
    }

    /// Check the password factor. Unknown emails and wrong passwords
    /// fail identically.
    pub fn login(&self, email: &str, password: &Password) -> Result<LoginOutcome, ServiceError> {
        let user = self
            .store
            .find_by_email(email)?
            .ok_or(ServiceError::InvalidCredentials)?;

        verify_password(password, &user.password_hash)
            .map_err(|_| ServiceError::InvalidCredentials)?;

        if user.mfa_enabled {
            let challenge_token = self.jwt.issue_challenge(user.id)?;
            tracing::info!(user_id = %user.id, "Password accepted, MFA challenge issued");
            return Ok(LoginOutcome::MfaRequired {
                challenge_token,
                user,
            });
        }

        let token = self.jwt.issue_session(user.id)?;
        tracing::info!(user_id = %user.id, "User logged in");
        Ok(LoginOutcome::Session { token, user })
    }

    /// Resolve a session token to its user.
    pub fn authenticate(&self, token: &str) -> Result<User, ServiceError> {
        let claims = self.jwt.verify_session(token)?;
        self.resolve_subject(&claims.sub)
    }

    /// Resolve the bearer of an MFA verification call. Accepts a full
    /// session or a challenge token minted at password login.
    pub fn authenticate_for_mfa(&self, token: &str) -> Result<User, ServiceError> {
        let claims = self.jwt.verify_any(token)?;
        self.resolve_subject(&claims.sub)
    }

    pub fn setup_mfa(&self, user_id: Uuid) -> Result<MfaEnrollment, ServiceError> {
        let enrollment = self.mfa.enroll(user_id)?;
        tracing::info!(user_id = %user_id, "MFA enrollment started");
        Ok(enrollment)
    }

    /// Check the TOTP code and mint the session. On the MFA path no
    /// session token exists before this call succeeds.
    pub fn verify_mfa(&self, user_id: Uuid, code: &str) -> Result<(String, User), ServiceError> {
        let user = self.mfa.verify(user_id, code)?;
        let token = self.jwt.issue_session(user.id)?;
        tracing::info!(user_id = %user.id, "MFA verified, session issued");
        Ok((token, user))
    }

    pub fn set_mfa_preference(
        &self,
        user_id: Uuid,
        enabled: bool,
        channel: MfaChannel,
    ) -> Result<User, ServiceError> {
        let user = self.mfa.set_preference(user_id, enabled, channel)?;
        tracing::info!(user_id = %user.id, enabled, "MFA preference updated");
        Ok(user)
    }

    fn resolve_subject(&self, sub: &str) -> Result<User, ServiceError> {
        let id = Uuid::parse_str(sub).map_err(|_| ServiceError::InvalidToken)?;
        self.store
            .find_by_id(id)?
            .ok_or(ServiceError::UserNotFound)
    }
}
