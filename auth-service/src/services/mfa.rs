use anyhow::anyhow;
use rand::RngCore;
use totp_rs::{Algorithm, Secret, TOTP};
use uuid::Uuid;

use crate::models::{MfaChannel, User};
use crate::services::{ServiceError, UserStore};

// 128-bit secret, the RFC 4226 minimum.
const SECRET_BYTES: usize = 16;

/// Outcome of MFA enrollment: the shared secret and the provisioning
/// URL the client renders as a QR code.
#[derive(Debug, Clone)]
pub struct MfaEnrollment {
    pub secret: String,
    pub otpauth_url: String,
}

/// Manages the TOTP second factor: secret enrollment, code checks and
/// the per-user MFA preference.
#[derive(Clone)]
pub struct MfaService {
    store: UserStore,
    issuer: String,
}

impl MfaService {
    pub fn new(store: UserStore, issuer: String) -> Self {
        Self { store, issuer }
    }

    /// Generate a fresh secret for the user and flag MFA as enabled but
    /// not yet verified. Re-enrolling replaces any previous secret.
    pub fn enroll(&self, user_id: Uuid) -> Result<MfaEnrollment, ServiceError> {
        let user = self
            .store
            .find_by_id(user_id)?
            .ok_or(ServiceError::UserNotFound)?;

        let secret = generate_secret()?;
        let otpauth_url = self.build_totp(&secret, &user.email)?.get_url();

        let stored = secret.clone();
        self.store.update(user_id, |u| {
            u.mfa_secret = Some(stored);
            u.mfa_enabled = true;
            u.mfa_verified = false;
        })?;

        Ok(MfaEnrollment {
            secret,
            otpauth_url,
        })
    }

    /// Check a code against the user's enrolled secret and mark the
    /// factor verified on success. A user without an enrolled secret
    /// can never present a valid code.
    pub fn verify(&self, user_id: Uuid, code: &str) -> Result<User, ServiceError> {
        let user = self
            .store
            .find_by_id(user_id)?
            .ok_or(ServiceError::UserNotFound)?;

        let secret = user
            .mfa_secret
            .as_deref()
            .ok_or(ServiceError::InvalidMfaCode)?;

        let totp = self.build_totp(secret, &user.email)?;
        if !totp.check_current(code).unwrap_or(false) {
            return Err(ServiceError::InvalidMfaCode);
        }

        self.store.update(user_id, |u| u.mfa_verified = true)
    }

    /// Toggle whether login demands the second factor and record the
    /// preferred channel. Leaves the enrolled secret untouched.
    pub fn set_preference(
        &self,
        user_id: Uuid,
        enabled: bool,
        channel: MfaChannel,
    ) -> Result<User, ServiceError> {
        self.store.update(user_id, |u| {
            u.mfa_enabled = enabled;
            u.preferred_mfa_type = channel;
        })
    }

    fn build_totp(&self, secret_base32: &str, account: &str) -> Result<TOTP, ServiceError> {
        let secret_bytes = Secret::Encoded(secret_base32.to_string())
            .to_bytes()
            .map_err(|_| {
                ServiceError::Internal(anyhow!("stored TOTP secret is not valid base32"))
            })?;

        TOTP::new(
            Algorithm::SHA1,
            6,
            1,
            30,
            secret_bytes,
            Some(self.issuer.clone()),
            account.to_string(),
        )
        .map_err(|e| ServiceError::Internal(anyhow!("TOTP init error: {e}")))
    }
}

/// Draw a random secret and base32-encode it for authenticator apps.
fn generate_secret() -> Result<String, ServiceError> {
    let mut bytes = [0u8; SECRET_BYTES];
    rand::rngs::OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| ServiceError::Internal(anyhow!("Failed to draw TOTP secret: {e}")))?;

    match Secret::Raw(bytes.to_vec()).to_encoded() {
        Secret::Encoded(encoded) => Ok(encoded),
        Secret::Raw(_) => Err(ServiceError::Internal(anyhow!("secret encoding failed"))),
    }
}
