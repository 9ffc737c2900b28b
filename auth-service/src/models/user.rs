use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Delivery channel for MFA challenges.
///
/// Only `App` (authenticator TOTP) is verifiable today; the other
/// channels can be selected as a preference but have no delivery
/// backend yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MfaChannel {
    #[default]
    App,
    Email,
    Sms,
}

/// A registered identity. The password hash and TOTP secret never
/// leave the service; responses carry [`SanitizedUser`] instead.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub mfa_enabled: bool,
    pub mfa_secret: Option<String>,
    pub mfa_verified: bool,
    pub preferred_mfa_type: MfaChannel,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            mfa_enabled: false,
            mfa_secret: None,
            mfa_verified: false,
            preferred_mfa_type: MfaChannel::default(),
            created_at: Utc::now(),
        }
    }

    pub fn sanitized(&self) -> SanitizedUser {
        SanitizedUser {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            mfa_enabled: self.mfa_enabled,
            mfa_verified: self.mfa_verified,
            preferred_mfa_type: self.preferred_mfa_type,
            created_at: self.created_at,
        }
    }
}

/// Public projection of [`User`] without credential material.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizedUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub mfa_enabled: bool,
    pub mfa_verified: bool,
    pub preferred_mfa_type: MfaChannel,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_starts_without_mfa() {
        let user = User::new(
            "Alice".to_string(),
            "alice@example.com".to_string(),
            "hash".to_string(),
        );

        assert!(!user.mfa_enabled);
        assert!(!user.mfa_verified);
        assert!(user.mfa_secret.is_none());
        assert_eq!(user.preferred_mfa_type, MfaChannel::App);
    }

    #[test]
    fn sanitized_user_omits_credential_fields() {
        let mut user = User::new(
            "Alice".to_string(),
            "alice@example.com".to_string(),
            "hash".to_string(),
        );
        user.mfa_secret = Some("JBSWY3DPEHPK3PXP".to_string());

        let json = serde_json::to_value(user.sanitized()).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();

        assert!(!keys.contains(&"password"));
        assert!(!keys.contains(&"passwordHash"));
        assert!(!keys.contains(&"mfaSecret"));
        assert_eq!(json["email"], "alice@example.com");
        assert_eq!(json["preferredMfaType"], "app");
    }
}
