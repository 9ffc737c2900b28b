use service_core::config::{get_env, Environment};
use service_core::error::AppError;

// Fixed dev secret so both services verify each other's tokens out of
// the box. Production refuses to start without an explicit JWT_SECRET.
const DEV_JWT_SECRET: &str = "tokenet-dev-secret-change-me";

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub environment: Environment,
    pub service_name: String,
    pub port: u16,
    pub log_level: String,
    pub jwt: JwtConfig,
    pub mfa: MfaConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub session_expiry_hours: i64,
    pub challenge_expiry_minutes: i64,
}

#[derive(Debug, Clone)]
pub struct MfaConfig {
    pub issuer: String,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub allowed_origins: Vec<String>,
}

impl AuthConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let environment = Environment::from_env()?;
        let is_prod = environment.is_prod();

        let config = AuthConfig {
            environment,
            service_name: get_env("SERVICE_NAME", Some("auth-service"), is_prod)?,
            port: get_env("PORT", Some("8000"), is_prod)?
                .parse()
                .map_err(|e: std::num::ParseIntError| {
                    AppError::ConfigError(anyhow::anyhow!(e.to_string()))
                })?,
            log_level: get_env("LOG_LEVEL", Some("info"), is_prod)?,
            jwt: JwtConfig {
                secret: get_env("JWT_SECRET", Some(DEV_JWT_SECRET), is_prod)?,
                session_expiry_hours: get_env("SESSION_EXPIRY_HOURS", Some("24"), is_prod)?
                    .parse()
                    .map_err(|e: std::num::ParseIntError| {
                        AppError::ConfigError(anyhow::anyhow!(e.to_string()))
                    })?,
                challenge_expiry_minutes: get_env(
                    "MFA_CHALLENGE_EXPIRY_MINUTES",
                    Some("5"),
                    is_prod,
                )?
                .parse()
                .map_err(|e: std::num::ParseIntError| {
                    AppError::ConfigError(anyhow::anyhow!(e.to_string()))
                })?,
            },
            mfa: MfaConfig {
                issuer: get_env("MFA_ISSUER", Some("Tokenet"), is_prod)?,
            },
            security: SecurityConfig {
                allowed_origins: get_env("ALLOWED_ORIGINS", Some("*"), is_prod)?
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .collect(),
            },
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.port == 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "PORT must be greater than 0"
            )));
        }

        if self.jwt.secret.is_empty() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "JWT_SECRET must not be empty"
            )));
        }

        if self.jwt.session_expiry_hours <= 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "SESSION_EXPIRY_HOURS must be positive"
            )));
        }

        if self.jwt.challenge_expiry_minutes <= 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "MFA_CHALLENGE_EXPIRY_MINUTES must be positive"
            )));
        }

        if self.environment.is_prod() && self.security.allowed_origins.iter().any(|o| o == "*") {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "Wildcard CORS origin not allowed in production"
            )));
        }

        Ok(())
    }
}
