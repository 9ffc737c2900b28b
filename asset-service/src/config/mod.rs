use service_core::config::{get_env, Environment};
use service_core::error::AppError;

// Same dev fallback the identity service uses, so locally minted
// sessions verify here. Production refuses to start without an
// explicit JWT_SECRET.
const DEV_JWT_SECRET: &str = "tokenet-dev-secret-change-me";

#[derive(Debug, Clone)]
pub struct AssetConfig {
    pub environment: Environment,
    pub service_name: String,
    pub port: u16,
    pub log_level: String,
    pub token: TokenConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub secret: String,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub allowed_origins: Vec<String>,
}

impl AssetConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let environment = Environment::from_env()?;
        let is_prod = environment.is_prod();

        let config = AssetConfig {
            environment,
            service_name: get_env("SERVICE_NAME", Some("asset-service"), is_prod)?,
            port: get_env("PORT", Some("8001"), is_prod)?
                .parse()
                .map_err(|e: std::num::ParseIntError| {
                    AppError::ConfigError(anyhow::anyhow!(e.to_string()))
                })?,
            log_level: get_env("LOG_LEVEL", Some("info"), is_prod)?,
            token: TokenConfig {
                secret: get_env("JWT_SECRET", Some(DEV_JWT_SECRET), is_prod)?,
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

        if self.token.secret.is_empty() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "JWT_SECRET must not be empty"
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
