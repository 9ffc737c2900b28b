use crate::error::AppError;
use std::env;

/// Deployment environment, selected by the `ENVIRONMENT` variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Prod,
}

impl Environment {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let env_str = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string());
        env_str
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))
    }

    pub fn is_prod(self) -> bool {
        self == Environment::Prod
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dev" => Ok(Environment::Dev),
            "prod" => Ok(Environment::Prod),
            _ => Err(format!("Invalid environment: {}", s)),
        }
    }
}

/// Read a variable, falling back to `default` only outside production.
///
/// Production refuses to start on a missing variable instead of running
/// with a built-in value.
pub fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(format!(
                    "{} is required in production but not set",
                    key
                ))))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(format!(
                    "{} is required but not set",
                    key
                ))))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_env_prefers_set_variable() {
        env::set_var("SERVICE_CORE_TEST_KEY", "from-env");
        let val = get_env("SERVICE_CORE_TEST_KEY", Some("fallback"), false).unwrap();
        assert_eq!(val, "from-env");
        env::remove_var("SERVICE_CORE_TEST_KEY");
    }

    #[test]
    fn get_env_uses_default_in_dev() {
        env::remove_var("SERVICE_CORE_TEST_MISSING");
        let val = get_env("SERVICE_CORE_TEST_MISSING", Some("fallback"), false).unwrap();
        assert_eq!(val, "fallback");
    }

    #[test]
    fn get_env_rejects_default_in_prod() {
        env::remove_var("SERVICE_CORE_TEST_MISSING");
        let err = get_env("SERVICE_CORE_TEST_MISSING", Some("fallback"), true);
        assert!(err.is_err());
    }

    #[test]
    fn environment_parses_case_insensitively() {
        assert_eq!("DEV".parse::<Environment>().unwrap(), Environment::Dev);
        assert_eq!("prod".parse::<Environment>().unwrap(), Environment::Prod);
        assert!("staging".parse::<Environment>().is_err());
    }
}
