use service_core::error::AppError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email already registered")]
    EmailAlreadyRegistered,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid MFA code")]
    InvalidMfaCode,
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Internal(e) => AppError::InternalError(e),
            ServiceError::InvalidCredentials => {
                AppError::Unauthorized(anyhow::anyhow!("Invalid credentials"))
            }
            ServiceError::EmailAlreadyRegistered => {
                AppError::Conflict(anyhow::anyhow!("Email already registered"))
            }
            ServiceError::InvalidToken => AppError::Unauthorized(anyhow::anyhow!("Invalid token")),
            ServiceError::TokenExpired => AppError::Unauthorized(anyhow::anyhow!("Token expired")),
            ServiceError::UserNotFound => AppError::Unauthorized(anyhow::anyhow!("User not found")),
            ServiceError::InvalidMfaCode => {
                AppError::Unauthorized(anyhow::anyhow!("Invalid MFA code"))
            }
        }
    }
}
