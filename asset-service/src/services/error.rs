use service_core::error::AppError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),

    #[error("Asset not found")]
    AssetNotFound,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Internal(e) => AppError::InternalError(e),
            ServiceError::AssetNotFound => AppError::NotFound(anyhow::anyhow!("Asset not found")),
            ServiceError::InvalidToken => AppError::Unauthorized(anyhow::anyhow!("Invalid token")),
            ServiceError::TokenExpired => AppError::Unauthorized(anyhow::anyhow!("Token expired")),
        }
    }
}
