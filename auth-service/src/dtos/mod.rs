pub mod auth;

pub use auth::{
    AuthResponse, LoginRequest, MessageResponse, MfaPreferenceRequest, MfaSetupResponse,
    MfaVerifyRequest, RegisterRequest,
};
