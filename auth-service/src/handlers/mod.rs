pub mod auth;
pub mod mfa;
