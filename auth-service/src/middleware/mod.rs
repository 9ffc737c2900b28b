pub mod auth;

pub use auth::{auth_middleware, mfa_auth_middleware, AuthUser};
