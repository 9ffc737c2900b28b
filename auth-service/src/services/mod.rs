pub mod auth;
pub mod error;
pub mod jwt;
pub mod mfa;
pub mod store;

pub use auth::{AuthService, LoginOutcome};
pub use error::ServiceError;
pub use jwt::{Claims, JwtService, TokenScope};
pub use mfa::{MfaEnrollment, MfaService};
pub use store::UserStore;
