pub mod user;

pub use user::{MfaChannel, SanitizedUser, User};
