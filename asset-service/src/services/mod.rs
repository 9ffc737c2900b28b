pub mod error;
pub mod store;
pub mod token;

pub use error::ServiceError;
pub use store::AssetStore;
pub use token::{Claims, TokenScope, TokenVerifier};
