pub mod assets;

pub use assets::{CreateAssetRequest, TransferAssetRequest};
