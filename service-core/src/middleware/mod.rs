pub mod cors;
pub mod tracing;

pub use cors::build_cors_layer;
pub use tracing::{request_id_middleware, REQUEST_ID_HEADER};
