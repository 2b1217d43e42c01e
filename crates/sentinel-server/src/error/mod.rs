//! Error handling for the Sentinel API server.

pub mod context;
pub mod response;
pub mod types;

pub use context::{from_rbac, ErrorContext};
pub use types::{ApiError, ApiResult};
