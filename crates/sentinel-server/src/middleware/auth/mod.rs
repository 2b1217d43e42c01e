//! Authentication middleware for the Sentinel API server.

pub mod extractor;
pub mod jwt;
pub mod layer;
pub mod types;

pub use extractor::Auth;
pub use jwt::{decode_token, encode_token};
pub use layer::{AuthLayer, AuthMiddleware};
pub use types::{AuthUser, Claims, TokenType};
