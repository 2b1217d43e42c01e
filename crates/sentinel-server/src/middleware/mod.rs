//! Middleware for the Sentinel API server.

pub mod auth;
pub mod logging;

pub use auth::{Auth, AuthLayer, AuthMiddleware, AuthUser, Claims};
pub use logging::{LoggingConfig, LoggingLayer, LoggingMiddleware};
