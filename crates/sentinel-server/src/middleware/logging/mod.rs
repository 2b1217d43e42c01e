//! Request logging.

pub mod layer;

pub use layer::{LoggingConfig, LoggingLayer, LoggingMiddleware};
