//! Response types and utilities.

pub mod types;

pub use types::*;
