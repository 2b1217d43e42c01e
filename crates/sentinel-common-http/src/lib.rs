//! HTTP client utilities for Sentinel.

pub mod client;
pub mod request;
pub mod response;

pub use client::{build_client, HttpClient, HttpConfig, HttpError};
pub use request::{headers, RequestBuilder};
pub use response::{error_message, parse_json, ResponseError, MAX_ERROR_MESSAGE_CHARS};
