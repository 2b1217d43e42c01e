//! Standard API response envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Success envelope: a fixed human-readable `message` plus the payload.
///
/// Failures use [`crate::error::ApiError`], which serializes as
/// `{message, code}` without `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Human-readable outcome.
    pub message: String,
    /// Response payload.
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Create a successful response.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}
