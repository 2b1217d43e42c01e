//! HTTP response decoding.

use serde::de::DeserializeOwned;

/// Parse a JSON response.
pub async fn parse_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ResponseError> {
    let status = response.status();
    let bytes = response.bytes().await.map_err(ResponseError::Read)?;

    serde_json::from_slice(&bytes).map_err(|e| ResponseError::Parse {
        status: status.as_u16(),
        body: String::from_utf8_lossy(&bytes).to_string(),
        source: e,
    })
}

/// Longest message taken from an error body, in characters.
pub const MAX_ERROR_MESSAGE_CHARS: usize = 200;

/// Pull a human-readable message out of an error body.
///
/// Only a JSON `message` or `error` string field counts, capped at
/// [`MAX_ERROR_MESSAGE_CHARS`]. Plain text, HTML and blank bodies yield `None`.
pub fn error_message(body: &str) -> Option<String> {
    let serde_json::Value::Object(map) = serde_json::from_str::<serde_json::Value>(body.trim()).ok()?
    else {
        return None;
    };

    ["message", "error"]
        .iter()
        .filter_map(|key| map.get(*key).and_then(|v| v.as_str()))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(|s| s.chars().take(MAX_ERROR_MESSAGE_CHARS).collect())
}

/// Response parsing errors.
#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    #[error("failed to read response body: {0}")]
    Read(#[source] reqwest::Error),

    #[error("failed to parse JSON (status {status}): {source}")]
    Parse {
        status: u16,
        body: String,
        #[source]
        source: serde_json::Error,
    },
}
