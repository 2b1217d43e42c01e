//! Error context utilities.

use super::types::ApiError;
use crate::services::RbacError;

/// Extension trait turning authorization-service failures into API errors.
pub trait ErrorContext<T> {
    /// Convert the error, substituting `fallback` when an internal fault
    /// carries no message.
    fn or_fallback(self, fallback: &str) -> Result<T, ApiError>;
}

impl<T> ErrorContext<T> for Result<T, RbacError> {
    fn or_fallback(self, fallback: &str) -> Result<T, ApiError> {
        self.map_err(|err| from_rbac(err, fallback))
    }
}

/// Map a service error onto the HTTP error taxonomy.
pub fn from_rbac(err: RbacError, fallback: &str) -> ApiError {
    match err {
        RbacError::InvalidInput(message) => ApiError::BadRequest(message),
        RbacError::NotFound(message) => ApiError::NotFound(message),
        RbacError::Internal(message) => ApiError::Internal(
            message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| fallback.to_string()),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FALLBACK: &str = "Failed to retrieve roles";

    #[test]
    fn test_internal_with_message() {
        let result: Result<(), _> = Err(RbacError::internal("connection reset"));
        let err = result.or_fallback(FALLBACK).unwrap_err();
        assert!(matches!(err, ApiError::Internal(ref m) if m == "connection reset"));
    }

    #[test]
    fn test_internal_without_message_uses_fallback() {
        let result: Result<(), _> = Err(RbacError::Internal(None));
        let err = result.or_fallback(FALLBACK).unwrap_err();
        assert_eq!(err.to_string(), FALLBACK);

        let result: Result<(), _> = Err(RbacError::Internal(Some("  ".into())));
        assert_eq!(result.or_fallback(FALLBACK).unwrap_err().to_string(), FALLBACK);
    }

    #[test]
    fn test_typed_kinds_keep_their_status() {
        let err = from_rbac(RbacError::InvalidInput("bad name".into()), FALLBACK);
        assert!(matches!(err, ApiError::BadRequest(_)));

        let err = from_rbac(RbacError::NotFound("unknown user".into()), FALLBACK);
        assert!(matches!(err, ApiError::NotFound(ref m) if m == "unknown user"));
    }

    #[test]
    fn test_ok_passes_through() {
        let result: Result<u8, RbacError> = Ok(7);
        assert_eq!(result.or_fallback(FALLBACK).unwrap(), 7);
    }
}
