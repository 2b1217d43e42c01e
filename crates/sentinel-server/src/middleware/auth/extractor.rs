//! Authentication extractors for handlers.

use super::types::AuthUser;
use crate::error::ApiError;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

/// Extractor for the authenticated caller.
///
/// Rejects with 401 when [`super::AuthLayer`] did not run or did not
/// attach an identity, so handlers never see an anonymous request.
pub struct Auth(pub AuthUser);

#[async_trait]
impl<S> FromRequestParts<S> for Auth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .map(Auth)
            .ok_or(ApiError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::auth::types::Claims;
    use axum::http::Request;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_auth_extractor_success() {
        let claims = Claims::new_access(Uuid::new_v4(), "test@example.com", vec!["user".into()], 3600);
        let auth_user = AuthUser::from_claims(claims).unwrap();

        let (mut parts, _) = Request::new(()).into_parts();
        parts.extensions.insert(auth_user.clone());

        let Auth(extracted_user) = Auth::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(extracted_user, auth_user);
    }

    #[tokio::test]
    async fn test_auth_extractor_missing() {
        let (mut parts, _) = Request::new(()).into_parts();

        let result = Auth::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(ApiError::Unauthorized)));
    }
}
