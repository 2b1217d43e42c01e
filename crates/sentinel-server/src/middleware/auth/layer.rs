//! Authentication middleware layer.

use super::{
    jwt::decode_token,
    types::{AuthUser, TokenType},
};
use crate::error::ApiError;
use axum::{
    body::Body,
    http::{header, Request},
    response::{IntoResponse, Response},
};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};

/// Authentication layer configuration.
#[derive(Clone)]
pub struct AuthLayer {
    jwt_secret: Arc<String>,
}

impl AuthLayer {
    /// Create new auth layer.
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: Arc::new(jwt_secret.into()),
        }
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthMiddleware {
            inner,
            jwt_secret: self.jwt_secret.clone(),
        }
    }
}

/// Authentication middleware service.
#[derive(Clone)]
pub struct AuthMiddleware<S> {
    inner: S,
    jwt_secret: Arc<String>,
}

impl<S> Service<Request<Body>> for AuthMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let jwt_secret = self.jwt_secret.clone();
        let clone = self.inner.clone();
        // Use the service that was driven to readiness.
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            match authenticate(&req, &jwt_secret) {
                Ok(auth_user) => {
                    req.extensions_mut().insert(auth_user);
                    inner.call(req).await
                }
                Err(err) => Ok(err.into_response()),
            }
        })
    }
}

/// Resolve the caller from the request's bearer token.
fn authenticate(req: &Request<Body>, jwt_secret: &str) -> Result<AuthUser, ApiError> {
    let token = extract_token(req)?;
    let claims = decode_token(&token, jwt_secret)?;

    if claims.token_type != TokenType::Access {
        return Err(ApiError::InvalidToken);
    }

    if claims.is_expired() {
        return Err(ApiError::TokenExpired);
    }

    AuthUser::from_claims(claims).ok_or(ApiError::InvalidToken)
}

fn extract_token(req: &Request<Body>) -> Result<String, ApiError> {
    // Authorization header first
    if let Some(auth_header) = req.headers().get(header::AUTHORIZATION) {
        let auth_str = auth_header.to_str().map_err(|_| ApiError::InvalidToken)?;

        if let Some(token) = auth_str.strip_prefix("Bearer ") {
            let token = token.trim();
            if !token.is_empty() {
                return Ok(token.to_string());
            }
        }
    }

    // Cookie fallback
    if let Some(cookie_header) = req.headers().get(header::COOKIE) {
        let cookie_str = cookie_header.to_str().map_err(|_| ApiError::InvalidToken)?;

        for cookie in cookie_str.split(';') {
            if let Some(token) = cookie.trim().strip_prefix("access_token=") {
                return Ok(token.to_string());
            }
        }
    }

    Err(ApiError::Unauthorized)
}
