//! Request logging middleware.

use axum::http::{Request, Response};
use futures::future::BoxFuture;
use std::{
    sync::Arc,
    task::{Context, Poll},
    time::Instant,
};
use tower::{Layer, Service};
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Request logging settings.
#[derive(Clone, Debug)]
pub struct LoggingConfig {
    /// Emit request/response events at all.
    pub enabled: bool,
    /// Path prefixes that are never logged.
    pub exclude_paths: Vec<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            exclude_paths: Vec::new(),
        }
    }
}

impl LoggingConfig {
    fn should_log(&self, path: &str) -> bool {
        self.enabled && !self.exclude_paths.iter().any(|p| path.starts_with(p.as_str()))
    }
}

/// Request logging layer.
#[derive(Clone, Default)]
pub struct LoggingLayer {
    config: Arc<LoggingConfig>,
}

impl LoggingLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: LoggingConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = LoggingMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        LoggingMiddleware {
            inner,
            config: self.config.clone(),
        }
    }
}

#[derive(Clone)]
pub struct LoggingMiddleware<S> {
    inner: S,
    config: Arc<LoggingConfig>,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for LoggingMiddleware<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    ReqBody: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        if !self.config.should_log(req.uri().path()) {
            return Box::pin(inner.call(req));
        }

        let method = req.method().clone();
        let path = req.uri().path().to_string();

        let request_id = req
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(String::from)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let client_ip = req
            .headers()
            .get("x-forwarded-for")
            .or_else(|| req.headers().get("x-real-ip"))
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let span = info_span!(
            "request",
            request_id = %request_id,
            method = %method,
            path = %path,
            client_ip = %client_ip,
        );

        Box::pin(
            async move {
                let start = Instant::now();
                info!(event = "request_started");

                let response = inner.call(req).await?;

                let status = response.status().as_u16();
                let duration_ms = start.elapsed().as_millis() as u64;

                match status {
                    500.. => error!(event = "request_completed", status, duration_ms),
                    400..=499 => warn!(event = "request_completed", status, duration_ms),
                    _ => info!(event = "request_completed", status, duration_ms),
                }

                Ok(response)
            }
            .instrument(span),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::StatusCode;
    use std::convert::Infallible;
    use tower::{service_fn, ServiceExt};

    async fn teapot(_req: Request<Body>) -> Result<Response<Body>, Infallible> {
        let mut response = Response::new(Body::empty());
        *response.status_mut() = StatusCode::IM_A_TEAPOT;
        Ok(response)
    }

    #[test]
    fn test_should_log() {
        let config = LoggingConfig {
            enabled: true,
            exclude_paths: vec!["/internal/health".into()],
        };
        assert!(config.should_log("/api/v1/rbac/roles"));
        assert!(!config.should_log("/internal/health/live"));

        let disabled = LoggingConfig {
            enabled: false,
            exclude_paths: vec![],
        };
        assert!(!disabled.should_log("/api/v1/rbac/roles"));
    }

    #[tokio::test]
    async fn test_passes_response_through() {
        let service = LoggingLayer::new().layer(service_fn(teapot));
        let response = service
            .oneshot(Request::builder().uri("/x").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
    }

    #[tokio::test]
    async fn test_excluded_path_passes_through() {
        let layer = LoggingLayer::with_config(LoggingConfig {
            enabled: true,
            exclude_paths: vec!["/internal".into()],
        });
        let response = layer
            .layer(service_fn(teapot))
            .oneshot(Request::builder().uri("/internal/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
    }
}
