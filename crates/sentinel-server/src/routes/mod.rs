//! Route configuration for the Sentinel API server.

mod internal;
mod v1;

use crate::config::ServerConfig;
use crate::middleware::logging::{LoggingConfig, LoggingLayer};
use crate::state::AppState;
use axum::{
    http::{HeaderName, StatusCode},
    response::IntoResponse,
    Json, Router,
};
use serde_json::json;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};

const REQUEST_ID: &str = "x-request-id";

/// Create the main application router.
pub fn create_router(state: AppState, config: &ServerConfig) -> Router {
    let logging = LoggingLayer::with_config(LoggingConfig {
        enabled: config.logging.log_requests,
        exclude_paths: config.logging.exclude_paths.clone(),
    });

    let common_middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID),
            MakeRequestUuid,
        ))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(REQUEST_ID)))
        .layer(logging)
        .layer(CatchPanicLayer::new())
        .layer(RequestBodyLimitLayer::new(config.server.body_limit_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )));

    Router::new()
        .nest("/api/v1", v1::router(&state))
        .nest("/internal", internal::router())
        .fallback(fallback_handler)
        .layer(common_middleware)
        .with_state(state)
}

async fn fallback_handler() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "message": "The requested resource was not found",
            "code": "not_found"
        })),
    )
}
