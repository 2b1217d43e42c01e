//! Internal routes for health checks.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use serde_json::{json, Value};
use tracing::warn;

/// Create the internal routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness))
        .route("/health/ready", get(readiness))
}

async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn liveness() -> impl IntoResponse {
    Json(json!({
        "status": "alive",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Ready when the authorization service answers its health probe.
async fn readiness(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    if let Err(err) = state.rbac().ready().await {
        warn!(error = %err, "authorization service not ready");
        return Err(ApiError::ServiceUnavailable(
            "Authorization service unavailable".to_string(),
        ));
    }

    Ok(Json(json!({
        "status": "ready",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "checks": {
            "authorization_service": "ok"
        }
    })))
}
