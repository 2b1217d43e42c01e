//! API v1 routes.

use crate::handlers::rbac;
use crate::middleware::AuthLayer;
use crate::state::AppState;
use axum::{routing::get, Router};

/// Create the v1 API router.
pub fn router(state: &AppState) -> Router<AppState> {
    Router::new().nest("/rbac", rbac_routes(state))
}

fn rbac_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/roles", get(rbac::list_roles))
        .route("/permissions", get(rbac::list_permissions))
        .route("/me/permissions", get(rbac::current_user_permissions))
        // An empty segment is answered by the handler with 400.
        .route("/me/permissions/", get(rbac::check_permission))
        .route("/me/permissions/:permission", get(rbac::check_permission))
        .route("/me/hierarchy", get(rbac::current_user_hierarchy))
        .route_layer(AuthLayer::new(state.jwt_secret()))
}
