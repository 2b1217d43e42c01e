//! Role and permission query handlers.
//!
//! Each handler makes one call to the authorization service and wraps the
//! result in the standard envelope. Service failures surface through
//! [`ErrorContext::or_fallback`] with the operation's fallback message.

use crate::audit::log_permission_check;
use crate::error::{ApiError, ApiResult, ErrorContext};
use crate::middleware::auth::Auth;
use crate::response::ApiResponse;
use crate::services::{Permission, Role, RoleHierarchy};
use crate::state::AppState;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const ROLES_RETRIEVED: &str = "Roles retrieved successfully";
pub const ROLES_FAILED: &str = "Failed to retrieve roles";
pub const PERMISSIONS_RETRIEVED: &str = "Permissions retrieved successfully";
pub const PERMISSIONS_FAILED: &str = "Failed to retrieve permissions";
pub const USER_PERMISSIONS_RETRIEVED: &str = "User permissions retrieved successfully";
pub const USER_PERMISSIONS_FAILED: &str = "Failed to retrieve user permissions";
pub const PERMISSION_CHECKED: &str = "Permission check completed";
pub const PERMISSION_CHECK_FAILED: &str = "Failed to check permission";
pub const HIERARCHY_RETRIEVED: &str = "User hierarchy retrieved successfully";
pub const HIERARCHY_FAILED: &str = "Failed to retrieve user hierarchy";
pub const PERMISSION_REQUIRED: &str = "Permission parameter is required";

/// Payload of `GET /me/permissions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPermissions {
    pub permissions: Vec<Permission>,
}

/// Payload of `GET /me/permissions/:permission`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermissionCheck {
    pub permission: String,
    pub has_permission: bool,
}

/// `GET /roles`
pub async fn list_roles(State(state): State<AppState>) -> ApiResult<ApiResponse<Vec<Role>>> {
    let roles = state.rbac().all_roles().await.or_fallback(ROLES_FAILED)?;
    Ok(ApiResponse::ok(ROLES_RETRIEVED, roles))
}

/// `GET /permissions`
pub async fn list_permissions(
    State(state): State<AppState>,
) -> ApiResult<ApiResponse<Vec<Permission>>> {
    let permissions = state
        .rbac()
        .all_permissions()
        .await
        .or_fallback(PERMISSIONS_FAILED)?;
    Ok(ApiResponse::ok(PERMISSIONS_RETRIEVED, permissions))
}

/// `GET /me/permissions`
pub async fn current_user_permissions(
    State(state): State<AppState>,
    Auth(user): Auth,
) -> ApiResult<ApiResponse<UserPermissions>> {
    let permissions = state
        .rbac()
        .current_user_permissions(&user)
        .await
        .or_fallback(USER_PERMISSIONS_FAILED)?;
    Ok(ApiResponse::ok(
        USER_PERMISSIONS_RETRIEVED,
        UserPermissions { permissions },
    ))
}

/// `GET /me/permissions/:permission`
///
/// Also mounted without the segment so that an empty name is answered with
/// 400 instead of a routing 404.
pub async fn check_permission(
    State(state): State<AppState>,
    Auth(user): Auth,
    permission: Option<Path<String>>,
) -> ApiResult<ApiResponse<PermissionCheck>> {
    let permission = permission
        .map(|Path(p)| p)
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest(PERMISSION_REQUIRED.to_string()))?;

    let has_permission = state
        .rbac()
        .check_current_user_permission(&permission, &user)
        .await
        .or_fallback(PERMISSION_CHECK_FAILED)?;

    log_permission_check(&user, &permission, has_permission);

    Ok(ApiResponse::ok(
        PERMISSION_CHECKED,
        PermissionCheck {
            permission,
            has_permission,
        },
    ))
}

/// `GET /me/hierarchy`
pub async fn current_user_hierarchy(
    State(state): State<AppState>,
    Auth(user): Auth,
) -> ApiResult<ApiResponse<RoleHierarchy>> {
    let hierarchy = state
        .rbac()
        .current_user_hierarchy(&user)
        .await
        .or_fallback(HIERARCHY_FAILED)?;
    debug!(user_id = %user.id, "hierarchy resolved");
    Ok(ApiResponse::ok(HIERARCHY_RETRIEVED, hierarchy))
}
