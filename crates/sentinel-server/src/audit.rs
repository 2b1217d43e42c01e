//! Permission check audit logging.

use crate::middleware::auth::AuthUser;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

/// Outcome of a permission check, recorded for audit.
#[derive(Debug, Clone, Serialize)]
pub struct PermissionAuditEvent {
    pub timestamp: DateTime<Utc>,
    pub user_id: Uuid,
    pub user_email: String,
    pub permission: String,
    pub granted: bool,
}

impl PermissionAuditEvent {
    pub fn new(user: &AuthUser, permission: &str, granted: bool) -> Self {
        Self {
            timestamp: Utc::now(),
            user_id: user.id,
            user_email: user.email.clone(),
            permission: permission.to_string(),
            granted,
        }
    }

    /// Event name used in the log stream.
    pub fn event(&self) -> &'static str {
        if self.granted {
            "authz_granted"
        } else {
            "authz_denied"
        }
    }

    pub fn log(&self) {
        info!(
            event = self.event(),
            user_id = %self.user_id,
            user_email = %self.user_email,
            permission = %self.permission,
            granted = self.granted,
            "Permission check"
        );
    }
}

/// Log the result of a permission check.
pub fn log_permission_check(user: &AuthUser, permission: &str, granted: bool) {
    PermissionAuditEvent::new(user, permission, granted).log();
}
