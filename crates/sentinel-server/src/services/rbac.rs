//! Contract with the authorization service.
//!
//! Roles, permissions and hierarchies are owned by the service. This crate
//! only forwards them, so the models keep every field the service sends.

use crate::middleware::auth::AuthUser;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// A named grouping of permissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Any other fields the service attaches (ids, parents, permissions).
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            attributes: Map::new(),
        }
    }
}

/// A named capability checked against a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Permission {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Permission {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            attributes: Map::new(),
        }
    }
}

/// A user's role ancestry as the service describes it. Opaque here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleHierarchy(pub Value);

/// Failures reported by an [`RbacService`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RbacError {
    /// The request was rejected as malformed.
    #[error("{0}")]
    InvalidInput(String),

    /// The user, role or permission does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Anything else. The message, when present, is shown to the caller.
    #[error("{}", .0.as_deref().unwrap_or("authorization service failure"))]
    Internal(Option<String>),
}

impl RbacError {
    /// Internal fault with a message.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(Some(message.into()))
    }
}

/// Read-only queries answered by the authorization service.
///
/// Implementations must be safe to call concurrently; each handler issues
/// exactly one call per request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RbacService: Send + Sync {
    /// Every role known to the service.
    async fn all_roles(&self) -> Result<Vec<Role>, RbacError>;

    /// Every permission known to the service.
    async fn all_permissions(&self) -> Result<Vec<Permission>, RbacError>;

    /// Effective permissions of the caller.
    async fn current_user_permissions(&self, user: &AuthUser) -> Result<Vec<Permission>, RbacError>;

    /// Whether the caller holds `permission`.
    async fn check_current_user_permission(
        &self,
        permission: &str,
        user: &AuthUser,
    ) -> Result<bool, RbacError>;

    /// The caller's role hierarchy.
    async fn current_user_hierarchy(&self, user: &AuthUser) -> Result<RoleHierarchy, RbacError>;

    /// Readiness probe. Services without a health signal are always ready.
    async fn ready(&self) -> Result<(), RbacError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_keeps_unknown_fields() {
        let raw = json!({
            "id": 3,
            "name": "editor",
            "description": "Can edit content",
            "parent": "viewer",
            "permissions": ["content:write"]
        });

        let role: Role = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(role.name, "editor");
        assert_eq!(role.description.as_deref(), Some("Can edit content"));
        assert_eq!(role.attributes["parent"], "viewer");

        assert_eq!(serde_json::to_value(&role).unwrap(), raw);
    }

    #[test]
    fn test_permission_minimal() {
        let permission: Permission = serde_json::from_value(json!({"name": "read:x"})).unwrap();
        assert_eq!(permission, Permission::new("read:x"));
        assert_eq!(serde_json::to_value(&permission).unwrap(), json!({"name": "read:x"}));
    }

    #[test]
    fn test_hierarchy_is_transparent() {
        let raw = json!({"role": "admin", "children": [{"role": "editor"}]});
        let hierarchy: RoleHierarchy = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&hierarchy).unwrap(), raw);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(RbacError::internal("db down").to_string(), "db down");
        assert_eq!(RbacError::Internal(None).to_string(), "authorization service failure");
        assert_eq!(RbacError::NotFound("no user".into()).to_string(), "no user");
    }

    struct AlwaysEmpty;

    #[async_trait]
    impl RbacService for AlwaysEmpty {
        async fn all_roles(&self) -> Result<Vec<Role>, RbacError> {
            Ok(vec![])
        }
        async fn all_permissions(&self) -> Result<Vec<Permission>, RbacError> {
            Ok(vec![])
        }
        async fn current_user_permissions(&self, _: &AuthUser) -> Result<Vec<Permission>, RbacError> {
            Ok(vec![])
        }
        async fn check_current_user_permission(&self, _: &str, _: &AuthUser) -> Result<bool, RbacError> {
            Ok(false)
        }
        async fn current_user_hierarchy(&self, _: &AuthUser) -> Result<RoleHierarchy, RbacError> {
            Ok(RoleHierarchy(Value::Null))
        }
    }

    #[tokio::test]
    async fn test_ready_defaults_to_ok() {
        assert_eq!(AlwaysEmpty.ready().await, Ok(()));
    }
}
