//! Request handlers.

pub mod rbac;

pub use rbac::{PermissionCheck, UserPermissions};
