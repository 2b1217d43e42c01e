//! Authorization service access.

pub mod http;
pub mod rbac;

pub use http::HttpRbacService;
pub use rbac::{Permission, RbacError, RbacService, Role, RoleHierarchy};

#[cfg(test)]
pub use rbac::MockRbacService;
