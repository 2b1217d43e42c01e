//! Shared application state.

use crate::config::ServerConfig;
use crate::services::{HttpRbacService, RbacService};
use anyhow::Context;
use std::sync::Arc;

/// State handed to every handler. Cheap to clone and never mutated.
#[derive(Clone)]
pub struct AppState {
    rbac: Arc<dyn RbacService>,
    jwt_secret: Arc<String>,
}

impl AppState {
    /// Build state backed by the configured authorization service.
    pub fn new(config: &ServerConfig) -> anyhow::Result<Self> {
        let service = HttpRbacService::new(&config.upstream)
            .context("Failed to create authorization service client")?;
        Ok(Self::from_service(Arc::new(service), config.auth.jwt_secret.clone()))
    }

    /// Build state around an existing service.
    pub fn from_service(rbac: Arc<dyn RbacService>, jwt_secret: impl Into<String>) -> Self {
        Self {
            rbac,
            jwt_secret: Arc::new(jwt_secret.into()),
        }
    }

    pub fn rbac(&self) -> &dyn RbacService {
        self.rbac.as_ref()
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
