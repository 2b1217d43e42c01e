//! [`RbacService`] backed by a remote authorization service over HTTP.

use super::rbac::{Permission, RbacError, RbacService, Role, RoleHierarchy};
use crate::config::UpstreamConfig;
use crate::middleware::auth::AuthUser;
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use sentinel_common_http::{error_message, HttpClient, HttpConfig, HttpError, RequestBuilder};
use sentinel_common_log::spans::{record_error, upstream_span, Timer};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn, Instrument};

/// Header carrying the caller's roles, comma separated.
pub const X_USER_ROLES: &str = "x-user-roles";
/// Header carrying the caller's email.
pub const X_USER_EMAIL: &str = "x-user-email";

const SERVICE: &str = "rbac";

#[derive(Debug, Deserialize)]
struct PermissionCheckReply {
    #[serde(alias = "allowed")]
    has_permission: bool,
}

/// HTTP client for the authorization service.
#[derive(Debug, Clone)]
pub struct HttpRbacService {
    client: HttpClient,
    requests: RequestBuilder,
}

impl HttpRbacService {
    /// Build a client from upstream settings.
    pub fn new(config: &UpstreamConfig) -> Result<Self, HttpError> {
        let client = HttpClient::with_config(HttpConfig {
            connect_timeout: Duration::from_secs(config.connect_timeout_secs),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
            ..HttpConfig::default()
        })?;

        let mut requests = RequestBuilder::new(&config.base_url)?;
        if let Some(key) = config.api_key.as_deref().filter(|k| !k.is_empty()) {
            requests = requests.api_key(key);
        }

        Ok(Self { client, requests })
    }

    fn user_headers(&self, user: &AuthUser) -> HeaderMap {
        self.requests
            .clone()
            .header(X_USER_EMAIL, &user.email)
            .header(X_USER_ROLES, user.roles.join(","))
            .headers()
            .clone()
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        segments: &[&str],
        headers: HeaderMap,
    ) -> Result<T, RbacError> {
        let url = self.requests.url(segments);
        let span = upstream_span(SERVICE, operation);

        async move {
            let timer = Timer::start(operation);
            match self.client.get_json::<T>(url, headers).await {
                Ok(value) => {
                    timer.finish();
                    Ok(value)
                }
                Err(err) => {
                    record_error(&err);
                    warn!(
                        error = %err,
                        status = ?err.status(),
                        body = err.body().unwrap_or_default(),
                        duration_ms = timer.elapsed_ms(),
                        "authorization service call failed"
                    );
                    Err(RbacError::from(err))
                }
            }
        }
        .instrument(span)
        .await
    }
}

impl From<HttpError> for RbacError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::ClientError { status: 400 | 422, body } => RbacError::InvalidInput(
                error_message(&body).unwrap_or_else(|| "Invalid request".to_string()),
            ),
            HttpError::ClientError { status: 404, body } => RbacError::NotFound(
                error_message(&body).unwrap_or_else(|| "Not found".to_string()),
            ),
            HttpError::ClientError { body, .. } | HttpError::ServerError { body, .. } => {
                RbacError::Internal(error_message(&body))
            }
            HttpError::Timeout => RbacError::internal("Authorization service timed out"),
            HttpError::Request(_) => RbacError::internal("Authorization service unreachable"),
            HttpError::RateLimited { .. } => {
                RbacError::internal("Authorization service is rate limiting requests")
            }
            HttpError::Decode(_) => {
                RbacError::internal("Authorization service returned an invalid response")
            }
            HttpError::ClientBuild(_) | HttpError::InvalidUrl(_) => RbacError::Internal(None),
        }
    }
}

#[async_trait]
impl RbacService for HttpRbacService {
    async fn all_roles(&self) -> Result<Vec<Role>, RbacError> {
        self.fetch("all_roles", &["roles"], self.requests.headers().clone())
            .await
    }

    async fn all_permissions(&self) -> Result<Vec<Permission>, RbacError> {
        self.fetch("all_permissions", &["permissions"], self.requests.headers().clone())
            .await
    }

    async fn current_user_permissions(&self, user: &AuthUser) -> Result<Vec<Permission>, RbacError> {
        let user_id = user.id.to_string();
        self.fetch(
            "current_user_permissions",
            &["users", user_id.as_str(), "permissions"],
            self.user_headers(user),
        )
        .await
    }

    async fn check_current_user_permission(
        &self,
        permission: &str,
        user: &AuthUser,
    ) -> Result<bool, RbacError> {
        let user_id = user.id.to_string();
        let reply: PermissionCheckReply = self
            .fetch(
                "check_current_user_permission",
                &["users", user_id.as_str(), "permissions", permission],
                self.user_headers(user),
            )
            .await?;
        Ok(reply.has_permission)
    }

    async fn current_user_hierarchy(&self, user: &AuthUser) -> Result<RoleHierarchy, RbacError> {
        let user_id = user.id.to_string();
        self.fetch(
            "current_user_hierarchy",
            &["users", user_id.as_str(), "hierarchy"],
            self.user_headers(user),
        )
        .await
    }

    async fn ready(&self) -> Result<(), RbacError> {
        let url = self.requests.url(&["health"]);
        let response = self
            .client
            .get(url, self.requests.headers().clone())
            .await
            .map_err(RbacError::from)?;
        HttpClient::check_response(response)
            .await
            .map_err(RbacError::from)?;
        debug!("authorization service ready");
        Ok(())
    }
}
