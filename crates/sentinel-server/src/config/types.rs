//! Server configuration types.

use serde::{Deserialize, Serialize};
use std::net::{AddrParseError, SocketAddr};

/// Main server configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server binding configuration.
    #[serde(default)]
    pub server: ServerBindConfig,
    /// Authentication configuration.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Authorization service connection.
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server binding configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerBindConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind to.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Request timeout.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Maximum request body size in bytes.
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

fn default_body_limit() -> usize {
    64 * 1024
}

impl Default for ServerBindConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

impl ServerBindConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

/// Authentication configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HS256 secret for access tokens.
    #[serde(default)]
    pub jwt_secret: String,
}

/// Authorization service connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the authorization service.
    #[serde(default = "default_upstream_url")]
    pub base_url: String,
    /// Sent as `x-api-key` on every upstream request.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_upstream_timeout")]
    pub request_timeout_secs: u64,
}

fn default_upstream_url() -> String {
    "http://127.0.0.1:9090".to_string()
}

fn default_connect_timeout() -> u64 {
    5
}

fn default_upstream_timeout() -> u64 {
    10
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_upstream_url(),
            api_key: None,
            connect_timeout_secs: default_connect_timeout(),
            request_timeout_secs: default_upstream_timeout(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty, compact or json).
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Enable request logging.
    #[serde(default = "default_true")]
    pub log_requests: bool,
    /// Paths to exclude from request logging.
    #[serde(default = "default_exclude_paths")]
    pub exclude_paths: Vec<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_true() -> bool {
    true
}

fn default_exclude_paths() -> Vec<String> {
    vec!["/internal/health".to_string()]
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_requests: true,
            exclude_paths: default_exclude_paths(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.upstream.base_url, "http://127.0.0.1:9090");
        assert!(config.logging.log_requests);
        assert_eq!(
            config.server.socket_addr().unwrap(),
            "0.0.0.0:8080".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_bad_host() {
        let bind = ServerBindConfig {
            host: "not a host".into(),
            ..ServerBindConfig::default()
        };
        assert!(bind.socket_addr().is_err());
    }

    #[test]
    fn test_partial_deserialize() {
        let config: ServerConfig = serde_json::from_value(serde_json::json!({
            "auth": {"jwt_secret": "s"},
            "upstream": {"base_url": "https://authz.internal"}
        }))
        .unwrap();

        assert_eq!(config.auth.jwt_secret, "s");
        assert_eq!(config.upstream.base_url, "https://authz.internal");
        assert_eq!(config.upstream.request_timeout_secs, 10);
        assert_eq!(config.server.host, "0.0.0.0");
    }
}
