//! Configuration validation.

use super::types::ServerConfig;
use sentinel_common_log::{LogFormat, LogLevel};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid JWT secret: must be at least 32 characters")]
    InvalidJwtSecret,

    #[error("Invalid port: {0}")]
    InvalidPort(u16),

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Invalid request timeout: must be greater than zero")]
    InvalidRequestTimeout,

    #[error("Invalid body limit: must be greater than zero")]
    InvalidBodyLimit,

    #[error("Invalid upstream URL: {0}")]
    InvalidUpstreamUrl(String),

    #[error("Invalid upstream timeout: must be greater than zero")]
    InvalidUpstreamTimeout,

    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}")]
    InvalidLogFormat(String),
}

/// Minimum HS256 secret length.
pub const MIN_JWT_SECRET_LEN: usize = 32;

/// Validate server configuration, collecting every problem found.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.auth.jwt_secret.len() < MIN_JWT_SECRET_LEN {
        errors.push(ConfigError::InvalidJwtSecret);
    }

    if config.server.port == 0 {
        errors.push(ConfigError::InvalidPort(0));
    } else if config.server.socket_addr().is_err() {
        errors.push(ConfigError::InvalidBindAddress(config.server.host.clone()));
    }

    if config.server.request_timeout_secs == 0 {
        errors.push(ConfigError::InvalidRequestTimeout);
    }

    if config.server.body_limit_bytes == 0 {
        errors.push(ConfigError::InvalidBodyLimit);
    }

    match Url::parse(&config.upstream.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host().is_some() => {}
        _ => errors.push(ConfigError::InvalidUpstreamUrl(config.upstream.base_url.clone())),
    }

    if config.upstream.connect_timeout_secs == 0 || config.upstream.request_timeout_secs == 0 {
        errors.push(ConfigError::InvalidUpstreamTimeout);
    }

    if LogLevel::parse(&config.logging.level).is_none() {
        errors.push(ConfigError::InvalidLogLevel(config.logging.level.clone()));
    }

    if LogFormat::parse(&config.logging.format).is_none() {
        errors.push(ConfigError::InvalidLogFormat(config.logging.format.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> ServerConfig {
    use super::types::*;

    ServerConfig {
        server: ServerBindConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            request_timeout_secs: 30,
            body_limit_bytes: 64 * 1024,
        },
        auth: AuthConfig {
            jwt_secret: "a".repeat(32),
        },
        upstream: UpstreamConfig {
            base_url: "http://localhost:9090".to_string(),
            api_key: None,
            connect_timeout_secs: 5,
            request_timeout_secs: 10,
        },
        logging: LoggingConfig::default(),
    }
}
