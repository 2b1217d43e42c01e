//! Configuration loading utilities.

use super::types::ServerConfig;
use anyhow::{bail, Context, Result};
use std::path::Path;
use tracing::info;

/// Environment prefix for configuration overrides.
pub const ENV_PREFIX: &str = "SENTINEL";

/// Load configuration from various sources.
///
/// Sources are layered: built-in defaults, then the config file (if any),
/// then `SENTINEL__SECTION__KEY` environment variables.
pub struct ConfigLoader {
    config_path: Option<String>,
    env_prefix: String,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Set config file path.
    pub fn with_config_path(mut self, path: impl Into<String>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Set environment variable prefix.
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration.
    pub fn load(&self) -> Result<ServerConfig> {
        let mut builder = config::Config::builder().add_source(config::File::from_str(
            include_str!("defaults.toml"),
            config::FileFormat::Toml,
        ));

        if let Some(path) = &self.config_path {
            if !Path::new(path).exists() {
                bail!("Config file not found: {path}");
            }
            info!(path = %path, "Loading config file");
            builder = builder.add_source(config::File::with_name(path));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(&self.env_prefix)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Load configuration, taking the file path from `SENTINEL_CONFIG` or
/// `CONFIG_PATH` when `path` is not given.
pub fn load_config(path: Option<&str>) -> Result<ServerConfig> {
    let config_path = path
        .map(String::from)
        .or_else(|| std::env::var("SENTINEL_CONFIG").ok())
        .or_else(|| std::env::var("CONFIG_PATH").ok());

    let mut loader = ConfigLoader::new();
    if let Some(path) = config_path {
        loader = loader.with_config_path(path);
    }

    loader.load()
}

impl ServerConfig {
    /// Load from the environment alone (plus `SENTINEL_CONFIG`/`CONFIG_PATH`).
    pub fn from_env() -> Result<Self> {
        load_config(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> (std::path::PathBuf, String) {
        let dir = std::env::temp_dir().join(format!("sentinel-config-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("sentinel.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        let display = path.to_string_lossy().into_owned();
        (dir, display)
    }

    #[test]
    fn test_load_file_over_defaults() {
        let (dir, path) = write_config(
            r#"
            [server]
            port = 9000

            [auth]
            jwt_secret = "file-secret-file-secret-file-secret"

            [upstream]
            base_url = "http://authz.internal:8081"
            api_key = "k"
            "#,
        );

        let config = ConfigLoader::new()
            .with_env_prefix("SENTINEL_TEST_UNUSED")
            .with_config_path(&path)
            .load()
            .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.auth.jwt_secret, "file-secret-file-secret-file-secret");
        assert_eq!(config.upstream.base_url, "http://authz.internal:8081");
        assert_eq!(config.upstream.api_key.as_deref(), Some("k"));
        assert_eq!(config.logging.level, "info");

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_missing_file_is_error() {
        let result = ConfigLoader::new()
            .with_config_path("/nonexistent/sentinel.toml")
            .load();
        assert!(result.is_err());
    }

    #[test]
    fn test_defaults_without_sources() {
        let config = ConfigLoader::new()
            .with_env_prefix("SENTINEL_TEST_EMPTY")
            .load()
            .unwrap();
        assert_eq!(config.server.port, 8080);
        assert!(config.auth.jwt_secret.is_empty());
    }
}
