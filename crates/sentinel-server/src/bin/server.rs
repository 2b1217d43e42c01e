//! Sentinel Server Binary

use anyhow::{bail, Result};
use clap::Parser;
use sentinel_common_log::{LogConfig, LogFormat, LogLevel};
use sentinel_server::config::{load_config, validate_config};
use sentinel_server::Server;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "sentinel-server", version, about = "Sentinel RBAC query gateway")]
struct Cli {
    /// Path to a TOML/YAML/JSON config file.
    #[arg(short, long, env = "SENTINEL_CONFIG")]
    config: Option<String>,

    /// Load and validate configuration, then exit.
    #[arg(long)]
    validate_only: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;

    let log_config = LogConfig {
        level: LogLevel::parse(&config.logging.level).unwrap_or_default(),
        format: LogFormat::parse(&config.logging.format).unwrap_or_default(),
        ..LogConfig::default()
    }
    .with_env_overrides();
    sentinel_common_log::init(log_config)?;

    if let Err(errors) = validate_config(&config) {
        for err in &errors {
            error!(error = %err, "Invalid configuration");
        }
        bail!("{} configuration error(s)", errors.len());
    }

    if cli.validate_only {
        info!("Configuration is valid");
        return Ok(());
    }

    info!("Starting Sentinel Server v{}", env!("CARGO_PKG_VERSION"));

    let server = Server::new(config)?;
    server.run().await?;

    info!("Server shutdown complete");
    Ok(())
}
