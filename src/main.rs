//! Items API (v1)
//!
//! A small catalog service built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────────┐
//!                        │                    ITEMS API                     │
//!                        │                                                  │
//!     Client Request     │  ┌───────────────┐    ┌──────────────────────┐   │
//!     ───────────────────┼─▶│ observability │───▶│ timeout / body limit │   │
//!                        │  │  middleware   │    │    panic catching    │   │
//!                        │  └───────┬───────┘    └──────────┬───────────┘   │
//!                        │          │                       ▼               │
//!                        │          │             ┌──────────────────┐      │
//!                        │          │             │     handlers     │      │
//!                        │          │             │ / health items   │      │
//!                        │          │             │     metrics      │      │
//!                        │          │             └───┬──────────┬───┘      │
//!                        │          ▼                 ▼          ▼          │
//!     Client Response    │  ┌───────────────┐   ┌─────────┐ ┌──────────┐    │
//!     ◀──────────────────┼──│  X-Trace-ID   │   │  item   │ │ metrics  │    │
//!                        │  │ logs, metrics │   │  store  │ │ registry │    │
//!                        │  └───────────────┘   └─────────┘ └──────────┘    │
//!                        └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use items_api::config::{load_config, validate_config, ConfigError, LogFormat, ServiceConfig};
use items_api::lifecycle::{self, Shutdown};
use items_api::observability::init_logging;

#[derive(Parser)]
#[command(name = "items-api")]
#[command(version, about = "In-memory item catalog API with tracing and metrics", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address (e.g. 127.0.0.1:8000).
    #[arg(long)]
    bind: Option<String>,

    /// Override the log format (json or pretty).
    #[arg(long)]
    log_format: Option<LogFormat>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    if let Some(format) = cli.log_format {
        config.observability.log_format = format;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    init_logging(&config.observability)?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.limits.request_timeout_secs,
        max_body_bytes = config.limits.max_body_bytes,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    lifecycle::spawn_signal_handler(shutdown.clone());
    lifecycle::run(config, shutdown).await?;

    Ok(())
}
