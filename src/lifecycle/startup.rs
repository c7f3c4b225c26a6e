//! Startup orchestration.
//!
//! # Responsibilities
//! - Initialize subsystems in dependency order (metrics, store, router)
//! - Bind the listener and begin accepting traffic
//! - Log the service start and stop events
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last (traffic only when ready)

use std::io;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ServiceConfig;
use crate::http::HttpServer;
use crate::lifecycle::shutdown::Shutdown;
use crate::observability::MetricsError;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to build metrics registry: {0}")]
    Metrics(#[from] MetricsError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] io::Error),
}

/// Build the service, serve until `shutdown` fires, then return.
pub async fn run(config: ServiceConfig, shutdown: Shutdown) -> Result<(), StartupError> {
    let service = config.service.name.clone();
    let shutdown_rx = shutdown.subscribe();

    tracing::info!(
        service = %service,
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let server = HttpServer::new(&config)?;

    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: config.listener.bind_address.clone(),
            source,
        })?;

    server
        .run(listener, shutdown_rx)
        .await
        .map_err(StartupError::Serve)?;

    tracing::info!(service = %service, "Service stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_run_stops_on_shutdown() {
        let mut config = ServiceConfig::default();
        config.listener.bind_address = "127.0.0.1:0".into();

        let shutdown = Shutdown::new();
        let handle = tokio::spawn(run(config, shutdown.clone()));

        // Give the server time to subscribe before triggering.
        tokio::time::sleep(Duration::from_millis(100)).await;
        shutdown.trigger();

        let result = tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("server should stop")
            .expect("task should not panic");
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_bind_failure_is_reported() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let mut config = ServiceConfig::default();
        config.listener.bind_address = taken.local_addr().unwrap().to_string();

        let err = run(config, Shutdown::new()).await.unwrap_err();
        assert!(matches!(err, StartupError::Bind { .. }));
    }
}
