//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (observability, panic catching, timeout, body limit)
//! - Bind server to listener
//! - Drain in-flight requests on shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{catch_panic::CatchPanicLayer, limit::RequestBodyLimitLayer, timeout::TimeoutLayer};

use crate::config::{ServiceConfig, ServiceInfoConfig};
use crate::http::error::panic_response;
use crate::http::handlers;
use crate::items::ItemStore;
use crate::observability::{observability_middleware, Metrics, MetricsError};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: ItemStore,
    pub metrics: Metrics,
    pub service: Arc<ServiceInfoConfig>,
}

impl AppState {
    /// Fresh state: empty store, isolated metrics registry.
    pub fn new(config: &ServiceConfig) -> Result<Self, MetricsError> {
        Ok(Self {
            store: ItemStore::new(),
            metrics: Metrics::new()?,
            service: Arc::new(config.service.clone()),
        })
    }
}

/// HTTP server for the items API.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: &ServiceConfig) -> Result<Self, MetricsError> {
        let state = AppState::new(config)?;
        let router = Self::build_router(config, state.clone());
        Ok(Self { router, state })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Layer order (outermost first): observability, panic catching, timeout,
    /// body limit. Observability sits outside everything so that timeouts,
    /// oversized bodies, panics and unknown routes are still traced and counted.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        let metrics = state.metrics.clone();

        Router::new()
            .route("/", get(handlers::root))
            .route("/health", get(handlers::health))
            .route("/items", get(handlers::list_items).post(handlers::create_item))
            .route("/metrics", get(handlers::metrics))
            .with_state(state)
            .layer(RequestBodyLimitLayer::new(config.limits.max_body_bytes))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.limits.request_timeout_secs,
            )))
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(middleware::from_fn_with_state(metrics, observability_middleware))
    }

    /// The assembled router, for driving the service without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Shared application state.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
