//! Shared utilities for integration and load testing.

use std::net::SocketAddr;

use items_api::config::ServiceConfig;
use items_api::http::{AppState, HttpServer};
use items_api::lifecycle::Shutdown;
use tokio::net::TcpListener;

/// A running service bound to an ephemeral local port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub state: AppState,
    shutdown: Shutdown,
}

#[allow(dead_code)]
impl TestServer {
    /// Start the real router with default config on 127.0.0.1:0.
    pub async fn spawn() -> Self {
        Self::spawn_with(ServiceConfig::default()).await
    }

    pub async fn spawn_with(config: ServiceConfig) -> Self {
        let server = HttpServer::new(&config).unwrap();
        let state = server.state().clone();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let shutdown = Shutdown::new();
        let rx = shutdown.subscribe();
        tokio::spawn(async move {
            if let Err(e) = server.run(listener, rx).await {
                eprintln!("Test server error: {}", e);
            }
        });

        Self {
            addr,
            state,
            shutdown,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// HTTP client that never reuses connections between tests.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
