//! Items API library: an in-memory item catalog served over HTTP with
//! request tracing, structured logging and Prometheus metrics.

pub mod config;
pub mod http;
pub mod items;
pub mod lifecycle;
pub mod observability;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
