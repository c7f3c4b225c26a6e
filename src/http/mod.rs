//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → observability middleware (trace id, logs, metrics)
//!     → panic catching, timeout, body limit (tower-http)
//!     → handlers.rs (root, health, items, metrics)
//!     → error.rs (ApiError → JSON error body)
//!     → Send to client
//! ```

pub mod error;
pub mod handlers;
pub mod server;

pub use error::ApiError;
pub use server::{AppState, HttpServer};
