//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Every request:
//!     → middleware.rs (trace id, start/end events, timing)
//!     → metrics.rs (counter + histogram sample)
//!     → trace.rs (X-Trace-ID response header)
//!
//! Consumers:
//!     → stdout log lines (logging.rs, JSON or pretty)
//!     → GET /metrics (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Trace id flows through the request span and the response header
//! - Metrics registry is injected, never a process global

pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod trace;

pub use logging::init_logging;
pub use metrics::{Metrics, MetricsError};
pub use middleware::observability_middleware;
pub use trace::{TraceId, X_TRACE_ID};
