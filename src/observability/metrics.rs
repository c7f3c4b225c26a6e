//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define the service's request metrics
//! - Record one sample per completed request
//! - Render the Prometheus text exposition for `/metrics`
//!
//! # Metrics
//! - `api_requests_total` (counter): requests by method, endpoint, status
//! - `api_request_duration_seconds` (histogram): latency by method, endpoint
//!
//! # Design Decisions
//! - The recorder is built, not installed: every `Metrics` value owns its
//!   own registry and is handed to the router as state
//! - Endpoint labels are normalized to the known routes to bound cardinality

use std::sync::Arc;
use std::time::Duration;

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use metrics_exporter_prometheus::{
    BuildError, Matcher, PrometheusBuilder, PrometheusHandle, PrometheusRecorder,
};
use thiserror::Error;

pub const REQUESTS_TOTAL: &str = "api_requests_total";
pub const REQUEST_DURATION_SECONDS: &str = "api_request_duration_seconds";

/// Content type of the Prometheus text exposition format.
pub const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

const DURATION_BUCKETS: &[f64] = &[
    0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0, 7.5, 10.0,
];

/// Routes reported verbatim in the `endpoint` label.
const KNOWN_ENDPOINTS: &[&str] = &["/", "/health", "/items", "/metrics"];

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("failed to configure histogram buckets: {0}")]
    Buckets(#[from] BuildError),
}

/// Request metrics registry.
///
/// Cheap to clone; clones record into the same registry.
#[derive(Clone)]
pub struct Metrics {
    recorder: Arc<PrometheusRecorder>,
    handle: PrometheusHandle,
}

impl Metrics {
    /// Build a fresh, isolated registry.
    pub fn new() -> Result<Self, MetricsError> {
        let recorder = PrometheusBuilder::new()
            .set_buckets_for_metric(
                Matcher::Full(REQUEST_DURATION_SECONDS.to_string()),
                DURATION_BUCKETS,
            )?
            .build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            describe_counter!(REQUESTS_TOTAL, "Total API requests");
            describe_histogram!(REQUEST_DURATION_SECONDS, Unit::Seconds, "Request duration");
        });

        Ok(Self {
            recorder: Arc::new(recorder),
            handle,
        })
    }

    /// Record a completed request.
    pub fn record_request(&self, method: &str, path: &str, status: u16, duration: Duration) {
        let endpoint = normalize_endpoint(path);

        metrics::with_local_recorder(self.recorder.as_ref(), || {
            counter!(REQUESTS_TOTAL,
                "method" => method.to_string(),
                "endpoint" => endpoint,
                "status" => status.to_string()
            )
            .increment(1);

            histogram!(REQUEST_DURATION_SECONDS,
                "method" => method.to_string(),
                "endpoint" => endpoint
            )
            .record(duration.as_secs_f64());
        });
    }

    /// Render the registry in Prometheus text format.
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// Map a request path to a bounded `endpoint` label value.
pub fn normalize_endpoint(path: &str) -> &'static str {
    KNOWN_ENDPOINTS
        .iter()
        .find(|known| **known == path)
        .copied()
        .unwrap_or("/other")
}
