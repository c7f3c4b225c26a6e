//! Request observability middleware.
//!
//! Wraps every request exactly once, outermost in the stack, so framework
//! level responses (404, 405, 408, 413, 422 rejections) are logged, counted
//! and tagged the same way handler responses are.

use std::time::Instant;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;

use crate::observability::metrics::Metrics;
use crate::observability::trace::{TraceId, X_TRACE_ID};

/// Trace, log, time and count one request.
///
/// Events emitted inside the handler run within a `request` span that
/// carries the same `trace_id` as the response header.
pub async fn observability_middleware(
    State(metrics): State<Metrics>,
    mut request: Request,
    next: Next,
) -> Response {
    let trace_id = TraceId::new();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    request.extensions_mut().insert(trace_id);

    let span = tracing::info_span!("request", trace_id = %trace_id);

    tracing::info!(
        parent: &span,
        trace_id = %trace_id,
        method = %method,
        path = %path,
        "request started"
    );

    let mut response = next.run(request).instrument(span.clone()).await;

    let duration = start.elapsed();
    let status = response.status().as_u16();
    metrics.record_request(&method, &path, status, duration);

    tracing::info!(
        parent: &span,
        trace_id = %trace_id,
        method = %method,
        path = %path,
        status_code = status,
        duration_seconds = duration.as_secs_f64(),
        "request completed"
    );

    response
        .headers_mut()
        .insert(X_TRACE_ID, trace_id.to_header_value());
    response
}
