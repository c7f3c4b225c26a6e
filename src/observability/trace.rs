//! Per-request trace identifiers.

use std::fmt;

use axum::http::{HeaderName, HeaderValue};
use uuid::Uuid;

/// Response header carrying the request's trace id.
pub const X_TRACE_ID: HeaderName = HeaderName::from_static("x-trace-id");

/// Random identifier correlating one request's log lines and its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Generate a new random (v4) trace id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Header encoding of the id.
    pub fn to_header_value(&self) -> HeaderValue {
        let mut buf = Uuid::encode_buffer();
        // A hyphenated UUID is plain ASCII, always a valid header value.
        HeaderValue::from_str(self.0.hyphenated().encode_lower(&mut buf))
            .unwrap_or_else(|_| HeaderValue::from_static("invalid"))
    }
}

impl Default for TraceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
