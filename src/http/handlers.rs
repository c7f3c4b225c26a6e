//! Route handlers.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::items::{validate_new_item, Item, NewItem};
use crate::observability::metrics::PROMETHEUS_CONTENT_TYPE;

#[derive(Debug, Serialize)]
pub struct ServiceDescriptor {
    pub message: String,
    pub service: String,
    pub version: &'static str,
    pub health: &'static str,
    pub items: &'static str,
    pub metrics: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: String,
    pub timestamp: DateTime<Utc>,
}

/// `GET /` service descriptor.
pub async fn root(State(state): State<AppState>) -> Json<ServiceDescriptor> {
    Json(ServiceDescriptor {
        message: state.service.display_name.clone(),
        service: state.service.name.clone(),
        version: env!("CARGO_PKG_VERSION"),
        health: "/health",
        items: "/items",
        metrics: "/metrics",
    })
}

/// `GET /health` liveness probe.
///
/// Does not look at the item store; a failure here means the process is hung.
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy",
        service: state.service.name.clone(),
        timestamp: Utc::now(),
    })
}

/// `GET /items` in insertion order.
pub async fn list_items(State(state): State<AppState>) -> Json<Vec<Item>> {
    let items = state.store.list();
    tracing::info!(count = items.len(), "Listing items");
    Json(items)
}

/// `POST /items`.
///
/// The body is read as JSON when the content type is absent or a JSON type;
/// field-level problems, wrong types included, are left to validation.
pub async fn create_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let raw = body
        .map_err(ApiError::from)
        .and_then(|body| decode_new_item(&headers, &body))
        .inspect_err(|err| {
            tracing::info!(reason = %err, "Rejected item payload");
        })?;

    let valid = validate_new_item(raw).inspect_err(|errors| {
        tracing::info!(errors = %errors, "Item failed validation");
    })?;

    let item = valid.into_item();
    state.store.append(item.clone());

    tracing::info!(
        item_id = %item.id,
        item_name = %item.name,
        "Item created"
    );

    Ok((StatusCode::CREATED, Json(item)))
}

fn decode_new_item(headers: &HeaderMap, body: &[u8]) -> Result<NewItem, ApiError> {
    if !has_json_content_type(headers) {
        return Err(ApiError::not_an_object());
    }
    if body.is_empty() {
        return Err(ApiError::missing_body());
    }

    let value: Value =
        serde_json::from_slice(body).map_err(|e| ApiError::json_invalid(e.to_string()))?;
    if !value.is_object() {
        return Err(ApiError::not_an_object());
    }
    serde_json::from_value(value).map_err(|e| ApiError::json_invalid(e.to_string()))
}

/// A missing `Content-Type` counts as JSON; otherwise `application/json` or
/// any `application/*+json`.
fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(header::CONTENT_TYPE) else {
        return true;
    };
    let Ok(value) = value.to_str() else {
        return false;
    };

    let essence = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    match essence.split_once('/') {
        Some(("application", subtype)) => subtype == "json" || subtype.ends_with("+json"),
        _ => false,
    }
}

/// `GET /metrics` Prometheus scrape.
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)],
        state.metrics.render(),
    )
}
