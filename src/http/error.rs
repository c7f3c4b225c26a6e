//! API error responses.
//!
//! # Mapping
//! - `Validation` → 422 with one `detail` entry per violated field
//! - `MalformedBody` → 422 with a single `body` entry (empty body,
//!   unparseable JSON, a non-object body, a non-JSON content type)
//! - `BodyTooLarge` → 413
//! - `Internal` → 500 with an opaque body; the cause is only logged

use std::any::Any;

use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::items::ValidationErrors;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("malformed request body: {message}")]
    MalformedBody {
        kind: &'static str,
        message: String,
    },

    #[error("request body too large")]
    BodyTooLarge,

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Body bytes that are not valid JSON.
    pub fn json_invalid(message: impl Into<String>) -> Self {
        ApiError::MalformedBody {
            kind: "json_invalid",
            message: message.into(),
        }
    }

    /// A request with no body at all.
    pub fn missing_body() -> Self {
        ApiError::MalformedBody {
            kind: "missing",
            message: "Field required".into(),
        }
    }

    /// A body that cannot be read as an object of fields.
    pub fn not_an_object() -> Self {
        ApiError::MalformedBody {
            kind: "model_attributes_type",
            message: "Input should be a valid dictionary or object to extract fields from".into(),
        }
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::BodyTooLarge
        } else {
            ApiError::json_invalid(rejection.body_text())
        }
    }
}

/// One entry of a 422 `detail` list.
#[derive(Debug, Serialize)]
struct ErrorDetail {
    loc: Vec<&'static str>,
    msg: String,
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize)]
struct DetailList {
    detail: Vec<ErrorDetail>,
}

#[derive(Debug, Serialize)]
struct DetailMessage {
    detail: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                let detail = errors
                    .errors()
                    .iter()
                    .map(|e| ErrorDetail {
                        loc: vec!["body", e.field],
                        msg: e.message.clone(),
                        kind: e.kind.as_str(),
                    })
                    .collect();
                (StatusCode::UNPROCESSABLE_ENTITY, Json(DetailList { detail })).into_response()
            }
            ApiError::MalformedBody { kind, message } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(DetailList {
                    detail: vec![ErrorDetail {
                        loc: vec!["body"],
                        msg: message,
                        kind,
                    }],
                }),
            )
                .into_response(),
            ApiError::BodyTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                Json(DetailMessage {
                    detail: "Request body too large",
                }),
            )
                .into_response(),
            ApiError::Internal(cause) => {
                tracing::error!(error = %cause, "Unhandled internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(DetailMessage {
                        detail: "Internal Server Error",
                    }),
                )
                    .into_response()
            }
        }
    }
}

/// Convert a handler panic into an opaque 500.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let cause = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };
    ApiError::Internal(cause).into_response()
}
