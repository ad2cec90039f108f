//! Error responses.
//!
//! # Responsibilities
//! - Map proxy failures to status codes
//! - Produce the JSON error body shared by routes and functions
//!
//! # Design Decisions
//! - Every failure body carries an `error` key
//! - Upstream failures add the underlying cause under `message`
//! - Status codes: missing parameter / bad body → 400, upstream → 500

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::upstream::UpstreamError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Slug parameter is required")]
    MissingSlug,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// `message` is the caller-facing summary; `source` the actual cause.
    #[error("{message}")]
    Upstream {
        message: String,
        #[source]
        source: UpstreamError,
    },
}

impl ApiError {
    pub fn upstream(message: impl Into<String>, source: UpstreamError) -> Self {
        ApiError::Upstream {
            message: message.into(),
            source,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingSlug | ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::UnknownFunction(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> Value {
        match self {
            ApiError::Upstream { message, source } => json!({
                "error": message,
                "message": source.to_string(),
            }),
            other => json!({ "error": other.to_string() }),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}
