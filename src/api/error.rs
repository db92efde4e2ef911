//! API error responses: `{error, details?}` JSON with HTTP status mapping.
//!
//! `details` mirrors the provider error body or the malformed-output
//! diagnostic when one exists; otherwise it is omitted.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::llm::LlmError;
use crate::search::SearchError;

/// Upper bound on diagnostic text echoed back to clients.
const MAX_DETAIL_CHARS: usize = 1000;

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error(transparent)]
    Llm(#[from] LlmError),
    #[error(transparent)]
    Search(#[from] SearchError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message, None),
            ApiError::Llm(err) => {
                tracing::warn!(error = %err, "model pipeline error");
                let details = llm_details(&err);
                (StatusCode::BAD_GATEWAY, err.to_string(), details)
            }
            ApiError::Search(err) => {
                tracing::warn!(error = %err, "search passthrough error");
                let details = search_details(&err);
                (StatusCode::BAD_GATEWAY, err.to_string(), details)
            }
        };
        (status, Json(ErrorBody { error, details })).into_response()
    }
}

fn llm_details(err: &LlmError) -> Option<String> {
    match err {
        LlmError::MalformedOutput { raw } => Some(truncate(raw)),
        LlmError::Upstream { body, .. } if !body.is_empty() => Some(truncate(body)),
        _ => None,
    }
}

fn search_details(err: &SearchError) -> Option<String> {
    match err {
        SearchError::Upstream { body, .. } if !body.is_empty() => Some(truncate(body)),
        SearchError::Transport { detail, .. } | SearchError::Decode { detail, .. } => {
            Some(truncate(detail))
        }
        _ => None,
    }
}

fn truncate(text: &str) -> String {
    text.chars().take(MAX_DETAIL_CHARS).collect()
}
