//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Stockroom                              │
//! │                                                                         │
//! │  Client                      Handler                                    │
//! │  ──────                      ───────                                    │
//! │                                                                         │
//! │  POST /api/v1/products                                                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │  JSON rejected?    ─── JsonRejection ──────────► 400 invalid_body │  │
//! │  │  Bad id in path?   ─── PathRejection ──────────► 400 invalid_id   │  │
//! │  │  Field rules?      ─── ValidationErrors ───────► 422 + details    │  │
//! │  │  Store outcome?    ─── StoreError::NotFound ───► 404              │  │
//! │  │                        StoreError::Conflict ───► 409              │  │
//! │  │                        StoreError::Storage ────► 500              │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Response Body
//! ```json
//! {
//!   "error": "validation_error",
//!   "message": "Validation failed: name is required",
//!   "details": [ { "field": "name", "message": "name is required" } ]
//! }
//! ```
//! `details` only appears on validation failures.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use stockroom_core::{StoreError, ValidationErrors};

/// Machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Field rules violated (422)
    ValidationError,

    /// Body is not valid JSON for this endpoint (400)
    InvalidBody,

    /// Path id is not an integer (400)
    InvalidId,

    /// Query string could not be parsed (400)
    InvalidQuery,

    /// No product with this id (404)
    NotFound,

    /// Name or SKU already taken (409)
    Conflict,

    /// Database fault (500)
    StorageError,

    /// Store is not answering (503)
    Unavailable,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::ValidationError => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::InvalidBody | ErrorCode::InvalidId | ErrorCode::InvalidQuery => {
                StatusCode::BAD_REQUEST
            }
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::StorageError => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// One entry of `details`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

/// Error returned from HTTP handlers.
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    #[serde(rename = "error")]
    pub code: ErrorCode,

    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldIssue>>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn validation(errors: &ValidationErrors) -> Self {
        ApiError {
            code: ErrorCode::ValidationError,
            message: format!("Validation failed: {}", errors),
            details: Some(
                errors
                    .iter()
                    .map(|e| FieldIssue {
                        field: e.field().to_string(),
                        message: e.to_string(),
                    })
                    .collect(),
            ),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Unavailable, message)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(errors) => ApiError::validation(&errors),
            StoreError::NotFound { .. } => ApiError::new(ErrorCode::NotFound, err.to_string()),
            StoreError::Conflict { .. } => ApiError::new(ErrorCode::Conflict, err.to_string()),
            StoreError::Storage(_) => {
                error!(error = %err, "Request failed on storage");
                ApiError::new(ErrorCode::StorageError, "Internal storage error")
            }
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::validation(&errors)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::new(ErrorCode::InvalidBody, rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::new(ErrorCode::InvalidId, rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::new(ErrorCode::InvalidQuery, rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;
