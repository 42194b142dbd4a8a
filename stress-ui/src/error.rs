//! Error types for stress-ui HTTP handlers

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Run or run file not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// A required JSON document could not be parsed (500)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Filesystem error while reading results (500)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Parse(_) | ApiError::Io(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Parse(_) => "PARSE_ERROR",
            ApiError::Io(_) => "IO_ERROR",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Message without the category prefix
    pub fn message(&self) -> String {
        match self {
            ApiError::NotFound(msg) | ApiError::Parse(msg) | ApiError::Internal(msg) => msg.clone(),
            ApiError::Io(err) => err.to_string(),
        }
    }
}

impl From<stress_common::Error> for ApiError {
    fn from(err: stress_common::Error) -> Self {
        match err {
            stress_common::Error::NotFound(msg) => ApiError::NotFound(msg),
            stress_common::Error::Parse(msg) => ApiError::Parse(msg),
            stress_common::Error::Io(err) => ApiError::Io(err),
            stress_common::Error::Config(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Internal(format!("Blocking task failed: {}", err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": self.message(),
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
