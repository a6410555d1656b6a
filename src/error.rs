//! Application error taxonomy and HTTP response mapping.
//!
//! Every error renders through the same response envelope as successful
//! responses: `{success, message, data?, error?}` where `error` is a stable
//! machine-readable code. Internal detail never leaks: database errors and
//! other unexpected failures collapse to a generic 500 body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

/// Error envelope matching the success envelope shape.
#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
    error: &'static str,
    #[serde(skip_serializing_if = "Value::is_null")]
    data: Value,
}

#[derive(Debug)]
pub enum AppError {
    /// Malformed request body -> 422 with structured details.
    Validation { message: String, details: Value },
    /// Bad credentials or missing/invalid/expired/revoked token -> 401.
    /// Uniformly worded regardless of root cause.
    Unauthorized,
    /// Short URL cap reached -> 402 with an upgrade hint payload.
    QuotaExceeded { message: String, details: Value },
    /// Unknown short code or unknown owned resource -> 404.
    NotFound { message: String, details: Value },
    /// Expired short code -> 410.
    Gone { message: String, details: Value },
    /// Unique constraint violation -> 409.
    Conflict { message: String, details: Value },
    /// Everything else -> 500 with a generic message.
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn validation(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn unauthorized() -> Self {
        Self::Unauthorized
    }
    pub fn quota_exceeded(message: impl Into<String>, details: Value) -> Self {
        Self::QuotaExceeded {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn gone(message: impl Into<String>, details: Value) -> Self {
        Self::Gone {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Validation { message, .. } => write!(f, "validation error: {message}"),
            AppError::Unauthorized => write!(f, "unauthorized"),
            AppError::QuotaExceeded { message, .. } => write!(f, "quota exceeded: {message}"),
            AppError::NotFound { message, .. } => write!(f, "not found: {message}"),
            AppError::Gone { message, .. } => write!(f, "gone: {message}"),
            AppError::Conflict { message, .. } => write!(f, "conflict: {message}"),
            AppError::Internal { message, .. } => write!(f, "internal error: {message}"),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::Validation { message, details } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_failed",
                message,
                details,
            ),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Unauthorized".to_string(),
                Value::Null,
            ),
            AppError::QuotaExceeded { message, details } => (
                StatusCode::PAYMENT_REQUIRED,
                "quota_exceeded",
                message,
                details,
            ),
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::Gone { message, details } => (StatusCode::GONE, "gone", message, details),
            AppError::Conflict { message, details } => {
                (StatusCode::CONFLICT, "conflict", message, details)
            }
            AppError::Internal { message, details } => {
                tracing::error!("Internal error: {} {}", message, details);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error".to_string(),
                    Value::Null,
                )
            }
        };

        let body = ErrorBody {
            success: false,
            message,
            error: code,
            data: details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": db.constraint() }),
            );
        }

        AppError::internal("Database error", json!({ "source": e.to_string() }))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&e).unwrap_or(Value::Null);
        AppError::validation("Validation failed", details)
    }
}
