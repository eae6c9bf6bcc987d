// SPDX-License-Identifier: MIT

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::metrics::MetricsError;
use crate::projection::ShapeMismatch;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Format of data incorrect: {}", .0.join(", "))]
    Validation(Vec<&'static str>),

    #[error("Metrics error: {0}")]
    Metrics(#[from] MetricsError),

    #[error("Projection error: {0}")]
    Projection(#[from] ShapeMismatch),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::Validation(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_failed",
                Some(self.to_string()),
            ),
            // Enrichment runs over stored rows that were validated at write
            // time, so these indicate corrupt data rather than bad input.
            AppError::Metrics(err) => {
                tracing::error!(error = %err, "Metrics error on stored data");
                (StatusCode::INTERNAL_SERVER_ERROR, "metrics_error", None)
            }
            AppError::Projection(err) => {
                tracing::error!(error = %err, "Row projection error");
                (StatusCode::INTERNAL_SERVER_ERROR, "projection_error", None)
            }
            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_lists_all_fields() {
        let err = AppError::Validation(vec!["date", "time"]);
        assert_eq!(err.to_string(), "Format of data incorrect: date, time");
    }
}
