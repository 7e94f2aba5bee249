//! Unified error handling with a consistent JSON error body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// A single schema or parameter problem, addressed by its path
/// (e.g. `posts[3].platform` or `sortField`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// JSON body returned for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues: Option<Vec<ValidationIssue>>,
}

impl ErrorBody {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
            issues: None,
        }
    }

    pub fn with_issues(message: &str, issues: Vec<ValidationIssue>) -> Self {
        Self {
            error: message.to_string(),
            issues: Some(issues),
        }
    }
}

/// Application error type mapping to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    /// Request parameters failed to parse.
    #[error("Invalid request: {} issue(s)", .0.len())]
    InvalidRequest(Vec<ValidationIssue>),

    /// Rows returned by the data store do not match the expected shape.
    #[error("Data validation failed: {} issue(s)", .0.len())]
    DataValidation(Vec<ValidationIssue>),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Render error: {0}")]
    Render(#[from] askama::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Check if this error was caused by a failed backend read.
    pub fn is_upstream_failure(&self) -> bool {
        matches!(self, Self::Database(_))
    }

    pub fn is_data_validation(&self) -> bool {
        matches!(self, Self::DataValidation(_))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, ErrorBody::new("Unauthorized")),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorBody::new(&msg)),
            AppError::InvalidRequest(issues) => (
                StatusCode::BAD_REQUEST,
                ErrorBody::with_issues("Invalid request", issues),
            ),
            AppError::DataValidation(issues) => {
                tracing::error!(issues = ?issues, "Data validation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::with_issues("Data validation failed", issues),
                )
            }
            AppError::Database(e) => {
                tracing::error!(error = %e, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new("Internal Server Error"),
                )
            }
            AppError::Render(e) => {
                tracing::error!(error = %e, "Template render error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new("Internal Server Error"),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new("Internal Server Error"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
