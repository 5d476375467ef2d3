//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db::repository::RepositoryError;
use crate::error::NormsError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Internal server error
    Internal(String),
    /// Calculation or statistics error
    Norms(NormsError),
    /// Repository error
    Repository(RepositoryError),
}

impl AppError {
    /// Status and body for this error.
    pub fn parts(&self) -> (StatusCode, ApiError) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", msg),
            ),
            AppError::Norms(e) => {
                let (status, code) = match e {
                    NormsError::MissingCoefficient { .. } => {
                        (StatusCode::UNPROCESSABLE_ENTITY, "MISSING_COEFFICIENT")
                    }
                    NormsError::InsufficientData { .. } => (StatusCode::NOT_FOUND, "NO_DATA"),
                    NormsError::InvalidInput { .. } => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
                };
                (status, ApiError::new(code, e.to_string()))
            }
            AppError::Repository(e) => {
                let (status, error) = if e.is_not_found() {
                    (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", e.to_string()))
                } else {
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ApiError::new("REPOSITORY_ERROR", e.to_string()),
                    )
                };
                match e.context().operation.as_deref() {
                    Some(op) => (status, error.with_details(format!("operation: {}", op))),
                    None => (status, error),
                }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = self.parts();
        if status.is_server_error() {
            tracing::warn!("{} {}: {}", status.as_u16(), error.code, error.message);
        }
        (status, Json(error)).into_response()
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Repository(err)
    }
}

impl From<NormsError> for AppError {
    fn from(err: NormsError) -> Self {
        AppError::Norms(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProjectScale;

    #[test]
    fn test_norms_error_status_codes() {
        let cases = [
            (
                NormsError::missing_coefficient("Мастер", ProjectScale::VeryLarge),
                StatusCode::UNPROCESSABLE_ENTITY,
                "MISSING_COEFFICIENT",
            ),
            (
                NormsError::insufficient_data("Мастер", ProjectScale::Small, 1),
                StatusCode::NOT_FOUND,
                "NO_DATA",
            ),
            (
                NormsError::invalid_input("workers_count", "must be positive"),
                StatusCode::BAD_REQUEST,
                "INVALID_INPUT",
            ),
        ];

        for (err, status, code) in cases {
            let (actual_status, body) = AppError::from(err).parts();
            assert_eq!(actual_status, status);
            assert_eq!(body.code, code);
        }
    }

    #[test]
    fn test_repository_not_found_maps_to_404() {
        let (status, body) = AppError::from(RepositoryError::not_found("no such document")).parts();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.code, "NOT_FOUND");

        let (status, body) = AppError::from(RepositoryError::internal("disk on fire")).parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.code, "REPOSITORY_ERROR");
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::NotFound("no such project".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = AppError::Internal("join failed".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
