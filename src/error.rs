//! Error handling for the application

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::contact::ContactError;
use crate::notify::NotifyError;
use crate::pricing::PricingError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Contact(#[from] ContactError),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("Failed to send email: {0}")]
    Notify(#[from] NotifyError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON body returned for every failed request
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: &'static str,
    pub message: String,
}

impl AppError {
    fn status_and_type(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Validation(_) | AppError::Contact(_) => {
                (StatusCode::BAD_REQUEST, "validation")
            }
            AppError::Pricing(_) => (StatusCode::BAD_REQUEST, "pricing"),
            AppError::Notify(_) => (StatusCode::BAD_GATEWAY, "notification"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.status_and_type();

        let message = match &self {
            AppError::Notify(e) => {
                tracing::error!("Notification error: {}", e);
                self.to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An unexpected error occurred. Please try again later.".to_string()
            }
            _ => {
                tracing::debug!("Rejected request: {}", self);
                self.to_string()
            }
        };

        let body = ErrorResponse {
            success: false,
            error_type,
            message,
        };

        (status, Json(body)).into_response()
    }
}

/// Body and query deserialization failures answer as 400 validation errors
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::NotFound, StatusCode::NOT_FOUND),
            (
                AppError::Validation("missing".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Contact(ContactError::MissingFields),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Pricing(PricingError::UnknownTour("x".to_string())),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Notify(NotifyError::Transport("timed out".to_string())),
                StatusCode::BAD_GATEWAY,
            ),
            (
                AppError::Internal("boom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[tokio::test]
    async fn test_body_carries_type_and_message() {
        let response = AppError::Validation("Please fill out all required fields".to_string())
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error_type"], "validation");
        assert_eq!(body["message"], "Please fill out all required fields");
    }

    #[test]
    fn test_notify_error_message_prefix() {
        let err = AppError::from(NotifyError::Transport("timed out".to_string()));
        assert!(err.to_string().starts_with("Failed to send email:"));
    }
}
