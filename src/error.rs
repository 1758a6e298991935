use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
    #[error("Timed out waiting for the log file lock")]
    LockTimeout,
    #[error("Timestamp formatting failed: {0}")]
    Timestamp(#[from] time::error::Format),
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),
    #[error("Internal server error")]
    Internal,
}

pub type Result<T> = std::result::Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Storage(e) => {
                tracing::error!(error = %e, "Storage error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::LockTimeout => {
                tracing::warn!("Log file lock timed out");
                StatusCode::SERVICE_UNAVAILABLE
            }
            Self::Timestamp(e) => {
                tracing::error!(error = %e, "Timestamp formatting failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Template(e) => {
                tracing::error!(error = ?e, "Template rendering failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Internal => {
                tracing::error!("Internal server error occurred");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = if status == StatusCode::SERVICE_UNAVAILABLE {
            "Service unavailable"
        } else {
            "Internal server error"
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
