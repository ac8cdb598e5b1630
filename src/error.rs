//! Error types for the extraction server

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::document::DocumentError;
use crate::phone::PhoneError;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Upload error: {0}")]
    Upload(#[from] MultipartError),

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("Phone number error: {0}")]
    Phone(#[from] PhoneError),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            AppError::Upload(e) => {
                let status = e.status();
                tracing::warn!("Failed to read upload ({}): {}", status, e);
                let error_type = if status == StatusCode::PAYLOAD_TOO_LARGE {
                    "payload_too_large"
                } else {
                    "bad_request"
                };
                (status, error_type, e.body_text())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Document(e) => {
                tracing::warn!("Document parse failed: {}", e);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "parse_error",
                    format!("Failed to parse document: {}", e),
                )
            }
            AppError::Phone(PhoneError::UnknownRegion(region)) => {
                tracing::error!("Misconfigured default phone region: {}", region);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "configuration_error",
                    "Phone normalization is misconfigured".to_string(),
                )
            }
            AppError::Phone(e) => (
                StatusCode::BAD_REQUEST,
                "invalid_phone_number",
                e.to_string(),
            ),
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
            details: if cfg!(debug_assertions) {
                Some(self.to_string())
            } else {
                None
            },
        });

        (status, body).into_response()
    }
}
