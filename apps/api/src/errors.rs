use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::extractor::ExtractionError;
use crate::llm_client::SuggestionError;

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Application-level error type.
/// Every variant renders as `{"message": ...}`; the status carries the class.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("No resume file provided")]
    MissingFile,

    #[error("Job description is required")]
    MissingJobDescription,

    #[error("Only PDF files are supported")]
    UnsupportedMediaType,

    #[error("File too large. Max size is 5MB")]
    FileTooLarge,

    #[error("Upload error: {0}")]
    Upload(String),

    #[error("Could not extract text from PDF")]
    EmptyExtraction,

    #[error("Job description cannot be empty")]
    EmptyJobDescription,

    #[error("{0}")]
    ExtractionFailed(#[from] ExtractionError),

    #[error("AI service returned no suggestions")]
    NoSuggestions,

    #[error("{0}")]
    Suggestion(#[from] SuggestionError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingFile
            | AppError::MissingJobDescription
            | AppError::UnsupportedMediaType
            | AppError::FileTooLarge
            | AppError::Upload(_)
            | AppError::EmptyExtraction
            | AppError::EmptyJobDescription => StatusCode::BAD_REQUEST,
            AppError::ExtractionFailed(_)
            | AppError::NoSuggestions
            | AppError::Suggestion(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing text. Internal details are only logged.
    pub fn message(&self) -> String {
        match self {
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "message": self.message() }));
        (self.status(), body).into_response()
    }
}

/// A handler failure together with how long the request had been running.
/// Server-side failures report the elapsed time as `processingTime`.
#[derive(Debug)]
pub struct TimedError {
    pub error: AppError,
    pub elapsed: Duration,
}

impl TimedError {
    pub fn new(error: AppError, elapsed: Duration) -> Self {
        Self { error, elapsed }
    }
}

impl IntoResponse for TimedError {
    fn into_response(self) -> Response {
        let status = self.error.status();
        let message = self.error.message();
        let body = if status.is_server_error() {
            json!({ "message": message, "processingTime": format_millis(self.elapsed) })
        } else {
            json!({ "message": message })
        };
        (status, Json(body)).into_response()
    }
}

/// Renders a duration the way timings are reported to clients, e.g. `"1532ms"`.
pub fn format_millis(duration: Duration) -> String {
    format!("{}ms", duration.as_millis())
}
