use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Fixed message surfaced when the extraction reply is not structured data.
pub const EXTRACTION_PARSE_MESSAGE: &str = "Context too big. Unable to parse jobs.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No content found")]
    NoContent,

    #[error("Context too big. Unable to parse jobs.")]
    ExtractionParse,

    #[error("Text-completion service error: {0}")]
    Service(String),

    #[error("Page fetch error: {0}")]
    Fetch(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NoContent => StatusCode::NOT_FOUND,
            AppError::ExtractionParse
            | AppError::Service(_)
            | AppError::Fetch(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message) = match &self {
            AppError::Validation(msg) => ("VALIDATION_ERROR", msg.clone()),
            AppError::NoContent => ("NO_CONTENT", "No content found".to_string()),
            AppError::ExtractionParse => {
                tracing::error!("Extraction reply could not be parsed");
                ("EXTRACTION_PARSE_ERROR", EXTRACTION_PARSE_MESSAGE.to_string())
            }
            AppError::Service(msg) => {
                tracing::error!("Text-completion service error: {msg}");
                ("SERVICE_ERROR", msg.clone())
            }
            AppError::Fetch(msg) => {
                tracing::error!("Page fetch error: {msg}");
                ("FETCH_ERROR", msg.clone())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
