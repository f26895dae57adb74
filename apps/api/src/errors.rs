use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::AnalysisError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Analysis(AnalysisError::InvalidInput { .. }) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                self.to_string(),
            ),
            AppError::Analysis(AnalysisError::ExternalService(e)) => {
                tracing::error!("Text generation error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "EXTERNAL_SERVICE_ERROR",
                    "The AI service is unavailable. Please try again shortly.".to_string(),
                )
            }
            AppError::Analysis(AnalysisError::MalformedResponse(reason)) => {
                tracing::error!("Malformed model response: {reason}");
                (
                    StatusCode::BAD_GATEWAY,
                    "MALFORMED_RESPONSE",
                    "The AI service returned an unexpected answer.".to_string(),
                )
            }
        };

        let AppError::Analysis(inner) = &self;
        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
                "retryable": inner.is_retryable()
            }
        }));

        (status, body).into_response()
    }
}
