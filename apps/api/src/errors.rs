use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::ai_gateway::GatewayError;
use crate::extractor::ExtractionFailure;

pub const RATE_LIMITED_MESSAGE: &str =
    "AI service is currently busy (Rate Limit). Please wait a few seconds.";
pub const INVALID_AI_FORMAT_MESSAGE: &str =
    "AI returned an invalid response format. Please try again.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("AI rate limited: {0}")]
    RateLimited(String),

    #[error("AI provider error: {0}")]
    Provider(String),

    #[error("AI response extraction failed")]
    Extraction(#[from] ExtractionFailure),

    #[error("AI response has an unexpected shape: {0}")]
    UnexpectedShape(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::RateLimited { message } => AppError::RateLimited(message),
            GatewayError::Provider { message } => AppError::Provider(message),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::RateLimited(msg) => {
                tracing::warn!("AI rate limited: {msg}");
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    "RATE_LIMITED",
                    RATE_LIMITED_MESSAGE.to_string(),
                )
            }
            AppError::Provider(msg) => {
                tracing::error!("AI provider error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "AI_PROVIDER_ERROR",
                    "The AI service is temporarily unavailable".to_string(),
                )
            }
            AppError::Extraction(failure) => {
                tracing::error!("AI JSON extraction failed. Raw output was: {}", failure.raw);
                (
                    StatusCode::BAD_GATEWAY,
                    "AI_INVALID_RESPONSE",
                    INVALID_AI_FORMAT_MESSAGE.to_string(),
                )
            }
            AppError::UnexpectedShape(msg) => {
                tracing::error!("AI response shape mismatch: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "AI_INVALID_RESPONSE",
                    INVALID_AI_FORMAT_MESSAGE.to_string(),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
            "code": code
        }));

        (status, body).into_response()
    }
}
