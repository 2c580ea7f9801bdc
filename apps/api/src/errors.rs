use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid action: {0}")]
    InvalidAction(String),

    #[error("AI service not configured")]
    NotConfigured,

    /// The provider rejected the prompt as too large despite budgeting.
    #[error("Input too large: {0}")]
    InputTooLarge(String),

    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("File too large: {0}")]
    FileTooLarge(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        if matches!(e, LlmError::NotConfigured) {
            AppError::NotConfigured
        } else if e.is_request_too_large() {
            AppError::InputTooLarge(e.to_string())
        } else if e.is_model_unavailable() {
            AppError::ModelUnavailable(e.to_string())
        } else {
            AppError::Llm(e.to_string())
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                msg.clone(),
                None,
            ),
            AppError::InvalidAction(action) => (
                StatusCode::BAD_REQUEST,
                "INVALID_ACTION",
                "Invalid action".to_string(),
                Some(format!("Unknown action '{action}'")),
            ),
            AppError::NotConfigured => {
                tracing::error!("GROQ_API_KEY not found in environment variables");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "AI_NOT_CONFIGURED",
                    "AI service not configured".to_string(),
                    None,
                )
            }
            AppError::InputTooLarge(msg) => {
                tracing::warn!("Provider rejected oversized input: {msg}");
                (
                    StatusCode::BAD_REQUEST,
                    "INPUT_TOO_LARGE",
                    "Input too large. Please try with a shorter resume or job description."
                        .to_string(),
                    Some(
                        "The content exceeds the AI model's token limit. Try reducing the text length."
                            .to_string(),
                    ),
                )
            }
            AppError::ModelUnavailable(msg) => {
                tracing::error!("Model unavailable: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "MODEL_UNAVAILABLE",
                    "AI model temporarily unavailable. Please try again.".to_string(),
                    Some(
                        "The AI service is experiencing issues. Please try again in a moment."
                            .to_string(),
                    ),
                )
            }
            AppError::UnsupportedFileType(msg) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_FILE_TYPE",
                msg.clone(),
                None,
            ),
            AppError::FileTooLarge(msg) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "FILE_TOO_LARGE",
                msg.clone(),
                None,
            ),
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "LLM_ERROR",
                    "An error occurred while processing your request. Please try again."
                        .to_string(),
                    Some(msg.clone()),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                    None,
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message,
        });
        if let Some(details) = details {
            error["details"] = json!(details);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}
