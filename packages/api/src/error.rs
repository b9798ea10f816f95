// ABOUTME: Application error type returned by every handler
// ABOUTME: Maps domain failures to status codes and a structured JSON error body with a request id

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use proposer_ai::AIServiceError;
use proposer_core::{FieldError, ValidationErrors};
use proposer_generator::{ChatError, GenerationError};
use proposer_storage::StorageError;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

/// Main application error type that all handlers should return
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Generation failed: {0}")]
    Generation(#[from] AIServiceError),

    #[error("Storage error: {0}")]
    Storage(StorageError),
}

/// Structured error response format for API consistency
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: ErrorDetail,
    request_id: String,
}

/// Error detail structure with machine-readable codes
#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<FieldError>>,
}

impl AppError {
    /// Map a storage outcome for the named resource ("Template", "Proposal", ...)
    pub fn from_storage(err: StorageError, resource: &str) -> Self {
        match err {
            StorageError::NotFound => AppError::NotFound(format!("{} not found", resource)),
            StorageError::NotOwner => AppError::Forbidden(format!(
                "Only the owner can modify this {}",
                resource.to_lowercase()
            )),
            StorageError::NotFoundOrNotOwner => {
                AppError::NotFound(format!("{} not found or not authorized", resource))
            }
            StorageError::Duplicate(what) => AppError::Conflict(what),
            other => AppError::Storage(other),
        }
    }

    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        AppError::Validation(ValidationErrors::single(field, message))
    }

    fn to_status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            AppError::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            AppError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            AppError::Generation(_) => (StatusCode::INTERNAL_SERVER_ERROR, "GENERATION_FAILED"),
            AppError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
        }
    }

    /// Get user-friendly error message (sanitized for external consumption)
    fn to_user_message(&self) -> String {
        match self {
            AppError::Validation(errors) => format!("Validation failed: {}", errors),
            AppError::NotFound(message) => message.clone(),
            AppError::Unauthorized => "Authentication required".to_string(),
            AppError::Forbidden(message) => message.clone(),
            AppError::Conflict(message) => message.clone(),
            AppError::Generation(err) => match err {
                AIServiceError::NoApiKey => {
                    "Text generation is not configured on this server".to_string()
                }
                AIServiceError::EmptyResponse => "The AI service returned an empty response".to_string(),
                _ => "The AI service failed to generate a response. Please try again".to_string(),
            },
            AppError::Storage(_) => "Data storage error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let request_id = Uuid::new_v4().to_string();
        let (status_code, error_code) = self.to_status_and_code();
        let user_message = self.to_user_message();

        // Log internal errors with full context but don't expose details
        match &self {
            AppError::Generation(err) => {
                error!(
                    request_id = %request_id,
                    generation_error = %err,
                    "Text generation failed"
                );
            }
            AppError::Storage(err) => {
                error!(
                    request_id = %request_id,
                    storage_error = %err,
                    "Storage system error"
                );
            }
            _ => {
                info!(
                    request_id = %request_id,
                    error_code = %error_code,
                    error = %self,
                    "API error response"
                );
            }
        }

        let details = match &self {
            AppError::Validation(errors) => Some(errors.errors().to_vec()),
            _ => None,
        };

        let error_response = ErrorResponse {
            success: false,
            error: ErrorDetail {
                code: error_code.to_string(),
                message: user_message,
                details,
            },
            request_id,
        };

        (status_code, Json(error_response)).into_response()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::from_storage(err, "Record")
    }
}

impl From<GenerationError> for AppError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::Validation(errors) => AppError::Validation(errors),
            GenerationError::Generation(err) => AppError::Generation(err),
            GenerationError::Storage(err) => AppError::Storage(err),
        }
    }
}

impl From<ChatError> for AppError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::Validation(errors) => AppError::Validation(errors),
            ChatError::Generation(err) => AppError::Generation(err),
        }
    }
}

/// Malformed or mistyped JSON bodies are validation failures
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::validation("body", rejection.body_text())
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, AppError>;
