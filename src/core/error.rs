use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};

use crate::core::response::ApiResponse;

/// Application-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Main application error type
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Business rule violations (bad operands, out-of-range values)
    #[error("{0}")]
    Validation(String),

    /// Request could not be extracted (malformed JSON, bad path or query)
    #[error("{0}")]
    RequestValidation(String),

    /// Resource not found
    #[error("{0}")]
    NotFound(String),

    /// Unique constraint or state conflict
    #[error("{0}")]
    Conflict(String),

    /// Database operation errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Database could not be reached at all
    #[error("Database connection failed: {0}")]
    DatabaseUnavailable(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable machine-readable code carried in the error envelope
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(_) | AppError::Json(_) => "BAD_REQUEST",
            AppError::RequestValidation(_) => "REQUEST_VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::DatabaseUnavailable(_) => "DATABASE_CONNECTION_FAILED",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Message shown to clients. Internal details stay in the logs.
    fn public_message(&self) -> String {
        match self {
            AppError::Database(_) | AppError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();

        if status_code.is_server_error() {
            tracing::error!(error_code = self.error_code(), "Request failed: {}", self);
        } else {
            tracing::debug!(error_code = self.error_code(), "Request rejected: {}", self);
        }

        HttpResponse::build(status_code)
            .json(ApiResponse::error(self.error_code(), self.public_message()))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::RequestValidation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::DatabaseUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Json(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Helper functions for common error scenarios
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        AppError::NotFound(resource.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        AppError::Conflict(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    /// Map a write error, turning unique-index and foreign-key violations into `Conflict`
    pub fn from_write(err: sqlx::Error, conflict_message: impl Into<String>) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_unique_violation() || db_err.is_foreign_key_violation() {
                return AppError::Conflict(conflict_message.into());
            }
        }
        AppError::Database(err)
    }
}
