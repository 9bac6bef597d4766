/// Error types for the thumbnail service
///
/// Failures surface to the event push endpoint as JSON error responses;
/// the hosting platform decides what to do with non-2xx deliveries.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde::Serialize;
use thiserror::Error;

/// Result type for thumbnail-service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration is missing or invalid
    #[error("configuration error: {0}")]
    Config(String),

    /// Server failed to bind or run
    #[error("server start failure: {0}")]
    StartServer(String),

    /// Request body could not be interpreted as a finalize event
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Object store download or upload failed
    #[error("storage error: {0}")]
    Storage(String),

    /// External conversion process failed
    #[error("conversion error: {0}")]
    Convert(String),

    /// Local scratch filesystem operation failed
    #[error("io error: {0}")]
    Io(String),

    /// Internal server error
    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_)
            | AppError::StartServer(_)
            | AppError::Storage(_)
            | AppError::Convert(_)
            | AppError::Io(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::Config(_) => "configuration_error",
            AppError::StartServer(_) => "server_error",
            AppError::BadRequest(_) => "bad_request",
            AppError::Storage(_) => "storage_error",
            AppError::Convert(_) => "conversion_error",
            AppError::Io(_) => "io_error",
            AppError::Internal(_) => "server_error",
        };
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error,
            message: self.to_string(),
        })
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}
