//! Error handling middleware - RFC 7807 compliant responses.

use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use quill_core::SyncError;
use quill_shared::ErrorResponse;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Sync(SyncError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Sync(err) => write!(f, "{}", err),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Sync(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            // Sync failures are user-actionable: a re-save or re-delete
            // is safe, so the message goes out verbatim. The
            // "post saved, content not saved" case rides on the
            // BlockReplace display text.
            AppError::Sync(err) => {
                tracing::error!("Store sync failure: {}", err);
                ErrorResponse::new(500, "Store Sync Failed").with_detail(err.to_string())
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

impl From<SyncError> for AppError {
    fn from(err: SyncError) -> Self {
        AppError::Sync(err)
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
