//! HTTP error handling and response mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use super::dto::Envelope;
use crate::db::repository::RepositoryError;
use crate::services::{EngineError, ServiceError};

/// Application error type for HTTP handlers.
///
/// Conversion from [`ServiceError`] keeps the taxonomy: validation and
/// unknown-interval failures are client errors, conflicts get the
/// endpoint-specific "already exists" message (attached via
/// [`AppError::with_conflict_message`]), everything else is internal.
#[derive(Debug)]
pub enum AppError {
    /// Invalid request (validation error)
    BadRequest(String),
    /// Unique constraint violation
    Conflict(String),
    /// Resource not found
    NotFound(String),
    /// Internal server error
    Internal(String),
}

impl AppError {
    /// Replace a conflict's message with an endpoint-specific one, e.g.
    /// "Availability already exists.". Other variants pass through.
    pub fn with_conflict_message(self, message: &str) -> Self {
        match self {
            AppError::Conflict(_) => AppError::Conflict(message.to_string()),
            other => other,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            // The original API reports duplicates as a 400 with the
            // "already exists" message rather than a 409.
            AppError::Conflict(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(msg) => {
                error!(error = %msg, "internal error handling request");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, Json(Envelope::error(message))).into_response()
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Engine(e @ EngineError::Validation(_)) => {
                AppError::BadRequest(e.to_string())
            }
            ServiceError::Engine(e @ EngineError::InvalidInterval(_)) => {
                AppError::BadRequest(e.to_string())
            }
            ServiceError::Repository(RepositoryError::Conflict(msg)) => AppError::Conflict(msg),
            ServiceError::Repository(RepositoryError::NotFound(msg)) => AppError::NotFound(msg),
            ServiceError::Repository(e) => AppError::Internal(e.to_string()),
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        ServiceError::Repository(err).into()
    }
}
