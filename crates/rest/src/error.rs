//! Error types for the catalogue REST API.
//!
//! Validation failures and missing entities are usually expressed as
//! sentinel values by the service layer and mapped to status codes at
//! the handler, so this type covers the remaining failure modes:
//! malformed requests, unknown entities surfaced as errors, and
//! storage-layer faults.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use catalogue_persistence::StorageError;
use std::fmt;

/// The primary error type for REST API operations.
#[derive(Debug)]
pub enum RestError {
    /// Entity not found (HTTP 404).
    NotFound {
        /// The entity kind (e.g. "book").
        entity: &'static str,
        /// The entity identifier.
        id: String,
    },

    /// Bad request (HTTP 400).
    BadRequest {
        /// Error message.
        message: String,
    },

    /// Internal server error (HTTP 500).
    InternalError {
        /// Error message.
        message: String,
    },
}

/// Result type alias for REST operations.
pub type RestResult<T> = Result<T, RestError>;

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestError::NotFound { entity, id } => {
                write!(f, "Not found: {}/{}", entity, id)
            }
            RestError::BadRequest { message } => {
                write!(f, "Bad request: {}", message)
            }
            RestError::InternalError { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for RestError {}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            RestError::NotFound { entity, id } => (
                StatusCode::NOT_FOUND,
                "not-found",
                format!("{} {} not found", entity, id),
            ),
            RestError::BadRequest { message } => {
                (StatusCode::BAD_REQUEST, "invalid", message.clone())
            }
            RestError::InternalError { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "exception",
                message.clone(),
            ),
        };

        let body = serde_json::json!({
            "error": error,
            "message": message,
        });
        (status, Json(body)).into_response()
    }
}

impl From<StorageError> for RestError {
    fn from(err: StorageError) -> Self {
        RestError::InternalError {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = RestError::NotFound {
            entity: "book",
            id: "7".to_string(),
        };
        assert_eq!(err.to_string(), "Not found: book/7");

        let err = RestError::BadRequest {
            message: "bad".to_string(),
        };
        assert_eq!(err.to_string(), "Bad request: bad");
    }

    #[test]
    fn test_storage_error_maps_to_internal() {
        let storage = StorageError::Internal {
            backend: "sqlite",
            message: "boom".to_string(),
        };
        let err: RestError = storage.into();
        assert!(matches!(err, RestError::InternalError { .. }));
    }
}
