//! Error types for the persistence layer.
//!
//! Validation failures and missing identifiers are not errors at this
//! level: the stores report them as `Ok(None)` / `Ok(false)` sentinels
//! and the service layer decides what they mean. The variants here
//! cover only genuine store faults.

use thiserror::Error;

/// The primary error type for all storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Could not reach or open the backing store.
    #[error("{backend} connection failed: {message}")]
    ConnectionFailed {
        /// The store that failed ("sqlite" or "elasticsearch").
        backend: &'static str,
        /// Description of the failure.
        message: String,
    },

    /// The backing store rejected or failed an operation.
    #[error("{backend} backend error: {message}")]
    Internal {
        /// The store that failed.
        backend: &'static str,
        /// Description of the failure.
        message: String,
    },

    /// A record could not be converted to or from its stored form.
    #[error("serialization error: {message}")]
    Serialization {
        /// Description of the failure.
        message: String,
    },
}

impl StorageError {
    /// Convenience constructor for internal SQLite faults.
    pub(crate) fn sqlite(message: impl Into<String>) -> Self {
        StorageError::Internal {
            backend: "sqlite",
            message: message.into(),
        }
    }

    /// Convenience constructor for internal Elasticsearch faults.
    pub(crate) fn elasticsearch(message: impl Into<String>) -> Self {
        StorageError::Internal {
            backend: "elasticsearch",
            message: message.into(),
        }
    }
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_backend() {
        let err = StorageError::sqlite("disk I/O error");
        assert_eq!(err.to_string(), "sqlite backend error: disk I/O error");

        let err = StorageError::ConnectionFailed {
            backend: "elasticsearch",
            message: "invalid URL".to_string(),
        };
        assert!(err.to_string().contains("elasticsearch"));
    }
}
