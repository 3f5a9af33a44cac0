//! Error types for repository operations.

use thiserror::Error;

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Error type for repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Connection pool or database connection errors. Typically transient
    /// and retried by the Postgres backend.
    #[error("connection error: {0}")]
    Connection(String),

    /// Query execution errors.
    #[error("query error: {0}")]
    Query(String),

    /// Requested entity was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Unique constraint violation: the row (or email) already exists.
    /// Surfaced to clients as a distinct "already exists" error.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Transaction commit or rollback failure. Nothing from the
    /// transaction is visible.
    #[error("transaction error: {0}")]
    Transaction(String),

    /// Configuration or initialization error.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Internal/unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl RepositoryError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn transaction(message: impl Into<String>) -> Self {
        Self::Transaction(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Whether the Postgres backend should retry the operation.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

#[cfg(feature = "postgres-repo")]
impl From<diesel::result::Error> for RepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        use diesel::result::DatabaseErrorKind;

        match err {
            diesel::result::Error::NotFound => RepositoryError::not_found("record not found"),
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                RepositoryError::conflict(info.message().to_string())
            }
            diesel::result::Error::DatabaseError(DatabaseErrorKind::SerializationFailure, info) => {
                // Serialization failures under concurrent replace/insert are
                // retried at the connection helper level.
                RepositoryError::connection(info.message().to_string())
            }
            diesel::result::Error::RollbackTransaction => {
                RepositoryError::transaction("transaction rolled back".to_string())
            }
            other => RepositoryError::query(other.to_string()),
        }
    }
}

#[cfg(feature = "postgres-repo")]
impl From<diesel::r2d2::PoolError> for RepositoryError {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        RepositoryError::connection(err.to_string())
    }
}
