//! Unified error types for newsdesk.
//!
//! The HTTP layer maps each variant onto a status code; the cache layer
//! swallows store failures during refresh and only logs them.

use std::time::Duration;

use tokio_rusqlite::rusqlite;

/// Unified error type for the store, cache and vote operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., malformed article id).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// No article exists with the given id.
    #[error("NOT_FOUND: article {0}")]
    NotFound(i64),

    /// The visitor already cast this vote on this article.
    #[error("DUPLICATE_VOTE: article {0} already has this vote")]
    DuplicateVote(i64),

    /// Database operation failed.
    #[error("STORE_ERROR: {0}")]
    Database(tokio_rusqlite::Error),

    /// Migration failed to apply.
    #[error("STORE_ERROR: migration failed: {0}")]
    MigrationFailed(String),

    /// A store call did not finish within the configured bound.
    #[error("STORE_TIMEOUT: {operation} exceeded {}ms", .timeout.as_millis())]
    StoreTimeout { operation: &'static str, timeout: Duration },
}

impl Error {
    /// Whether the failure originates in the store rather than in the request.
    pub fn is_store_failure(&self) -> bool {
        matches!(self, Error::Database(_) | Error::MigrationFailed(_) | Error::StoreTimeout { .. })
    }
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            _ => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NotFound(42);
        assert!(err.to_string().contains("NOT_FOUND"));
        assert!(err.to_string().contains("42"));
    }

    #[test]
    fn test_duplicate_distinct_from_not_found() {
        let dup = Error::DuplicateVote(7).to_string();
        let missing = Error::NotFound(7).to_string();
        assert_ne!(dup, missing);
        assert!(dup.starts_with("DUPLICATE_VOTE"));
    }

    #[test]
    fn test_timeout_display() {
        let err = Error::StoreTimeout { operation: "recent", timeout: Duration::from_millis(250) };
        assert_eq!(err.to_string(), "STORE_TIMEOUT: recent exceeded 250ms");
        assert!(err.is_store_failure());
    }

    #[test]
    fn test_request_errors_are_not_store_failures() {
        assert!(!Error::NotFound(1).is_store_failure());
        assert!(!Error::DuplicateVote(1).is_store_failure());
        assert!(!Error::InvalidInput("x".into()).is_store_failure());
    }
}
