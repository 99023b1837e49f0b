//! Structured errors for the newsdesk server.
//!
//! Every failure becomes a JSON body `{"status": "error", "code", "message"}`
//! with a status code that keeps duplicate votes distinct from missing
//! articles and from store failures.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use newsdesk_core::Error;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// Path segment that cannot be an article id.
    #[error("NOT_FOUND: no article at {0}")]
    UnknownArticle(String),

    #[error(transparent)]
    Core(#[from] Error),
}

impl WebError {
    fn status(&self) -> StatusCode {
        match self {
            WebError::UnknownArticle(_) => StatusCode::NOT_FOUND,
            WebError::Core(err) => match err {
                Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
                Error::NotFound(_) => StatusCode::NOT_FOUND,
                Error::DuplicateVote(_) => StatusCode::CONFLICT,
                Error::StoreTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
                Error::Database(_) | Error::MigrationFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn code(&self) -> &'static str {
        match self {
            WebError::UnknownArticle(_) => "not_found",
            WebError::Core(err) => match err {
                Error::InvalidInput(_) => "invalid_input",
                Error::NotFound(_) => "not_found",
                Error::DuplicateVote(_) => "duplicate_vote",
                Error::StoreTimeout { .. } => "store_timeout",
                Error::Database(_) | Error::MigrationFailed(_) => "store_error",
            },
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = self.code(), "{self}");
        } else {
            tracing::debug!(code = self.code(), "{self}");
        }

        let message = if status.is_server_error() { "internal server error".to_string() } else { self.to_string() };
        let payload = Json(json!({"status": "error", "code": self.code(), "message": message}));

        (status, payload).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_duplicate_distinct_from_not_found() {
        let dup = WebError::from(Error::DuplicateVote(1));
        let missing = WebError::from(Error::NotFound(1));
        assert_eq!(dup.status(), StatusCode::CONFLICT);
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert_ne!(dup.code(), missing.code());
    }

    #[test]
    fn test_store_failures_are_server_errors() {
        let timeout = WebError::from(Error::StoreTimeout { operation: "apply_vote", timeout: Duration::from_secs(1) });
        assert_eq!(timeout.status(), StatusCode::GATEWAY_TIMEOUT);

        let broken = WebError::from(Error::MigrationFailed("x".into()));
        assert_eq!(broken.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_unknown_article_is_404() {
        let err = WebError::UnknownArticle("favicon.ico".into());
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }
}
