//! Route handlers.
//!
//! Pages are served as JSON view models; listing pages refresh the cache
//! on the way in, search and votes go to the store.

pub mod detail;
pub mod health;
pub mod listing;
pub mod search;
pub mod vote;

use newsdesk_core::ArticleId;

use crate::error::WebError;

/// Parse an article id path segment.
pub(crate) fn parse_id(raw: &str) -> Result<ArticleId, WebError> {
    raw.parse::<ArticleId>()
        .map_err(|_| WebError::UnknownArticle(raw.to_string()))
}

#[cfg(test)]
mod tests;
