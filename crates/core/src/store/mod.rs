//! SQLite-backed article store.
//!
//! The store is the only persistent state. It supports:
//!
//! - Recent articles sorted by date, bounded
//! - Lookup by id
//! - Full-text search through an FTS5 index kept in sync by triggers
//! - Atomic, zero-floored vote counter updates
//!
//! The cache talks to it through [`ArticleStore`] so tests can substitute
//! an in-process fake.

pub mod articles;
pub mod connection;
pub mod migrations;

use async_trait::async_trait;

use crate::Error;
use crate::article::{Article, ArticleId};
use crate::vote::VoteDelta;

pub use connection::NewsDb;

/// Operations the cache needs from a document store.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Newest articles first, at most `limit`.
    async fn recent(&self, limit: usize) -> Result<Vec<Article>, Error>;

    /// One article by id, or None.
    async fn find(&self, id: ArticleId) -> Result<Option<Article>, Error>;

    /// Text-index search, at most `limit` results.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Article>, Error>;

    /// Persist counter deltas atomically and return the stored article,
    /// or None if the id doesn't exist.
    async fn apply_vote(&self, id: ArticleId, delta: VoteDelta) -> Result<Option<Article>, Error>;
}

#[async_trait]
impl ArticleStore for NewsDb {
    async fn recent(&self, limit: usize) -> Result<Vec<Article>, Error> {
        self.recent_articles(limit).await
    }

    async fn find(&self, id: ArticleId) -> Result<Option<Article>, Error> {
        self.get_article(id).await
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Article>, Error> {
        self.search_articles(query, limit).await
    }

    async fn apply_vote(&self, id: ArticleId, delta: VoteDelta) -> Result<Option<Article>, Error> {
        self.apply_vote_delta(id, delta).await
    }
}
