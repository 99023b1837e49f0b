//! The in-memory working set.

use chrono::{DateTime, Duration, Utc};

use crate::article::Article;

/// Up to `news_to_cache` articles, most-liked first, and when they were loaded.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    articles: Vec<Article>,
    refreshed_at: Option<DateTime<Utc>>,
}

impl Snapshot {
    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.refreshed_at
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Whether the next read should reload: empty, never loaded, or at least
    /// `ttl` old.
    pub fn is_stale(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        match self.refreshed_at {
            _ if self.articles.is_empty() => true,
            None => true,
            Some(at) => now.signed_duration_since(at) >= ttl,
        }
    }

    /// Swap in a freshly loaded set. `articles` arrive newest first.
    pub fn replace(&mut self, articles: Vec<Article>, at: DateTime<Utc>) {
        self.articles = articles;
        self.refreshed_at = Some(at);
        self.sort();
    }

    /// Copy persisted counters onto the cached entry with the same id.
    ///
    /// Returns false when the article isn't in the working set.
    pub fn patch(&mut self, persisted: &Article) -> bool {
        let Some(entry) = self.articles.iter_mut().find(|a| a.id == persisted.id) else {
            return false;
        };
        entry.positive_reviews = persisted.positive_reviews;
        entry.negative_reviews = persisted.negative_reviews;
        self.sort();
        true
    }

    // Stable: equal counts keep their previous relative order.
    fn sort(&mut self) {
        self.articles
            .sort_by(|a, b| b.positive_reviews.cmp(&a.positive_reviews));
    }
}
