//! Read-through news cache with periodic full refresh.
//!
//! [`NewsCache`] keeps the most recent `news_to_cache` articles in memory,
//! ordered by positive reviews, and reloads them from the store once the
//! snapshot is older than the refresh interval. Votes go to the store first
//! and are then copied onto the cached entry, so a vote never forces a
//! reload.
//!
//! Refresh and vote share one writer lock held across the store call and
//! the snapshot update. A refresh therefore cannot install rows read before
//! a vote landed, and concurrent readers that find the snapshot stale
//! trigger a single store query. Readers take the snapshot's read lock only.

mod snapshot;

use std::future::Future;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};

use crate::Error;
use crate::article::{Article, ArticleId};
use crate::clock::Clock;
use crate::config::AppConfig;
use crate::present::{ArticleView, Presenter};
use crate::store::ArticleStore;
use crate::vote::{self, VisitorVoteState, VoteDirection};

pub use snapshot::Snapshot;

/// Tunables for a [`NewsCache`].
#[derive(Debug, Clone)]
pub struct CacheSettings {
    /// Most recent articles held in memory.
    pub capacity: usize,
    /// Age at which the snapshot is reloaded.
    pub refresh_interval: Duration,
    /// Bound on each store call.
    pub store_timeout: Duration,
    /// Maximum search results.
    pub search_limit: usize,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for CacheSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            capacity: config.news_to_cache,
            refresh_interval: config.refresh_interval(),
            store_timeout: config.store_timeout(),
            search_limit: config.search_limit,
        }
    }
}

/// Result of an accepted vote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteOutcome {
    /// The article as persisted after the vote.
    pub article: Article,
    /// State to record for the visitor.
    pub state: VisitorVoteState,
}

pub struct NewsCache<S, C> {
    store: S,
    clock: C,
    presenter: Presenter,
    settings: CacheSettings,
    snapshot: RwLock<Snapshot>,
    writer: Mutex<()>,
}

impl<S: ArticleStore, C: Clock> NewsCache<S, C> {
    pub fn new(store: S, clock: C, settings: CacheSettings, presenter: Presenter) -> Self {
        Self { store, clock, presenter, settings, snapshot: RwLock::new(Snapshot::default()), writer: Mutex::new(()) }
    }

    /// Build a cache using the limits and redactions from `config`.
    pub fn from_config(store: S, clock: C, config: &AppConfig) -> Self {
        Self::new(store, clock, CacheSettings::from(config), Presenter::new(config.redacted_phrases.clone()))
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn settings(&self) -> &CacheSettings {
        &self.settings
    }

    /// Reload the snapshot if it is empty or older than the refresh interval.
    ///
    /// Failures are logged and leave the previous snapshot in place.
    pub async fn ensure_fresh(&self) {
        if !self.is_stale().await {
            return;
        }

        let _writer = self.writer.lock().await;
        // Another caller may have reloaded while we waited for the lock.
        if !self.is_stale().await {
            return;
        }

        if let Err(e) = self.reload().await {
            tracing::error!(error = %e, "snapshot refresh failed; serving stale articles");
        }
    }

    /// Reload unconditionally, returning the number of cached articles.
    ///
    /// # Errors
    ///
    /// Returns the store error; the previous snapshot is kept.
    pub async fn refresh(&self) -> Result<usize, Error> {
        let _writer = self.writer.lock().await;
        self.reload().await
    }

    async fn is_stale(&self) -> bool {
        let ttl = chrono::Duration::from_std(self.settings.refresh_interval).unwrap_or(chrono::Duration::MAX);
        self.snapshot.read().await.is_stale(self.clock.now(), ttl)
    }

    // Caller holds the writer lock.
    async fn reload(&self) -> Result<usize, Error> {
        let capacity = self.settings.capacity;
        let articles = self.timed("recent", self.store.recent(capacity)).await?;
        let count = articles.len();

        self.snapshot.write().await.replace(articles, self.clock.now());
        tracing::info!(count, capacity, "snapshot refreshed");
        Ok(count)
    }

    async fn timed<T>(&self, operation: &'static str, call: impl Future<Output = Result<T, Error>>) -> Result<T, Error> {
        let timeout = self.settings.store_timeout;
        tokio::time::timeout(timeout, call)
            .await
            .map_err(|_| Error::StoreTimeout { operation, timeout })?
    }

    /// First `n` cached articles, shaped for display.
    pub async fn top_n(&self, n: usize) -> Vec<ArticleView> {
        let now = self.clock.now();
        let snapshot = self.snapshot.read().await;
        snapshot
            .articles()
            .iter()
            .take(n)
            .map(|a| self.presenter.shape(a, now))
            .collect()
    }

    /// Cached articles in `category`, in snapshot order.
    pub async fn by_category(&self, category: &str) -> Vec<ArticleView> {
        let now = self.clock.now();
        let snapshot = self.snapshot.read().await;
        snapshot
            .articles()
            .iter()
            .filter(|a| a.category == category)
            .map(|a| self.presenter.shape(a, now))
            .collect()
    }

    /// Text search straight against the store, bypassing the snapshot.
    ///
    /// A blank query yields no results without a store call.
    pub async fn search(&self, query: &str) -> Result<Vec<ArticleView>, Error> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let articles = self
            .timed("search", self.store.search(query, self.settings.search_limit))
            .await?;
        let now = self.clock.now();
        Ok(articles.iter().map(|a| self.presenter.shape(a, now)).collect())
    }

    /// One article from the store, shaped for the detail page.
    ///
    /// # Errors
    ///
    /// `Error::NotFound` if the id doesn't exist.
    pub async fn article(&self, id: ArticleId) -> Result<ArticleView, Error> {
        let article = self
            .timed("find", self.store.find(id))
            .await?
            .ok_or(Error::NotFound(id))?;
        Ok(self.presenter.shape(&article, self.clock.now()))
    }

    /// Apply a visitor's vote.
    ///
    /// Repeats are rejected before any I/O. The store applies the counter
    /// deltas; only after it succeeds is the cached entry patched and the
    /// snapshot re-sorted.
    ///
    /// # Errors
    ///
    /// - `Error::DuplicateVote` if `direction` is already the visitor's vote
    /// - `Error::NotFound` if the id doesn't exist
    /// - store errors and `Error::StoreTimeout` when persisting fails
    pub async fn vote(
        &self, id: ArticleId, current: VisitorVoteState, direction: VoteDirection,
    ) -> Result<VoteOutcome, Error> {
        let transition = vote::transition(id, current, direction)?;

        let _writer = self.writer.lock().await;
        let persisted = self
            .timed("apply_vote", self.store.apply_vote(id, transition.delta))
            .await?
            .ok_or(Error::NotFound(id))?;

        let cached = self.snapshot.write().await.patch(&persisted);
        tracing::debug!(
            id,
            direction = %direction,
            positive = persisted.positive_reviews,
            negative = persisted.negative_reviews,
            cached,
            "vote applied"
        );

        Ok(VoteOutcome { article: persisted, state: transition.next })
    }

    /// Number of cached articles.
    pub async fn len(&self) -> usize {
        self.snapshot.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.snapshot.read().await.is_empty()
    }

    /// A copy of the current snapshot.
    pub async fn snapshot(&self) -> Snapshot {
        self.snapshot.read().await.clone()
    }
}
