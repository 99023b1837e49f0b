//! HTTP router and shared state.
//!
//! Maps the site's routes onto the handlers in [`crate::routes`].

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use newsdesk_core::{AppConfig, NewsCache, NewsDb, SystemClock};
use tower_http::trace::TraceLayer;

use crate::routes::{detail, health, listing, search, vote};

pub type SiteCache = NewsCache<NewsDb, SystemClock>;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<SiteCache>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(db: NewsDb, config: AppConfig) -> Self {
        let cache = NewsCache::from_config(db, SystemClock, &config);
        Self { cache: Arc::new(cache), config: Arc::new(config) }
    }
}

/// Build the site router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(listing::front_page))
        .route("/health", get(health::health))
        .route("/categories/{category}", get(listing::category))
        .route("/search", get(search::search))
        .route("/like/{id}", post(vote::like))
        .route("/dislike/{id}", post(vote::dislike))
        .route("/{id}", get(detail::detail))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
