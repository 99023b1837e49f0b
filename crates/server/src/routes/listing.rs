//! Front page and category pages, served from the cache.

use axum::{
    Json,
    extract::{Path, State},
};
use newsdesk_core::ArticleView;
use serde::{Deserialize, Serialize};

use crate::handler::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub count: usize,
    pub articles: Vec<ArticleView>,
}

impl Listing {
    fn new(category: Option<String>, articles: Vec<ArticleView>) -> Self {
        Self { category, count: articles.len(), articles }
    }
}

/// `GET /`: the top `front_page_count` cached articles.
pub async fn front_page(State(state): State<AppState>) -> Json<Listing> {
    state.cache.ensure_fresh().await;
    let articles = state.cache.top_n(state.config.front_page_count).await;
    Json(Listing::new(None, articles))
}

/// `GET /categories/{category}`: cached articles in one category.
pub async fn category(State(state): State<AppState>, Path(category): Path<String>) -> Json<Listing> {
    state.cache.ensure_fresh().await;
    let articles = state.cache.by_category(&category).await;
    Json(Listing::new(Some(category), articles))
}
