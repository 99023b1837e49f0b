//! `GET /search?query=`: full-text search against the store.

use axum::{
    Json,
    extract::{Query, State},
};
use newsdesk_core::ArticleView;
use serde::{Deserialize, Serialize};

use crate::{error::WebError, handler::AppState};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    Ok,
    NoResults,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub status: SearchStatus,
    pub query: String,
    pub articles: Vec<ArticleView>,
}

pub async fn search(
    State(state): State<AppState>, Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, WebError> {
    let articles = state.cache.search(&params.query).await?;
    let status = if articles.is_empty() { SearchStatus::NoResults } else { SearchStatus::Ok };

    tracing::debug!(query = %params.query, hits = articles.len(), "search served");
    Ok(Json(SearchResponse { status, query: params.query, articles }))
}
