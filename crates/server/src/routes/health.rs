use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;

use crate::handler::AppState;

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.cache.snapshot().await;
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "cached_articles": snapshot.len(),
        "refreshed_at": snapshot.refreshed_at().map(|at| at.to_rfc3339()),
    }))
}
