//! `GET /{id}`: one article with share links and the visitor's vote.

use axum::{
    Json,
    extract::{OriginalUri, Path, State},
    http::{HeaderMap, header::HOST},
};
use newsdesk_core::{ArticleView, ShareLinks};
use serde::{Deserialize, Serialize};

use super::parse_id;
use crate::{cookies, error::WebError, handler::AppState};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleDetail {
    #[serde(flatten)]
    pub article: ArticleView,
    pub share: ShareLinks,
    pub liked: bool,
    pub disliked: bool,
}

pub async fn detail(
    State(state): State<AppState>, Path(raw_id): Path<String>, OriginalUri(uri): OriginalUri, headers: HeaderMap,
) -> Result<Json<ArticleDetail>, WebError> {
    let id = parse_id(&raw_id)?;
    state.cache.ensure_fresh().await;

    let article = state.cache.article(id).await?;
    let vote = cookies::vote_state(&headers, id);
    let share = ShareLinks::for_page(&page_url(&headers, &uri.to_string(), &state.config.bind_address()), &article.title);

    Ok(Json(ArticleDetail { article, share, liked: vote.is_liked(), disliked: vote.is_disliked() }))
}

/// Absolute URL of the current request, honoring a proxy's scheme header.
fn page_url(headers: &HeaderMap, path: &str, fallback_host: &str) -> String {
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");
    let host = headers
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(fallback_host);

    format!("{scheme}://{host}{path}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_page_url_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(HOST, HeaderValue::from_static("news.example"));
        assert_eq!(page_url(&headers, "/5", "0.0.0.0:3000"), "http://news.example/5");

        headers.insert("x-forwarded-proto", HeaderValue::from_static("https"));
        assert_eq!(page_url(&headers, "/5", "0.0.0.0:3000"), "https://news.example/5");
    }

    #[test]
    fn test_page_url_without_host() {
        assert_eq!(page_url(&HeaderMap::new(), "/5", "0.0.0.0:3000"), "http://0.0.0.0:3000/5");
    }
}
