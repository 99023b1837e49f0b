//! `POST /like/{id}` and `POST /dislike/{id}`.
//!
//! The cookie is only written when the store accepted the vote.

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, header::SET_COOKIE},
    response::{AppendHeaders, IntoResponse, Response},
};
use newsdesk_core::{ArticleId, Error, VisitorVoteState, VoteDirection};
use serde::{Deserialize, Serialize};

use super::parse_id;
use crate::{cookies, error::WebError, handler::AppState};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteResponse {
    pub status: String,
    pub id: ArticleId,
    pub vote: VisitorVoteState,
    pub positive_reviews: u32,
    pub negative_reviews: u32,
}

pub async fn like(
    State(state): State<AppState>, Path(raw_id): Path<String>, headers: HeaderMap,
) -> Result<Response, WebError> {
    cast(&state, &raw_id, &headers, VoteDirection::Like).await
}

pub async fn dislike(
    State(state): State<AppState>, Path(raw_id): Path<String>, headers: HeaderMap,
) -> Result<Response, WebError> {
    cast(&state, &raw_id, &headers, VoteDirection::Dislike).await
}

async fn cast(
    state: &AppState, raw_id: &str, headers: &HeaderMap, direction: VoteDirection,
) -> Result<Response, WebError> {
    let id = parse_id(raw_id)?;
    let current = cookies::vote_state(headers, id);
    let cookie = cookies::vote_cookie(id, direction)
        .map_err(|e| Error::InvalidInput(format!("unencodable vote cookie: {e}")))?;

    let outcome = state.cache.vote(id, current, direction).await?;

    tracing::info!(id, %direction, "vote recorded");
    let body = VoteResponse {
        status: "ok".into(),
        id,
        vote: outcome.state,
        positive_reviews: outcome.article.positive_reviews,
        negative_reviews: outcome.article.negative_reviews,
    };

    Ok((AppendHeaders([(SET_COOKIE, cookie)]), Json(body)).into_response())
}
