//! Vote cookies.
//!
//! One cookie per article, `state_like<id>`, holding `like` or `dislike`.
//! Scoped to the whole site so every page sees the visitor's vote.

use axum::http::{HeaderMap, HeaderValue, header::COOKIE, header::InvalidHeaderValue};
use newsdesk_core::{ArticleId, VisitorVoteState, VoteDirection};

const COOKIE_PREFIX: &str = "state_like";
const MAX_AGE_SECS: u64 = 365 * 24 * 60 * 60;

pub fn cookie_name(id: ArticleId) -> String {
    format!("{COOKIE_PREFIX}{id}")
}

/// Look up the visitor's committed vote on `id` from the request cookies.
pub fn vote_state(headers: &HeaderMap, id: ArticleId) -> VisitorVoteState {
    let name = cookie_name(id);
    let value = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|header| header.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value);

    VisitorVoteState::from_cookie_value(value)
}

/// `Set-Cookie` value recording `direction` for `id`.
pub fn vote_cookie(id: ArticleId, direction: VoteDirection) -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::from_str(&format!(
        "{}={direction}; Path=/; Max-Age={MAX_AGE_SECS}; SameSite=Lax",
        cookie_name(id)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn test_reads_matching_cookie() {
        let headers = headers("theme=dark; state_like7=like; state_like70=dislike");
        assert_eq!(vote_state(&headers, 7), VisitorVoteState::Liked);
        assert_eq!(vote_state(&headers, 70), VisitorVoteState::Disliked);
        assert_eq!(vote_state(&headers, 8), VisitorVoteState::None);
    }

    #[test]
    fn test_missing_header_is_none() {
        assert_eq!(vote_state(&HeaderMap::new(), 1), VisitorVoteState::None);
    }

    #[test]
    fn test_garbage_value_is_none() {
        assert_eq!(vote_state(&headers("state_like1=yes"), 1), VisitorVoteState::None);
    }

    #[test]
    fn test_cookie_site_wide() {
        let value = vote_cookie(12, VoteDirection::Dislike).unwrap();
        let value = value.to_str().unwrap();
        assert!(value.starts_with("state_like12=dislike;"));
        assert!(value.contains("Path=/"));
    }
}
