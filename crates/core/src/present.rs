//! Display shaping for articles.
//!
//! Pure functions: a stored [`Article`] plus the current time becomes an
//! [`ArticleView`] ready to serialize.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::article::{Article, ArticleId};

const LINE_BREAK: &str = "<br/>";
const TWITTER_SHARE: &str = "https://twitter.com/share";
const FACEBOOK_SHARE: &str = "https://www.facebook.com/sharer/sharer.php";

/// Article as shown on listing and detail pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleView {
    pub id: ArticleId,
    pub title: String,
    pub subtitle: String,
    /// Body with line breaks turned into `<br/>`.
    pub body: String,
    pub image_url: Option<String>,
    pub category: String,
    /// Relative date, e.g. "3 hours ago".
    pub date: String,
    /// Publish time, RFC 3339.
    pub published_at: String,
    pub positive_reviews: u32,
    pub negative_reviews: u32,
    pub has_likes: bool,
    pub has_dislikes: bool,
}

/// Outbound social-share targets for one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareLinks {
    pub twitter: String,
    pub facebook: String,
}

impl ShareLinks {
    /// Build share URLs for `page_url`, with `title` as the tweet text.
    pub fn for_page(page_url: &str, title: &str) -> Self {
        Self {
            twitter: share_url(TWITTER_SHARE, &[("url", page_url), ("text", title)]),
            facebook: share_url(FACEBOOK_SHARE, &[("u", page_url)]),
        }
    }
}

fn share_url(base: &str, params: &[(&str, &str)]) -> String {
    match Url::parse_with_params(base, params) {
        Ok(url) => url.into(),
        Err(e) => {
            tracing::warn!(base, "failed to build share url: {e}");
            base.to_string()
        }
    }
}

/// Shapes articles, stripping configured attribution phrases.
#[derive(Debug, Clone, Default)]
pub struct Presenter {
    redacted_phrases: Vec<String>,
}

impl Presenter {
    pub fn new(redacted_phrases: Vec<String>) -> Self {
        let redacted_phrases = redacted_phrases.into_iter().filter(|p| !p.is_empty()).collect();
        Self { redacted_phrases }
    }

    pub fn shape(&self, article: &Article, now: DateTime<Utc>) -> ArticleView {
        ArticleView {
            id: article.id,
            title: article.title.clone(),
            subtitle: self.redact(&article.subtitle),
            body: with_line_breaks(&self.redact(&article.body)),
            image_url: article.image_url.clone(),
            category: article.category.clone(),
            date: humanize_since(article.date, now),
            published_at: article.date.to_rfc3339(),
            positive_reviews: article.positive_reviews,
            negative_reviews: article.negative_reviews,
            has_likes: article.has_likes(),
            has_dislikes: article.has_dislikes(),
        }
    }

    fn redact(&self, text: &str) -> String {
        self.redacted_phrases
            .iter()
            .fold(text.to_string(), |acc, phrase| acc.replace(phrase.as_str(), ""))
            .trim()
            .to_string()
    }
}

/// Replace `\r\n`, `\r` and `\n` with `<br/>`.
pub fn with_line_breaks(text: &str) -> String {
    text.replace("\r\n", LINE_BREAK)
        .replace('\r', LINE_BREAK)
        .replace('\n', LINE_BREAK)
}

/// Human-readable distance between `then` and `now`.
///
/// Buckets: seconds, a minute, minutes, an hour, hours, a day, days,
/// a month, months, a year, years. Future dates read "in ...".
pub fn humanize_since(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(then);
    let future = delta.num_seconds() < 0;
    let seconds = delta.num_seconds().unsigned_abs();

    let minutes = (seconds as f64 / 60.0).round() as u64;
    let hours = (seconds as f64 / 3600.0).round() as u64;
    let days = (seconds as f64 / 86_400.0).round() as u64;

    let phrase = match seconds {
        0..45 => "a few seconds".to_string(),
        45..90 => "a minute".to_string(),
        s if s < 45 * 60 => format!("{minutes} minutes"),
        s if s < 90 * 60 => "an hour".to_string(),
        s if s < 22 * 3600 => format!("{hours} hours"),
        s if s < 36 * 3600 => "a day".to_string(),
        _ if days < 26 => format!("{days} days"),
        _ if days < 45 => "a month".to_string(),
        _ if days < 320 => format!("{} months", ((days as f64) / 30.44).round().max(2.0) as u64),
        _ if days < 548 => "a year".to_string(),
        _ => format!("{} years", ((days as f64) / 365.25).round().max(2.0) as u64),
    };

    if future { format!("in {phrase}") } else { format!("{phrase} ago") }
}
