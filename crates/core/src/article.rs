//! Article entity as it crosses the store boundary.
//!
//! Rows come out of the store with nullable counters. `Article::from_record`
//! is the only way to build an `Article` from stored data, so every consumer
//! downstream sees counters that are present and non-negative.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned article identifier.
pub type ArticleId = i64;

/// Raw stored article, counters as they sit in the store.
#[derive(Debug, Clone, Default)]
pub struct ArticleRecord {
    pub id: ArticleId,
    pub title: String,
    pub subtitle: String,
    pub body: String,
    pub image_url: Option<String>,
    pub category: String,
    pub date: DateTime<Utc>,
    pub positive_reviews: Option<i64>,
    pub negative_reviews: Option<i64>,
}

/// A well-formed article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub subtitle: String,
    pub body: String,
    pub image_url: Option<String>,
    pub category: String,
    pub date: DateTime<Utc>,
    pub positive_reviews: u32,
    pub negative_reviews: u32,
}

impl Article {
    /// Normalize a stored record: absent or negative counters become 0.
    pub fn from_record(record: ArticleRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            subtitle: record.subtitle,
            body: record.body,
            image_url: record.image_url,
            category: record.category,
            date: record.date,
            positive_reviews: normalize_counter(record.positive_reviews),
            negative_reviews: normalize_counter(record.negative_reviews),
        }
    }

    pub fn has_likes(&self) -> bool {
        self.positive_reviews > 0
    }

    pub fn has_dislikes(&self) -> bool {
        self.negative_reviews > 0
    }
}

fn normalize_counter(value: Option<i64>) -> u32 {
    value.unwrap_or(0).clamp(0, i64::from(u32::MAX)) as u32
}

/// Fields needed to publish a new article. The store assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewArticle {
    pub title: String,
    pub subtitle: String,
    pub body: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub category: String,
    pub date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(positive: Option<i64>, negative: Option<i64>) -> ArticleRecord {
        ArticleRecord {
            id: 1,
            title: "Title".into(),
            category: "world".into(),
            positive_reviews: positive,
            negative_reviews: negative,
            ..Default::default()
        }
    }

    #[test]
    fn test_absent_counters_become_zero() {
        let article = Article::from_record(record(None, None));
        assert_eq!(article.positive_reviews, 0);
        assert_eq!(article.negative_reviews, 0);
        assert!(!article.has_likes());
        assert!(!article.has_dislikes());
    }

    #[test]
    fn test_negative_counters_clamped() {
        let article = Article::from_record(record(Some(-3), Some(2)));
        assert_eq!(article.positive_reviews, 0);
        assert_eq!(article.negative_reviews, 2);
        assert!(article.has_dislikes());
    }

    #[test]
    fn test_present_counters_kept() {
        let article = Article::from_record(record(Some(5), Some(0)));
        assert_eq!(article.positive_reviews, 5);
        assert!(article.has_likes());
    }
}
