//! Article CRUD, search and counter updates.
//!
//! Dates are stored as RFC 3339 UTC strings with millisecond precision so
//! lexical order matches chronological order.

use super::connection::NewsDb;
use crate::Error;
use crate::article::{Article, ArticleId, ArticleRecord, NewArticle};
use crate::vote::VoteDelta;
use chrono::{DateTime, SecondsFormat, Utc};
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite::{self, Row, types::Type};

const ARTICLE_COLUMNS: &str =
    "id, title, subtitle, body, image_url, category, date, positive_reviews, negative_reviews";

const JOINED_COLUMNS: &str = "a.id, a.title, a.subtitle, a.body, a.image_url, a.category, a.date, \
     a.positive_reviews, a.negative_reviews";

fn format_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn read_article(row: &Row<'_>) -> rusqlite::Result<Article> {
    let raw_date: String = row.get(6)?;
    let date = DateTime::parse_from_rfc3339(&raw_date)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e)))?
        .with_timezone(&Utc);

    Ok(Article::from_record(ArticleRecord {
        id: row.get(0)?,
        title: row.get(1)?,
        subtitle: row.get(2)?,
        body: row.get(3)?,
        image_url: row.get(4)?,
        category: row.get(5)?,
        date,
        positive_reviews: row.get(7)?,
        negative_reviews: row.get(8)?,
    }))
}

/// Turn free text into an FTS5 expression that matches every token.
///
/// Each token is quoted so operators and punctuation in user input are
/// treated as literal text. Returns None when the input has no tokens.
pub(crate) fn match_expression(query: &str) -> Option<String> {
    let tokens: Vec<String> = query
        .split_whitespace()
        .map(|token| format!("\"{}\"", token.replace('"', "\"\"")))
        .collect();

    if tokens.is_empty() { None } else { Some(tokens.join(" ")) }
}

impl NewsDb {
    /// Insert an article and return it with its assigned id.
    ///
    /// Counters start out NULL, as documents written by other tools do.
    pub async fn insert_article(&self, article: &NewArticle) -> Result<Article, Error> {
        let article = article.clone();
        self.conn
            .call(move |conn| -> Result<Article, Error> {
                let sql = format!(
                    "INSERT INTO articles (title, subtitle, body, image_url, category, date)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                     RETURNING {ARTICLE_COLUMNS}"
                );
                let inserted = conn.query_row(
                    &sql,
                    params![
                        &article.title,
                        &article.subtitle,
                        &article.body,
                        &article.image_url,
                        &article.category,
                        format_date(&article.date),
                    ],
                    read_article,
                )?;
                Ok(inserted)
            })
            .await
            .map_err(Error::from)
    }

    /// Most recent articles, newest first, at most `limit`.
    pub async fn recent_articles(&self, limit: usize) -> Result<Vec<Article>, Error> {
        let limit = limit as i64;
        self.conn
            .call(move |conn| -> Result<Vec<Article>, Error> {
                let sql = format!("SELECT {ARTICLE_COLUMNS} FROM articles ORDER BY date DESC, id DESC LIMIT ?1");
                let mut stmt = conn.prepare(&sql)?;
                let articles = stmt
                    .query_map(params![limit], read_article)?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(articles)
            })
            .await
            .map_err(Error::from)
    }

    /// Get an article by id.
    ///
    /// Returns None if the id doesn't exist.
    pub async fn get_article(&self, id: ArticleId) -> Result<Option<Article>, Error> {
        self.conn
            .call(move |conn| -> Result<Option<Article>, Error> {
                let sql = format!("SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = ?1");
                let result = conn.query_row(&sql, params![id], read_article);

                match result {
                    Ok(article) => Ok(Some(article)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Full-text search over title, subtitle and body, best matches first.
    pub async fn search_articles(&self, query: &str, limit: usize) -> Result<Vec<Article>, Error> {
        let Some(expression) = match_expression(query) else {
            return Ok(Vec::new());
        };
        let limit = limit as i64;

        self.conn
            .call(move |conn| -> Result<Vec<Article>, Error> {
                let sql = format!(
                    "SELECT {JOINED_COLUMNS} FROM articles_fts
                     JOIN articles a ON a.id = articles_fts.rowid
                     WHERE articles_fts MATCH ?1
                     ORDER BY articles_fts.rank
                     LIMIT ?2"
                );
                let mut stmt = conn.prepare(&sql)?;
                let articles = stmt
                    .query_map(params![expression, limit], read_article)?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(articles)
            })
            .await
            .map_err(Error::from)
    }

    /// Apply vote deltas in a single statement and return the persisted row.
    ///
    /// NULL counters count as 0 and results never drop below 0. Returns None
    /// if the id doesn't exist.
    pub async fn apply_vote_delta(&self, id: ArticleId, delta: VoteDelta) -> Result<Option<Article>, Error> {
        self.conn
            .call(move |conn| -> Result<Option<Article>, Error> {
                let sql = format!(
                    "UPDATE articles SET
                        positive_reviews = MAX(0, COALESCE(positive_reviews, 0) + ?2),
                        negative_reviews = MAX(0, COALESCE(negative_reviews, 0) + ?3)
                     WHERE id = ?1
                     RETURNING {ARTICLE_COLUMNS}"
                );
                let result = conn.query_row(&sql, params![id, delta.positive, delta.negative], read_article);

                match result {
                    Ok(article) => Ok(Some(article)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Overwrite both counters. `None` stores NULL.
    pub async fn set_counters(
        &self, id: ArticleId, positive: Option<i64>, negative: Option<i64>,
    ) -> Result<bool, Error> {
        self.conn
            .call(move |conn| -> Result<bool, Error> {
                let updated = conn.execute(
                    "UPDATE articles SET positive_reviews = ?2, negative_reviews = ?3 WHERE id = ?1",
                    params![id, positive, negative],
                )?;
                Ok(updated == 1)
            })
            .await
            .map_err(Error::from)
    }
}
