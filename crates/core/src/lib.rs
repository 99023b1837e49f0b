//! Core types and shared functionality for newsdesk.
//!
//! This crate provides:
//! - SQLite article store with full-text search
//! - In-memory news cache with periodic refresh and in-place vote updates
//! - The per-visitor vote state machine
//! - Display shaping (relative dates, share links)
//! - Unified error types and configuration

pub mod article;
pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod present;
pub mod store;
pub mod vote;

pub use article::{Article, ArticleId, NewArticle};
pub use cache::{NewsCache, VoteOutcome};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::AppConfig;
pub use error::Error;
pub use present::{ArticleView, ShareLinks};
pub use store::{ArticleStore, NewsDb};
pub use vote::{VisitorVoteState, VoteDirection};
