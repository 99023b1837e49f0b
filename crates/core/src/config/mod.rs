//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (NEWSDESK_*)
//! 2. TOML config file (if NEWSDESK_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (NEWSDESK_*)
/// 2. TOML config file (if NEWSDESK_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the SQLite article store.
    ///
    /// Set via NEWSDESK_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Interface the HTTP server binds to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port the HTTP server listens on.
    ///
    /// Set via NEWSDESK_PORT environment variable.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of most recent articles held in the in-memory snapshot.
    #[serde(default = "default_news_to_cache")]
    pub news_to_cache: usize,

    /// Number of articles shown on the front page.
    #[serde(default = "default_front_page_count")]
    pub front_page_count: usize,

    /// Maximum number of full-text search results.
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,

    /// Seconds a snapshot stays fresh before the next read reloads it.
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,

    /// Upper bound for a single store call, in milliseconds.
    #[serde(default = "default_store_timeout_ms")]
    pub store_timeout_ms: u64,

    /// Source-attribution phrases stripped from article bodies.
    ///
    /// Set via NEWSDESK_REDACTED_PHRASES environment variable.
    #[serde(default = "default_redacted_phrases")]
    pub redacted_phrases: Vec<String>,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./newsdesk.sqlite")
}

fn default_host() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    3000
}

fn default_news_to_cache() -> usize {
    2000
}

fn default_front_page_count() -> usize {
    100
}

fn default_search_limit() -> usize {
    20
}

fn default_refresh_interval_secs() -> u64 {
    60 * 60
}

fn default_store_timeout_ms() -> u64 {
    5_000
}

fn default_redacted_phrases() -> Vec<String> {
    vec!["(Europa Press)".into()]
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            host: default_host(),
            port: default_port(),
            news_to_cache: default_news_to_cache(),
            front_page_count: default_front_page_count(),
            search_limit: default_search_limit(),
            refresh_interval_secs: default_refresh_interval_secs(),
            store_timeout_ms: default_store_timeout_ms(),
            redacted_phrases: default_redacted_phrases(),
        }
    }
}

impl AppConfig {
    /// Store call bound as Duration for use with tokio.
    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }

    /// Snapshot time-to-live.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    /// Socket address string for the HTTP listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `NEWSDESK_`
    /// 2. TOML file from `NEWSDESK_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// The layered provider stack without extraction.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("NEWSDESK_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment.merge(
            Env::prefixed("NEWSDESK_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        )
    }

    /// Extract and validate a configuration from an arbitrary figment.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
