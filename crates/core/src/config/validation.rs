//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `news_to_cache`, `front_page_count` or `refresh_interval_secs` is 0
    /// - `search_limit` is 0 or exceeds 100
    /// - `store_timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `host` is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.news_to_cache == 0 {
            return Err(ConfigError::Invalid { field: "news_to_cache".into(), reason: "must be greater than 0".into() });
        }
        if self.front_page_count == 0 {
            return Err(ConfigError::Invalid {
                field: "front_page_count".into(),
                reason: "must be greater than 0".into(),
            });
        }

        if self.search_limit == 0 || self.search_limit > 100 {
            return Err(ConfigError::Invalid { field: "search_limit".into(), reason: "must be between 1 and 100".into() });
        }

        if self.refresh_interval_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "refresh_interval_secs".into(),
                reason: "must be greater than 0".into(),
            });
        }

        if self.store_timeout_ms < 100 {
            return Err(ConfigError::Invalid {
                field: "store_timeout_ms".into(),
                reason: "must be at least 100ms".into(),
            });
        }
        if self.store_timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "store_timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.host.is_empty() {
            return Err(ConfigError::Invalid { field: "host".into(), reason: "must not be empty".into() });
        }

        if self.front_page_count > self.news_to_cache {
            tracing::warn!(
                front_page_count = self.front_page_count,
                news_to_cache = self.news_to_cache,
                "front_page_count exceeds news_to_cache; \
                 the front page is capped by the snapshot size"
            );
        }

        Ok(())
    }
}
