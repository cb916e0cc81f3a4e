//! Application configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! All configuration is loaded at startup and validated before the scheduler runs.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::{
    DEFAULT_CODEFORCES_API_URL, DEFAULT_CONTEST_TIMEOUT_SECS, DEFAULT_DATABASE_MAX_CONNECTIONS,
    DEFAULT_JUDGE_REQUEST_TIMEOUT_SECS, DEFAULT_PROCESS_CRON, DEFAULT_RETRY_INTERVAL_SECS,
    DEFAULT_RETRY_MAX_ATTEMPTS, DEFAULT_YANDEX_API_URL, DEFAULT_YANDEX_PAGE_SIZE,
};

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub rust_log: String,
    pub database: DatabaseConfig,
    pub scheduler: SchedulerConfig,
    pub judges: JudgesConfig,
    pub retry: RetryConfig,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Periodic processing configuration
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Cron expression (with seconds) driving the processing job
    pub cron: String,
    /// Per-contest processing deadline; `None` lets a contest run until its judge answers
    pub contest_timeout: Option<Duration>,
}

/// Endpoints and request shaping for the judging systems
#[derive(Debug, Clone)]
pub struct JudgesConfig {
    pub yandex_api_url: String,
    pub codeforces_api_url: String,
    pub yandex_page_size: u32,
    pub request_timeout: Duration,
}

/// Retry policy for failed judge calls
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub interval: Duration,
    /// `None` keeps retrying until the judge answers
    pub max_attempts: Option<u32>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            rust_log: env::var("RUST_LOG")
                .unwrap_or_else(|_| "balloon_dispatch=info,sqlx=warn".to_string()),
            database: DatabaseConfig::from_env()?,
            scheduler: SchedulerConfig::from_env()?,
            judges: JudgesConfig::from_env()?,
            retry: RetryConfig::from_env()?,
        })
    }
}

impl DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::var("DATABASE_URL")
                .map_err(|_| ConfigError::Missing("DATABASE_URL".to_string()))?,
            max_connections: parse_var("DATABASE_MAX_CONNECTIONS", DEFAULT_DATABASE_MAX_CONNECTIONS)?,
        })
    }
}

impl SchedulerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let timeout_secs: u64 = parse_var("CONTEST_TIMEOUT_SECS", DEFAULT_CONTEST_TIMEOUT_SECS)?;

        Ok(Self {
            cron: env::var("PROCESS_CRON").unwrap_or_else(|_| DEFAULT_PROCESS_CRON.to_string()),
            contest_timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
        })
    }
}

impl JudgesConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let page_size: u32 = parse_var("YANDEX_PAGE_SIZE", DEFAULT_YANDEX_PAGE_SIZE)?;
        if page_size == 0 {
            return Err(ConfigError::InvalidValue("YANDEX_PAGE_SIZE".to_string()));
        }

        Ok(Self {
            yandex_api_url: env::var("YANDEX_API_URL")
                .unwrap_or_else(|_| DEFAULT_YANDEX_API_URL.to_string()),
            codeforces_api_url: env::var("CODEFORCES_API_URL")
                .unwrap_or_else(|_| DEFAULT_CODEFORCES_API_URL.to_string()),
            yandex_page_size: page_size,
            request_timeout: Duration::from_secs(parse_var(
                "JUDGE_REQUEST_TIMEOUT_SECS",
                DEFAULT_JUDGE_REQUEST_TIMEOUT_SECS,
            )?),
        })
    }
}

impl Default for JudgesConfig {
    fn default() -> Self {
        Self {
            yandex_api_url: DEFAULT_YANDEX_API_URL.to_string(),
            codeforces_api_url: DEFAULT_CODEFORCES_API_URL.to_string(),
            yandex_page_size: DEFAULT_YANDEX_PAGE_SIZE,
            request_timeout: Duration::from_secs(DEFAULT_JUDGE_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl RetryConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let max_attempts: u32 = parse_var("RETRY_MAX_ATTEMPTS", DEFAULT_RETRY_MAX_ATTEMPTS)?;

        Ok(Self {
            interval: Duration::from_secs(parse_var(
                "RETRY_INTERVAL_SECS",
                DEFAULT_RETRY_INTERVAL_SECS,
            )?),
            max_attempts: (max_attempts > 0).then_some(max_attempts),
        })
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DEFAULT_RETRY_INTERVAL_SECS),
            max_attempts: None,
        }
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name.to_string())),
        Err(_) => Ok(default),
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let retry = RetryConfig::default();
        assert_eq!(retry.interval, Duration::from_secs(2));
        assert!(retry.max_attempts.is_none());

        let judges = JudgesConfig::default();
        assert_eq!(judges.yandex_page_size, 100_000);
        assert!(judges.codeforces_api_url.ends_with("/api/"));
    }

    #[test]
    fn test_parse_var_falls_back_to_default() {
        let value: u32 = parse_var("BALLOON_DISPATCH_SURELY_UNSET_VAR", 7).unwrap();
        assert_eq!(value, 7);
    }
}
