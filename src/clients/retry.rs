//! Retry loop for judge calls

use std::future::Future;
use std::time::Duration;

use crate::config::RetryConfig;
use crate::error::{AppError, AppResult};

/// Outcome of a single failed attempt
#[derive(Debug)]
pub enum AttemptError {
    /// The judge may answer next time (bad HTTP status, transport error, non-OK status field)
    Transient(String),
    /// Retrying cannot help
    Fatal(AppError),
}

impl From<AppError> for AttemptError {
    fn from(err: AppError) -> Self {
        AttemptError::Fatal(err)
    }
}

/// Fixed-interval retry, unbounded unless `max_attempts` is set
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub interval: Duration,
    pub max_attempts: Option<u32>,
}

impl RetryPolicy {
    pub fn new(interval: Duration, max_attempts: Option<u32>) -> Self {
        Self {
            interval,
            max_attempts,
        }
    }

    /// Run `call` until it succeeds, fails fatally, or the attempt cap is hit.
    ///
    /// Every attempt invokes `call` afresh so per-attempt state (timestamps,
    /// signatures) is rebuilt.
    pub async fn run<T, F, Fut>(&self, label: &str, mut call: F) -> AppResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, AttemptError>>,
    {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match call().await {
                Ok(value) => {
                    if attempt > 1 {
                        tracing::info!(call = label, attempt, "Judge call recovered");
                    }
                    return Ok(value);
                }
                Err(AttemptError::Fatal(err)) => return Err(err),
                Err(AttemptError::Transient(reason)) => {
                    if self.max_attempts.is_some_and(|max| attempt >= max) {
                        return Err(AppError::RetriesExhausted {
                            attempts: attempt,
                            last_error: reason,
                        });
                    }
                    tracing::warn!(
                        call = label,
                        attempt,
                        error = %reason,
                        retry_in = ?self.interval,
                        "Judge call failed, retrying"
                    );
                    tokio::time::sleep(self.interval).await;
                }
            }
        }
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self::new(config.interval, config.max_attempts)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}
