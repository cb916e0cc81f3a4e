//! Judging system clients
//!
//! Each supported judging system gets a [`ContestClient`] implementation
//! that knows how to authenticate, retry and decode that system's
//! submission feed. [`JudgeClients`] picks the implementation from the
//! contest's configured [`TestSystem`].

pub mod codeforces;
pub mod retry;
pub mod yandex;

use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::config::{JudgesConfig, RetryConfig};
use crate::error::AppResult;
use crate::models::{Contest, TestSystem};

pub use codeforces::CodeforcesClient;
pub use retry::{AttemptError, RetryPolicy};
pub use yandex::YandexContestClient;

/// Submission as reported by a judge, before verdict normalization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSubmission {
    pub external_id: i64,
    pub problem_index: String,
    pub author: String,
    /// Whole seconds since contest start
    pub time_from_start: i64,
    /// Judge verdict, empty while testing
    pub verdict: String,
}

/// Access to one contest on one judging system
#[async_trait]
pub trait ContestClient: Send + Sync {
    /// Judging system this client talks to
    fn test_system(&self) -> TestSystem;

    /// Issue an API call, retrying transient failures per the retry policy
    async fn query_api(
        &self,
        method: &str,
        http_method: Method,
        params: &[(String, String)],
    ) -> AppResult<serde_json::Value>;

    /// Every submission of the contest that is relevant for delivery
    async fn fetch_all_submissions(&self) -> AppResult<Vec<RawSubmission>>;
}

/// Builds the right client for a contest
#[derive(Debug, Clone)]
pub struct JudgeClients {
    http: reqwest::Client,
    judges: JudgesConfig,
    retry: RetryPolicy,
}

impl JudgeClients {
    pub fn new(judges: JudgesConfig, retry: &RetryConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(judges.request_timeout)
            .build()?;

        Ok(Self {
            http,
            judges,
            retry: RetryPolicy::from(retry),
        })
    }

    /// Client for the contest's judging system.
    ///
    /// Fails with a configuration error when the stored system code is unknown.
    pub fn client_for(&self, contest: &Contest) -> AppResult<Box<dyn ContestClient>> {
        let client: Box<dyn ContestClient> = match contest.judge()? {
            TestSystem::YandexContest => Box::new(YandexContestClient::new(
                self.http.clone(),
                &self.judges.yandex_api_url,
                contest,
                self.judges.yandex_page_size,
                self.retry.clone(),
            )),
            TestSystem::Codeforces => Box::new(CodeforcesClient::new(
                self.http.clone(),
                &self.judges.codeforces_api_url,
                contest,
                self.retry.clone(),
            )),
        };

        Ok(client)
    }
}

/// Join an API root and a method path with exactly one `/`
pub(crate) fn endpoint(base_url: &str, method: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        method.trim_start_matches('/')
    )
}
