//! Yandex.Contest client
//!
//! Authenticates with an `OAuth <key>` header and reads the contest's
//! submission list page by page.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::Method;
use serde::Deserialize;

use super::retry::{AttemptError, RetryPolicy};
use super::{endpoint, ContestClient, RawSubmission};
use crate::error::AppResult;
use crate::models::{Contest, TestSystem};

#[derive(Debug, Deserialize)]
struct SubmissionsPage {
    #[serde(default)]
    count: Option<u64>,
    submissions: Vec<YandexSubmission>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct YandexSubmission {
    id: i64,
    problem_alias: String,
    author: String,
    /// Milliseconds; absent for submissions without a contest time
    #[serde(default)]
    time_from_start: Option<i64>,
    #[serde(default)]
    verdict: Option<String>,
}

impl YandexSubmission {
    fn into_raw(self) -> Option<RawSubmission> {
        let millis = self.time_from_start?;
        Some(RawSubmission {
            external_id: self.id,
            problem_index: self.problem_alias,
            author: self.author,
            time_from_start: millis / 1000,
            verdict: self.verdict.unwrap_or_default(),
        })
    }
}

/// Client for one Yandex.Contest contest
pub struct YandexContestClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    contest_external_id: i64,
    page_size: u32,
    retry: RetryPolicy,
}

impl YandexContestClient {
    pub fn new(
        http: reqwest::Client,
        base_url: &str,
        contest: &Contest,
        page_size: u32,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            http,
            base_url: base_url.to_string(),
            api_key: contest.api_key.clone(),
            contest_external_id: contest.external_id,
            page_size: page_size.max(1),
            retry,
        }
    }
}

#[async_trait]
impl ContestClient for YandexContestClient {
    fn test_system(&self) -> TestSystem {
        TestSystem::YandexContest
    }

    async fn query_api(
        &self,
        method: &str,
        http_method: Method,
        params: &[(String, String)],
    ) -> AppResult<serde_json::Value> {
        let url = &endpoint(&self.base_url, method);
        let authorization = &format!("OAuth {}", self.api_key);
        let http = &self.http;
        let http_method = &http_method;

        self.retry
            .run(method, move || async move {
                let response = http
                    .request(http_method.clone(), url)
                    .header(AUTHORIZATION, authorization)
                    .query(params)
                    .send()
                    .await
                    .map_err(|e| AttemptError::Transient(e.to_string()))?;

                let status = response.status();
                if !status.is_success() {
                    return Err(AttemptError::Transient(format!("HTTP {status}")));
                }

                response
                    .json::<serde_json::Value>()
                    .await
                    .map_err(|e| AttemptError::Fatal(e.into()))
            })
            .await
    }

    async fn fetch_all_submissions(&self) -> AppResult<Vec<RawSubmission>> {
        let method = format!("contests/{}/submissions", self.contest_external_id);
        let mut submissions = Vec::new();
        let mut received: u64 = 0;
        let mut page: u32 = 1;

        loop {
            let params = [
                ("page".to_string(), page.to_string()),
                ("pageSize".to_string(), self.page_size.to_string()),
            ];
            let body = self.query_api(&method, Method::GET, &params).await?;
            let parsed: SubmissionsPage = serde_json::from_value(body)?;

            let batch = parsed.submissions.len() as u64;
            received += batch;
            submissions.extend(parsed.submissions.into_iter().filter_map(YandexSubmission::into_raw));

            let total = parsed.count.unwrap_or(received);
            if batch < self.page_size as u64 || received >= total {
                break;
            }
            page += 1;
        }

        tracing::debug!(
            contest = self.contest_external_id,
            received,
            timed = submissions.len(),
            pages = page,
            "Fetched Yandex.Contest submissions"
        );

        Ok(submissions)
    }
}
