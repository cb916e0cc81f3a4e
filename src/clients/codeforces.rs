//! Codeforces client
//!
//! Codeforces requires every authenticated call to be signed. The signed
//! parameter set is the call's own parameters plus `lang`, `apiKey` and
//! `time`; `apiSig` is a random 6-letter prefix followed by the SHA-512 hex
//! digest of
//!
//! ```text
//! <prefix>/<method>?<k1>=<v1>&<k2>=<v2>...#<secret>
//! ```
//!
//! with parameters sorted by key, then value.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Method;
use serde::Deserialize;

use super::retry::{AttemptError, RetryPolicy};
use super::{endpoint, ContestClient, RawSubmission};
use crate::constants::codeforces::{CONTESTANT, LANG, NONCE_LENGTH, STATUS_OK, TESTING};
use crate::error::{AppError, AppResult};
use crate::models::{Contest, TestSystem};
use crate::utils::{random_letters, sha512_hex};

#[derive(Debug, Deserialize)]
struct ApiResponse {
    status: String,
    #[serde(default)]
    comment: Option<String>,
    #[serde(default)]
    result: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CfSubmission {
    id: i64,
    problem: CfProblem,
    author: CfParty,
    relative_time_seconds: i64,
    #[serde(default)]
    verdict: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CfProblem {
    index: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CfParty {
    participant_type: String,
    #[serde(default)]
    team_name: Option<String>,
    #[serde(default)]
    members: Vec<CfMember>,
}

#[derive(Debug, Deserialize)]
struct CfMember {
    handle: String,
}

impl CfSubmission {
    fn into_raw(self) -> Option<RawSubmission> {
        if self.author.participant_type != CONTESTANT {
            return None;
        }

        let author = match self.author.team_name {
            Some(team) => team,
            None => self.author.members.into_iter().next()?.handle,
        };

        // In-progress submissions come with no verdict or the TESTING literal.
        let verdict = match self.verdict {
            Some(v) if v != TESTING => v,
            _ => String::new(),
        };

        Some(RawSubmission {
            external_id: self.id,
            problem_index: self.problem.index,
            author,
            time_from_start: self.relative_time_seconds,
            verdict,
        })
    }
}

/// Compute `apiSig` for an already completed parameter set
pub fn api_signature(method: &str, params: &[(String, String)], secret: &str, nonce: &str) -> String {
    let mut sorted: Vec<(&str, &str)> = params
        .iter()
        .map(|(key, value)| (key.as_str(), value.as_str()))
        .collect();
    sorted.sort_unstable();

    let query = sorted
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");

    let digest = sha512_hex(&format!("{nonce}/{method}?{query}#{secret}"));
    format!("{nonce}{digest}")
}

/// Add `lang`, `apiKey`, `time` and the matching `apiSig` to `params`
pub fn sign_params(
    method: &str,
    params: &[(String, String)],
    api_key: &str,
    secret: &str,
    time: i64,
    nonce: &str,
) -> Vec<(String, String)> {
    let mut signed = params.to_vec();
    signed.push(("lang".to_string(), LANG.to_string()));
    signed.push(("apiKey".to_string(), api_key.to_string()));
    signed.push(("time".to_string(), time.to_string()));

    let signature = api_signature(method, &signed, secret, nonce);
    signed.push(("apiSig".to_string(), signature));
    signed
}

/// Client for one Codeforces contest
pub struct CodeforcesClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    api_secret: String,
    contest_external_id: i64,
    retry: RetryPolicy,
}

impl CodeforcesClient {
    pub fn new(http: reqwest::Client, base_url: &str, contest: &Contest, retry: RetryPolicy) -> Self {
        Self {
            http,
            base_url: base_url.to_string(),
            api_key: contest.api_key.clone(),
            api_secret: contest.api_secret.clone(),
            contest_external_id: contest.external_id,
            retry,
        }
    }
}

#[async_trait]
impl ContestClient for CodeforcesClient {
    fn test_system(&self) -> TestSystem {
        TestSystem::Codeforces
    }

    async fn query_api(
        &self,
        method: &str,
        http_method: Method,
        params: &[(String, String)],
    ) -> AppResult<serde_json::Value> {
        let url = &endpoint(&self.base_url, method);
        let http = &self.http;
        let http_method = &http_method;

        self.retry
            .run(method, move || async move {
                // Re-signed on every attempt so `time` stays fresh.
                let signed = sign_params(
                    method,
                    params,
                    &self.api_key,
                    &self.api_secret,
                    Utc::now().timestamp(),
                    &random_letters(NONCE_LENGTH),
                );

                let response = http
                    .request(http_method.clone(), url)
                    .query(&signed)
                    .send()
                    .await
                    .map_err(|e| AttemptError::Transient(e.to_string()))?;

                let status = response.status();
                if !status.is_success() {
                    return Err(AttemptError::Transient(format!("HTTP {status}")));
                }

                let body: ApiResponse = response
                    .json()
                    .await
                    .map_err(|e| AttemptError::Fatal(e.into()))?;
                if body.status != STATUS_OK {
                    return Err(AttemptError::Transient(format!(
                        "status {}: {}",
                        body.status,
                        body.comment.unwrap_or_default()
                    )));
                }

                body.result.ok_or_else(|| {
                    AttemptError::Fatal(AppError::RemoteApi(format!(
                        "{method} returned OK without a result"
                    )))
                })
            })
            .await
    }

    async fn fetch_all_submissions(&self) -> AppResult<Vec<RawSubmission>> {
        let params = [
            ("contestId".to_string(), self.contest_external_id.to_string()),
            ("asManager".to_string(), "true".to_string()),
        ];
        let result = self.query_api("contest.status", Method::GET, &params).await?;
        let all: Vec<CfSubmission> = serde_json::from_value(result)?;
        let received = all.len();

        let submissions: Vec<RawSubmission> =
            all.into_iter().filter_map(CfSubmission::into_raw).collect();

        tracing::debug!(
            contest = self.contest_external_id,
            received,
            contestant = submissions.len(),
            "Fetched Codeforces submissions"
        );

        Ok(submissions)
    }
}
