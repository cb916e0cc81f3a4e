//! Shared fixtures: a fake judge server and store seeding helpers

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use balloon_dispatch::{
    clients::{codeforces::api_signature, JudgeClients},
    config::{JudgesConfig, RetryConfig},
    db::{MemoryStore, Store},
    models::{Contest, NewContest, TestSystem, Volunteer},
    state::AppState,
};

pub const YANDEX_TOKEN: &str = "yc-token";
pub const CF_KEY: &str = "cf-key";
pub const CF_SECRET: &str = "cf-secret";

/// Programmable judge behind both API shapes
#[derive(Default)]
pub struct JudgeState {
    pub yandex_submissions: Mutex<Vec<Value>>,
    pub codeforces_submissions: Mutex<Vec<Value>>,
    /// Number of upcoming requests answered with a failure
    pub failures_remaining: AtomicU32,
    pub requests: AtomicU32,
    pub last_contest_id: AtomicI64,
    pub last_query: Mutex<HashMap<String, String>>,
}

impl JudgeState {
    fn take_failure(&self) -> bool {
        self.failures_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }

    pub fn set_yandex(&self, submissions: Vec<Value>) {
        *self.yandex_submissions.lock().unwrap() = submissions;
    }

    pub fn set_codeforces(&self, submissions: Vec<Value>) {
        *self.codeforces_submissions.lock().unwrap() = submissions;
    }

    pub fn fail_next(&self, n: u32) {
        self.failures_remaining.store(n, Ordering::SeqCst);
    }

    pub fn request_count(&self) -> u32 {
        self.requests.load(Ordering::SeqCst)
    }
}

pub struct FakeJudge {
    pub base_url: String,
    pub state: Arc<JudgeState>,
}

impl FakeJudge {
    pub async fn start() -> Self {
        let state = Arc::new(JudgeState::default());
        let app = Router::new()
            .route("/contests/{contest_id}/submissions", get(yandex_submissions))
            .route("/contest.status", get(codeforces_status))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}/"),
            state,
        }
    }

    pub fn judges_config(&self, yandex_page_size: u32) -> JudgesConfig {
        JudgesConfig {
            yandex_api_url: self.base_url.clone(),
            codeforces_api_url: self.base_url.clone(),
            yandex_page_size,
            request_timeout: Duration::from_secs(5),
        }
    }

    pub fn clients(&self, yandex_page_size: u32) -> JudgeClients {
        JudgeClients::new(self.judges_config(yandex_page_size), &fast_retry()).unwrap()
    }
}

/// Short interval, capped so a broken fixture cannot hang a test
pub fn fast_retry() -> RetryConfig {
    RetryConfig {
        interval: Duration::from_millis(10),
        max_attempts: Some(10),
    }
}

async fn yandex_submissions(
    State(judge): State<Arc<JudgeState>>,
    Path(contest_id): Path<i64>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    judge.requests.fetch_add(1, Ordering::SeqCst);
    judge.last_contest_id.store(contest_id, Ordering::SeqCst);
    *judge.last_query.lock().unwrap() = query.clone();

    if judge.take_failure() {
        return (StatusCode::SERVICE_UNAVAILABLE, Json(json!({"error": "busy"})));
    }

    let authorized = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("OAuth {YANDEX_TOKEN}"))
        .unwrap_or(false);
    if !authorized {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "no token"})));
    }

    let page: usize = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let size: usize = query.get("pageSize").and_then(|p| p.parse().ok()).unwrap_or(100);
    let all = judge.yandex_submissions.lock().unwrap().clone();
    let items: Vec<Value> = all
        .iter()
        .skip((page.max(1) - 1) * size)
        .take(size)
        .cloned()
        .collect();

    (
        StatusCode::OK,
        Json(json!({"count": all.len(), "submissions": items})),
    )
}

async fn codeforces_status(
    State(judge): State<Arc<JudgeState>>,
    Query(query): Query<Vec<(String, String)>>,
) -> (StatusCode, Json<Value>) {
    judge.requests.fetch_add(1, Ordering::SeqCst);
    *judge.last_query.lock().unwrap() = query.iter().cloned().collect();

    let signature = query
        .iter()
        .find(|(k, _)| k == "apiSig")
        .map(|(_, v)| v.clone())
        .unwrap_or_default();
    let unsigned: Vec<(String, String)> = query
        .iter()
        .filter(|(k, _)| k != "apiSig")
        .cloned()
        .collect();
    let valid = signature.len() > 6
        && signature == api_signature("contest.status", &unsigned, CF_SECRET, &signature[..6]);

    if !valid {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"status": "FAILED", "comment": "apiSig: Incorrect signature"})),
        );
    }

    if judge.take_failure() {
        return (
            StatusCode::OK,
            Json(json!({"status": "FAILED", "comment": "Call limit exceeded"})),
        );
    }

    let result = judge.codeforces_submissions.lock().unwrap().clone();
    (StatusCode::OK, Json(json!({"status": "OK", "result": result})))
}

/// Yandex.Contest submission JSON
pub fn yandex_submission(id: i64, problem: &str, author: &str, millis: i64, verdict: &str) -> Value {
    json!({
        "id": id,
        "problemAlias": problem,
        "author": author,
        "timeFromStart": millis,
        "verdict": verdict,
    })
}

/// Codeforces submission JSON for a single-member contestant
pub fn codeforces_submission(id: i64, problem: &str, handle: &str, seconds: i64, verdict: &str) -> Value {
    json!({
        "id": id,
        "problem": {"index": problem},
        "author": {"participantType": "CONTESTANT", "members": [{"handle": handle}]},
        "relativeTimeSeconds": seconds,
        "verdict": verdict,
    })
}

pub async fn volunteer(store: &MemoryStore, name: &str, rooms: &str) -> Volunteer {
    let volunteer = store.create_volunteer(name, rooms).await.unwrap();
    // Keep registration timestamps strictly ordered for tie-breaking.
    tokio::time::sleep(Duration::from_millis(5)).await;
    volunteer
}

pub async fn yandex_contest(
    store: &MemoryStore,
    external_id: i64,
    admin: &Volunteer,
    colors: &str,
    teams: &str,
) -> Contest {
    store
        .create_contest(&NewContest {
            external_id,
            test_system: TestSystem::YandexContest,
            api_key: YANDEX_TOKEN.to_string(),
            api_secret: String::new(),
            colors_layout: colors.to_string(),
            teams_layout: teams.to_string(),
            admin_id: admin.id,
        })
        .await
        .unwrap()
}

pub fn app_state(store: Arc<MemoryStore>, judge: &FakeJudge) -> AppState {
    AppState::new(store, judge.clients(100))
}
