//! Judge client behavior against a fake judge server

mod common;

use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use balloon_dispatch::{
    clients::{JudgeClients, RawSubmission},
    config::RetryConfig,
    error::AppError,
    models::{Contest, TestSystem},
};

use common::{codeforces_submission, yandex_submission, FakeJudge, CF_KEY, CF_SECRET, YANDEX_TOKEN};

fn contest(system: TestSystem, external_id: i64) -> Contest {
    let (api_key, api_secret) = match system {
        TestSystem::YandexContest => (YANDEX_TOKEN, ""),
        TestSystem::Codeforces => (CF_KEY, CF_SECRET),
    };
    Contest {
        id: Uuid::new_v4(),
        external_id,
        test_system: system.code(),
        api_key: api_key.to_string(),
        api_secret: api_secret.to_string(),
        colors_layout: String::new(),
        teams_layout: String::new(),
        admin_id: Uuid::new_v4(),
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn yandex_fetch_converts_times_and_skips_untimed() {
    let judge = FakeJudge::start().await;
    judge.state.set_yandex(vec![
        yandex_submission(1, "A", "alice", 125_999, "OK"),
        json!({"id": 2, "problemAlias": "B", "author": "bob", "verdict": ""}),
        yandex_submission(3, "B", "carol", 3_000, ""),
        yandex_submission(4, "C", "dave", 9_000, "WA"),
    ]);

    let client = judge.clients(100).client_for(&contest(TestSystem::YandexContest, 555)).unwrap();
    let submissions = client.fetch_all_submissions().await.unwrap();

    assert_eq!(
        submissions,
        vec![
            RawSubmission {
                external_id: 1,
                problem_index: "A".to_string(),
                author: "alice".to_string(),
                time_from_start: 125,
                verdict: "OK".to_string(),
            },
            RawSubmission {
                external_id: 3,
                problem_index: "B".to_string(),
                author: "carol".to_string(),
                time_from_start: 3,
                verdict: String::new(),
            },
            RawSubmission {
                external_id: 4,
                problem_index: "C".to_string(),
                author: "dave".to_string(),
                time_from_start: 9,
                verdict: "WA".to_string(),
            },
        ]
    );
    assert_eq!(judge.state.last_contest_id.load(std::sync::atomic::Ordering::SeqCst), 555);
}

#[tokio::test]
async fn yandex_retries_server_errors() {
    let judge = FakeJudge::start().await;
    judge.state.set_yandex(vec![yandex_submission(1, "A", "alice", 1_000, "OK")]);
    judge.state.fail_next(3);

    let client = judge.clients(100).client_for(&contest(TestSystem::YandexContest, 1)).unwrap();
    let submissions = client.fetch_all_submissions().await.unwrap();

    assert_eq!(submissions.len(), 1);
    assert_eq!(judge.state.request_count(), 4);
}

#[tokio::test]
async fn yandex_paginates_until_count_is_covered() {
    let judge = FakeJudge::start().await;
    judge.state.set_yandex(
        (1..=5)
            .map(|id| yandex_submission(id, "A", &format!("team{id}"), id * 1_000, "OK"))
            .collect(),
    );

    let client = judge.clients(2).client_for(&contest(TestSystem::YandexContest, 1)).unwrap();
    let submissions = client.fetch_all_submissions().await.unwrap();

    let ids: Vec<i64> = submissions.iter().map(|s| s.external_id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    assert_eq!(judge.state.request_count(), 3);
}

#[tokio::test]
async fn yandex_bad_token_exhausts_capped_retries() {
    let judge = FakeJudge::start().await;
    let clients = JudgeClients::new(
        judge.judges_config(100),
        &RetryConfig {
            interval: std::time::Duration::from_millis(1),
            max_attempts: Some(3),
        },
    )
    .unwrap();

    let mut wrong = contest(TestSystem::YandexContest, 1);
    wrong.api_key = "not-the-token".to_string();

    let err = clients
        .client_for(&wrong)
        .unwrap()
        .fetch_all_submissions()
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::RetriesExhausted { attempts: 3, .. }));
    assert_eq!(judge.state.request_count(), 3);
}

#[tokio::test]
async fn codeforces_signed_fetch_filters_contestants() {
    let judge = FakeJudge::start().await;
    judge.state.set_codeforces(vec![
        codeforces_submission(10, "A", "tourist", 600, "OK"),
        json!({
            "id": 11, "problem": {"index": "B"}, "relativeTimeSeconds": 700, "verdict": "OK",
            "author": {"participantType": "MANAGER", "members": [{"handle": "coordinator"}]}
        }),
        json!({
            "id": 12, "problem": {"index": "B"}, "relativeTimeSeconds": 800,
            "author": {"participantType": "CONTESTANT", "teamName": "Rockets",
                       "members": [{"handle": "jessie"}]}
        }),
    ]);

    let client = judge.clients(100).client_for(&contest(TestSystem::Codeforces, 1234)).unwrap();
    let submissions = client.fetch_all_submissions().await.unwrap();

    // One request means the signature was accepted on the first try.
    assert_eq!(judge.state.request_count(), 1);

    let query = judge.state.last_query.lock().unwrap().clone();
    assert_eq!(query.get("contestId").map(String::as_str), Some("1234"));
    assert_eq!(query.get("asManager").map(String::as_str), Some("true"));
    assert_eq!(query.get("lang").map(String::as_str), Some("ru"));
    assert_eq!(query.get("apiKey").map(String::as_str), Some(CF_KEY));
    assert!(query.contains_key("time"));

    assert_eq!(submissions.len(), 2);
    assert_eq!(submissions[0].author, "tourist");
    assert_eq!(submissions[0].verdict, "OK");
    assert_eq!(submissions[1].author, "Rockets");
    assert_eq!(submissions[1].verdict, "");
}

#[tokio::test]
async fn codeforces_retries_failed_status() {
    let judge = FakeJudge::start().await;
    judge.state.set_codeforces(vec![codeforces_submission(1, "A", "petr", 60, "OK")]);
    judge.state.fail_next(2);

    let client = judge.clients(100).client_for(&contest(TestSystem::Codeforces, 1)).unwrap();
    let submissions = client.fetch_all_submissions().await.unwrap();

    assert_eq!(submissions.len(), 1);
    assert_eq!(judge.state.request_count(), 3);
}
