//! Integration tests for the resilient data client.
//!
//! Each test stands up a small in-process axum server in place of the local
//! proxy and checks that every fetcher returns a correctly shaped value,
//! live or fallback, without ever surfacing an error.

use axum::{
    body::Bytes,
    extract::State,
    http::{StatusCode, Uri},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use chrono::{Duration, NaiveDate};
use hustle_core::mock::{MockSource, MOCK_CONTRIBUTION_DAYS};
use hustle_core::streak::StreakResult;
use proof_of_hustle::client::HustleClient;
use proof_of_hustle::config::ClientConfig;
use proof_of_hustle::dashboard::load_dashboard;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

// ─── Helpers ────────────────────────────────────────────────────────

async fn spawn_app(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    format!("http://{}", addr)
}

/// A base URL on which nothing is listening.
fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

fn client_for(base_url: &str, seed: u64) -> HustleClient {
    let config = ClientConfig {
        base_url: base_url.to_string(),
        timeout_secs: Some(5),
    };
    HustleClient::new(&config, MockSource::seeded(seed)).unwrap()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, 15).unwrap()
}

fn day(days_ago: i64) -> String {
    (today() - Duration::days(days_ago))
        .format("%Y-%m-%d")
        .to_string()
}

fn live_badges() -> Value {
    json!([{
        "id": "b1",
        "name": "First Commit",
        "description": "Push your first commit",
        "earned": true,
        "earnedAt": "2024-12-01T00:00:00Z",
        "progress": 100,
        "requirements": ["Push a commit"],
        "rarity": "common"
    }])
}

fn live_contributions() -> Value {
    json!([
        { "date": day(0), "commits": 3, "repo": "poh", "additions": 40, "deletions": 2, "pullRequests": 1 },
        { "date": day(1), "commits": 1, "repo": "poh", "additions": 5, "deletions": 0, "pullRequests": 0 },
        { "date": day(2), "commits": 0, "repo": "poh", "additions": 0, "deletions": 0, "pullRequests": 0 },
        { "date": day(3), "commits": 2, "repo": "poh", "additions": 9, "deletions": 1, "pullRequests": 0 }
    ])
}

async fn assert_every_fetcher_falls_back(client: &HustleClient, expected_kind: &str) {
    let contributions = client.fetch_contributions("octo", None, None).await;
    assert!(contributions.is_fallback());
    assert_eq!(contributions.reason().unwrap().kind(), expected_kind);
    assert_eq!(contributions.data().len() as i64, MOCK_CONTRIBUTION_DAYS);

    let stats = client.fetch_user_stats("octo").await;
    assert!(stats.is_fallback());
    assert_eq!(stats.data().total_commits, 1247);

    let courses = client.fetch_course_progress("u1").await;
    assert!(courses.is_fallback());
    assert_eq!(courses.data().len(), 3);

    let badges = client.fetch_badges("u1").await;
    assert!(badges.is_fallback());
    assert_eq!(badges.data()[1].name, "Streak Legend");

    let score = client.fetch_hustle_score("u1").await;
    assert!(score.is_fallback());
    assert_eq!(score.data().total_score, 8750);

    let board = client.fetch_leaderboard(10).await;
    assert!(board.is_fallback());
    assert_eq!(board.data()[0].rank, 1);

    let sync = client.sync_github_data("octo", "u1").await;
    assert!(sync.is_fallback());
    assert_eq!(sync.data().level, 7);

    let nft = client.update_nft_metadata("u1", json!({ "level": 8 })).await;
    assert!(nft.is_fallback());
    assert!(!*nft.data());
    assert_eq!(nft.reason().unwrap().kind(), expected_kind);
}

// ─── Tests ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_unreachable_endpoint_falls_back_everywhere() {
    let client = client_for(&unreachable_url(), 1);
    assert_every_fetcher_falls_back(&client, "transport").await;
}

#[tokio::test]
async fn test_server_error_falls_back_everywhere() {
    let app = Router::new().fallback(|| async {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "boom" })))
    });
    let client = client_for(&spawn_app(app).await, 1);
    assert_every_fetcher_falls_back(&client, "status").await;
}

#[tokio::test]
async fn test_malformed_body_falls_back() {
    let app = Router::new().fallback(|| async { (StatusCode::OK, "<html>not json</html>") });
    let client = client_for(&spawn_app(app).await, 1);

    let badges = client.fetch_badges("u1").await;
    assert!(badges.is_fallback());
    assert_eq!(badges.reason().unwrap().kind(), "decode");
}

#[tokio::test]
async fn test_wrong_shape_falls_back() {
    let app = Router::new().fallback(|| async { Json(json!({ "unexpected": true })) });
    let client = client_for(&spawn_app(app).await, 1);

    let stats = client.fetch_user_stats("octo").await;
    assert!(stats.is_fallback());
    assert_eq!(stats.reason().unwrap().kind(), "decode");
}

#[tokio::test]
async fn test_live_data_returned_verbatim() {
    let app = Router::new()
        .route("/api/badges", post(|| async { Json(live_badges()) }))
        .route("/api/nft-metadata", post(|| async { Json(json!({ "success": true })) }));
    let client = client_for(&spawn_app(app).await, 1);

    let badges = client.fetch_badges("u1").await;
    assert!(!badges.is_fallback(), "unexpected fallback: {:?}", badges.reason());
    let badges = badges.into_inner();
    assert_eq!(badges.len(), 1);
    assert_eq!(badges[0].id, "b1");
    assert!(badges[0].earned);

    let nft = client.update_nft_metadata("u1", json!({ "level": 8 })).await;
    assert!(!nft.is_fallback());
    assert!(*nft.data());
}

#[tokio::test]
async fn test_request_bodies_sent_as_json() {
    let seen: Arc<Mutex<Vec<(String, Value)>>> = Arc::new(Mutex::new(Vec::new()));

    async fn record(
        State(seen): State<Arc<Mutex<Vec<(String, Value)>>>>,
        uri: Uri,
        body: Bytes,
    ) -> impl IntoResponse {
        let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        seen.lock().unwrap().push((uri.path().to_string(), body));
        StatusCode::SERVICE_UNAVAILABLE
    }

    let app = Router::new().fallback(record).with_state(seen.clone());
    let client = client_for(&spawn_app(app).await, 1);

    client
        .fetch_contributions("octo", Some(today() - Duration::days(7)), Some(today()))
        .await;
    client.fetch_contributions("octo", None, None).await;
    client.fetch_leaderboard(5).await;
    client.sync_github_data("octo", "u1").await;
    client
        .update_nft_metadata("u1", json!({ "level": 8 }))
        .await;

    let seen = seen.lock().unwrap().clone();
    assert_eq!(
        seen,
        vec![
            (
                "/api/contributions".to_string(),
                json!({ "username": "octo", "startDate": "2024-12-08", "endDate": "2024-12-15" })
            ),
            ("/api/contributions".to_string(), json!({ "username": "octo" })),
            ("/api/leaderboard".to_string(), json!({ "limit": 5 })),
            (
                "/api/sync-github".to_string(),
                json!({ "username": "octo", "userId": "u1" })
            ),
            (
                "/api/nft-metadata".to_string(),
                json!({ "userId": "u1", "metadata": { "level": 8 } })
            ),
        ]
    );
}

#[tokio::test]
async fn test_empty_ids_fall_back_without_a_request() {
    let hits = Arc::new(Mutex::new(0usize));

    async fn count(State(hits): State<Arc<Mutex<usize>>>) -> impl IntoResponse {
        *hits.lock().unwrap() += 1;
        Json(live_badges())
    }

    let app = Router::new().fallback(count).with_state(hits.clone());
    let client = client_for(&spawn_app(app).await, 1);

    let contributions = client.fetch_contributions("", None, None).await;
    assert_eq!(contributions.reason().unwrap().kind(), "missing_id");
    assert_eq!(contributions.data().len() as i64, MOCK_CONTRIBUTION_DAYS);

    let stats = client.fetch_user_stats("").await;
    assert_eq!(stats.reason().unwrap().kind(), "missing_id");

    let badges = client.fetch_badges("").await;
    assert_eq!(badges.reason().unwrap().kind(), "missing_id");
    assert_eq!(badges.data()[1].name, "Streak Legend");

    let sync = client.sync_github_data("", "u1").await;
    assert_eq!(
        sync.reason().unwrap().to_string(),
        "no username given, request not sent"
    );

    let nft = client.update_nft_metadata("", json!({ "level": 8 })).await;
    assert_eq!(nft.reason().unwrap().kind(), "missing_id");
    assert!(!*nft.data());

    assert_eq!(*hits.lock().unwrap(), 0);

    // A non-empty id still reaches the server.
    let badges = client.fetch_badges("u1").await;
    assert!(!badges.is_fallback());
    assert_eq!(*hits.lock().unwrap(), 1);
}

#[tokio::test]
async fn test_seeded_fallbacks_are_reproducible() {
    let url = unreachable_url();
    let a = client_for(&url, 99).fetch_contributions("octo", None, None).await;
    let b = client_for(&url, 99).fetch_contributions("octo", None, None).await;
    assert!(a.is_fallback() && b.is_fallback());
    assert_eq!(a.into_inner(), b.into_inner());
}

#[tokio::test]
async fn test_dashboard_marks_only_failed_resources_degraded() {
    let app = Router::new()
        .route("/api/badges", post(|| async { Json(live_badges()) }))
        .route(
            "/api/contributions",
            post(|| async { Json(live_contributions()) }),
        );
    let client = client_for(&spawn_app(app).await, 1);

    let snapshot = load_dashboard(&client, "octo", "u1", today()).await;

    assert_eq!(snapshot.badges.len(), 1);
    assert_eq!(snapshot.contributions.len(), 4);
    assert_eq!(snapshot.chart.len(), 4);
    assert_eq!(snapshot.streak, StreakResult { current: 2, longest: 2 });

    let mut degraded: Vec<&str> = snapshot.degraded.iter().map(|d| d.resource).collect();
    degraded.sort();
    assert_eq!(
        degraded,
        vec!["course progress", "hustle score", "leaderboard", "user stats"]
    );
    assert!(snapshot.degraded.iter().all(|d| d.kind == "status"));
}

#[tokio::test]
async fn test_dashboard_never_fails_when_everything_is_down() {
    let client = client_for(&unreachable_url(), 3);
    let snapshot = load_dashboard(&client, "octo", "u1", today()).await;

    assert_eq!(snapshot.degraded.len(), 6);
    assert!(snapshot.streak.longest >= snapshot.streak.current);
    assert_eq!(snapshot.leaderboard.len(), 3);
}
