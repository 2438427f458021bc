//! Authenticated proxy server.
//!
//! Forwards dashboard requests to the upstream reputation backend, attaching
//! the bearer credential the browser never sees. Each route accepts a JSON
//! body, maps it onto one upstream call, and passes the upstream JSON back
//! unmodified.
//!
//! # Endpoints
//!
//! | Method | Path | Upstream call |
//! |--------|------|---------------|
//! | `POST` | `/api/badges` | `GET /users/{userId}/badges` |
//! | `POST` | `/api/contributions` | `GET /users/{username}/contributions?start_date&end_date` |
//! | `POST` | `/api/nft-metadata` | `PATCH /users/{userId}/nft` |
//! | `POST` | `/api/sync-github` | `POST /users/{userId}/sync-github` |
//! | `GET`  | `/health` | none |
//!
//! # Error Contract
//!
//! Any failure (unreadable request body, missing field, upstream transport
//! error, upstream non-2xx, upstream body that is not JSON) produces HTTP 500
//! with a fixed message per route:
//!
//! ```json
//! { "error": "Failed to fetch badges" }
//! ```
//!
//! The upstream is called once per request. There are no retries.
//!
//! Ids from the request body always occupy exactly one upstream path
//! segment. Separators inside an id are percent-encoded, and an empty id or
//! an id of `.` or `..` is refused before anything is sent.

use anyhow::bail;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use crate::config::Config;
use crate::protocol::{
    ContributionsRequest, NftMetadataRequest, SyncGithubRequest, UserIdRequest, BADGES_PATH,
    CONTRIBUTIONS_PATH, NFT_METADATA_PATH, SYNC_GITHUB_PATH,
};
use crate::upstream::UpstreamClient;

const BADGES_FAILED: &str = "Failed to fetch badges";
const CONTRIBUTIONS_FAILED: &str = "Failed to fetch contributions";
const NFT_METADATA_FAILED: &str = "Failed to update NFT metadata";
const SYNC_GITHUB_FAILED: &str = "Failed to sync GitHub data";

#[derive(Clone)]
struct AppState {
    upstream: Arc<UpstreamClient>,
}

/// Builds the proxy router for `config`.
pub fn router(config: &Config) -> anyhow::Result<Router> {
    let state = AppState {
        upstream: Arc::new(UpstreamClient::new(&config.api)?),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Ok(Router::new()
        .route(BADGES_PATH, post(handle_badges))
        .route(CONTRIBUTIONS_PATH, post(handle_contributions))
        .route(NFT_METADATA_PATH, post(handle_nft_metadata))
        .route(SYNC_GITHUB_PATH, post(handle_sync_github))
        .route("/health", get(handle_health))
        .layer(cors)
        .with_state(state))
}

/// Binds to `[server].bind` and serves until the process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let app = router(config)?;

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    info!(
        bind = %listener.local_addr()?,
        upstream = %config.api.base_url,
        "proxy server listening"
    );
    println!("Proxy server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

/// A failed proxy call: always a 500 with the route's fixed message.
struct AppError {
    message: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

/// Logs `err` and converts it into the route's fixed 500 response.
fn fail(message: &'static str) -> impl FnOnce(anyhow::Error) -> AppError {
    move |err| {
        error!(error = %err, "{}", message);
        AppError { message }
    }
}

fn parse_body<T: DeserializeOwned>(body: &Bytes) -> anyhow::Result<T> {
    Ok(serde_json::from_slice(body)?)
}

/// Checks that `id` can stand as a single, non-empty upstream path segment.
///
/// URL parsing drops spaces and control characters around a segment, so
/// `" ..\t"` is refused along with `..`.
fn path_id(id: &str) -> anyhow::Result<&str> {
    let visible: String = id
        .chars()
        .filter(|c| !c.is_ascii_control() && *c != ' ')
        .collect();
    if visible.is_empty() || visible == "." || visible == ".." {
        bail!("id {:?} is not a usable path segment", id);
    }
    Ok(id)
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// ============ POST /api/badges ============

async fn handle_badges(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    proxy_badges(&state, &body)
        .await
        .map(Json)
        .map_err(fail(BADGES_FAILED))
}

async fn proxy_badges(state: &AppState, body: &Bytes) -> anyhow::Result<Value> {
    let req: UserIdRequest = parse_body(body)?;
    let segments = ["users", path_id(&req.user_id)?, "badges"];
    Ok(state.upstream.get(&segments, &[]).await?)
}

// ============ POST /api/contributions ============

async fn handle_contributions(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    proxy_contributions(&state, &body)
        .await
        .map(Json)
        .map_err(fail(CONTRIBUTIONS_FAILED))
}

async fn proxy_contributions(state: &AppState, body: &Bytes) -> anyhow::Result<Value> {
    let req: ContributionsRequest = parse_body(body)?;
    let segments = ["users", path_id(&req.username)?, "contributions"];

    let mut query: Vec<(&str, &str)> = Vec::new();
    if let Some(start) = req.start_date.as_deref().filter(|s| !s.is_empty()) {
        query.push(("start_date", start));
    }
    if let Some(end) = req.end_date.as_deref().filter(|s| !s.is_empty()) {
        query.push(("end_date", end));
    }

    Ok(state.upstream.get(&segments, &query).await?)
}

// ============ POST /api/nft-metadata ============

async fn handle_nft_metadata(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    proxy_nft_metadata(&state, &body)
        .await
        .map(|_| Json(json!({ "success": true })))
        .map_err(fail(NFT_METADATA_FAILED))
}

async fn proxy_nft_metadata(state: &AppState, body: &Bytes) -> anyhow::Result<Value> {
    let req: NftMetadataRequest = parse_body(body)?;
    let segments = ["users", path_id(&req.user_id)?, "nft"];
    Ok(state.upstream.patch(&segments, &req.metadata).await?)
}

// ============ POST /api/sync-github ============

async fn handle_sync_github(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    proxy_sync_github(&state, &body)
        .await
        .map(Json)
        .map_err(fail(SYNC_GITHUB_FAILED))
}

async fn proxy_sync_github(state: &AppState, body: &Bytes) -> anyhow::Result<Value> {
    let req: SyncGithubRequest = parse_body(body)?;
    let segments = ["users", path_id(&req.user_id)?, "sync-github"];
    let upstream_body = json!({ "githubUsername": req.username });
    Ok(state.upstream.post(&segments, &upstream_body).await?)
}
