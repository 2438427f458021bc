//! Resilient data client.
//!
//! Fetches each dashboard resource from the local proxy and guarantees a
//! correctly shaped value comes back. A call makes exactly one `POST` with a
//! JSON body. If it fails for any reason (transport error, non-2xx status,
//! body that does not decode), the failure is logged and a fallback value
//! from [`hustle_core::mock`] is substituted. A call whose username or
//! user id is empty sends nothing and returns the fallback at once.
//!
//! Results are wrapped in [`Fetched`] so callers can tell live data from a
//! substitute and surface a degraded-data warning if they want to.
//!
//! Calls are independent of one another: no caching, no de-duplication of
//! in-flight requests, no retries. The only shared state is the fallback
//! [`MockSource`], which is locked briefly while a substitute is generated.

use anyhow::Result;
use chrono::{Local, NaiveDate};
use hustle_core::mock::{self, MockSource};
use hustle_core::models::{
    BadgeData, ContributionRecord, CourseProgress, HustleScoreBreakdown, LeaderboardEntry,
    NftUpdateData, UserStats,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::{ClientConfig, Config};
use crate::error::FetchError;
use crate::protocol::{
    ContributionsRequest, Identified, LeaderboardRequest, NftMetadataRequest, SyncGithubRequest,
    UserIdRequest, UsernameRequest, BADGES_PATH, CONTRIBUTIONS_PATH, COURSE_PROGRESS_PATH,
    HUSTLE_SCORE_PATH, LEADERBOARD_PATH, NFT_METADATA_PATH, SYNC_GITHUB_PATH, USER_STATS_PATH,
};

/// Outcome of a resilient fetch.
#[derive(Debug)]
pub enum Fetched<T> {
    /// The endpoint answered with usable data.
    Live(T),
    /// The fetch failed; `data` is a substitute of the same shape.
    Fallback { data: T, reason: FetchError },
}

impl<T> Fetched<T> {
    pub fn data(&self) -> &T {
        match self {
            Fetched::Live(data) | Fetched::Fallback { data, .. } => data,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Fetched::Live(data) | Fetched::Fallback { data, .. } => data,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Fetched::Fallback { .. })
    }

    pub fn reason(&self) -> Option<&FetchError> {
        match self {
            Fetched::Live(_) => None,
            Fetched::Fallback { reason, .. } => Some(reason),
        }
    }
}

pub struct HustleClient {
    http: Client,
    base_url: String,
    mock: Mutex<MockSource>,
}

impl HustleClient {
    /// Builds a client for the local proxy at `config.base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed (e.g. the
    /// TLS backend fails to initialise).
    pub fn new(config: &ClientConfig, mock: MockSource) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            mock: Mutex::new(mock),
        })
    }

    /// Client configured from `[client]`, with the fallback source seeded
    /// from `[fallback].seed`.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.client, MockSource::new(config.fallback.seed))
    }

    pub async fn fetch_contributions(
        &self,
        username: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Fetched<Vec<ContributionRecord>> {
        let body = ContributionsRequest {
            username: username.to_string(),
            start_date: start_date.map(|d| d.format("%Y-%m-%d").to_string()),
            end_date: end_date.map(|d| d.format("%Y-%m-%d").to_string()),
        };
        self.fetch_or_fallback("contributions", CONTRIBUTIONS_PATH, &body, |source| {
            source.contributions(Local::now().date_naive())
        })
        .await
    }

    pub async fn fetch_user_stats(&self, username: &str) -> Fetched<UserStats> {
        let body = UsernameRequest {
            username: username.to_string(),
        };
        self.fetch_or_fallback("user stats", USER_STATS_PATH, &body, |_| mock::user_stats())
            .await
    }

    pub async fn fetch_course_progress(&self, user_id: &str) -> Fetched<Vec<CourseProgress>> {
        self.fetch_or_fallback(
            "course progress",
            COURSE_PROGRESS_PATH,
            &user_id_body(user_id),
            |_| mock::course_progress(),
        )
        .await
    }

    pub async fn fetch_badges(&self, user_id: &str) -> Fetched<Vec<BadgeData>> {
        self.fetch_or_fallback("badges", BADGES_PATH, &user_id_body(user_id), |_| {
            mock::badges()
        })
        .await
    }

    pub async fn fetch_hustle_score(&self, user_id: &str) -> Fetched<HustleScoreBreakdown> {
        self.fetch_or_fallback(
            "hustle score",
            HUSTLE_SCORE_PATH,
            &user_id_body(user_id),
            |_| mock::hustle_score(),
        )
        .await
    }

    pub async fn fetch_leaderboard(&self, limit: u32) -> Fetched<Vec<LeaderboardEntry>> {
        let body = LeaderboardRequest { limit };
        self.fetch_or_fallback("leaderboard", LEADERBOARD_PATH, &body, |_| {
            mock::leaderboard()
        })
        .await
    }

    /// Triggers a GitHub sync and returns the resulting NFT update.
    pub async fn sync_github_data(&self, username: &str, user_id: &str) -> Fetched<NftUpdateData> {
        let body = SyncGithubRequest {
            username: username.to_string(),
            user_id: user_id.to_string(),
        };
        self.fetch_or_fallback("github sync", SYNC_GITHUB_PATH, &body, |_| {
            mock::nft_update()
        })
        .await
    }

    /// Pushes new NFT metadata. `Live(true)` on a 2xx response; any failure
    /// yields `Fallback` with `false`. The response body is not inspected.
    pub async fn update_nft_metadata(
        &self,
        user_id: &str,
        metadata: serde_json::Value,
    ) -> Fetched<bool> {
        let body = NftMetadataRequest {
            user_id: user_id.to_string(),
            metadata,
        };

        let reason = if let Some(field) = body.missing_id() {
            FetchError::MissingId(field)
        } else {
            match self.http.post(self.url(NFT_METADATA_PATH)).json(&body).send().await {
                Ok(response) if response.status().is_success() => return Fetched::Live(true),
                Ok(response) => FetchError::Status(response.status()),
                Err(e) => FetchError::Transport(e),
            }
        };

        warn!(resource = "nft metadata", kind = reason.kind(), error = %reason, "NFT metadata update failed");
        Fetched::Fallback {
            data: false,
            reason,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, FetchError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.http.post(self.url(path)).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn fetch_or_fallback<B, T, F>(
        &self,
        resource: &'static str,
        path: &str,
        body: &B,
        fallback: F,
    ) -> Fetched<T>
    where
        B: Serialize + Identified,
        T: DeserializeOwned,
        F: FnOnce(&mut MockSource) -> T,
    {
        // An empty id goes straight to the fallback without a request.
        let result = match body.missing_id() {
            Some(field) => Err(FetchError::MissingId(field)),
            None => self.post_json(path, body).await,
        };

        match result {
            Ok(data) => {
                debug!(resource, path, "fetched live data");
                Fetched::Live(data)
            }
            Err(reason) => {
                warn!(resource, kind = reason.kind(), error = %reason, "using fallback data");
                let data = {
                    let mut source = self.mock.lock().unwrap_or_else(|e| e.into_inner());
                    fallback(&mut *source)
                };
                Fetched::Fallback { data, reason }
            }
        }
    }
}

fn user_id_body(user_id: &str) -> UserIdRequest {
    UserIdRequest {
        user_id: user_id.to_string(),
    }
}
