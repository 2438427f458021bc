//! Request bodies and paths for the local endpoints.
//!
//! The data client serializes these and the proxy server deserializes them,
//! so both sides agree on field names (camelCase on the wire).

use serde::{Deserialize, Serialize};

pub const CONTRIBUTIONS_PATH: &str = "/api/contributions";
pub const USER_STATS_PATH: &str = "/api/user-stats";
pub const COURSE_PROGRESS_PATH: &str = "/api/course-progress";
pub const BADGES_PATH: &str = "/api/badges";
pub const HUSTLE_SCORE_PATH: &str = "/api/hustle-score";
pub const LEADERBOARD_PATH: &str = "/api/leaderboard";
pub const SYNC_GITHUB_PATH: &str = "/api/sync-github";
pub const NFT_METADATA_PATH: &str = "/api/nft-metadata";

pub const DEFAULT_LEADERBOARD_LIMIT: u32 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionsRequest {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsernameRequest {
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdRequest {
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardRequest {
    pub limit: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncGithubRequest {
    pub username: String,
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NftMetadataRequest {
    pub user_id: String,
    pub metadata: serde_json::Value,
}

/// Request bodies that name a user.
pub trait Identified {
    /// Wire name of the first identifier that is empty, if any.
    fn missing_id(&self) -> Option<&'static str>;
}

fn empty(field: &'static str, value: &str) -> Option<&'static str> {
    value.is_empty().then_some(field)
}

impl Identified for ContributionsRequest {
    fn missing_id(&self) -> Option<&'static str> {
        empty("username", &self.username)
    }
}

impl Identified for UsernameRequest {
    fn missing_id(&self) -> Option<&'static str> {
        empty("username", &self.username)
    }
}

impl Identified for UserIdRequest {
    fn missing_id(&self) -> Option<&'static str> {
        empty("userId", &self.user_id)
    }
}

impl Identified for LeaderboardRequest {
    fn missing_id(&self) -> Option<&'static str> {
        None
    }
}

impl Identified for SyncGithubRequest {
    fn missing_id(&self) -> Option<&'static str> {
        empty("userId", &self.user_id).or_else(|| empty("username", &self.username))
    }
}

impl Identified for NftMetadataRequest {
    fn missing_id(&self) -> Option<&'static str> {
        empty("userId", &self.user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_contributions_request_omits_absent_dates() {
        let req = ContributionsRequest {
            username: "octo".to_string(),
            start_date: None,
            end_date: Some("2024-12-31".to_string()),
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({ "username": "octo", "endDate": "2024-12-31" })
        );
    }

    #[test]
    fn test_user_id_is_camel_case() {
        let req: UserIdRequest = serde_json::from_value(json!({ "userId": "u1" })).unwrap();
        assert_eq!(req.user_id, "u1");
        assert!(serde_json::from_value::<UserIdRequest>(json!({ "user_id": "u1" })).is_err());
    }

    #[test]
    fn test_missing_id_names_the_empty_field() {
        let sync = SyncGithubRequest {
            username: String::new(),
            user_id: "u1".to_string(),
        };
        assert_eq!(sync.missing_id(), Some("username"));

        let badges = UserIdRequest {
            user_id: String::new(),
        };
        assert_eq!(badges.missing_id(), Some("userId"));

        assert_eq!(LeaderboardRequest { limit: 5 }.missing_id(), None);
    }
}
