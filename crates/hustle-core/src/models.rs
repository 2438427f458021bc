//! Core data models shared by the client, the proxy, and the dashboard.
//!
//! Every type serializes with camelCase field names, matching the JSON
//! shapes the local endpoints and the upstream backend exchange.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day's coding-activity summary for a user.
///
/// Only `date` and `commits` feed the streak calculation; the remaining
/// fields are carried through for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionRecord {
    pub date: NaiveDate,
    pub commits: u32,
    #[serde(default)]
    pub repo: String,
    #[serde(default)]
    pub additions: u32,
    #[serde(default)]
    pub deletions: u32,
    #[serde(default)]
    pub pull_requests: u32,
}

impl ContributionRecord {
    /// Whether this day counts toward a streak.
    pub fn is_active(&self) -> bool {
        self.commits > 0
    }
}

/// Overall GitHub statistics for a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_commits: u64,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_repositories: u32,
    pub contributions_this_year: u64,
    pub languages_used: Vec<String>,
}

/// A partial [`UserStats`], as returned alongside an NFT update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatsUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_commits: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_streak: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longest_streak: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_repositories: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contributions_this_year: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages_used: Option<Vec<String>>,
}

/// Progress on a single learning course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseProgress {
    pub id: String,
    pub title: String,
    pub provider: String,
    pub completed: bool,
    /// Percentage, 0–100.
    pub progress: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

/// An earned or in-progress badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeData {
    pub id: String,
    pub name: String,
    pub description: String,
    pub earned: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub earned_at: Option<String>,
    pub progress: u8,
    pub requirements: Vec<String>,
    pub rarity: Rarity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyScore {
    pub month: String,
    pub score: u32,
}

/// HustleScore total and the components it is built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HustleScoreBreakdown {
    pub total_score: u32,
    pub code_contributions: u32,
    pub learning_progress: u32,
    pub consistency: u32,
    pub community_impact: u32,
    pub monthly_trend: Vec<MonthlyScore>,
}

/// Result of a GitHub sync: the new NFT level state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NftUpdateData {
    pub level: u32,
    pub experience: u32,
    pub next_level_exp: u32,
    pub new_badges: Vec<String>,
    #[serde(default)]
    pub stats_update: UserStatsUpdate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub user_id: String,
    pub username: String,
    pub hustle_score: u32,
    pub level: u32,
    pub rank: u32,
}
