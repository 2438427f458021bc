//! Fallback data generators.
//!
//! When a live fetch fails, the client substitutes a value produced here so
//! the dashboard always has something correctly shaped to render. Each
//! resource type has one generator.
//!
//! Contributions are the only randomized fallback. Randomness comes from a
//! [`MockSource`], which is seeded explicitly for reproducible output or from
//! OS entropy otherwise.

use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};

use crate::models::{
    BadgeData, ContributionRecord, CourseProgress, HustleScoreBreakdown, LeaderboardEntry,
    MonthlyScore, NftUpdateData, Rarity, UserStats, UserStatsUpdate,
};

/// Number of days covered by the contributions fallback, ending today.
pub const MOCK_CONTRIBUTION_DAYS: i64 = 30;

/// Injectable random source for the randomized fallbacks.
#[derive(Debug, Clone)]
pub struct MockSource {
    rng: StdRng,
}

impl MockSource {
    /// A source that yields the same sequence for the same seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Builds `seeded(seed)` when a seed is given, else `from_entropy()`.
    pub fn new(seed: Option<u64>) -> Self {
        seed.map(Self::seeded).unwrap_or_else(Self::from_entropy)
    }

    /// One record per day, from `today` back [`MOCK_CONTRIBUTION_DAYS`]` - 1` days.
    pub fn contributions(&mut self, today: NaiveDate) -> Vec<ContributionRecord> {
        (0..MOCK_CONTRIBUTION_DAYS)
            .map(|i| ContributionRecord {
                date: today - Duration::days(i),
                commits: self.rng.gen_range(0..8),
                repo: format!("project-{}", self.rng.gen_range(1..=5)),
                additions: self.rng.gen_range(0..200),
                deletions: self.rng.gen_range(0..50),
                pull_requests: self.rng.gen_range(0..3),
            })
            .collect()
    }
}

pub fn user_stats() -> UserStats {
    UserStats {
        total_commits: 1247,
        current_streak: 127,
        longest_streak: 189,
        total_repositories: 23,
        contributions_this_year: 892,
        languages_used: ["TypeScript", "JavaScript", "Python", "Solidity", "Rust"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    }
}

pub fn course_progress() -> Vec<CourseProgress> {
    vec![
        CourseProgress {
            id: "1".to_string(),
            title: "React Fundamentals".to_string(),
            provider: "Tech Academy".to_string(),
            completed: true,
            progress: 100,
            completed_at: Some("2024-11-15T00:00:00Z".to_string()),
            certificate_url: Some("https://example.com/cert/1".to_string()),
        },
        CourseProgress {
            id: "2".to_string(),
            title: "Advanced TypeScript".to_string(),
            provider: "Code School".to_string(),
            completed: true,
            progress: 100,
            completed_at: Some("2024-11-20T00:00:00Z".to_string()),
            certificate_url: None,
        },
        CourseProgress {
            id: "3".to_string(),
            title: "Web3 Development".to_string(),
            provider: "Blockchain University".to_string(),
            completed: false,
            progress: 75,
            completed_at: None,
            certificate_url: None,
        },
    ]
}

pub fn badges() -> Vec<BadgeData> {
    vec![
        BadgeData {
            id: "1".to_string(),
            name: "React Master".to_string(),
            description: "Complete 10 React projects".to_string(),
            earned: true,
            earned_at: Some("2024-11-15T00:00:00Z".to_string()),
            progress: 100,
            requirements: vec![
                "Complete 10 React projects".to_string(),
                "Use advanced React patterns".to_string(),
            ],
            rarity: Rarity::Rare,
        },
        BadgeData {
            id: "2".to_string(),
            name: "Streak Legend".to_string(),
            description: "Maintain a 200-day commit streak".to_string(),
            earned: false,
            earned_at: None,
            progress: 63,
            requirements: vec!["Commit code for 200 consecutive days".to_string()],
            rarity: Rarity::Legendary,
        },
    ]
}

pub fn hustle_score() -> HustleScoreBreakdown {
    let trend = [
        ("Jul", 7350),
        ("Aug", 7550),
        ("Sep", 7950),
        ("Oct", 8150),
        ("Nov", 8450),
        ("Dec", 8750),
    ];

    HustleScoreBreakdown {
        total_score: 8750,
        code_contributions: 3500,
        learning_progress: 2625,
        consistency: 1750,
        community_impact: 875,
        monthly_trend: trend
            .iter()
            .map(|(month, score)| MonthlyScore {
                month: month.to_string(),
                score: *score,
            })
            .collect(),
    }
}

pub fn nft_update() -> NftUpdateData {
    NftUpdateData {
        level: 7,
        experience: 8750,
        next_level_exp: 10000,
        new_badges: vec!["TypeScript Pro".to_string()],
        stats_update: UserStatsUpdate {
            total_commits: Some(1247),
            current_streak: Some(127),
            ..Default::default()
        },
    }
}

pub fn leaderboard() -> Vec<LeaderboardEntry> {
    [
        ("1", "alice_codes", 9500, 8),
        ("2", "bob_builder", 9200, 8),
        ("3", "charlie_dev", 8750, 7),
    ]
    .iter()
    .enumerate()
    .map(|(i, (id, name, score, level))| LeaderboardEntry {
        user_id: id.to_string(),
        username: name.to_string(),
        hustle_score: *score,
        level: *level,
        rank: i as u32 + 1,
    })
    .collect()
}

/// Placeholder GitHub API payload, keyed on the request path.
pub fn github_data(endpoint: &str) -> Value {
    if endpoint.contains("/repos") {
        json!([])
    } else if endpoint.contains("/user") {
        json!({ "login": "mockuser", "public_repos": 23 })
    } else {
        json!({})
    }
}
