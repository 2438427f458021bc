//! Dashboard aggregation.
//!
//! Loads every dashboard resource through the [`HustleClient`] at once and
//! derives the streak and chart series from the contributions. Resources
//! that came back as fallbacks are listed in
//! [`DashboardSnapshot::degraded`] so the caller can warn that part of the
//! view is placeholder data.
//!
//! Also hosts the `poh dashboard`, `poh leaderboard`, and `poh sync` commands.

use anyhow::Result;
use chrono::{Local, NaiveDate};
use hustle_core::chart::{format_contributions_for_chart, ChartPoint};
use hustle_core::models::{
    BadgeData, ContributionRecord, CourseProgress, HustleScoreBreakdown, LeaderboardEntry,
    UserStats,
};
use hustle_core::streak::{calculate_streak_as_of, StreakResult};
use serde::Serialize;

use crate::client::{Fetched, HustleClient};
use crate::config::Config;
use crate::protocol::DEFAULT_LEADERBOARD_LIMIT;

/// A resource that was served from fallback data, and why.
#[derive(Debug, Clone, Serialize)]
pub struct DegradedResource {
    pub resource: &'static str,
    pub kind: &'static str,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub username: String,
    pub user_id: String,
    pub stats: UserStats,
    pub streak: StreakResult,
    pub contributions: Vec<ContributionRecord>,
    pub chart: Vec<ChartPoint>,
    pub badges: Vec<BadgeData>,
    pub courses: Vec<CourseProgress>,
    pub hustle_score: HustleScoreBreakdown,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub degraded: Vec<DegradedResource>,
}

impl DashboardSnapshot {
    pub fn is_degraded(&self) -> bool {
        !self.degraded.is_empty()
    }
}

/// Unwraps a fetch result, noting it in `degraded` when it is a fallback.
fn take<T>(
    resource: &'static str,
    fetched: Fetched<T>,
    degraded: &mut Vec<DegradedResource>,
) -> T {
    if let Some(reason) = fetched.reason() {
        degraded.push(DegradedResource {
            resource,
            kind: reason.kind(),
            reason: reason.to_string(),
        });
    }
    fetched.into_inner()
}

/// Fetches all resources concurrently and assembles the snapshot.
///
/// Never fails: every resource falls back independently. The streak is
/// computed relative to `today`.
pub async fn load_dashboard(
    client: &HustleClient,
    username: &str,
    user_id: &str,
    today: NaiveDate,
) -> DashboardSnapshot {
    let (contributions, stats, courses, badges, hustle_score, leaderboard) = tokio::join!(
        client.fetch_contributions(username, None, None),
        client.fetch_user_stats(username),
        client.fetch_course_progress(user_id),
        client.fetch_badges(user_id),
        client.fetch_hustle_score(user_id),
        client.fetch_leaderboard(DEFAULT_LEADERBOARD_LIMIT),
    );

    let mut degraded = Vec::new();
    let contributions = take("contributions", contributions, &mut degraded);
    let stats = take("user stats", stats, &mut degraded);
    let courses = take("course progress", courses, &mut degraded);
    let badges = take("badges", badges, &mut degraded);
    let hustle_score = take("hustle score", hustle_score, &mut degraded);
    let leaderboard = take("leaderboard", leaderboard, &mut degraded);

    DashboardSnapshot {
        username: username.to_string(),
        user_id: user_id.to_string(),
        streak: calculate_streak_as_of(&contributions, today),
        chart: format_contributions_for_chart(&contributions),
        contributions,
        stats,
        badges,
        courses,
        hustle_score,
        leaderboard,
        degraded,
    }
}

/// `poh dashboard`: print the snapshot as text or JSON.
pub async fn run_dashboard(config: &Config, username: &str, user_id: &str, json: bool) -> Result<()> {
    let client = HustleClient::from_config(config)?;
    let snapshot = load_dashboard(&client, username, user_id, Local::now().date_naive()).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    println!("Proof of Hustle: {}", snapshot.username);
    println!("================");
    println!();
    println!("  HustleScore:     {}", snapshot.hustle_score.total_score);
    println!("  Current streak:  {} days", snapshot.streak.current);
    println!("  Longest streak:  {} days", snapshot.streak.longest);
    println!("  Total commits:   {}", snapshot.stats.total_commits);
    println!("  Repositories:    {}", snapshot.stats.total_repositories);
    println!("  Languages:       {}", snapshot.stats.languages_used.join(", "));

    let active_days = snapshot.contributions.iter().filter(|c| c.is_active()).count();
    println!(
        "  Active days:     {} / {}",
        active_days,
        snapshot.contributions.len()
    );

    println!();
    println!("  Badges:");
    for badge in &snapshot.badges {
        let mark = if badge.earned { "x" } else { " " };
        println!(
            "    [{}] {} ({:?}, {}%)",
            mark, badge.name, badge.rarity, badge.progress
        );
    }

    println!();
    println!("  Courses:");
    for course in &snapshot.courses {
        println!(
            "    {} / {}: {}%",
            course.provider, course.title, course.progress
        );
    }

    println!();
    print_leaderboard(&snapshot.leaderboard);

    if snapshot.is_degraded() {
        println!();
        println!("  Warning: some data is placeholder (live fetch failed):");
        for d in &snapshot.degraded {
            println!("    {} [{}]: {}", d.resource, d.kind, d.reason);
        }
    }

    Ok(())
}

fn print_leaderboard(entries: &[LeaderboardEntry]) {
    println!("  Leaderboard:");
    for entry in entries {
        println!(
            "    #{:<3} {:<20} {:>6}  (level {})",
            entry.rank, entry.username, entry.hustle_score, entry.level
        );
    }
}

/// `poh leaderboard`
pub async fn run_leaderboard(config: &Config, limit: u32) -> Result<()> {
    let client = HustleClient::from_config(config)?;
    let board = client.fetch_leaderboard(limit).await;
    if board.is_fallback() {
        println!("(leaderboard unavailable, showing placeholder data)");
    }
    print_leaderboard(board.data());
    Ok(())
}

/// `poh sync`: trigger a GitHub sync and print the NFT update.
pub async fn run_sync(config: &Config, username: &str, user_id: &str) -> Result<()> {
    let client = HustleClient::from_config(config)?;
    let update = client.sync_github_data(username, user_id).await;
    if update.is_fallback() {
        println!("(sync failed, showing placeholder data)");
    }

    let update = update.into_inner();
    println!("Level {} ({} / {} XP)", update.level, update.experience, update.next_level_exp);
    if !update.new_badges.is_empty() {
        println!("New badges: {}", update.new_badges.join(", "));
    }
    if let Some(streak) = update.stats_update.current_streak {
        println!("Current streak: {} days", streak);
    }
    Ok(())
}
