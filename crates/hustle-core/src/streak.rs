//! Contribution streak calculation.
//!
//! A streak is a run of calendar days with at least one commit. Two
//! numbers are derived from a list of [`ContributionRecord`]s:
//!
//! - **current**: consecutive active days ending *today* (inclusive). If the
//!   most recent active day is not today, the current streak is `0`; there
//!   is no grace period for a day that has not finished yet.
//! - **longest**: the longest run of calendar-adjacent active days anywhere
//!   in the input.
//!
//! Records with `commits == 0` are ignored entirely. Records are not
//! deduplicated: two records for the same date are treated as a break in
//! adjacency, so callers should pass at most one record per day.
//!
//! The calculation is a single sort plus a linear scan and never fails.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::ContributionRecord;

/// Current and longest streak, in days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakResult {
    pub current: u32,
    pub longest: u32,
}

/// Calculates streaks relative to the local calendar date.
pub fn calculate_streak(records: &[ContributionRecord]) -> StreakResult {
    calculate_streak_as_of(records, Local::now().date_naive())
}

/// Calculates streaks relative to an explicit `today`.
pub fn calculate_streak_as_of(records: &[ContributionRecord], today: NaiveDate) -> StreakResult {
    let mut active: Vec<NaiveDate> = records
        .iter()
        .filter(|r| r.is_active())
        .map(|r| r.date)
        .collect();
    active.sort_by(|a, b| b.cmp(a));

    StreakResult {
        current: current_streak(&active, today),
        longest: longest_streak(&active),
    }
}

/// Walks back from `today` over date-descending active days.
fn current_streak(active: &[NaiveDate], today: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut expected = Some(today);

    for date in active {
        if expected != Some(*date) {
            break;
        }
        streak += 1;
        expected = date.pred_opt();
    }

    streak
}

fn longest_streak(active: &[NaiveDate]) -> u32 {
    let mut longest = 0;
    let mut run = 0;

    for (i, date) in active.iter().enumerate() {
        if i == 0 || is_consecutive_day(active[i - 1], *date) {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 1;
        }
    }

    longest
}

/// True when the two dates are exactly one calendar day apart, in either order.
fn is_consecutive_day(a: NaiveDate, b: NaiveDate) -> bool {
    (a - b).num_days().abs() == 1
}
