//! Chart shaping for contribution timelines.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::ContributionRecord;

/// A single point on the contribution chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub commits: u32,
    pub additions: u32,
    pub deletions: u32,
}

/// Projects records onto chart points, preserving input order.
pub fn format_contributions_for_chart(records: &[ContributionRecord]) -> Vec<ChartPoint> {
    records
        .iter()
        .map(|r| ChartPoint {
            date: r.date,
            commits: r.commits,
            additions: r.additions,
            deletions: r.deletions,
        })
        .collect()
}
