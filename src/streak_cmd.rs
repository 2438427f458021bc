//! `poh streak`: compute streaks from a JSON file of contribution records.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use hustle_core::models::ContributionRecord;
use hustle_core::streak::{calculate_streak_as_of, StreakResult};
use std::path::Path;

/// Reads a JSON array of [`ContributionRecord`]s from `path`.
pub fn read_contributions(path: &Path) -> Result<Vec<ContributionRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read contributions file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse contributions file: {}", path.display()))
}

/// Computes the streak of the records in `path`, relative to `today`
/// (the local date when not given).
pub fn streak_from_file(path: &Path, today: Option<NaiveDate>) -> Result<StreakResult> {
    let records = read_contributions(path)?;
    let today = today.unwrap_or_else(|| Local::now().date_naive());
    Ok(calculate_streak_as_of(&records, today))
}

pub fn run_streak(path: &Path, today: Option<NaiveDate>, json: bool) -> Result<()> {
    let result = streak_from_file(path, today)?;
    if json {
        println!("{}", serde_json::to_string(&result)?);
    } else {
        println!("current: {}", result.current);
        println!("longest: {}", result.longest);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_streak_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"date": "2024-12-15", "commits": 2}},
                {{"date": "2024-12-14", "commits": 1, "repo": "poh"}},
                {{"date": "2024-12-13", "commits": 0}},
                {{"date": "2024-12-12", "commits": 5}}
            ]"#
        )
        .unwrap();

        let today = NaiveDate::from_ymd_opt(2024, 12, 15).unwrap();
        let result = streak_from_file(file.path(), Some(today)).unwrap();
        assert_eq!(result, StreakResult { current: 2, longest: 2 });
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"date": "yesterday", "commits": 2}}]"#).unwrap();

        let err = streak_from_file(file.path(), None).unwrap_err();
        assert!(err.to_string().contains("Failed to parse contributions file"));
    }
}
