/*!
 * Achievement definitions and threshold evaluation.
 *
 * Achievements are identified by stable string ids so persisted history
 * stays readable across versions. Streak and word-count milestones are
 * fixed; the daily goal yields one dated id per completed day.
 */

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use super::tracker::SessionStats;

/// Streak milestones in days, paired with their achievement ids
pub const STREAK_MILESTONES: [(u32, &str); 3] = [
    (7, "7_day_streak"),
    (30, "30_day_streak"),
    (100, "100_day_streak"),
];

/// Unique-word milestones, paired with their achievement ids
pub const WORD_MILESTONES: [(usize, &str); 3] = [
    (100, "100_words"),
    (500, "500_words"),
    (1000, "1000_words"),
];

// Dated daily-goal ids, e.g. "daily_goal_2026-08-07"
static DAILY_GOAL_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^daily_goal_(\d{4}-\d{2}-\d{2})$").unwrap());

/// Evaluate all thresholds and return ids not yet unlocked.
///
/// Does not mutate the stats; the tracker records the returned ids.
pub(crate) fn newly_unlocked(stats: &SessionStats, today: NaiveDate) -> Vec<String> {
    let mut earned = Vec::new();

    for (days, id) in STREAK_MILESTONES {
        if stats.current_streak_days >= days && !stats.unlocked_achievements.contains(id) {
            earned.push(id.to_string());
        }
    }

    for (count, id) in WORD_MILESTONES {
        if stats.unique_words_seen.len() >= count && !stats.unlocked_achievements.contains(id) {
            earned.push(id.to_string());
        }
    }

    let shown_today = stats.daily_progress.get(&today).copied().unwrap_or(0);
    if shown_today >= stats.daily_goal {
        let id = format!("daily_goal_{}", today.format("%Y-%m-%d"));
        if !stats.unlocked_achievements.contains(&id) {
            earned.push(id);
        }
    }

    earned
}

/// Human-readable name for an achievement id.
///
/// Unknown ids fall back to the raw id so forward-compatible history files
/// still render.
pub fn display_name(id: &str) -> String {
    if let Some(captures) = DAILY_GOAL_ID.captures(id) {
        return format!("Daily goal reached on {}", &captures[1]);
    }

    match id {
        "7_day_streak" => "Week Warrior - 7 day streak".to_string(),
        "30_day_streak" => "Monthly Master - 30 day streak".to_string(),
        "100_day_streak" => "Century Streak - 100 days".to_string(),
        "100_words" => "First Hundred - 100 words seen".to_string(),
        "500_words" => "Half Thousand - 500 words seen".to_string(),
        "1000_words" => "Thousand Club - 1000 words seen".to_string(),
        other => other.to_string(),
    }
}
