/*!
 * History tracker for word display history and session statistics.
 *
 * This module handles:
 * - Recording display events and per-word exposure counters
 * - Daily streak transitions and study-day bookkeeping
 * - Loading persisted history with corrupt-file recovery
 * - Atomic, debounced saving
 *
 * The tracker performs no internal locking. Callers that share it across
 * tasks must serialize access themselves.
 */

use chrono::{DateTime, Duration, NaiveDate, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use super::achievements;
use crate::errors::HistoryError;
use crate::file_utils::FileManager;

/// Mutations between debounced autosave flushes
const AUTOSAVE_EVERY: u32 = 5;

/// Assumed reading time per display, for the study-time estimate
const SECONDS_PER_VIEW: i64 = 5;

/// Display history for a single word
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExposureRecord {
    /// Times this word has been displayed
    #[serde(default)]
    pub times_shown: u32,

    /// When the word was last displayed; None means never
    #[serde(default)]
    pub last_shown: Option<DateTime<Utc>>,

    /// When the word was first displayed
    #[serde(default)]
    pub first_shown: Option<DateTime<Utc>>,

    /// User marked the word as known (shown less often)
    #[serde(default)]
    pub marked_known: bool,

    /// User marked the word as difficult (shown more often)
    #[serde(default)]
    pub marked_difficult: bool,
}

/// Session-level statistics and gamification state
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionStats {
    /// Total display events across all words
    #[serde(default)]
    pub total_views: u64,

    /// Ids of words displayed at least once
    #[serde(default)]
    pub unique_words_seen: BTreeSet<u32>,

    /// Consecutive calendar days with at least one exposure
    #[serde(default)]
    pub current_streak_days: u32,

    /// Longest streak ever reached
    #[serde(default)]
    pub longest_streak_days: u32,

    /// Last calendar day with activity
    #[serde(default)]
    pub last_active_date: Option<NaiveDate>,

    /// Total distinct days with activity
    #[serde(default)]
    pub total_study_days: u32,

    /// Words to view per day for the daily goal achievement
    #[serde(default = "default_daily_goal")]
    pub daily_goal: u32,

    /// Display events per calendar day
    #[serde(default)]
    pub daily_progress: BTreeMap<NaiveDate, u32>,

    /// Achievement ids unlocked so far
    #[serde(default)]
    pub unlocked_achievements: BTreeSet<String>,
}

fn default_daily_goal() -> u32 {
    20
}

impl Default for SessionStats {
    fn default() -> Self {
        Self {
            total_views: 0,
            unique_words_seen: BTreeSet::new(),
            current_streak_days: 0,
            longest_streak_days: 0,
            last_active_date: None,
            total_study_days: 0,
            daily_goal: default_daily_goal(),
            daily_progress: BTreeMap::new(),
            unlocked_achievements: BTreeSet::new(),
        }
    }
}

/// Tracks when and how often words have been displayed.
///
/// Serialized as a single JSON document. Unknown fields in a persisted file
/// are ignored on load so newer versions can extend the schema.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct HistoryTracker {
    /// Exposure records keyed by word id
    #[serde(default)]
    exposures: BTreeMap<u32, ExposureRecord>,

    /// Session statistics
    #[serde(default)]
    stats: SessionStats,

    /// Mutations since the last flush, for debounced saves
    #[serde(skip)]
    save_counter: u32,
}

impl HistoryTracker {
    /// Load history from a JSON file.
    ///
    /// A missing file yields a fresh tracker; an unreadable or unparsable
    /// file fails with `HistoryError::Corrupt`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, HistoryError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No history file at {:?}, starting fresh", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| HistoryError::Corrupt(format!("{:?}: {}", path, e)))?;

        serde_json::from_str(&content)
            .map_err(|e| HistoryError::Corrupt(format!("{:?}: {}", path, e)))
    }

    /// Load history, falling back to a fresh tracker when the file is corrupt
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(&path) {
            Ok(tracker) => tracker,
            Err(e) => {
                warn!("Resetting history: {}", e);
                Self::default()
            }
        }
    }

    /// Save the full history state atomically
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), HistoryError> {
        FileManager::write_json_atomic(&path, self)
            .map_err(|e| HistoryError::Write(e.to_string()))
    }

    /// Debounced save: flushes on every fifth call.
    ///
    /// A failed flush is logged and retried on a later call, never propagated,
    /// so the display loop keeps running through transient disk errors.
    pub fn autosave<P: AsRef<Path>>(&mut self, path: P) {
        self.save_counter += 1;
        if self.save_counter < AUTOSAVE_EVERY {
            return;
        }

        match self.save(&path) {
            Ok(()) => {
                self.save_counter = 0;
            }
            Err(e) => warn!("Autosave failed, will retry: {}", e),
        }
    }

    // =========================================================================
    // Display events
    // =========================================================================

    /// Record that a word was displayed at the given instant.
    ///
    /// Pure in-memory mutation; persistence is a separate explicit or
    /// debounced save.
    pub fn record_shown(&mut self, word_id: u32, at: DateTime<Utc>) {
        let record = self.exposures.entry(word_id).or_default();
        record.times_shown += 1;
        record.last_shown = Some(at);
        if record.first_shown.is_none() {
            record.first_shown = Some(at);
        }

        self.stats.total_views += 1;
        self.stats.unique_words_seen.insert(word_id);
        *self.stats.daily_progress.entry(at.date_naive()).or_insert(0) += 1;
    }

    /// Mark a word as known; clears the difficult flag
    pub fn mark_known(&mut self, word_id: u32) {
        let record = self.exposures.entry(word_id).or_default();
        record.marked_known = true;
        record.marked_difficult = false;
    }

    /// Mark a word as difficult; clears the known flag
    pub fn mark_difficult(&mut self, word_id: u32) {
        let record = self.exposures.entry(word_id).or_default();
        record.marked_difficult = true;
        record.marked_known = false;
    }

    // =========================================================================
    // Streaks and achievements
    // =========================================================================

    /// Apply the daily streak transition for the given calendar day.
    ///
    /// Consecutive days extend the streak, a gap resets it to 1, and repeated
    /// calls on the same day are no-ops.
    pub fn update_streak(&mut self, today: NaiveDate) {
        let stats = &mut self.stats;

        match stats.last_active_date {
            Some(last) if last == today => return,
            Some(last) => {
                if last.succ_opt() == Some(today) {
                    stats.current_streak_days += 1;
                } else {
                    stats.current_streak_days = 1;
                }
                stats.total_study_days += 1;
            }
            None => {
                stats.current_streak_days = 1;
                stats.total_study_days = 1;
            }
        }

        if stats.current_streak_days > stats.longest_streak_days {
            stats.longest_streak_days = stats.current_streak_days;
        }

        stats.last_active_date = Some(today);
    }

    /// Evaluate achievement thresholds against the current statistics.
    ///
    /// Returns ids unlocked by this call and records them, so each id is
    /// reported at most once ever.
    pub fn check_achievements(&mut self, today: NaiveDate) -> Vec<String> {
        let earned = achievements::newly_unlocked(&self.stats, today);
        for id in &earned {
            self.stats.unlocked_achievements.insert(id.clone());
        }
        earned
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Exposure record for a word, if it was ever touched
    pub fn exposure(&self, word_id: u32) -> Option<&ExposureRecord> {
        self.exposures.get(&word_id)
    }

    /// Times a word has been displayed (0 if never)
    pub fn times_shown(&self, word_id: u32) -> u32 {
        self.exposures.get(&word_id).map_or(0, |r| r.times_shown)
    }

    /// Hours since a word was last displayed, or None if never shown
    pub fn hours_since_shown(&self, word_id: u32, now: DateTime<Utc>) -> Option<f64> {
        let last = self.exposures.get(&word_id)?.last_shown?;
        Some((now - last).num_seconds() as f64 / 3600.0)
    }

    /// Check if a word is marked as known
    pub fn is_marked_known(&self, word_id: u32) -> bool {
        self.exposures.get(&word_id).is_some_and(|r| r.marked_known)
    }

    /// Check if a word is marked as difficult
    pub fn is_marked_difficult(&self, word_id: u32) -> bool {
        self.exposures.get(&word_id).is_some_and(|r| r.marked_difficult)
    }

    /// Current session statistics
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Set the daily word goal
    pub fn set_daily_goal(&mut self, goal: u32) {
        self.stats.daily_goal = goal;
    }

    /// Display events recorded on the given day
    pub fn words_shown_on(&self, day: NaiveDate) -> u32 {
        self.stats.daily_progress.get(&day).copied().unwrap_or(0)
    }

    /// Estimated total study time, assuming a few seconds of attention per view
    pub fn estimated_study_time(&self) -> Duration {
        Duration::seconds(self.stats.total_views as i64 * SECONDS_PER_VIEW)
    }
}
