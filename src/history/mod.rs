/*!
 * Display history module.
 *
 * This module provides:
 * - Per-word exposure counters with JSON persistence
 * - Session statistics: streaks, daily progress, study-time estimate
 * - Achievement thresholds and unlock tracking
 */

pub mod achievements;
pub mod tracker;

// Re-export main types
pub use tracker::{ExposureRecord, HistoryTracker, SessionStats};
