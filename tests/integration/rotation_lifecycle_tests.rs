/*!
 * End-to-end lifecycle tests: catalog on disk, rotation ticks, history
 * persistence across controller restarts.
 */

use chrono::{Duration, TimeZone, Utc};
use std::fs;
use std::path::Path;
use wortschatz::app_config::Config;
use wortschatz::app_controller::Controller;
use wortschatz::history::HistoryTracker;

use crate::common;

fn setup_vocab_dir(root: &Path) -> std::path::PathBuf {
    let _ = env_logger::builder().is_test(true).try_init();
    let vocab_dir = root.join("vocabulary");
    fs::create_dir_all(&vocab_dir).unwrap();
    common::create_sample_vocabulary(&vocab_dir, "sample.json").unwrap();
    vocab_dir
}

#[test]
fn test_rotation_overSeveralTicks_shouldAccumulateHistory() {
    let dir = common::create_temp_dir().unwrap();
    let vocab_dir = setup_vocab_dir(dir.path());
    let history_path = dir.path().join("history.json");

    let controller =
        Controller::with_config(Config::default(), &vocab_dir, &history_path).unwrap();

    let start = Utc.with_ymd_and_hms(2026, 8, 7, 9, 0, 0).unwrap();
    let mut current = None;
    for i in 0..10 {
        let now = start + Duration::seconds(i * 60);
        let outcome = controller.tick(current, now).unwrap();
        current = Some(outcome.word.id);
    }

    let history = controller.history();
    let history = history.lock();
    assert_eq!(history.stats().total_views, 10);
    assert!(!history.stats().unique_words_seen.is_empty());
    assert_eq!(history.stats().current_streak_days, 1);

    // Per-word counters sum to the total view count
    let per_word_total: u64 = history
        .stats()
        .unique_words_seen
        .iter()
        .map(|&id| u64::from(history.times_shown(id)))
        .sum();
    assert_eq!(per_word_total, 10);
}

#[test]
fn test_rotation_afterRestart_shouldResumeFromPersistedHistory() {
    let dir = common::create_temp_dir().unwrap();
    let vocab_dir = setup_vocab_dir(dir.path());
    let history_path = dir.path().join("history.json");

    let now = Utc::now();
    let first_word;
    {
        let controller =
            Controller::with_config(Config::default(), &vocab_dir, &history_path).unwrap();
        first_word = controller.tick(None, now).unwrap().word.id;
        controller.history().lock().save(&history_path).unwrap();
    }

    // A fresh controller sees the persisted exposure
    let controller =
        Controller::with_config(Config::default(), &vocab_dir, &history_path).unwrap();
    let history = controller.history();
    let history = history.lock();
    assert_eq!(history.times_shown(first_word), 1);
    assert_eq!(history.stats().total_views, 1);
}

#[test]
fn test_rotation_withCategoryFilter_shouldOnlyShowThatCategory() {
    let dir = common::create_temp_dir().unwrap();
    let vocab_dir = setup_vocab_dir(dir.path());
    let history_path = dir.path().join("history.json");

    let mut config = Config::default();
    config.learning.enabled_categories = vec!["animals".to_string()];

    let controller = Controller::with_config(config, &vocab_dir, &history_path).unwrap();

    let now = Utc::now();
    let mut current = None;
    for _ in 0..20 {
        let outcome = controller.tick(current, now).unwrap();
        assert_eq!(outcome.word.category, "animals");
        current = Some(outcome.word.id);
    }
}

#[test]
fn test_rotation_withCorruptHistoryOnDisk_shouldStartFreshAndKeepGoing() {
    let dir = common::create_temp_dir().unwrap();
    let vocab_dir = setup_vocab_dir(dir.path());
    let history_path = dir.path().join("history.json");
    fs::write(&history_path, "not json at all").unwrap();

    let controller =
        Controller::with_config(Config::default(), &vocab_dir, &history_path).unwrap();
    let outcome = controller.tick(None, Utc::now()).unwrap();
    assert!(outcome.word.id >= 1);

    let history = controller.history();
    assert_eq!(history.lock().stats().total_views, 1);
}

#[test]
fn test_rotation_dailyGoalFromConfig_shouldUnlockDatedAchievement() {
    let dir = common::create_temp_dir().unwrap();
    let vocab_dir = setup_vocab_dir(dir.path());
    let history_path = dir.path().join("history.json");

    let mut config = Config::default();
    config.behavior.daily_goal = 3;

    let controller = Controller::with_config(config, &vocab_dir, &history_path).unwrap();

    let now = Utc::now();
    let mut unlocked = Vec::new();
    let mut current = None;
    for _ in 0..3 {
        let outcome = controller.tick(current, now).unwrap();
        current = Some(outcome.word.id);
        unlocked.extend(outcome.new_achievements);
    }

    let expected = format!("daily_goal_{}", now.date_naive().format("%Y-%m-%d"));
    assert!(unlocked.contains(&expected));
}

#[test]
fn test_historyFile_writtenByController_shouldBeLoadableStandalone() {
    let dir = common::create_temp_dir().unwrap();
    let vocab_dir = setup_vocab_dir(dir.path());
    let history_path = dir.path().join("history.json");

    let controller =
        Controller::with_config(Config::default(), &vocab_dir, &history_path).unwrap();

    let now = Utc::now();
    let mut current = None;
    // Enough ticks to trigger at least one debounced autosave
    for _ in 0..6 {
        current = Some(controller.tick(current, now).unwrap().word.id);
    }

    let loaded = HistoryTracker::load(&history_path).unwrap();
    assert!(loaded.stats().total_views >= 5);
}
