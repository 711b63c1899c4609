/*!
 * Tests for the weighted selection engine
 */

use chrono::{Duration, TimeZone, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use wortschatz::history::HistoryTracker;
use wortschatz::selection::{self, KNOWN_DAMPING, MIN_WEIGHT, NEVER_SHOWN_BOOST};
use wortschatz::vocabulary::Catalog;

use crate::common;

fn load_catalog() -> (tempfile::TempDir, Catalog) {
    let dir = common::create_temp_dir().unwrap();
    common::create_sample_vocabulary(dir.path(), "sample.json").unwrap();
    let catalog = Catalog::load_dir(dir.path()).unwrap();
    (dir, catalog)
}

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap()
}

#[test]
fn test_nextWord_withSameSeed_shouldBeReproducible() {
    let (_dir, catalog) = load_catalog();
    let view = catalog.full_view().unwrap();
    let mut history = HistoryTracker::default();
    history.record_shown(1, now() - Duration::hours(2));
    history.record_shown(3, now() - Duration::hours(48));

    let picks_a: Vec<u32> = {
        let mut rng = StdRng::seed_from_u64(2026);
        (0..20)
            .map(|_| selection::next_word(&view, &history, now(), None, &mut rng).unwrap().id)
            .collect()
    };
    let picks_b: Vec<u32> = {
        let mut rng = StdRng::seed_from_u64(2026);
        (0..20)
            .map(|_| selection::next_word(&view, &history, now(), None, &mut rng).unwrap().id)
            .collect()
    };

    assert_eq!(picks_a, picks_b);
}

#[test]
fn test_nextWord_overManyDraws_shouldEventuallyCoverThePool() {
    let (_dir, catalog) = load_catalog();
    let view = catalog.full_view().unwrap();
    let history = HistoryTracker::default();
    let mut rng = StdRng::seed_from_u64(7);

    let mut seen = std::collections::HashSet::new();
    for _ in 0..200 {
        seen.insert(selection::next_word(&view, &history, now(), None, &mut rng).unwrap().id);
    }

    // With uniform weights every word should appear over 200 draws
    assert_eq!(seen.len(), view.len());
}

#[test]
fn test_weightFor_withEqualHistories_shouldBeEqualAcrossWords() {
    let (_dir, catalog) = load_catalog();
    let shown_at = now() - Duration::hours(5);

    let mut history = HistoryTracker::default();
    for word in catalog.words() {
        history.record_shown(word.id, shown_at);
    }

    let weights: Vec<f64> = catalog
        .words()
        .iter()
        .map(|w| selection::weight_for(w, &history, now(), None))
        .collect();

    for pair in weights.windows(2) {
        assert!((pair[0] - pair[1]).abs() < 1e-12);
    }
}

#[test]
fn test_weightFor_knownWord_shouldStayPositive() {
    let (_dir, catalog) = load_catalog();
    let mut history = HistoryTracker::default();

    // Shown many times just now and marked known: heavily damped, never zero
    for _ in 0..100 {
        history.record_shown(1, now());
    }
    history.mark_known(1);

    let word = catalog.word(1).unwrap();
    let weight = selection::weight_for(word, &history, now(), None);
    assert!(weight > 0.0);
    assert!(weight >= MIN_WEIGHT);

    let unseen = selection::weight_for(catalog.word(2).unwrap(), &history, now(), None);
    assert!(weight < unseen * KNOWN_DAMPING);
}

#[test]
fn test_weightFor_neverShownBoost_shouldDoubleTheBaseWeight() {
    let (_dir, catalog) = load_catalog();
    let history = HistoryTracker::default();

    let word = catalog.word(2).unwrap();
    let weight = selection::weight_for(word, &history, now(), None);
    let base = (selection::NEVER_SHOWN_HOURS + 1.0).powi(2);
    assert!((weight - base * NEVER_SHOWN_BOOST).abs() < 1e-6);
}
