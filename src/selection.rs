/*!
 * Weighted random word selection.
 *
 * Every word in the active view gets a weight from its display history:
 * recently shown words fade, frequently shown words fade, never-shown words
 * get a boost. One word is drawn by cumulative weight, so ties are broken by
 * the draw itself and repeated calls with identical history may differ.
 *
 * Selection never mutates history. The caller records the display event
 * separately once the word is actually rendered, so previews and tests can
 * probe selection without polluting the counters.
 */

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::errors::VocabularyError;
use crate::history::HistoryTracker;
use crate::vocabulary::{CatalogView, WordRecord};

/// Recency sentinel for words that were never shown, in hours
pub const NEVER_SHOWN_HOURS: f64 = 9999.0;

/// Boost for words that were never shown
pub const NEVER_SHOWN_BOOST: f64 = 2.0;

/// Boost for words the user marked as difficult
pub const DIFFICULT_BOOST: f64 = 1.5;

/// Damping for words the user marked as known
pub const KNOWN_DAMPING: f64 = 0.3;

/// Floor for computed weights. The formula cannot produce a non-positive
/// weight for an eligible word (hours_since and times_shown are
/// non-negative), so this only guards the draw against surprises.
pub const MIN_WEIGHT: f64 = 1e-6;

/// Selection weight for a word given its display history.
///
/// The base weight is `(hours_since + 1)^2 / (times_shown + 1)`, with
/// `hours_since` capped below at zero and replaced by a large sentinel for
/// never-shown words. The word currently on screen gets weight 0 so it is
/// excluded from the draw.
pub fn weight_for(
    word: &WordRecord,
    history: &HistoryTracker,
    now: DateTime<Utc>,
    current: Option<u32>,
) -> f64 {
    if current == Some(word.id) {
        return 0.0;
    }

    let times_shown = history.times_shown(word.id);
    let hours_since = history
        .hours_since_shown(word.id, now)
        .unwrap_or(NEVER_SHOWN_HOURS)
        .max(0.0);

    let mut weight = (hours_since + 1.0).powi(2) / (f64::from(times_shown) + 1.0);

    if times_shown == 0 {
        weight *= NEVER_SHOWN_BOOST;
    } else if history.is_marked_difficult(word.id) {
        weight *= DIFFICULT_BOOST;
    } else if history.is_marked_known(word.id) {
        weight *= KNOWN_DAMPING;
    }

    if weight <= 0.0 { MIN_WEIGHT } else { weight }
}

/// Draw the next word to display from the active view.
///
/// Uses a cumulative-weight draw: a uniform point in `[0, total)` selects the
/// word whose cumulative range contains it. A single-word view always yields
/// that word. When every word is excluded (only possible when the view
/// consists of the word currently on screen) the draw falls back to a
/// uniform pick over the view rather than failing.
pub fn next_word<'a, R: Rng>(
    view: &CatalogView<'a>,
    history: &HistoryTracker,
    now: DateTime<Utc>,
    current: Option<u32>,
    rng: &mut R,
) -> Result<&'a WordRecord, VocabularyError> {
    if view.is_empty() {
        return Err(VocabularyError::EmptyCatalog);
    }

    let mut candidates = Vec::with_capacity(view.len());
    let mut weights = Vec::with_capacity(view.len());

    for word in view.iter() {
        let weight = weight_for(word, history, now, current);
        if weight > 0.0 {
            candidates.push(word);
            weights.push(weight);
        }
    }

    if candidates.is_empty() {
        let idx = rng.random_range(0..view.len());
        return Ok(view.words()[idx]);
    }

    let total: f64 = weights.iter().sum();
    let mut point = rng.random_range(0.0..total);

    for (i, weight) in weights.iter().enumerate() {
        point -= weight;
        if point <= 0.0 {
            return Ok(candidates[i]);
        }
    }

    // Floating point rounding can leave a sliver past the last range
    Ok(candidates[candidates.len() - 1])
}
