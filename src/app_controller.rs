use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

use crate::app_config::Config;
use crate::errors::VocabularyError;
use crate::history::{HistoryTracker, achievements};
use crate::selection;
use crate::vocabulary::{Catalog, CatalogView, Gender, WordRecord};

// @module: Application controller for the display loop

/// Result of one display tick
#[derive(Debug)]
pub struct TickOutcome<'a> {
    /// The word chosen and recorded for this tick
    pub word: &'a WordRecord,

    /// Achievements unlocked by this tick
    pub new_achievements: Vec<String>,
}

/// Main application controller for the word rotation
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Loaded vocabulary catalog
    catalog: Catalog,

    // @field: Display history, shared with the shutdown handler
    history: Arc<Mutex<HistoryTracker>>,

    // @field: Where history flushes go
    history_path: PathBuf,
}

impl Controller {
    // @method: Create a controller with the given configuration and paths
    pub fn with_config<P: AsRef<Path>, Q: AsRef<Path>>(
        config: Config,
        vocab_dir: P,
        history_path: Q,
    ) -> Result<Self> {
        let catalog = Catalog::load_dir(&vocab_dir)
            .with_context(|| format!("Failed to load vocabulary from {:?}", vocab_dir.as_ref()))?;

        info!("Loaded {} words from {:?}", catalog.len(), vocab_dir.as_ref());

        let mut history = HistoryTracker::load_or_default(&history_path);
        history.set_daily_goal(config.behavior.daily_goal);

        let controller = Self {
            config,
            catalog,
            history: Arc::new(Mutex::new(history)),
            history_path: history_path.as_ref().to_path_buf(),
        };

        // Only an empty active pool halts startup; everything else is recoverable
        controller.active_view()?;

        Ok(controller)
    }

    /// The loaded catalog
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Shared handle to the display history
    pub fn history(&self) -> Arc<Mutex<HistoryTracker>> {
        Arc::clone(&self.history)
    }

    // The word pool after applying the configured category and difficulty filters
    fn active_view(&self) -> Result<CatalogView<'_>, VocabularyError> {
        self.catalog.view(
            &self.config.learning.category_filter(),
            self.config.learning.max_difficulty,
        )
    }

    /// Run one display tick: choose a word, record the exposure, advance the
    /// streak, evaluate achievements and autosave.
    ///
    /// `current` is the word on screen, excluded from the draw.
    pub fn tick(&self, current: Option<u32>, now: DateTime<Utc>) -> Result<TickOutcome<'_>> {
        let view = self.active_view()?;

        let word = {
            let history = self.history.lock();
            let mut rng = rand::rng();
            selection::next_word(&view, &history, now, current, &mut rng)?
        };

        debug!("Selected word {} ({})", word.id, word.german);

        let mut history = self.history.lock();
        history.record_shown(word.id, now);
        history.update_streak(now.date_naive());
        let new_achievements = history.check_achievements(now.date_naive());
        history.autosave(&self.history_path);

        Ok(TickOutcome { word, new_achievements })
    }

    /// Run the display loop until interrupted.
    ///
    /// A failing tick is reported and the loop keeps going; only shutdown
    /// flushes are allowed to end it.
    pub async fn run(&self) -> Result<()> {
        let period = Duration::from_secs(self.config.behavior.refresh_interval_secs);
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            "Starting word rotation every {}s (Ctrl-C to stop)",
            self.config.behavior.refresh_interval_secs
        );

        let mut current: Option<u32> = None;

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match self.tick(current, Utc::now()) {
                        Ok(outcome) => {
                            render_word(outcome.word);
                            for id in &outcome.new_achievements {
                                info!("Achievement unlocked: {}", achievements::display_name(id));
                            }
                            current = Some(outcome.word.id);
                        }
                        Err(e) => error!("Skipping tick: {}", e),
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("Shutting down, saving history");
                    if let Err(e) = self.history.lock().save(&self.history_path) {
                        warn!("Final save failed: {}", e);
                    }
                    return Ok(());
                }
            }
        }
    }
}

// ANSI color for the german text, by grammatical gender
fn gender_color(gender: Gender) -> &'static str {
    match gender {
        Gender::Masculine => "\x1B[1;34m",
        Gender::Feminine => "\x1B[1;31m",
        Gender::Neuter => "\x1B[1;32m",
        Gender::None => "\x1B[1;37m",
    }
}

/// Print a word card to the terminal
pub fn render_word(word: &WordRecord) {
    let color = gender_color(word.gender);
    let reset = "\x1B[0m";

    println!();
    match word.gender.article() {
        Some(article) => println!("  {}{} {}{}", color, article, word.german, reset),
        None => println!("  {}{}{}", color, word.german, reset),
    }

    if !word.pronunciation.is_empty() {
        println!("  [{}]", word.pronunciation);
    }

    println!("  {}", word.english);

    if let Some(example) = word.examples.first() {
        println!("  z.B. {} / {}", example.german, example.english);
    }
}
