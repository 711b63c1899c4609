/*!
 * # wortschatz
 *
 * A Rust library for passive German vocabulary learning on a timed rotation.
 *
 * ## Features
 *
 * - Load vocabulary catalogs from JSON files with per-record validation
 * - Adaptive word selection weighted by recency and exposure count
 * - Persistent display history with streaks and achievements
 * - Category and difficulty filtering of the active word pool
 * - CSV import of custom vocabulary lists
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `vocabulary`: Word records, catalog loading and filtered views:
 *   - `vocabulary::import`: CSV to vocabulary JSON conversion
 * - `selection`: Weighted random selection of the next word to display
 * - `history`: Display history, session statistics and achievements:
 *   - `history::tracker`: Exposure counters and persistence
 *   - `history::achievements`: Milestone definitions and evaluation
 * - `file_utils`: File system operations and data directory resolution
 * - `app_controller`: Display loop orchestration
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod history;
pub mod selection;
pub mod vocabulary;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use errors::{AppError, HistoryError, VocabularyError};
pub use history::{ExposureRecord, HistoryTracker, SessionStats};
pub use vocabulary::{Catalog, CatalogView, Difficulty, Gender, WordRecord};
