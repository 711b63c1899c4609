// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info};
use std::io::Write;
use std::path::PathBuf;

use crate::app_config::{Config, LogLevel};
use crate::app_controller::Controller;
use crate::file_utils::FileManager;
use crate::history::{HistoryTracker, achievements};
use crate::vocabulary::Difficulty;

mod app_config;
mod app_controller;
mod errors;
mod file_utils;
mod history;
mod selection;
mod vocabulary;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rotate vocabulary words in the terminal (default command)
    Run(RunArgs),

    /// Show learning statistics and achievements
    Stats(StatsArgs),

    /// Import a CSV word list as a vocabulary source
    Import(ImportArgs),

    /// Generate shell completions for wortschatz
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Vocabulary directory containing *.json sources
    #[arg(short, long, default_value_os_t = FileManager::default_vocabulary_dir())]
    vocab_dir: PathBuf,

    /// History file path
    #[arg(long, default_value_os_t = FileManager::default_history_path())]
    history_path: PathBuf,

    /// Configuration file path
    #[arg(short, long, default_value_os_t = FileManager::default_config_path())]
    config_path: PathBuf,

    /// Seconds between word rotations (overrides config)
    #[arg(short, long)]
    interval: Option<u64>,

    /// Restrict the rotation to a category (repeatable)
    #[arg(long = "category")]
    categories: Vec<String>,

    /// Highest difficulty level to include (overrides config)
    #[arg(short, long)]
    max_difficulty: Option<Difficulty>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            vocab_dir: FileManager::default_vocabulary_dir(),
            history_path: FileManager::default_history_path(),
            config_path: FileManager::default_config_path(),
            interval: None,
            categories: Vec::new(),
            max_difficulty: None,
            log_level: None,
        }
    }
}

#[derive(Parser, Debug)]
struct StatsArgs {
    /// History file path
    #[arg(long, default_value_os_t = FileManager::default_history_path())]
    history_path: PathBuf,
}

#[derive(Parser, Debug)]
struct ImportArgs {
    /// CSV file to import
    #[arg(value_name = "CSV_FILE")]
    csv_file: PathBuf,

    /// Output vocabulary file (defaults to <vocab-dir>/<csv-stem>.json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Vocabulary directory for the default output location
    #[arg(short, long, default_value_os_t = FileManager::default_vocabulary_dir())]
    vocab_dir: PathBuf,
}

/// wortschatz - passive German vocabulary learning
///
/// Rotates German words in the terminal on a timed schedule, picking each
/// next word adaptively from your display history.
#[derive(Parser, Debug)]
#[command(name = "wortschatz")]
#[command(version = "0.1.0")]
#[command(about = "Adaptive German vocabulary rotation")]
#[command(long_about = "wortschatz rotates German vocabulary in the terminal, choosing each next word \
by how recently and how often it was shown. Display history, streaks and \
achievements persist between sessions.

EXAMPLES:
    wortschatz                                  # Rotate words with default config
    wortschatz run -i 30                        # New word every 30 seconds
    wortschatz run --category animals           # Only the animals category
    wortschatz run -m A2                        # Only A1 and A2 words
    wortschatz stats                            # Show streaks and achievements
    wortschatz import words.csv                 # Import a custom word list
    wortschatz completions bash > ws.bash       # Generate bash completions

CONFIGURATION:
    Configuration and history live in the platform data directory by default.
    If the config file doesn't exist, a default one is created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {}\x1B[0m", color, now, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "wortschatz", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Stats(args)) => show_stats(args),
        Some(Commands::Import(args)) => run_import(args),
        Some(Commands::Run(args)) => run_rotation(args).await,
        None => run_rotation(RunArgs::default()).await,
    }
}

async fn run_rotation(options: RunArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let level: LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    // Load or create configuration
    let mut config = Config::load_or_create(&options.config_path)
        .with_context(|| format!("Failed to load config: {:?}", options.config_path))?;

    // Override config with CLI options if provided
    if let Some(interval) = options.interval {
        config.behavior.refresh_interval_secs = interval;
    }

    if !options.categories.is_empty() {
        config.learning.enabled_categories = options.categories.clone();
    }

    if let Some(max_difficulty) = options.max_difficulty {
        config.learning.max_difficulty = max_difficulty;
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let controller = Controller::with_config(config, &options.vocab_dir, &options.history_path)?;
    controller.run().await
}

fn show_stats(options: StatsArgs) -> Result<()> {
    let history = HistoryTracker::load_or_default(&options.history_path);
    let stats = history.stats();
    let today = chrono::Local::now().date_naive();

    println!("Total words viewed:   {}", stats.total_views);
    println!("Unique words seen:    {}", stats.unique_words_seen.len());
    println!(
        "Current streak:       {} days (longest {})",
        stats.current_streak_days, stats.longest_streak_days
    );
    println!("Study days:           {}", stats.total_study_days);
    println!(
        "Estimated study time: {}",
        format_study_time(history.estimated_study_time())
    );
    println!(
        "Today:                {}/{} words",
        history.words_shown_on(today),
        stats.daily_goal
    );

    if !stats.unlocked_achievements.is_empty() {
        println!("Achievements:");
        for id in &stats.unlocked_achievements {
            println!("  - {}", achievements::display_name(id));
        }
    }

    Ok(())
}

fn run_import(options: ImportArgs) -> Result<()> {
    let output = match options.output {
        Some(path) => path,
        None => {
            let stem = options
                .csv_file
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| "imported".to_string());
            options.vocab_dir.join(format!("{}.json", stem))
        }
    };

    let report = vocabulary::import::import_csv(&options.csv_file, &output)?;
    info!(
        "Imported {} words ({} rows skipped) into {:?}",
        report.imported, report.skipped, output
    );
    info!("Restart the rotation to pick up the new vocabulary");

    Ok(())
}

/// Format an estimated duration as hours and minutes
fn format_study_time(duration: chrono::Duration) -> String {
    let minutes = duration.num_minutes();
    if minutes >= 60 {
        format!("{}h {}m", minutes / 60, minutes % 60)
    } else {
        format!("{} minutes", minutes)
    }
}
