use anyhow::{Context, Result, anyhow};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::default::Default;
use std::path::Path;

use crate::file_utils::FileManager;
use crate::vocabulary::Difficulty;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Display behavior settings
    #[serde(default)]
    pub behavior: BehaviorConfig,

    /// Learning pool settings
    #[serde(default)]
    pub learning: LearningConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Display behavior settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BehaviorConfig {
    /// Seconds between word rotations
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,

    /// Words to view per day for the daily goal achievement
    #[serde(default = "default_daily_goal")]
    pub daily_goal: u32,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_refresh_interval_secs(),
            daily_goal: default_daily_goal(),
        }
    }
}

/// Learning pool settings restricting which words rotate
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LearningConfig {
    /// Enabled categories. Empty, or containing "all", means every category.
    #[serde(default)]
    pub enabled_categories: Vec<String>,

    /// Highest difficulty level included in the rotation
    #[serde(default = "default_max_difficulty")]
    pub max_difficulty: Difficulty,
}

impl LearningConfig {
    /// Category filter as a set, with the "all" sentinel resolved to "no filter"
    pub fn category_filter(&self) -> HashSet<String> {
        if self.enabled_categories.iter().any(|c| c == "all") {
            return HashSet::new();
        }
        self.enabled_categories.iter().cloned().collect()
    }
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            enabled_categories: Vec::new(),
            max_difficulty: default_max_difficulty(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Corresponding filter for the log facade
    pub fn to_level_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_refresh_interval_secs() -> u64 {
    60
}

fn default_daily_goal() -> u32 {
    20
}

fn default_max_difficulty() -> Difficulty {
    Difficulty::B1
}

impl Config {
    /// Load a configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config: Config = FileManager::read_json(&path)
            .with_context(|| format!("Failed to load config: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Save the configuration to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        FileManager::write_json_atomic(&path, self)
            .with_context(|| format!("Failed to save config: {:?}", path.as_ref()))
    }

    /// Load the configuration, writing a default one if the file is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        if FileManager::file_exists(&path) {
            Self::from_file(path)
        } else {
            let config = Config::default();
            config.save(&path)?;
            Ok(config)
        }
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.behavior.refresh_interval_secs == 0 {
            return Err(anyhow!("Refresh interval must be at least 1 second"));
        }

        if self.behavior.daily_goal == 0 {
            return Err(anyhow!("Daily goal must be at least 1 word"));
        }

        // An explicit category list must not be blank entries only
        if !self.learning.enabled_categories.is_empty()
            && self.learning.enabled_categories.iter().all(|c| c.trim().is_empty())
        {
            return Err(anyhow!("Enabled categories must contain at least one name"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            behavior: BehaviorConfig::default(),
            learning: LearningConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
