/*!
 * Error types for the wortschatz application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or filtering vocabulary
#[derive(Error, Debug)]
pub enum VocabularyError {
    /// Error when a vocabulary source file is missing or malformed
    #[error("Failed to load vocabulary source {path:?}: {reason}")]
    Load {
        /// Path of the offending source file
        path: PathBuf,
        /// What went wrong while reading or parsing it
        reason: String,
    },

    /// Error when no valid word remains after loading and filtering
    #[error("No vocabulary words available after loading and filtering")]
    EmptyCatalog,
}

/// Errors that can occur when reading or writing the display history
#[derive(Error, Debug)]
pub enum HistoryError {
    /// Error when the persisted history cannot be parsed
    #[error("History file is corrupt: {0}")]
    Corrupt(String),

    /// Error when the history could not be written to disk
    #[error("Failed to write history file: {0}")]
    Write(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the vocabulary catalog
    #[error("Vocabulary error: {0}")]
    Vocabulary(#[from] VocabularyError),

    /// Error from the history store
    #[error("History error: {0}")]
    History(#[from] HistoryError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
