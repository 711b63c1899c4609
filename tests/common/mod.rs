/*!
 * Common test utilities for the wortschatz test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a small vocabulary source spanning two categories and all
/// difficulty levels
pub fn create_sample_vocabulary(dir: &Path, filename: &str) -> Result<PathBuf> {
    let content = r#"{
  "words": [
    {
      "id": 1,
      "german": "Hund",
      "english": "dog",
      "gender": "masculine",
      "pronunciation": "hoont",
      "category": "animals",
      "difficulty": "A1",
      "examples": [
        {"german": "Der Hund bellt.", "english": "The dog barks."}
      ]
    },
    {
      "id": 2,
      "german": "Katze",
      "english": "cat",
      "gender": "feminine",
      "category": "animals",
      "difficulty": "A1"
    },
    {
      "id": 3,
      "german": "Brot",
      "english": "bread",
      "gender": "neuter",
      "category": "food",
      "difficulty": "A2"
    },
    {
      "id": 4,
      "german": "Verantwortung",
      "english": "responsibility",
      "gender": "feminine",
      "category": "abstract",
      "difficulty": "B1"
    },
    {
      "id": 5,
      "german": "laufen",
      "english": "to run",
      "gender": null,
      "category": "verbs",
      "difficulty": "A1"
    }
  ]
}"#;
    create_test_file(dir, filename, content)
}
