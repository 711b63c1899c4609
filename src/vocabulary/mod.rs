/*!
 * Vocabulary catalog: word records, loading and filtered views.
 *
 * Vocabulary sources are JSON files with a top-level `words` list. Records
 * failing validation are skipped with a warning rather than failing the whole
 * source, and a malformed source is skipped rather than failing the load.
 * Only an entirely empty result is an error.
 */

use log::{debug, warn};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::errors::VocabularyError;
use crate::file_utils::FileManager;

pub mod import;

/// Grammatical gender of a German noun, driving the display color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Masculine,
    Feminine,
    Neuter,
    /// Non-noun vocabulary (verbs, adjectives, phrases)
    #[default]
    None,
}

impl Gender {
    /// Definite article for the gender, if any
    pub fn article(&self) -> Option<&'static str> {
        match self {
            Gender::Masculine => Some("der"),
            Gender::Feminine => Some("die"),
            Gender::Neuter => Some("das"),
            Gender::None => None,
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "masculine" | "der" | "m" => Ok(Gender::Masculine),
            "feminine" | "die" | "f" => Ok(Gender::Feminine),
            "neuter" | "das" | "n" => Ok(Gender::Neuter),
            "none" | "" => Ok(Gender::None),
            other => Err(format!("Unknown gender: {}", other)),
        }
    }
}

/// CEFR difficulty level, ordered from easiest to hardest
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub enum Difficulty {
    #[default]
    A1,
    A2,
    B1,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::A1 => "A1",
            Difficulty::A2 => "A2",
            Difficulty::B1 => "B1",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "A1" => Ok(Difficulty::A1),
            "A2" => Ok(Difficulty::A2),
            "B1" => Ok(Difficulty::B1),
            other => Err(format!("Unknown difficulty level: {}", other)),
        }
    }
}

/// Example sentence pair attached to a word
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Example {
    /// German sentence
    pub german: String,

    /// English translation
    pub english: String,
}

/// A single vocabulary entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordRecord {
    /// Unique id within the catalog
    pub id: u32,

    /// German text
    pub german: String,

    /// English translation
    pub english: String,

    /// Grammatical gender; null or absent in the source means none
    #[serde(default, deserialize_with = "gender_or_none")]
    pub gender: Gender,

    /// Phonetic hint
    #[serde(default)]
    pub pronunciation: String,

    /// Free-form category tag
    #[serde(default = "default_category")]
    pub category: String,

    /// CEFR difficulty level
    #[serde(default)]
    pub difficulty: Difficulty,

    /// Example sentences
    #[serde(default)]
    pub examples: Vec<Example>,
}

// A vocabulary source may carry `"gender": null` for non-noun entries
fn gender_or_none<'de, D>(deserializer: D) -> Result<Gender, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Gender>::deserialize(deserializer)?.unwrap_or_default())
}

fn default_category() -> String {
    "general".to_string()
}

impl WordRecord {
    /// Check the record invariants: non-empty german and english text
    pub fn validate(&self) -> Result<(), String> {
        if self.german.trim().is_empty() {
            return Err(format!("Word {} has empty german text", self.id));
        }
        if self.english.trim().is_empty() {
            return Err(format!("Word {} has empty english text", self.id));
        }
        Ok(())
    }
}

impl fmt::Display for WordRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.gender.article() {
            Some(article) => write!(f, "{} {} ({})", article, self.german, self.english),
            None => write!(f, "{} ({})", self.german, self.english),
        }
    }
}

/// Top-level shape of a vocabulary source file
#[derive(Debug, Deserialize)]
struct VocabularyFile {
    #[serde(default)]
    words: Vec<serde_json::Value>,
}

/// Collection of validated word records with unique-id indexing
#[derive(Debug, Default)]
pub struct Catalog {
    words: Vec<WordRecord>,
    index: HashMap<u32, usize>,
}

impl Catalog {
    /// Build a catalog from records already in memory.
    ///
    /// Invalid and duplicate-id records are skipped with a warning. Fails with
    /// `EmptyCatalog` when nothing valid remains.
    pub fn from_records<I>(records: I) -> Result<Self, VocabularyError>
    where
        I: IntoIterator<Item = WordRecord>,
    {
        let mut catalog = Catalog::default();
        for record in records {
            catalog.push_record(record, Path::new("<memory>"));
        }
        catalog.finish()
    }

    /// Load every `*.json` vocabulary source in a directory.
    ///
    /// Sources are visited in path order so repeated loads are deterministic.
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Self, VocabularyError> {
        let dir = dir.as_ref();
        if !FileManager::dir_exists(dir) {
            warn!("Vocabulary directory not found: {:?}", dir);
            return Err(VocabularyError::EmptyCatalog);
        }

        let files = FileManager::find_files(dir, "json").map_err(|e| VocabularyError::Load {
            path: dir.to_path_buf(),
            reason: e.to_string(),
        })?;

        Self::load_files(&files)
    }

    /// Load the given vocabulary source files.
    ///
    /// A source that cannot be read or parsed is skipped with a warning; the
    /// remaining sources still load.
    pub fn load_files(paths: &[PathBuf]) -> Result<Self, VocabularyError> {
        let mut catalog = Catalog::default();

        for path in paths {
            match catalog.push_file(path) {
                Ok(count) => debug!("Loaded {} words from {:?}", count, path),
                Err(e) => warn!("Skipping vocabulary source: {}", e),
            }
        }

        catalog.finish()
    }

    fn finish(self) -> Result<Self, VocabularyError> {
        if self.words.is_empty() {
            return Err(VocabularyError::EmptyCatalog);
        }
        debug!("Catalog ready with {} words", self.words.len());
        Ok(self)
    }

    fn push_file(&mut self, path: &Path) -> Result<usize, VocabularyError> {
        let content = FileManager::read_to_string(path).map_err(|e| VocabularyError::Load {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let file: VocabularyFile =
            serde_json::from_str(&content).map_err(|e| VocabularyError::Load {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let mut count = 0;
        for value in file.words {
            match serde_json::from_value::<WordRecord>(value) {
                Ok(record) => {
                    if self.push_record(record, path) {
                        count += 1;
                    }
                }
                Err(e) => warn!("Skipping malformed word in {:?}: {}", path, e),
            }
        }

        Ok(count)
    }

    // Returns true if the record was accepted
    fn push_record(&mut self, record: WordRecord, source: &Path) -> bool {
        if let Err(reason) = record.validate() {
            warn!("Skipping invalid word in {:?}: {}", source, reason);
            return false;
        }

        if self.index.contains_key(&record.id) {
            warn!("Skipping duplicate word id {} in {:?}", record.id, source);
            return false;
        }

        self.index.insert(record.id, self.words.len());
        self.words.push(record);
        true
    }

    /// Look up a word by id
    pub fn word(&self, id: u32) -> Option<&WordRecord> {
        self.index.get(&id).map(|&i| &self.words[i])
    }

    /// All words in load order
    pub fn words(&self) -> &[WordRecord] {
        &self.words
    }

    /// Number of words in the catalog
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the catalog holds no words
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Sorted list of unique categories
    pub fn categories(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self.words.iter().map(|w| w.category.as_str()).collect();
        set.into_iter().map(|c| c.to_string()).collect()
    }

    /// All words in a specific category
    pub fn words_in_category(&self, category: &str) -> Vec<&WordRecord> {
        self.words.iter().filter(|w| w.category == category).collect()
    }

    /// Build a non-owning view restricted to the given categories and
    /// difficulty ceiling. An empty category set means every category.
    ///
    /// Fails with `EmptyCatalog` when the filter removes every word.
    pub fn view(
        &self,
        categories: &HashSet<String>,
        max_difficulty: Difficulty,
    ) -> Result<CatalogView<'_>, VocabularyError> {
        let words: Vec<&WordRecord> = self
            .words
            .iter()
            .filter(|w| w.difficulty <= max_difficulty)
            .filter(|w| categories.is_empty() || categories.contains(&w.category))
            .collect();

        if words.is_empty() {
            return Err(VocabularyError::EmptyCatalog);
        }

        Ok(CatalogView { words })
    }

    /// View over the full catalog
    pub fn full_view(&self) -> Result<CatalogView<'_>, VocabularyError> {
        self.view(&HashSet::new(), Difficulty::B1)
    }
}

/// Non-owning filtered subset of a catalog
#[derive(Debug, Clone)]
pub struct CatalogView<'a> {
    words: Vec<&'a WordRecord>,
}

impl<'a> CatalogView<'a> {
    /// Words in the view
    pub fn words(&self) -> &[&'a WordRecord] {
        &self.words
    }

    /// Number of words in the view
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the view is empty
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterate over the words in the view
    pub fn iter(&self) -> impl Iterator<Item = &'a WordRecord> + '_ {
        self.words.iter().copied()
    }
}
