/*!
 * CSV import for custom vocabulary lists.
 *
 * Expected column layout, header row optional:
 * `german,english,gender,category,difficulty,pronunciation,example_de,example_en`
 * Only the first two columns are required. Rows failing validation are
 * skipped with a warning; the import succeeds as long as one row is usable.
 */

use anyhow::{Context, Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use serde::Serialize;
use std::path::Path;

use super::{Example, Gender, WordRecord};
use crate::file_utils::FileManager;

/// Custom imports start above the id range of the bundled vocabulary
const IMPORT_ID_BASE: u32 = 1000;

/// Outcome of a CSV import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    /// Words written to the output file
    pub imported: usize,
    /// Rows skipped because they were unusable
    pub skipped: usize,
}

#[derive(Debug, Serialize)]
struct VocabularyFileOut<'a> {
    words: &'a [WordRecord],
}

/// Convert a CSV file into a vocabulary JSON source.
///
/// Returns the number of imported and skipped rows. Fails when the CSV cannot
/// be read or when no row yields a valid word.
pub fn import_csv<P: AsRef<Path>, Q: AsRef<Path>>(
    csv_path: P,
    output_path: Q,
) -> Result<ImportReport> {
    let csv_path = csv_path.as_ref();
    let output_path = output_path.as_ref();

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(csv_path)
        .with_context(|| format!("Failed to open CSV file: {:?}", csv_path))?;

    let records: Vec<csv::StringRecord> = reader
        .records()
        .collect::<Result<_, _>>()
        .with_context(|| format!("Failed to read CSV file: {:?}", csv_path))?;

    let mut rows = records.as_slice();

    // Header row detection: the original files sometimes carry one
    if let Some(first) = rows.first() {
        let leading = first.get(0).unwrap_or("").trim().to_lowercase();
        if leading == "german" || leading == "word" {
            rows = &rows[1..];
        }
    }

    let progress = ProgressBar::new(rows.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:30} {pos}/{len} rows").unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut words = Vec::new();
    let mut skipped = 0;
    let mut next_id = IMPORT_ID_BASE;

    for (row_num, row) in rows.iter().enumerate() {
        progress.inc(1);
        match parse_row(row, next_id) {
            Some(word) => {
                words.push(word);
                next_id += 1;
            }
            None => {
                warn!("Skipping CSV row {}: missing german or english text", row_num + 1);
                skipped += 1;
            }
        }
    }
    progress.finish_and_clear();

    if words.is_empty() {
        return Err(anyhow!("No valid words found in CSV file: {:?}", csv_path));
    }

    FileManager::write_json_atomic(output_path, &VocabularyFileOut { words: &words })
        .with_context(|| format!("Failed to write vocabulary file: {:?}", output_path))?;

    info!("Imported {} words to {:?} ({} rows skipped)", words.len(), output_path, skipped);

    Ok(ImportReport { imported: words.len(), skipped })
}

fn column(row: &csv::StringRecord, idx: usize) -> &str {
    row.get(idx).map(|c| c.trim()).unwrap_or("")
}

fn parse_row(row: &csv::StringRecord, id: u32) -> Option<WordRecord> {
    let german = column(row, 0);
    let english = column(row, 1);

    if german.is_empty() || english.is_empty() {
        return None;
    }

    let gender = match column(row, 2) {
        "" => Gender::None,
        raw => raw.parse().unwrap_or_else(|e: String| {
            warn!("{}, treating word '{}' as genderless", e, german);
            Gender::None
        }),
    };

    let category = match column(row, 3) {
        "" => "custom".to_string(),
        raw => raw.to_lowercase(),
    };

    let difficulty = match column(row, 4) {
        "" => Default::default(),
        raw => raw.parse().unwrap_or_else(|e: String| {
            warn!("{}, defaulting word '{}' to A1", e, german);
            Default::default()
        }),
    };

    let mut examples = Vec::new();
    let example_german = column(row, 6);
    let example_english = column(row, 7);
    if !example_german.is_empty() && !example_english.is_empty() {
        examples.push(Example {
            german: example_german.to_string(),
            english: example_english.to_string(),
        });
    }

    Some(WordRecord {
        id,
        german: german.to_string(),
        english: english.to_string(),
        gender,
        pronunciation: column(row, 5).to_string(),
        category,
        difficulty,
        examples,
    })
}
