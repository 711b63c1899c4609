/*!
 * Tests for vocabulary catalog loading and filtering
 */

use std::collections::HashSet;
use wortschatz::vocabulary::{Catalog, Difficulty, Gender};
use wortschatz::VocabularyError;

use crate::common;

#[test]
fn test_loadDir_withSampleFile_shouldLoadAllWords() {
    let dir = common::create_temp_dir().unwrap();
    common::create_sample_vocabulary(dir.path(), "sample.json").unwrap();

    let catalog = Catalog::load_dir(dir.path()).unwrap();

    assert_eq!(catalog.len(), 5);
    let hund = catalog.word(1).unwrap();
    assert_eq!(hund.german, "Hund");
    assert_eq!(hund.gender, Gender::Masculine);
    assert_eq!(hund.pronunciation, "hoont");
    assert_eq!(hund.examples.len(), 1);
    assert_eq!(hund.examples[0].english, "The dog barks.");
}

#[test]
fn test_loadDir_withNullGender_shouldFallBackToNone() {
    let dir = common::create_temp_dir().unwrap();
    common::create_sample_vocabulary(dir.path(), "sample.json").unwrap();

    let catalog = Catalog::load_dir(dir.path()).unwrap();
    assert_eq!(catalog.word(5).unwrap().gender, Gender::None);
}

#[test]
fn test_loadDir_withMalformedSource_shouldSkipItAndLoadOthers() {
    let dir = common::create_temp_dir().unwrap();
    common::create_sample_vocabulary(dir.path(), "good.json").unwrap();
    common::create_test_file(dir.path(), "broken.json", "{ this is not json").unwrap();

    let catalog = Catalog::load_dir(dir.path()).unwrap();
    assert_eq!(catalog.len(), 5);
}

#[test]
fn test_loadDir_withInvalidRecordsMixedIn_shouldSkipOnlyThose() {
    let dir = common::create_temp_dir().unwrap();
    common::create_test_file(
        dir.path(),
        "mixed.json",
        r#"{
          "words": [
            {"id": 1, "german": "Haus", "english": "house", "gender": "neuter"},
            {"id": 2, "german": "", "english": "empty german"},
            {"id": 3, "german": "Tier", "english": "animal", "gender": "dragon"},
            {"german": "Ohne", "english": "missing id"},
            {"id": 4, "german": "Milch", "english": "milk", "gender": "feminine"}
          ]
        }"#,
    )
    .unwrap();

    let catalog = Catalog::load_dir(dir.path()).unwrap();

    // Only the two fully valid records survive
    assert_eq!(catalog.len(), 2);
    assert!(catalog.word(1).is_some());
    assert!(catalog.word(4).is_some());
    assert!(catalog.word(2).is_none());
    assert!(catalog.word(3).is_none());
}

#[test]
fn test_loadDir_withOnlyMalformedSources_shouldFailEmptyCatalog() {
    let dir = common::create_temp_dir().unwrap();
    common::create_test_file(dir.path(), "broken.json", "[1, 2, 3").unwrap();

    let result = Catalog::load_dir(dir.path());
    assert!(matches!(result, Err(VocabularyError::EmptyCatalog)));
}

#[test]
fn test_loadDir_withMissingDirectory_shouldFailEmptyCatalog() {
    let dir = common::create_temp_dir().unwrap();
    let result = Catalog::load_dir(dir.path().join("does-not-exist"));
    assert!(matches!(result, Err(VocabularyError::EmptyCatalog)));
}

#[test]
fn test_loadDir_withMultipleSources_shouldMergeCatalogs() {
    let dir = common::create_temp_dir().unwrap();
    common::create_sample_vocabulary(dir.path(), "base.json").unwrap();
    common::create_test_file(
        dir.path(),
        "extra.json",
        r#"{"words": [{"id": 100, "german": "Apfel", "english": "apple",
                       "gender": "masculine", "category": "food", "difficulty": "A1"}]}"#,
    )
    .unwrap();

    let catalog = Catalog::load_dir(dir.path()).unwrap();
    assert_eq!(catalog.len(), 6);
    assert_eq!(catalog.categories(), vec!["abstract", "animals", "food", "verbs"]);
    assert_eq!(catalog.words_in_category("food").len(), 2);
}

#[test]
fn test_view_withCategoryAndDifficulty_shouldApplyBothFilters() {
    let dir = common::create_temp_dir().unwrap();
    common::create_sample_vocabulary(dir.path(), "sample.json").unwrap();
    let catalog = Catalog::load_dir(dir.path()).unwrap();

    let mut categories = HashSet::new();
    categories.insert("animals".to_string());
    categories.insert("abstract".to_string());

    // The B1 abstract word is excluded by the A1 ceiling
    let view = catalog.view(&categories, Difficulty::A1).unwrap();
    assert_eq!(view.len(), 2);
    assert!(view.iter().all(|w| w.category == "animals"));
}

#[test]
fn test_fullView_shouldIncludeEveryWord() {
    let dir = common::create_temp_dir().unwrap();
    common::create_sample_vocabulary(dir.path(), "sample.json").unwrap();
    let catalog = Catalog::load_dir(dir.path()).unwrap();

    let view = catalog.full_view().unwrap();
    assert_eq!(view.len(), catalog.len());
}
