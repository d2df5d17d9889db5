//! Integration tests for loading, saving and backing up history files

use presence_dedup::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

/// Helper to create a history file with given content
fn create_history_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

#[test]
fn test_load_clean_save_roundtrip() {
    let input = create_history_file(
        r#"[
  {"date": "2024-01-01", "presences": [
    {"nom": "Dupont", "prenom": "Jean", "date": "2024-01-01T08:00:00Z", "niveau": "Bloc"},
    {"nom": "dupont", "prenom": "jean", "date": "2024-01-01T08:00:00Z"}
  ]},
  {"date": "2024-01-02"}
]"#,
    );
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out").join("presence-history-cleaned.json");

    let history = load_history(input.path()).unwrap();
    let cleaned = deduplicate(history).unwrap();
    save_history(&output, &cleaned.history).unwrap();

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.ends_with('\n'));
    assert!(written.contains("\n  {"), "expected two-space indentation");

    let value: Value = serde_json::from_str(&written).unwrap();
    assert_eq!(
        value,
        json!([
            {"date": "2024-01-01", "presences": [
                {"nom": "Dupont", "prenom": "Jean", "date": "2024-01-01T08:00:00Z", "niveau": "Bloc"}
            ]},
            {"date": "2024-01-02"}
        ])
    );
}

#[test]
fn test_backup_copies_original_bytes() {
    let original = "[{\"date\": \"2024-01-01\"}]";
    let input = create_history_file(original);
    let dir = TempDir::new().unwrap();
    let backup = dir.path().join("presence-history-backup.json");

    backup_history(input.path(), &backup).unwrap();

    assert_eq!(fs::read_to_string(&backup).unwrap(), original);
}

#[test]
fn test_backup_never_overwrites() {
    let input = create_history_file("[{\"date\": \"2024-01-02\"}]");
    let dir = TempDir::new().unwrap();
    let backup = dir.path().join("presence-history-backup.json");
    fs::write(&backup, "earlier original").unwrap();

    let err = backup_history(input.path(), &backup).unwrap_err();

    assert!(err.to_string().contains("already exists"));
    assert_eq!(fs::read_to_string(&backup).unwrap(), "earlier original");
}

#[test]
fn test_missing_file_is_error() {
    let dir = TempDir::new().unwrap();
    let err = load_history(&dir.path().join("presence-history.json")).unwrap_err();
    assert!(err.to_string().contains("Failed to open history file"));
}

#[test]
fn test_invalid_json_is_error() {
    let input = create_history_file("[{\"date\": \"2024-01-01\",");
    let err = load_history(input.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse history file"));
}

#[test]
fn test_top_level_must_be_array() {
    let input = create_history_file("{\"date\": \"2024-01-01\", \"presences\": []}");
    assert!(load_history(input.path()).is_err());
}

#[test]
fn test_empty_history() {
    let input = create_history_file("[]");
    let history = load_history(input.path()).unwrap();
    let cleaned = deduplicate(history).unwrap();

    assert!(cleaned.history.is_empty());
    assert_eq!(cleaned.report.total_days, 0);
    assert!(!cleaned.report.has_duplicates());
}
