use std::fs;
use std::path::PathBuf;

use entity_ingest::{IngestError, load_path, load_paths};
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn loads_bundled_dataset() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/companies.csv");
    let loaded = load_path(&path).unwrap();
    assert!(loaded.report.records >= 30);
    assert_eq!(loaded.report.skipped_rows, 0);
    assert_eq!(loaded.report.invalid_leis, 0);
    assert!(
        loaded
            .companies
            .iter()
            .any(|c| c.name == "Apple Inc." && c.lei.as_deref() == Some("HWUPKR0MPOU8FGXBT394"))
    );
}

#[test]
fn concatenates_sources_in_order() {
    let dir = TempDir::new().unwrap();
    let csv = write(&dir, "registry.csv", "name,country\nApple Inc.,US\n");
    let jsonl = write(
        &dir,
        "feed.ndjson",
        "{\"name\": \"BHP Group Ltd\", \"country\": \"AU\", \"lei\": \"WZE1WSENV6JSZFK0JC29\"}\n",
    );

    let loaded = load_paths([&csv, &jsonl]).unwrap();
    let names: Vec<_> = loaded.companies.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Apple Inc.", "BHP Group Ltd"]);
    assert_eq!(loaded.report.files, vec![csv, jsonl]);
    assert_eq!(loaded.report.invalid_leis, 1);
    assert!(loaded.companies[1].lei.is_none());
    assert_eq!(loaded.companies[1].source.as_deref(), Some("feed"));
}

#[test]
fn missing_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let err = load_path(&dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

#[test]
fn unsupported_extension_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "companies.xlsx", "");
    let err = load_path(&path).unwrap_err();
    assert!(matches!(err, IngestError::UnsupportedFormat { .. }));
}

#[test]
fn all_rows_invalid_is_empty_source() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "blank.csv", "name,country\n,US\nAcme,\n");
    let err = load_path(&path).unwrap_err();
    assert!(matches!(err, IngestError::EmptySource { .. }));
}

#[test]
fn first_failure_aborts_multi_load() {
    let dir = TempDir::new().unwrap();
    let good = write(&dir, "good.csv", "name,country\nApple Inc.,US\n");
    let bad = write(&dir, "bad.json", "not json");
    let err = load_paths([good, bad]).unwrap_err();
    assert!(matches!(err, IngestError::JsonParse { .. }));
}
