//! Integration tests for loading dataset files and resolving their location

mod common;

use common::{brief_dataset, verbose_dataset};
use marc_lookup::{
    Dataset, DatasetKind, DisplayMode, Formatter, LookupConfig, LookupError, MarcLookup,
};
use std::fs;
use tempfile::TempDir;

fn write_fixture(dir: &TempDir) {
    fs::write(
        dir.path().join("marc.json"),
        brief_dataset().to_json_pretty().unwrap(),
    )
    .unwrap();
    fs::write(
        dir.path().join("marc-verbose.json"),
        verbose_dataset().to_json_pretty().unwrap(),
    )
    .unwrap();
}

#[test]
fn test_load_brief_and_verbose_files() {
    let dir = TempDir::new().unwrap();
    write_fixture(&dir);

    let brief = Dataset::load(dir.path().join("marc.json"), DatasetKind::Brief).unwrap();
    assert_eq!(brief.len(), brief_dataset().len());
    assert!(brief.iter().all(|(_, record)| record.details.is_none()));

    let verbose =
        Dataset::load(dir.path().join("marc-verbose.json"), DatasetKind::Verbose).unwrap();
    let details = verbose.get("245").unwrap().details.as_ref().unwrap();
    assert_eq!(details.examples.len(), 7);
    let indicator_names: Vec<&String> = details.indicators.keys().collect();
    assert_eq!(
        indicator_names,
        vec!["First - Title added entry", "Second - Nonfiling characters"]
    );
}

#[test]
fn test_missing_file_reports_hint() {
    let dir = TempDir::new().unwrap();
    let err = Dataset::load(dir.path().join("marc.json"), DatasetKind::Brief).unwrap_err();
    match &err {
        LookupError::DatasetNotFound { path, hint } => {
            assert!(path.ends_with("marc.json"));
            assert!(hint.contains("marc.json"));
        },
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().starts_with("marc.json not found at "));
}

#[test]
fn test_corrupt_file_is_distinct_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("marc.json");
    fs::write(&path, "{\"020\": {\"Key\": \"020\"").unwrap();
    let err = Dataset::load(&path, DatasetKind::Brief).unwrap_err();
    assert!(matches!(err, LookupError::CorruptDataset { .. }));
}

#[test]
fn test_open_picks_file_by_mode() {
    let dir = TempDir::new().unwrap();
    write_fixture(&dir);
    let config = LookupConfig::new(dir.path());

    let brief = MarcLookup::open(&config, DisplayMode::Brief).unwrap();
    assert_eq!(brief.dataset().kind(), DatasetKind::Brief);

    let verbose = MarcLookup::open(&config, DisplayMode::Verbose).unwrap();
    assert_eq!(verbose.dataset().kind(), DatasetKind::Verbose);
    let blocks = verbose
        .lookup("245", DisplayMode::Verbose)
        .render(&Formatter::plain());
    assert!(blocks[0].contains("Definition:"));
}

#[test]
fn test_open_without_verbose_file_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("marc.json"),
        brief_dataset().to_json_pretty().unwrap(),
    )
    .unwrap();
    let config = LookupConfig::new(dir.path());

    assert!(MarcLookup::open(&config, DisplayMode::Brief).is_ok());
    let err = MarcLookup::open(&config, DisplayMode::Verbose).unwrap_err();
    assert!(err.hint().unwrap().contains("marc-verbose.json"));
}
