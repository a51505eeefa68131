//! Integration tests for the watchlens ingestion and aggregation pipeline
//!
//! These tests use the fixture export in `tests/fixtures/` to verify the
//! end-to-end flow: file read, shape check, normalization, session state,
//! and filtered aggregation.

use std::path::PathBuf;

use watchlens_core::{Error, HistorySession, YearRange};

/// Get the path to a fixture file
fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

// ============================================
// Ingestion
// ============================================

#[test]
fn test_load_fixture_export() {
    watchlens_core::logging::init_test();

    let session = HistorySession::load(&fixture_path("watch-history.json"))
        .expect("fixture should load");

    // 11 records: 6 valid, 3 ads (marker, missing channel, junk element),
    // 2 dropped (bad timestamp, missing titleUrl)
    assert_eq!(session.event_count(), 6);
    assert_eq!(session.ad_count(), 3);
    assert_eq!(session.year_bounds(), YearRange::new(2022, 2024));
}

#[test]
fn test_invalid_json_file_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("watch-history.json");
    std::fs::write(&path, "this is not json").unwrap();

    let err = HistorySession::load(&path).unwrap_err();
    assert!(matches!(err, Error::InvalidFormat(_)));
}

#[test]
fn test_non_array_file_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("watch-history.json");
    std::fs::write(&path, r#"{"records": []}"#).unwrap();

    let err = HistorySession::load(&path).unwrap_err();
    assert!(matches!(err, Error::InvalidFormat(_)));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = HistorySession::load(&fixture_path("does-not-exist.json")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

// ============================================
// Aggregation over the full range
// ============================================

#[test]
fn test_full_range_summary() {
    let session = HistorySession::load(&fixture_path("watch-history.json")).unwrap();
    let summary = session.summary().expect("full range has events");

    assert_eq!(summary.total_count, 6);
    assert_eq!(summary.ad_count, 3);
    assert_eq!(summary.unique_channel_count, 3);

    assert_eq!(
        summary.top_channels,
        vec![
            ("TechTalks".to_string(), 3),
            ("Ch Music".to_string(), 2),
            ("Cooking Daily".to_string(), 1),
        ]
    );

    assert_eq!(
        summary.monthly_series,
        vec![
            ("2022-03".to_string(), 1),
            ("2023-01".to_string(), 2),
            ("2024-01".to_string(), 2),
            ("2024-06".to_string(), 1),
        ]
    );

    assert_eq!(summary.min_date.to_rfc3339(), "2022-03-05T10:00:00+00:00");
    assert_eq!(summary.max_date.to_rfc3339(), "2024-06-30T23:45:00+00:00");

    assert_eq!(summary.hourly_histogram[10], 3);
    assert_eq!(summary.hourly_histogram[22], 1);
    assert_eq!(
        summary.hourly_histogram.iter().sum::<u64>(),
        summary.total_count
    );
}

// ============================================
// Year-range filtering
// ============================================

#[test]
fn test_filtered_summary_recomputed_fresh() {
    let mut session = HistorySession::load(&fixture_path("watch-history.json")).unwrap();

    session.set_filter(YearRange::single(2023));
    let summary = session.summary().expect("2023 has events");
    assert_eq!(summary.total_count, 2);
    assert_eq!(summary.unique_channel_count, 1);
    assert_eq!(summary.top_channels, vec![("TechTalks".to_string(), 2)]);
    // Dataset-level ad count survives filtering unchanged.
    assert_eq!(summary.ad_count, 3);

    // Widening again re-derives the full summary; nothing was mutated.
    session.set_filter(session.year_bounds());
    let full = session.summary().unwrap();
    assert_eq!(full.total_count, 6);
}

#[test]
fn test_range_past_the_data_reports_empty() {
    let mut session = HistorySession::load(&fixture_path("watch-history.json")).unwrap();

    // A range with no overlap with the data stays exactly as requested and
    // yields no summary, rather than being pulled back inside the bounds.
    session.set_filter(YearRange::new(2030, 2031));
    assert_eq!(session.filter(), YearRange::new(2030, 2031));
    assert!(session.summary().is_none());
}

#[test]
fn test_one_year_range_is_usable() {
    let mut session = HistorySession::load(&fixture_path("watch-history.json")).unwrap();
    session.set_filter(YearRange::new(2022, 2022));
    let summary = session.summary().expect("2022 has one event");
    assert_eq!(summary.total_count, 1);
    assert_eq!(summary.top_channels, vec![("Ch Music".to_string(), 1)]);
}
