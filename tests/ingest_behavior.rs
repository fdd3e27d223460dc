//! Behavior-driven tests for snapshot ingestion
//!
//! A snapshot maps item ids to `{item_name, item_price}` records. These tests
//! drive snapshots through a tracker backed by a temporary archive.

use pricetrail_core::{ArchiveConfig, HistoryArchive, PriceTracker, Resolution, Snapshot, UtcDateTime};
use serde_json::json;
use std::fs;
use tempfile::tempdir;
use time::Duration;

fn t0() -> UtcDateTime {
    UtcDateTime::parse("2026-03-01T10:00:00Z").expect("valid timestamp")
}

fn snapshot(value: serde_json::Value) -> Snapshot {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("snapshot fixture must be an object, got {other}"),
    }
}

fn tracker_in(dir: &std::path::Path) -> PriceTracker {
    let archive = HistoryArchive::open(ArchiveConfig::from_data_dir(dir)).expect("archive opens");
    PriceTracker::open(archive)
}

// =============================================================================
// Ingestion Journeys
// =============================================================================

#[test]
fn valid_entries_are_recorded_and_saved() {
    // Given: A snapshot with two well-formed items
    let temp = tempdir().expect("tempdir");
    let mut tracker = tracker_in(temp.path());
    let prices = snapshot(json!({
        "2000005": { "item_name": "Red Potion", "item_price": "1,234 NESO" },
        "1302000": { "item_name": "Sword", "item_price": 50000 }
    }));

    // When: The snapshot is ingested
    let report = tracker.update(&prices, t0());

    // Then: Both items are admitted and every resolution file is written
    assert_eq!(report.processed, 2);
    assert_eq!(report.admitted, 2);
    assert_eq!(report.skipped.total(), 0);
    assert_eq!(report.saved, Resolution::ALL.to_vec());
    assert!(report.save_failures.is_empty());

    // And: The normalized prices are what the store holds
    let potion = tracker
        .store()
        .window("2000005", Resolution::Hour)
        .and_then(|window| window.latest())
        .expect("potion recorded");
    assert_eq!(potion.price(), 1_234);
    assert_eq!(potion.item_name(), "Red Potion");

    for resolution in Resolution::ALL {
        assert!(tracker.archive().history_path(resolution.as_str()).exists());
    }
}

#[test]
fn bad_entries_are_skipped_without_aborting_the_pass() {
    // Given: A snapshot mixing good and bad records
    let temp = tempdir().expect("tempdir");
    let mut tracker = tracker_in(temp.path());
    let prices = snapshot(json!({
        "good": { "item_name": "Elixir", "item_price": "900" },
        "no-price": { "item_name": "Ghost" },
        "empty-name": { "item_name": "", "item_price": 10 },
        "zero": { "item_name": "Dust", "item_price": 0 },
        "words": { "item_name": "Rumor", "item_price": "priceless" },
        "negative": { "item_name": "Debt", "item_price": -5 },
        "not-a-record": 42
    }));

    // When: The snapshot is ingested
    let report = tracker.update(&prices, t0());

    // Then: Only the good entry is recorded; the rest are counted as skipped
    assert_eq!(report.processed, 7);
    assert_eq!(report.admitted, 1);
    assert_eq!(report.skipped.total(), 6);
    assert_eq!(report.skipped.not_a_record, 1);
    assert_eq!(report.skipped.missing_fields, 3);
    assert_eq!(report.skipped.invalid_price, 2);
    assert_eq!(tracker.store().len(), 1);
}

#[test]
fn rerunning_within_the_hour_saves_nothing() {
    // Given: A tracker that already ingested a snapshot at T0
    let temp = tempdir().expect("tempdir");
    let mut tracker = tracker_in(temp.path());
    let prices = snapshot(json!({
        "2000005": { "item_name": "Red Potion", "item_price": 1000 }
    }));
    tracker.update(&prices, t0());
    let hourly_path = tracker.archive().history_path("1hour");
    let written = fs::read_to_string(&hourly_path).expect("hourly file");

    // When: The same snapshot is ingested 30 minutes later
    let report = tracker.update(&prices, t0() + Duration::minutes(30));

    // Then: No resolution accepts a point and nothing is rewritten
    assert_eq!(report.admitted, 0);
    assert!(report.saved.is_empty());
    assert_eq!(fs::read_to_string(&hourly_path).expect("hourly file"), written);
}

#[test]
fn only_changed_resolutions_are_rewritten() {
    // Given: A tracker that ingested at T0
    let temp = tempdir().expect("tempdir");
    let mut tracker = tracker_in(temp.path());
    let prices = snapshot(json!({
        "2000005": { "item_name": "Red Potion", "item_price": 1000 }
    }));
    tracker.update(&prices, t0());

    // When: The next snapshot arrives two hours later
    let report = tracker.update(&prices, t0() + Duration::hours(2));

    // Then: Only the hourly file is saved
    assert_eq!(report.admitted, 1);
    assert_eq!(report.saved, vec![Resolution::Hour]);
}

#[test]
fn history_survives_reopening_the_archive() {
    // Given: A tracker that recorded two hourly points
    let temp = tempdir().expect("tempdir");
    let prices = snapshot(json!({
        "2000005": { "item_name": "Red Potion", "item_price": 1000 }
    }));
    {
        let mut tracker = tracker_in(temp.path());
        tracker.update(&prices, t0());
        tracker.update(&prices, t0() + Duration::hours(1));
    }

    // When: A new tracker is opened on the same directory
    let mut reopened = tracker_in(temp.path());

    // Then: The history is restored and the gate remembers the last point
    assert!(reopened.load_failures().is_empty());
    let hourly = reopened
        .store()
        .window("2000005", Resolution::Hour)
        .expect("hourly window");
    assert_eq!(hourly.len(), 2);

    let report = reopened.update(&prices, t0() + Duration::minutes(90));
    assert_eq!(report.admitted, 0);
}

#[test]
fn snapshot_file_is_read_from_disk() {
    // Given: A snapshot file in the data directory
    let temp = tempdir().expect("tempdir");
    let mut tracker = tracker_in(temp.path());
    let path = tracker.archive().config().snapshot_path();
    fs::write(
        &path,
        r#"{"2000005": {"item_name": "Red Potion", "item_price": "2,500 NESO"}}"#,
    )
    .expect("write snapshot");

    // When: The tracker ingests from the file
    let update = tracker.update_from_file(&path, t0());

    // Then: The entry is recorded with its normalized price
    assert!(update.snapshot_error.is_none());
    assert_eq!(update.report.admitted, 1);
    let latest = tracker
        .store()
        .window("2000005", Resolution::Day)
        .and_then(|window| window.latest())
        .expect("daily point");
    assert_eq!(latest.price(), 2_500);
}

#[test]
fn distinct_snapshot_keys_stay_distinct_items() {
    // Given: Keys that differ only by whitespace, plus one with a slash
    let temp = tempdir().expect("tempdir");
    let mut tracker = tracker_in(temp.path());
    let prices = snapshot(json!({
        "a": { "item_name": "Apple", "item_price": 10 },
        "a ": { "item_name": "Apple (spaced)", "item_price": 20 },
        "x/y": { "item_name": "Slashed", "item_price": 30 }
    }));

    // When: The snapshot is ingested
    let report = tracker.update(&prices, t0());

    // Then: Every entry is tracked under its own key and nothing is skipped
    assert_eq!(report.processed, 3);
    assert_eq!(report.admitted, 3);
    assert_eq!(report.skipped.total(), 0);
    assert_eq!(tracker.store().len(), 3);
    let spaced = tracker
        .store()
        .window("a ", Resolution::Hour)
        .and_then(|window| window.latest())
        .expect("spaced key recorded");
    assert_eq!(spaced.price(), 20);
}
