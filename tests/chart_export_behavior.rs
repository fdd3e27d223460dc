//! Behavior-driven tests for chart export
//!
//! Charts project one item's window into labels and values and can be
//! written as line-chart documents for an external renderer.

use pricetrail_core::chart::{build_series, export_item, export_to_file};
use pricetrail_core::persistence::load;
use pricetrail_core::{ArchiveConfig, HistoryArchive, HistoryStore, ItemId, Resolution, UtcDateTime};
use serde_json::Value;
use std::fs;
use tempfile::tempdir;
use time::Duration;

fn t0() -> UtcDateTime {
    UtcDateTime::parse("2026-03-01T10:00:00Z").expect("valid timestamp")
}

fn potion() -> ItemId {
    ItemId::new("2000005")
}

fn store_with_two_hours() -> HistoryStore {
    let mut store = HistoryStore::new();
    store.admit(&potion(), "Red Potion", 1_000, t0());
    store.admit(&potion(), "Red Potion", 1_250, t0() + Duration::minutes(65));
    store
}

// =============================================================================
// Series
// =============================================================================

#[test]
fn hourly_series_labels_include_time() {
    // Given: Two hourly points for an item
    let store = store_with_two_hours();

    // When: The hourly series is built
    let series = build_series(&store, "2000005", Resolution::Hour).expect("series");

    // Then: Labels carry date and time, values follow in order
    assert_eq!(series.labels, vec!["03/01 10:00", "03/01 11:05"]);
    assert_eq!(series.values, vec![1_000, 1_250]);
    assert_eq!(series.description, "1 week (hourly)");
}

#[test]
fn daily_series_labels_are_date_only() {
    // Given: One daily point
    let store = store_with_two_hours();

    // When: The daily series is built
    let series = build_series(&store, "2000005", Resolution::Day).expect("series");

    // Then: The label omits the time of day
    assert_eq!(series.labels, vec!["03/01"]);
    assert_eq!(series.values, vec![1_000]);
}

#[test]
fn unknown_item_has_no_series() {
    // Given: A store without the requested item
    let store = store_with_two_hours();

    // When / Then: No series is produced at any resolution
    for resolution in Resolution::ALL {
        assert!(build_series(&store, "9999999", resolution).is_none());
    }
}

#[test]
fn unparseable_timestamp_is_used_as_label_verbatim() {
    // Given: A loaded hourly history whose point has an odd timestamp
    let temp = tempdir().expect("tempdir");
    let archive = HistoryArchive::open(ArchiveConfig::from_data_dir(temp.path())).expect("open");
    fs::write(
        archive.history_path("1hour"),
        r#"{"2000005": [{"timestamp": "around noon", "price": 5, "item_name": "Red Potion"}]}"#,
    )
    .expect("seed hourly file");
    let store = load(&archive).store;

    // When: The hourly series is built
    let series = build_series(&store, "2000005", Resolution::Hour).expect("series");

    // Then: The raw text becomes the label
    assert_eq!(series.labels, vec!["around noon"]);
}

// =============================================================================
// Export
// =============================================================================

#[test]
fn exported_document_is_ready_for_a_line_chart() {
    // Given: Hourly data and a target path in a directory that does not exist yet
    let temp = tempdir().expect("tempdir");
    let store = store_with_two_hours();
    let path = temp.path().join("web").join("potion_hourly.json");

    // When: The chart is exported
    let exported = export_to_file(&store, "2000005", Resolution::Hour, &path);

    // Then: The document holds labels and one styled dataset
    assert!(exported);
    let document: Value =
        serde_json::from_str(&fs::read_to_string(&path).expect("chart file")).expect("json");
    assert_eq!(document["labels"][1], "03/01 11:05");
    let dataset = &document["datasets"][0];
    assert_eq!(dataset["label"], "Price (1 week (hourly))");
    assert_eq!(dataset["data"], serde_json::json!([1_000, 1_250]));
    assert_eq!(dataset["borderColor"], "#2c3e50");
    assert_eq!(dataset["backgroundColor"], "rgba(44, 62, 80, 0.1)");
    assert_eq!(dataset["borderWidth"], 2);
    assert_eq!(dataset["fill"], true);
    assert_eq!(dataset["tension"], 0.3);
}

#[test]
fn exporting_without_data_writes_no_file() {
    // Given: An empty store
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("empty.json");

    // When: An export is attempted
    let exported = export_to_file(&HistoryStore::new(), "2000005", Resolution::Day, &path);

    // Then: It reports failure and leaves no file behind
    assert!(!exported);
    assert!(!path.exists());
}

#[test]
fn failed_write_reports_false_instead_of_failing() {
    // Given: Hourly data and a target path occupied by a directory
    let temp = tempdir().expect("tempdir");
    let store = store_with_two_hours();
    let path = temp.path().join("blocked.json");
    fs::create_dir_all(&path).expect("blocking dir");

    // When: The chart is exported there
    let exported = export_to_file(&store, "2000005", Resolution::Hour, &path);

    // Then: The export reports failure and the directory is untouched
    assert!(!exported);
    assert!(path.is_dir());
    assert!(!temp.path().join("blocked.json.tmp").exists());
}

#[test]
fn path_like_item_ids_are_not_exported_to_default_paths() {
    // Given: History for an item whose key contains a path separator
    let temp = tempdir().expect("tempdir");
    let archive = HistoryArchive::open(ArchiveConfig::from_data_dir(temp.path())).expect("open");
    let mut store = HistoryStore::new();
    let slashed = ItemId::new("../escape");
    store.admit(&slashed, "Escape", 1, t0());

    // When: All charts for the item are exported
    let written = export_item(&store, &archive, &slashed);

    // Then: No file is derived from the id
    assert!(written.is_empty());
    assert!(!temp.path().join("escape_1hour.json").exists());
}

#[test]
fn exporting_an_item_writes_one_file_per_resolution_with_data() {
    // Given: An item with history at every resolution
    let temp = tempdir().expect("tempdir");
    let archive = HistoryArchive::open(ArchiveConfig::from_data_dir(temp.path())).expect("open");
    let store = store_with_two_hours();

    // When: All charts for the item are exported
    let written = export_item(&store, &archive, &potion());

    // Then: Three files land in the archive's history directory
    assert_eq!(written.len(), 3);
    assert_eq!(written[0], archive.chart_path("2000005", "1hour"));
    assert!(written.iter().all(|path| path.exists()));
}
