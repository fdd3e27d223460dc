//! Chart-ready projections of history windows.

use std::path::{Path, PathBuf};

use pricetrail_warehouse::{write_json_atomic, HistoryArchive};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::{HistoryStore, ItemId, PricePoint, Resolution, StoredTimestamp};

const BORDER_COLOR: &str = "#2c3e50";
const BACKGROUND_COLOR: &str = "rgba(44, 62, 80, 0.1)";
const BORDER_WIDTH: u32 = 2;
const LINE_TENSION: f64 = 0.3;

/// Label/value series for one item at one resolution, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<u64>,
    pub description: &'static str,
}

/// Line-chart document written for external rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartDocument {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<u64>,
    pub border_color: &'static str,
    pub background_color: &'static str,
    pub border_width: u32,
    pub fill: bool,
    pub tension: f64,
}

impl From<ChartSeries> for ChartDocument {
    fn from(series: ChartSeries) -> Self {
        Self {
            labels: series.labels,
            datasets: vec![ChartDataset {
                label: format!("Price ({})", series.description),
                data: series.values,
                border_color: BORDER_COLOR,
                background_color: BACKGROUND_COLOR,
                border_width: BORDER_WIDTH,
                fill: true,
                tension: LINE_TENSION,
            }],
        }
    }
}

/// Build the series for `item` at `resolution`.
///
/// `None` when the item has no points at that resolution; an empty series is
/// never returned.
pub fn build_series(store: &HistoryStore, item: &str, resolution: Resolution) -> Option<ChartSeries> {
    let window = store.window(item, resolution).filter(|window| !window.is_empty())?;

    let include_time = resolution.labels_include_time();
    let labels = window
        .iter()
        .map(|point| format_label(point.timestamp(), include_time))
        .collect();
    let values = window.iter().map(PricePoint::price).collect();

    Some(ChartSeries {
        labels,
        values,
        description: resolution.description(),
    })
}

/// Write the chart document for `item` at `resolution` to `path`.
///
/// Returns `false` when there is nothing to chart or the write fails.
pub fn export_to_file(
    store: &HistoryStore,
    item: &str,
    resolution: Resolution,
    path: &Path,
) -> bool {
    let Some(series) = build_series(store, item, resolution) else {
        return false;
    };

    match write_json_atomic(path, &ChartDocument::from(series)) {
        Ok(()) => {
            info!(item, resolution = %resolution, path = %path.display(), "chart exported");
            true
        }
        Err(err) => {
            error!(item, resolution = %resolution, error = %err, "chart export failed");
            false
        }
    }
}

/// Export every resolution with data for `item` to the archive's default
/// chart paths. Returns the files written.
///
/// Nothing is written when the id cannot be used as a file name.
pub fn export_item(store: &HistoryStore, archive: &HistoryArchive, item: &ItemId) -> Vec<PathBuf> {
    let stem = match item.as_file_stem() {
        Ok(stem) => stem,
        Err(err) => {
            warn!(item = %item, error = %err, "item id cannot name a chart file");
            return Vec::new();
        }
    };

    Resolution::ALL
        .into_iter()
        .filter_map(|resolution| {
            let path = archive.chart_path(stem, resolution.as_str());
            export_to_file(store, item.as_str(), resolution, &path).then_some(path)
        })
        .collect()
}

fn format_label(timestamp: &StoredTimestamp, include_time: bool) -> String {
    match timestamp {
        StoredTimestamp::Utc(instant) => instant.format_label(include_time),
        StoredTimestamp::Unparsed(raw) => raw.clone(),
    }
}
