//! Load and save a [`HistoryStore`] as one archive file per resolution.
//!
//! Both directions isolate failures per file: a resolution that cannot be
//! written or read is reported and the remaining resolutions still proceed.

use pricetrail_warehouse::{HistoryArchive, HistoryFile, PointRecord};
use tracing::{error, info};

use crate::{CoreError, HistoryStore, ItemId, PricePoint, Resolution, Window};

/// A resolution whose file could not be processed.
#[derive(Debug)]
pub struct ResolutionFailure {
    pub resolution: Resolution,
    pub error: CoreError,
}

/// Outcome of [`save`] / [`save_resolutions`].
#[derive(Debug, Default)]
pub struct SaveReport {
    pub written: Vec<Resolution>,
    pub failures: Vec<ResolutionFailure>,
}

impl SaveReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Outcome of [`load`]: the rehydrated store plus any skipped resolutions.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub store: HistoryStore,
    pub failures: Vec<ResolutionFailure>,
    pub records_loaded: usize,
}

/// Write every resolution's file.
pub fn save(store: &HistoryStore, archive: &HistoryArchive) -> SaveReport {
    save_resolutions(store, archive, &Resolution::ALL)
}

/// Write the files of the given resolutions only.
pub fn save_resolutions(
    store: &HistoryStore,
    archive: &HistoryArchive,
    resolutions: &[Resolution],
) -> SaveReport {
    let mut report = SaveReport::default();

    for resolution in Resolution::ALL
        .into_iter()
        .filter(|resolution| resolutions.contains(resolution))
    {
        let file = to_history_file(store, resolution);
        match archive.write_history(resolution.as_str(), &file) {
            Ok(()) => {
                info!(resolution = %resolution, items = file.len(), "history saved");
                report.written.push(resolution);
            }
            Err(err) => {
                error!(resolution = %resolution, error = %err, "history save failed");
                report.failures.push(ResolutionFailure {
                    resolution,
                    error: err.into(),
                });
            }
        }
    }

    report
}

/// Rebuild a store from the archive.
///
/// Missing files mean "no data yet". Malformed files are reported and that
/// resolution starts empty.
pub fn load(archive: &HistoryArchive) -> LoadReport {
    let mut report = LoadReport::default();

    for resolution in Resolution::ALL {
        let file = match archive.read_history(resolution.as_str()) {
            Ok(Some(file)) => file,
            Ok(None) => continue,
            Err(err) => {
                error!(resolution = %resolution, error = %err, "history load failed");
                report.failures.push(ResolutionFailure {
                    resolution,
                    error: err.into(),
                });
                continue;
            }
        };

        let item_count = file.len();
        for (raw_id, records) in file {
            let item = ItemId::new(raw_id);
            report.records_loaded += records.len();
            let points = records.into_iter().map(PricePoint::from);
            match Window::load_from(points, resolution.capacity()) {
                Ok(window) => report.store.insert_window(item, resolution, window),
                Err(err) => report.failures.push(ResolutionFailure {
                    resolution,
                    error: err.into(),
                }),
            }
        }
        info!(resolution = %resolution, items = item_count, "history file loaded");
    }

    info!(
        items = report.store.len(),
        records = report.records_loaded,
        "price history loaded"
    );
    report
}

fn to_history_file(store: &HistoryStore, resolution: Resolution) -> HistoryFile {
    store
        .windows(resolution)
        .map(|(item, window)| {
            let records = window.iter().map(PointRecord::from).collect();
            (item.as_str().to_owned(), records)
        })
        .collect()
}
