//! Single-writer session tying the store to its archive.

use std::path::{Path, PathBuf};

use pricetrail_warehouse::HistoryArchive;
use tracing::{error, info, warn};

use crate::chart::{self, ChartSeries};
use crate::ingest::{self, IngestConfig, IngestReport, Ingestor};
use crate::persistence::{self, ResolutionFailure};
use crate::{CoreError, HistoryStats, HistoryStore, ItemId, Resolution, UtcDateTime};

/// Result of [`PriceTracker::update_from_file`].
#[derive(Debug, Default)]
pub struct FileUpdate {
    pub report: IngestReport,
    /// Why the snapshot could not be read, in which case `report` is empty.
    pub snapshot_error: Option<CoreError>,
}

/// Owns the in-memory history for one archive directory.
///
/// Opening rehydrates the store from disk; every ingestion pass that admits a
/// point writes the changed resolutions back. Only one tracker should write
/// to a given archive at a time.
#[derive(Debug)]
pub struct PriceTracker {
    archive: HistoryArchive,
    store: HistoryStore,
    ingestor: Ingestor,
    load_failures: Vec<ResolutionFailure>,
}

impl PriceTracker {
    pub fn open(archive: HistoryArchive) -> Self {
        Self::with_config(archive, IngestConfig::default())
    }

    pub fn with_config(archive: HistoryArchive, config: IngestConfig) -> Self {
        info!(history_dir = %archive.history_dir().display(), "opening price tracker");
        let loaded = persistence::load(&archive);
        for failure in &loaded.failures {
            warn!(
                resolution = %failure.resolution,
                error = %failure.error,
                "resolution starts empty after load failure"
            );
        }

        Self {
            archive,
            store: loaded.store,
            ingestor: Ingestor::new(config),
            load_failures: loaded.failures,
        }
    }

    pub fn archive(&self) -> &HistoryArchive {
        &self.archive
    }

    pub fn store(&self) -> &HistoryStore {
        &self.store
    }

    /// Resolutions that could not be read when the tracker was opened.
    pub fn load_failures(&self) -> &[ResolutionFailure] {
        &self.load_failures
    }

    /// Ingest an in-memory snapshot at `now`.
    pub fn update(&mut self, snapshot: &ingest::Snapshot, now: UtcDateTime) -> IngestReport {
        self.ingestor
            .process_snapshot(&mut self.store, snapshot, now, &self.archive)
    }

    /// Ingest the snapshot file at `path`.
    ///
    /// A missing, unreadable or malformed file is logged and returned next
    /// to an empty report rather than as an error.
    pub fn update_from_file(&mut self, path: &Path, now: UtcDateTime) -> FileUpdate {
        match ingest::read_snapshot(path) {
            Ok(snapshot) => {
                info!(path = %path.display(), items = snapshot.len(), "snapshot loaded");
                FileUpdate {
                    report: self.update(&snapshot, now),
                    snapshot_error: None,
                }
            }
            Err(err) => {
                error!(error = %err, "snapshot could not be read");
                FileUpdate {
                    report: IngestReport::default(),
                    snapshot_error: Some(err),
                }
            }
        }
    }

    pub fn statistics(&self) -> HistoryStats {
        self.store.stats()
    }

    pub fn chart(&self, item: &str, resolution: Resolution) -> Option<ChartSeries> {
        chart::build_series(&self.store, item, resolution)
    }

    /// Export one chart to `path`, or to the archive's default location.
    ///
    /// The default location needs an id usable as a file name; an explicit
    /// `path` does not.
    pub fn export_chart(
        &self,
        item: &ItemId,
        resolution: Resolution,
        path: Option<&Path>,
    ) -> Option<PathBuf> {
        let target = match path {
            Some(path) => path.to_path_buf(),
            None => match item.as_file_stem() {
                Ok(stem) => self.archive.chart_path(stem, resolution.as_str()),
                Err(err) => {
                    warn!(item = %item, error = %err, "item id cannot name a chart file");
                    return None;
                }
            },
        };
        chart::export_to_file(&self.store, item.as_str(), resolution, &target).then_some(target)
    }

    /// Export every resolution with data for `item`.
    pub fn export_charts(&self, item: &ItemId) -> Vec<PathBuf> {
        chart::export_item(&self.store, &self.archive, item)
    }
}
