//! # Pricetrail Core
//!
//! Bounded, multi-resolution price histories built from periodic snapshots
//! of a current-price dataset.
//!
//! ## Overview
//!
//! Every tracked item keeps three independent rolling windows:
//!
//! | Resolution | Admission period | Capacity | Horizon |
//! |------------|------------------|----------|---------|
//! | `1hour` | 1 hour | 168 | 1 week |
//! | `12hour` | 12 hours | 60 | 1 month |
//! | `1day` | 1 day | 365 | 1 year |
//!
//! A snapshot value is admitted into a window only once the window's own
//! period has elapsed since its newest point, so re-running an ingestion pass
//! with an unchanged clock is a no-op. Full windows evict their oldest point.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`domain`] | Resolutions and their policy, item ids, price points, timestamps |
//! | [`window`] | Fixed-capacity ring buffer of points |
//! | [`store`] | Item -> resolution -> window map with admission gates |
//! | [`persistence`] | Load/save the store as one file per resolution |
//! | [`ingest`] | Snapshot validation, price normalization, admission |
//! | [`chart`] | Chart-ready series and document export |
//! | [`tracker`] | Single-writer session over one archive |
//! | [`error`] | Core error types |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pricetrail_core::{HistoryArchive, PriceTracker, Resolution, UtcDateTime};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let archive = HistoryArchive::open_default()?;
//!     let snapshot_path = archive.config().snapshot_path();
//!     let mut tracker = PriceTracker::open(archive);
//!
//!     let update = tracker.update_from_file(&snapshot_path, UtcDateTime::now());
//!     println!("{} items admitted", update.report.admitted);
//!
//!     if let Some(series) = tracker.chart("item-1", Resolution::Hour) {
//!         println!("{} hourly points", series.values.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Bad snapshot entries are skipped and counted, unreadable history files are
//! reported per resolution, and an unreadable snapshot yields an empty report.
//! Only construction-time validation surfaces as [`ValidationError`].

pub mod chart;
pub mod domain;
pub mod error;
pub mod ingest;
pub mod persistence;
pub mod store;
pub mod tracker;
pub mod window;

pub use chart::{ChartDataset, ChartDocument, ChartSeries};
pub use domain::{IntervalPolicy, ItemId, PricePoint, Resolution, StoredTimestamp, UtcDateTime};
pub use error::{CoreError, ValidationError};
pub use ingest::{HistorySink, IngestConfig, IngestReport, Ingestor, SkipCounts, Snapshot};
pub use persistence::{LoadReport, ResolutionFailure, SaveReport};
pub use store::{AdmittedSet, HistoryStats, HistoryStore, ResolutionStats};
pub use tracker::{FileUpdate, PriceTracker};
pub use window::Window;

// Archive (re-exported from pricetrail-warehouse)
pub use pricetrail_warehouse::{ArchiveConfig, ArchiveError, HistoryArchive, HistoryFile, PointRecord};
