//! # Pricetrail Warehouse
//!
//! JSON file archive backing the pricetrail history engine.
//!
//! ## Overview
//!
//! The archive is a single directory holding one history file per resolution
//! plus any chart documents exported for rendering:
//!
//! | File | Content |
//! |------|---------|
//! | `history_1hour.json` | Hourly points per item |
//! | `history_12hour.json` | 12-hourly points per item |
//! | `history_1day.json` | Daily points per item |
//! | `{item}_{resolution}.json` | Chart document for one item |
//!
//! This crate only moves documents between memory and disk. It knows nothing
//! about admission rules or capacities; those live in `pricetrail-core`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pricetrail_warehouse::{ArchiveConfig, HistoryArchive};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let archive = HistoryArchive::open(ArchiveConfig::from_data_dir("data"))?;
//!
//!     match archive.read_history("1hour")? {
//!         Some(file) => println!("{} items with hourly history", file.len()),
//!         None => println!("no hourly history yet"),
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Writes
//!
//! Every write goes to a sibling `*.tmp` file first and is renamed into place,
//! so a crash mid-write leaves the previous file intact.

mod error;
mod models;

use std::env;
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

pub use error::ArchiveError;
pub use models::{HistoryFile, PointRecord};

const HISTORY_DIR_NAME: &str = "price_history";
const SNAPSHOT_FILE_NAME: &str = "equipment_prices.json";

/// Location of the pricetrail data on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveConfig {
    /// Root data directory (also holds the default snapshot file).
    pub data_dir: PathBuf,
    /// Directory holding history files and chart documents.
    pub history_dir: PathBuf,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self::from_data_dir(resolve_pricetrail_home())
    }
}

impl ArchiveConfig {
    /// Derive the standard layout below `data_dir`.
    pub fn from_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let history_dir = data_dir.join(HISTORY_DIR_NAME);
        Self {
            data_dir,
            history_dir,
        }
    }

    /// Default location of the current-price snapshot.
    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(SNAPSHOT_FILE_NAME)
    }
}

/// Directory-backed store of history files and chart documents.
#[derive(Debug, Clone)]
pub struct HistoryArchive {
    config: ArchiveConfig,
}

impl HistoryArchive {
    /// Open the archive with default configuration.
    pub fn open_default() -> Result<Self, ArchiveError> {
        Self::open(ArchiveConfig::default())
    }

    /// Open the archive, creating the history directory if needed.
    pub fn open(config: ArchiveConfig) -> Result<Self, ArchiveError> {
        fs::create_dir_all(&config.history_dir)
            .map_err(|error| ArchiveError::io(&config.history_dir, error))?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ArchiveConfig {
        &self.config
    }

    pub fn history_dir(&self) -> &Path {
        self.config.history_dir.as_path()
    }

    /// Path of the history file for a resolution key such as `1hour`.
    pub fn history_path(&self, resolution_key: &str) -> PathBuf {
        self.config
            .history_dir
            .join(format!("history_{resolution_key}.json"))
    }

    /// Default path of the chart document for one item and resolution.
    pub fn chart_path(&self, item_id: &str, resolution_key: &str) -> PathBuf {
        self.config
            .history_dir
            .join(format!("{item_id}_{resolution_key}.json"))
    }

    /// Read the history file for a resolution.
    ///
    /// A missing file is `Ok(None)`: there is simply no data yet.
    pub fn read_history(&self, resolution_key: &str) -> Result<Option<HistoryFile>, ArchiveError> {
        let path = self.history_path(resolution_key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(ArchiveError::io(path, error)),
        };

        let file = serde_json::from_str::<HistoryFile>(&raw)
            .map_err(|source| ArchiveError::Malformed { path, source })?;
        Ok(Some(file))
    }

    /// Replace the history file for a resolution.
    pub fn write_history(
        &self,
        resolution_key: &str,
        file: &HistoryFile,
    ) -> Result<(), ArchiveError> {
        let path = self.history_path(resolution_key);
        write_json_atomic(&path, file)?;
        debug!(path = %path.display(), items = file.len(), "history file written");
        Ok(())
    }
}

/// Serialize `value` next to `path` and rename it into place.
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), ArchiveError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|error| ArchiveError::io(parent, error))?;
    }

    let staging = staging_path(path);
    let result = (|| -> Result<(), ArchiveError> {
        let file = File::create(&staging).map_err(|error| ArchiveError::io(&staging, error))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, value)?;
        writer
            .flush()
            .map_err(|error| ArchiveError::io(&staging, error))?;
        fs::rename(&staging, path).map_err(|error| ArchiveError::io(path, error))
    })();

    if result.is_err() {
        let _ = fs::remove_file(&staging);
    }
    result
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Resolve the pricetrail data directory from environment or default.
fn resolve_pricetrail_home() -> PathBuf {
    if let Some(path) = env::var_os("PRICETRAIL_HOME") {
        let path = PathBuf::from(path);
        if !path.as_os_str().is_empty() {
            return path;
        }
    }

    if let Some(home) = env::var_os("HOME") {
        return PathBuf::from(home).join(".pricetrail");
    }

    PathBuf::from(".pricetrail")
}
