//! Snapshot ingestion: validate each entry, normalize its price and drive
//! admission into a [`HistoryStore`].
//!
//! Every failure here is local to one entry. A batch never aborts because of
//! a bad record; it is counted, logged at debug level and skipped.

use std::fs;
use std::path::Path;

use pricetrail_warehouse::HistoryArchive;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::persistence::{self, SaveReport};
use crate::{CoreError, HistoryStore, ItemId, Resolution, UtcDateTime, ValidationError};

/// Current-price dataset keyed by item identifier.
pub type Snapshot = Map<String, Value>;

const NAME_FIELD: &str = "item_name";
const PRICE_FIELD: &str = "item_price";
const DEFAULT_CURRENCY_SUFFIX: &str = "NESO";

/// Ingestion settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestConfig {
    /// Currency token stripped from the end of price strings.
    pub currency_suffix: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            currency_suffix: String::from(DEFAULT_CURRENCY_SUFFIX),
        }
    }
}

/// Destination written after a pass that admitted at least one point.
pub trait HistorySink {
    fn persist(&self, store: &HistoryStore, changed: &[Resolution]) -> SaveReport;
}

impl HistorySink for HistoryArchive {
    fn persist(&self, store: &HistoryStore, changed: &[Resolution]) -> SaveReport {
        persistence::save_resolutions(store, self, changed)
    }
}

/// Per-reason counts of skipped entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SkipCounts {
    pub not_a_record: usize,
    pub missing_fields: usize,
    pub invalid_price: usize,
}

impl SkipCounts {
    pub fn total(&self) -> usize {
        self.not_a_record + self.missing_fields + self.invalid_price
    }
}

/// Result of one ingestion pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    /// Snapshot entries examined.
    pub processed: usize,
    /// Items for which at least one resolution admitted a point.
    pub admitted: usize,
    pub skipped: SkipCounts,
    /// Resolutions whose files were written after the pass.
    pub saved: Vec<Resolution>,
    /// Resolutions whose files failed to write.
    pub save_failures: Vec<Resolution>,
}

enum EntryOutcome {
    Admitted(Vec<Resolution>),
    Unchanged,
}

enum Skip {
    NotARecord,
    MissingFields,
    InvalidPrice(ValidationError),
}

/// Drives snapshots into a [`HistoryStore`].
#[derive(Debug, Clone, Default)]
pub struct Ingestor {
    config: IngestConfig,
}

impl Ingestor {
    pub fn new(config: IngestConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Process every snapshot entry at `now`, then persist the resolutions
    /// that changed. Nothing is written when no entry was admitted.
    pub fn process_snapshot<S>(
        &self,
        store: &mut HistoryStore,
        snapshot: &Snapshot,
        now: UtcDateTime,
        sink: &S,
    ) -> IngestReport
    where
        S: HistorySink + ?Sized,
    {
        let mut report = IngestReport::default();
        let mut changed: Vec<Resolution> = Vec::new();

        for (raw_id, entry) in snapshot {
            report.processed += 1;
            match self.process_entry(store, raw_id, entry, now) {
                Ok(EntryOutcome::Admitted(resolutions)) => {
                    report.admitted += 1;
                    for resolution in resolutions {
                        if !changed.contains(&resolution) {
                            changed.push(resolution);
                        }
                    }
                }
                Ok(EntryOutcome::Unchanged) => {}
                Err(skip) => record_skip(&mut report.skipped, raw_id, skip),
            }
        }

        info!(
            processed = report.processed,
            admitted = report.admitted,
            skipped = report.skipped.total(),
            "snapshot processed"
        );

        if report.admitted == 0 {
            info!("no resolution accepted a new point; skipping save");
            return report;
        }

        changed.sort();
        let saved = sink.persist(store, &changed);
        report.saved = saved.written;
        report.save_failures = saved
            .failures
            .into_iter()
            .map(|failure| failure.resolution)
            .collect();
        report
    }

    fn process_entry(
        &self,
        store: &mut HistoryStore,
        raw_id: &str,
        entry: &Value,
        now: UtcDateTime,
    ) -> Result<EntryOutcome, Skip> {
        let record = entry.as_object().ok_or(Skip::NotARecord)?;

        let name = record
            .get(NAME_FIELD)
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
            .ok_or(Skip::MissingFields)?;
        let raw_price = record
            .get(PRICE_FIELD)
            .filter(|value| is_present(value))
            .ok_or(Skip::MissingFields)?;

        let price = normalize_price(raw_price, &self.config.currency_suffix)
            .map_err(Skip::InvalidPrice)?;

        let admitted = store.admit(&ItemId::new(raw_id), name, price, now);
        if admitted.is_empty() {
            Ok(EntryOutcome::Unchanged)
        } else {
            Ok(EntryOutcome::Admitted(admitted.iter().collect()))
        }
    }
}

/// Convert a raw snapshot price into a positive integer.
///
/// Strings have thousands separators and the trailing currency token
/// removed before parsing, so `"1,234 NESO"` yields `1234`. Integers are
/// taken as-is. Zero, negatives, fractions and anything else are rejected.
pub fn normalize_price(raw: &Value, currency_suffix: &str) -> Result<u64, ValidationError> {
    let parsed = match raw {
        Value::Null => return Err(ValidationError::MissingPrice),
        Value::String(text) => parse_price_text(text, currency_suffix)?,
        Value::Number(number) => number
            .as_i64()
            .map(i128::from)
            .or_else(|| number.as_u64().map(i128::from))
            .ok_or_else(|| ValidationError::UnparsablePrice {
                value: number.to_string(),
            })?,
        other => {
            return Err(ValidationError::UnparsablePrice {
                value: other.to_string(),
            })
        }
    };

    if parsed <= 0 {
        let value = i64::try_from(parsed).unwrap_or(i64::MIN);
        return Err(ValidationError::NonPositivePrice { value });
    }
    u64::try_from(parsed).map_err(|_| ValidationError::UnparsablePrice {
        value: parsed.to_string(),
    })
}

fn parse_price_text(text: &str, currency_suffix: &str) -> Result<i128, ValidationError> {
    let without_separators = text.replace(',', "");
    let mut cleaned = without_separators.trim();
    if !currency_suffix.is_empty() {
        if let Some(stripped) = cleaned.strip_suffix(currency_suffix) {
            cleaned = stripped.trim_end();
        }
    }

    if cleaned.is_empty() {
        return Err(ValidationError::MissingPrice);
    }
    cleaned
        .parse::<i128>()
        .map_err(|_| ValidationError::UnparsablePrice {
            value: text.to_owned(),
        })
}

/// Whether a field carries a usable value: not null, empty, zero or false.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::String(text) => !text.is_empty(),
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

fn record_skip(counts: &mut SkipCounts, raw_id: &str, skip: Skip) {
    match skip {
        Skip::NotARecord => {
            counts.not_a_record += 1;
            debug!(item = raw_id, "skipping entry: not a record");
        }
        Skip::MissingFields => {
            counts.missing_fields += 1;
            debug!(item = raw_id, "skipping entry: missing item_name or item_price");
        }
        Skip::InvalidPrice(error) => {
            counts.invalid_price += 1;
            debug!(item = raw_id, %error, "skipping entry: price conversion failed");
        }
    }
}

/// Read a snapshot file: a JSON object keyed by item identifier.
pub fn read_snapshot(path: &Path) -> Result<Snapshot, CoreError> {
    let raw = fs::read_to_string(path).map_err(|source| CoreError::SnapshotUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value =
        serde_json::from_str(&raw).map_err(|source| CoreError::SnapshotMalformed {
            path: path.to_path_buf(),
            source,
        })?;

    match value {
        Value::Object(snapshot) => Ok(snapshot),
        _ => Err(CoreError::SnapshotNotObject {
            path: path.to_path_buf(),
        }),
    }
}
