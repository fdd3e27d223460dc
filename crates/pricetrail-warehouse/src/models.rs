use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One persisted price observation.
///
/// `timestamp` is kept as the stored text; interpreting it is left to the
/// caller so that unreadable values survive a load/save cycle untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointRecord {
    pub timestamp: String,
    pub price: u64,
    pub item_name: String,
}

/// Content of one history file: item identifier to oldest-first points.
///
/// A `BTreeMap` keeps the written files stable across runs.
pub type HistoryFile = BTreeMap<String, Vec<PointRecord>>;
