use std::path::PathBuf;

use pricetrail_warehouse::ArchiveError;
use thiserror::Error;

/// Validation errors raised by `pricetrail-core` domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("item id cannot be empty")]
    EmptyItemId,
    #[error("item id must not be '.' or '..'")]
    ReservedItemId,
    #[error("item id contains invalid character {ch:?} at index {index}")]
    ItemIdInvalidChar { ch: char, index: usize },

    #[error("invalid resolution '{value}', expected one of 1hour, 12hour, 1day")]
    InvalidResolution { value: String },

    #[error("window capacity must be greater than zero")]
    ZeroCapacity,

    #[error("price is missing or empty")]
    MissingPrice,
    #[error("price '{value}' is not an integer")]
    UnparsablePrice { value: String },
    #[error("price must be positive, got {value}")]
    NonPositivePrice { value: i64 },

    #[error("timestamp is not a recognized ISO-8601 value: '{value}'")]
    InvalidTimestamp { value: String },
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error("snapshot '{}' unavailable: {source}", path.display())]
    SnapshotUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("snapshot '{}' is not valid JSON: {source}", path.display())]
    SnapshotMalformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("snapshot '{}' must be a JSON object keyed by item id", path.display())]
    SnapshotNotObject { path: PathBuf },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
