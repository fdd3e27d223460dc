use pricetrail_warehouse::PointRecord;

use super::{StoredTimestamp, UtcDateTime};

/// One admitted price observation for an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricePoint {
    timestamp: StoredTimestamp,
    price: u64,
    item_name: String,
}

impl PricePoint {
    pub fn new(timestamp: UtcDateTime, price: u64, item_name: impl Into<String>) -> Self {
        Self {
            timestamp: StoredTimestamp::Utc(timestamp),
            price,
            item_name: item_name.into(),
        }
    }

    pub fn timestamp(&self) -> &StoredTimestamp {
        &self.timestamp
    }

    pub fn price(&self) -> u64 {
        self.price
    }

    pub fn item_name(&self) -> &str {
        &self.item_name
    }
}

impl From<PointRecord> for PricePoint {
    fn from(record: PointRecord) -> Self {
        Self {
            timestamp: StoredTimestamp::from_stored(&record.timestamp),
            price: record.price,
            item_name: record.item_name,
        }
    }
}

impl From<&PricePoint> for PointRecord {
    fn from(point: &PricePoint) -> Self {
        Self {
            timestamp: point.timestamp.to_stored(),
            price: point.price,
            item_name: point.item_name.clone(),
        }
    }
}
