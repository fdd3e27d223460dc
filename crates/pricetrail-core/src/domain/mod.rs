//! # Domain Models
//!
//! Canonical domain types for pricetrail histories.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Resolution`] | Hourly, 12-hourly or daily granularity |
//! | [`IntervalPolicy`] | Admission period, capacity and description of a resolution |
//! | [`ItemId`] | Item identifier as keyed in the snapshot |
//! | [`PricePoint`] | One admitted observation |
//! | [`UtcDateTime`] | UTC instant |
//! | [`StoredTimestamp`] | Instant as kept in a window, possibly unparsed |

mod item;
mod price_point;
mod resolution;
mod timestamp;

pub use item::ItemId;
pub use price_point::PricePoint;
pub use resolution::{IntervalPolicy, Resolution};
pub use timestamp::{StoredTimestamp, UtcDateTime};
