//! Per-item, per-resolution history windows and their admission gates.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::{ItemId, PricePoint, Resolution, UtcDateTime, Window};

/// Resolutions that accepted a point in one `admit` call, in policy order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AdmittedSet(Vec<Resolution>);

impl AdmittedSet {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, resolution: Resolution) -> bool {
        self.0.contains(&resolution)
    }

    pub fn iter(&self) -> impl Iterator<Item = Resolution> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[Resolution] {
        &self.0
    }
}

/// Counters for one resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionStats {
    pub items_with_data: usize,
    pub total_data_points: usize,
    pub description: &'static str,
    pub max_points: usize,
}

/// Summary returned by [`HistoryStore::stats`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryStats {
    pub total_items: usize,
    pub resolutions: BTreeMap<Resolution, ResolutionStats>,
}

/// Central store: item -> resolution -> window.
///
/// A window exists for a pair only once a point was admitted (or loaded) for
/// it, so a new item gains windows one resolution at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryStore {
    items: BTreeMap<ItemId, BTreeMap<Resolution, Window>>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admission gate for one (item, resolution) pair.
    ///
    /// Open when there is no point yet, when the latest stored timestamp is
    /// unreadable, or when at least the resolution's period has elapsed.
    pub fn should_admit(&self, item: &ItemId, resolution: Resolution, now: UtcDateTime) -> bool {
        let Some(latest) = self.window(item.as_str(), resolution).and_then(Window::latest) else {
            return true;
        };

        match latest.timestamp().instant() {
            Some(recorded) => now.since(recorded) >= resolution.admission_period(),
            None => true,
        }
    }

    /// Append `price` to every resolution whose gate is open at `now`.
    pub fn admit(
        &mut self,
        item: &ItemId,
        item_name: &str,
        price: u64,
        now: UtcDateTime,
    ) -> AdmittedSet {
        let open: Vec<Resolution> = Resolution::ALL
            .into_iter()
            .filter(|resolution| self.should_admit(item, *resolution, now))
            .collect();
        if open.is_empty() {
            return AdmittedSet::default();
        }

        let windows = self.items.entry(item.clone()).or_default();
        for resolution in &open {
            windows
                .entry(*resolution)
                .or_insert_with(|| Window::for_resolution(*resolution))
                .append(PricePoint::new(now, price, item_name));
        }

        debug!(item = %item, item_name, price, admitted = ?open, "price history updated");
        AdmittedSet(open)
    }

    pub fn window(&self, item: &str, resolution: Resolution) -> Option<&Window> {
        self.items.get(item)?.get(&resolution)
    }

    /// Items with at least one window, in identifier order.
    pub fn items(&self) -> impl Iterator<Item = &ItemId> + '_ {
        self.items.keys()
    }

    /// Non-empty windows at one resolution, in identifier order.
    pub fn windows(&self, resolution: Resolution) -> impl Iterator<Item = (&ItemId, &Window)> + '_ {
        self.items.iter().filter_map(move |(item, windows)| {
            windows
                .get(&resolution)
                .filter(|window| !window.is_empty())
                .map(|window| (item, window))
        })
    }

    /// Number of tracked items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn stats(&self) -> HistoryStats {
        let resolutions = Resolution::ALL
            .into_iter()
            .map(|resolution| {
                let (items_with_data, total_data_points) = self
                    .windows(resolution)
                    .fold((0, 0), |(items, points), (_, window)| {
                        (items + 1, points + window.len())
                    });
                let stats = ResolutionStats {
                    items_with_data,
                    total_data_points,
                    description: resolution.description(),
                    max_points: resolution.capacity(),
                };
                (resolution, stats)
            })
            .collect();

        HistoryStats {
            total_items: self.items.len(),
            resolutions,
        }
    }

    /// Install a rehydrated window. Empty windows are not stored.
    pub(crate) fn insert_window(&mut self, item: ItemId, resolution: Resolution, window: Window) {
        if window.is_empty() {
            return;
        }
        self.items.entry(item).or_default().insert(resolution, window);
    }
}
