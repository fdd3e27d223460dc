//! Fixed-capacity, oldest-first history of one item at one resolution.

use std::collections::VecDeque;

use crate::{PricePoint, Resolution, ValidationError};

/// Ring buffer of price points; appending at capacity evicts the oldest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    points: VecDeque<PricePoint>,
    capacity: usize,
}

impl Window {
    pub fn new(capacity: usize) -> Result<Self, ValidationError> {
        if capacity == 0 {
            return Err(ValidationError::ZeroCapacity);
        }
        Ok(Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    /// Empty window sized by the resolution's policy.
    pub fn for_resolution(resolution: Resolution) -> Self {
        let capacity = resolution.capacity();
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Rebuild a window from persisted oldest-first points.
    ///
    /// Only the most recent `capacity` points are kept, which absorbs
    /// capacity reductions between versions.
    pub fn load_from<I>(points: I, capacity: usize) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = PricePoint>,
    {
        let mut window = Self::new(capacity)?;
        for point in points {
            window.append(point);
        }
        Ok(window)
    }

    /// Push `point` as the newest entry. Returns the evicted point, if any.
    pub fn append(&mut self, point: PricePoint) -> Option<PricePoint> {
        let evicted = if self.points.len() >= self.capacity {
            self.points.pop_front()
        } else {
            None
        };
        self.points.push_back(point);
        evicted
    }

    pub fn latest(&self) -> Option<&PricePoint> {
        self.points.back()
    }

    /// Owned oldest-first copy of the points.
    pub fn snapshot(&self) -> Vec<PricePoint> {
        self.points.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &PricePoint> + '_ {
        self.points.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.points.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
