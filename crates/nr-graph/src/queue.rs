//! Priority queue driving the path search.
//!
//! # Key order
//!
//! A [`PathKey`] is `(distance, oldest_road)`.  Shorter distance is better;
//! at equal distance the path whose oldest road is *newer* (larger year) is
//! better.  `PathKey`'s `Ord` encodes "better" as "smaller", so the queue is
//! a plain min-queue over keys.
//!
//! Entries are never updated in place: a city whose label improves is pushed
//! again and the search discards popped entries whose key no longer matches
//! the city's current label.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use nr_core::CityId;

// ── PathKey ───────────────────────────────────────────────────────────────────

/// Rank of a partial path: total length and the minimum road year on it.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct PathKey {
    pub distance:    i64,
    pub oldest_road: i64,
}

impl PathKey {
    /// Label of the search origin: nothing travelled, no road seen yet.
    pub const START: PathKey = PathKey { distance: 0, oldest_road: i64::MAX };

    /// Label of a city no path has reached.  Worse than every real key.
    pub const UNREACHED: PathKey = PathKey { distance: i64::MAX, oldest_road: i64::MIN };

    /// Extend this path by one road.
    #[inline]
    pub fn extend(self, length: u32, year: i32) -> PathKey {
        PathKey {
            distance:    self.distance.saturating_add(length as i64),
            oldest_road: self.oldest_road.min(year as i64),
        }
    }

    /// Distance-only key, used when road years have already been filtered.
    #[inline]
    pub fn by_distance(distance: i64) -> PathKey {
        PathKey { distance, oldest_road: 0 }
    }

    #[inline]
    pub fn is_reached(self) -> bool {
        self != Self::UNREACHED
    }
}

impl Ord for PathKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .cmp(&other.distance)
            .then_with(|| other.oldest_road.cmp(&self.oldest_road))
    }
}

impl PartialOrd for PathKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ── PathQueue ─────────────────────────────────────────────────────────────────

/// Min-queue of `(PathKey, CityId)` entries.
///
/// The queue owns only the keys; cities are handles into the network.  The
/// secondary `CityId` component makes pop order fully deterministic.
#[derive(Default)]
pub struct PathQueue {
    heap: BinaryHeap<Reverse<(PathKey, CityId)>>,
}

impl PathQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// O(log n).
    pub fn push(&mut self, key: PathKey, city: CityId) {
        self.heap.push(Reverse((key, city)));
    }

    /// Remove and return the best entry.  O(log n).
    pub fn pop(&mut self) -> Option<(PathKey, CityId)> {
        self.heap.pop().map(|Reverse(entry)| entry)
    }

    pub fn peek(&self) -> Option<(PathKey, CityId)> {
        self.heap.peek().map(|Reverse(entry)| *entry)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drop all entries but keep the allocation for the next search.
    pub fn clear(&mut self) {
        self.heap.clear();
    }
}
