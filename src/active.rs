use std::cmp::Ordering;

use geo::GeoFloat;
use slab::Slab;

use crate::segments::Segment;

/// Index entry of the active order.
///
/// Stores the member's current comparison key explicitly: its y-value
/// at the sweep position, and its slope as a tie-break. The slope
/// orders segments through a common point by their order immediately
/// to the right of that point, which is what realizes the rank
/// exchange when two segments cross.
#[derive(Debug, Clone, Copy)]
struct ActiveEntry<T: GeoFloat> {
    key: usize,
    y: T,
    slope: T,
}

/// Partial equality consistent with the `PartialOrd` impl.
impl<T: GeoFloat> PartialEq for ActiveEntry<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl<T: GeoFloat> Eq for ActiveEntry<T> {}

/// Ordering by y-value at the sweep position, then slope, then key.
impl<T: GeoFloat> PartialOrd for ActiveEntry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let by_y = self.y.partial_cmp(&other.y)?;
        let by_slope = self.slope.partial_cmp(&other.slope)?;
        Some(by_y.then(by_slope).then_with(|| self.key.cmp(&other.key)))
    }
}

/// Derive `Ord` from `PartialOrd` and expect to not fail.
impl<T: GeoFloat> Ord for ActiveEntry<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.partial_cmp(other).unwrap_or_else(|| {
            panic!(
                "couldn't compare active segments: {:?} <=> {:?}",
                self, other
            );
        })
    }
}

/// The ordered set of segments currently straddling the sweep
/// position, keyed by each segment's y-value at that position.
///
/// Every comparison key is stored in the index and refreshed on each
/// sweep-position change, so comparisons never read state that is
/// stale with respect to the sweep. The order itself is maintained
/// combinatorially: positions change only in `insert`, `remove` and
/// `exchange_at`, never by re-sorting on refreshed keys. Two crossing
/// segments have y-values within rounding error of each other near
/// their crossing, so the recomputed keys cannot be trusted to order
/// them there; the exchange at the crossing event is what flips them.
#[derive(Debug, Default)]
pub(crate) struct ActiveOrder<T: GeoFloat> {
    entries: Vec<ActiveEntry<T>>,
}

impl<T: GeoFloat> ActiveOrder<T> {
    pub(crate) fn new() -> Self {
        ActiveOrder {
            entries: Vec::new(),
        }
    }

    fn entry_at(storage: &Slab<Segment<T>>, key: usize, x: T) -> ActiveEntry<T> {
        let segment = &storage[key];
        ActiveEntry {
            key,
            y: segment.y_at(x),
            slope: segment.slope(),
        }
    }

    /// Move the sweep position to `x`: refresh every member's y-value.
    ///
    /// Positions are untouched. A vertical member also keeps its
    /// stored y-value: it records how far up the segment the sweep has
    /// progressed, set at insertion and updated by each exchange.
    pub(crate) fn advance_to(&mut self, x: T, storage: &Slab<Segment<T>>) {
        for entry in self.entries.iter_mut() {
            let segment = &storage[entry.key];
            if !segment.is_vertical() {
                entry.y = segment.y_at(x);
            }
        }
    }

    /// Restore the order across a crossing at y-value `y`.
    ///
    /// Every member positioned between the two handles passes through
    /// the crossing point, so the whole block is put into its
    /// post-crossing order: ascending slope. Repeating the exchange
    /// for another pair crossing at the same point leaves the block
    /// unchanged.
    ///
    /// Returns the keys of the bottom and top members of the block, or
    /// `None` if either handle is not a member.
    pub(crate) fn exchange_at(&mut self, a: usize, b: usize, y: T) -> Option<(usize, usize)> {
        let ia = self.index_of(a)?;
        let ib = self.index_of(b)?;
        let (lo, hi) = if ia <= ib { (ia, ib) } else { (ib, ia) };
        for entry in self.entries[lo..=hi].iter_mut() {
            entry.y = y;
        }
        // With the y-values tied, entries compare by slope then key.
        self.entries[lo..=hi].sort();
        Some((self.entries[lo].key, self.entries[hi].key))
    }

    /// Insert the segment at `key`, comparing against existing members
    /// with keys computed at sweep position `x`.
    pub(crate) fn insert(&mut self, key: usize, storage: &Slab<Segment<T>>, x: T) {
        debug_assert!(storage.contains(key));
        let entry = Self::entry_at(storage, key, x);
        let pos = self
            .entries
            .partition_point(|e| e.cmp(&entry) == Ordering::Less);
        self.entries.insert(pos, entry);
    }

    /// Remove the segment at `key` by identity. Returns `false` if it
    /// is not a member.
    pub(crate) fn remove(&mut self, key: usize) -> bool {
        match self.index_of(key) {
            Some(pos) => {
                self.entries.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Position of the segment at `key` in the order, bottom-most
    /// first.
    pub(crate) fn index_of(&self, key: usize) -> Option<usize> {
        self.entries.iter().position(|e| e.key == key)
    }

    /// The neighbor immediately below, or `None` at the boundary.
    pub(crate) fn prev_key(&self, key: usize) -> Option<usize> {
        let pos = self.index_of(key)?;
        pos.checked_sub(1).map(|p| self.entries[p].key)
    }

    /// The neighbor immediately above, or `None` at the boundary.
    pub(crate) fn next_key(&self, key: usize) -> Option<usize> {
        let pos = self.index_of(key)?;
        self.entries.get(pos + 1).map(|e| e.key)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    fn keys(&self) -> Vec<usize> {
        self.entries.iter().map(|e| e.key).collect()
    }
}
