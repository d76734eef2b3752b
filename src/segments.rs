use geo::{GeoFloat, Line};
use slab::Slab;

use crate::events::{Event, EventKind, SweepPoint};

/// An input segment held in the sweep's arena.
///
/// End points are canonicalized at construction so that `start <= end`
/// in the sweep order (`x` and then `y`); the segment is immutable for
/// the rest of the run. The slab key is the segment's identity: all
/// active-order membership and event-handle resolution goes through
/// the key, never through end-point equality.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Segment<T: GeoFloat> {
    key: usize,
    start: SweepPoint<T>,
    end: SweepPoint<T>,
}

impl<T: GeoFloat> Segment<T> {
    /// Create a `Segment` from the given line and store it in the
    /// slab. Returns the key of the new entry.
    pub(crate) fn create_in_slab(storage: &mut Slab<Self>, line: Line<T>) -> usize {
        let p = SweepPoint::from(line.start);
        let q = SweepPoint::from(line.end);
        let (start, end) = if p <= q { (p, q) } else { (q, p) };

        let entry = storage.vacant_entry();
        let key = entry.key();
        entry.insert(Segment { key, start, end });
        key
    }

    /// The segment as a [`Line`] for the geometric predicates.
    #[inline]
    pub(crate) fn line(&self) -> Line<T> {
        Line::new(self.start.coord(), self.end.coord())
    }

    #[inline]
    pub(crate) fn is_vertical(&self) -> bool {
        self.start.x() == self.end.x()
    }

    /// Slope of the segment; vertical segments get `+inf` so that they
    /// order above any other segment through the same point.
    pub(crate) fn slope(&self) -> T {
        if self.is_vertical() {
            T::infinity()
        } else {
            (self.end.y() - self.start.y()) / (self.end.x() - self.start.x())
        }
    }

    /// The segment's y-value at sweep position `x`, from its line
    /// equation. For a vertical segment this is the lower end point's
    /// y-value: the position at which it enters the active order.
    pub(crate) fn y_at(&self, x: T) -> T {
        if self.is_vertical() {
            self.start.y()
        } else {
            self.start.y() + (x - self.start.x()) * self.slope()
        }
    }

    /// Events for both end points of this segment.
    pub(crate) fn events(&self) -> [Event<T>; 2] {
        [
            Event {
                point: self.start,
                kind: EventKind::Start { segment: self.key },
            },
            Event {
                point: self.end,
                kind: EventKind::End { segment: self.key },
            },
        ]
    }
}

/// Equality based on key.
impl<T: GeoFloat> PartialEq for Segment<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<T: GeoFloat> Eq for Segment<T> {}
