use std::cmp::Ordering;
use std::collections::{BTreeSet, BinaryHeap};

use geo::{Coordinate, GeoFloat};

/// A sweep event.
///
/// Events drive the sweep: one `Start` and one `End` per input segment
/// are seeded at construction, and `Crossing` events are synthesized as
/// intersections are discovered.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Event<T: GeoFloat> {
    pub(crate) point: SweepPoint<T>,
    pub(crate) kind: EventKind,
}

/// Kind of a sweep event, along with the segment key(s) it refers to.
///
/// `Crossing` carries the pair that was adjacent and crossing when the
/// event was scheduled; the keys are re-resolved against the active
/// order when the event is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EventKind {
    Start { segment: usize },
    End { segment: usize },
    Crossing { above: usize, below: usize },
}

impl EventKind {
    /// Tie-break rank among events at the same point. Starts are
    /// handled before ends so that segments sharing an end point are
    /// both active when the touch is checked.
    fn rank(&self) -> u8 {
        match self {
            EventKind::Start { .. } => 0,
            EventKind::Crossing { .. } => 1,
            EventKind::End { .. } => 2,
        }
    }
}

/// Equality check for usage in ordered collections. Note that it
/// ignores the segment keys.
impl<T: GeoFloat> PartialEq for Event<T> {
    fn eq(&self, other: &Self) -> bool {
        self.point == other.point && self.kind.rank() == other.kind.rank()
    }
}

/// Assert total equality
impl<T: GeoFloat> Eq for Event<T> {}

/// Ordering for use with a max-heap (`BinaryHeap`). Note that it
/// ignores the segment keys. This suffices for heap usage, where
/// repeated items are allowed.
impl<T: GeoFloat> PartialOrd for Event<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(
            self.point
                .cmp(&other.point)
                .then_with(|| self.kind.rank().cmp(&other.kind.rank()))
                .reverse(),
        )
    }
}

/// Derive `Ord` from `PartialOrd` and expect to not fail.
impl<T: GeoFloat> Ord for Event<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.partial_cmp(other).unwrap()
    }
}

/// Wraps a [`Coordinate`] to support lexicographic ordering.
///
/// The ordering is by `x` and then by `y`. Implements `PartialOrd`,
/// `Ord` and `Eq` even though `Coordinate` doesn't implement these.
/// This is necessary to support insertion to ordered collections,
/// especially `BinaryHeap` as required by sweep algorithms.
///
/// Note that the trait impls exist even when `T` is not `Eq` or
/// `Ord`. We must ensure that any sweep point only contains values
/// that can be consistently ordered.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct SweepPoint<T: GeoFloat>(Coordinate<T>);

impl<T: GeoFloat> SweepPoint<T> {
    /// Get the inner coordinate.
    #[inline]
    pub fn coord(&self) -> Coordinate<T> {
        self.0
    }

    #[inline]
    pub fn x(&self) -> T {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> T {
        self.0.y
    }
}

/// Implement lexicographic ordering by `x` and then by `y`
/// coordinate.
impl<T: GeoFloat> PartialOrd for SweepPoint<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.0.x.partial_cmp(&other.0.x) {
            Some(Ordering::Equal) => self.0.y.partial_cmp(&other.0.y),
            o => o,
        }
    }
}

/// Derive `Ord` from `PartialOrd` and expect to not fail.
impl<T: GeoFloat> Ord for SweepPoint<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.partial_cmp(other).unwrap()
    }
}

/// We derive `Eq` manually to not require `T: Eq`.
impl<T: GeoFloat> Eq for SweepPoint<T> {}

/// Create from `Coordinate` while checking the components are finite.
impl<T: GeoFloat> From<Coordinate<T>> for SweepPoint<T> {
    fn from(pt: Coordinate<T>) -> Self {
        assert!(
            pt.x.is_finite(),
            "sweep point requires a finite x-coordinate"
        );
        assert!(
            pt.y.is_finite(),
            "sweep point requires a finite y-coordinate"
        );
        SweepPoint(pt)
    }
}

/// Queue of pending sweep events, ordered by event point (`x` and then
/// `y`) with ties broken by event kind.
///
/// Crossing events are deduplicated by their (point, unordered pair)
/// identity: both neighbor checks around a crossing may independently
/// detect the same geometric intersection, and only the first may
/// schedule an event for it.
pub(crate) struct EventQueue<T: GeoFloat> {
    heap: BinaryHeap<Event<T>>,
    scheduled: BTreeSet<(SweepPoint<T>, usize, usize)>,
}

impl<T: GeoFloat> EventQueue<T> {
    pub(crate) fn with_capacity(size: usize) -> Self {
        EventQueue {
            heap: BinaryHeap::with_capacity(2 * size),
            scheduled: BTreeSet::new(),
        }
    }

    /// Insert an end-point event.
    pub(crate) fn push(&mut self, event: Event<T>) {
        self.heap.push(event);
    }

    /// Insert a crossing event for the given pair, unless one was
    /// already scheduled at this point for the same unordered pair.
    /// Returns `true` if the event was inserted.
    pub(crate) fn schedule_crossing(
        &mut self,
        point: SweepPoint<T>,
        above: usize,
        below: usize,
    ) -> bool {
        let pair = (above.min(below), above.max(below));
        if !self.scheduled.insert((point, pair.0, pair.1)) {
            return false;
        }
        self.heap.push(Event {
            point,
            kind: EventKind::Crossing { above, below },
        });
        true
    }

    /// Remove and return the event with the least key.
    pub(crate) fn pop(&mut self) -> Option<Event<T>> {
        self.heap.pop()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::iter::from_fn;

    use super::*;

    #[test]
    fn test_sweep_point_ordering() {
        let p1 = SweepPoint::from(Coordinate { x: 0., y: 0. });
        let p2 = SweepPoint::from(Coordinate { x: 1., y: 0. });
        let p3 = SweepPoint::from(Coordinate { x: 1., y: 1. });
        let p4 = SweepPoint::from(Coordinate { x: 1., y: 1. });

        assert!(p1 < p2);
        assert!(p1 < p3);
        assert!(p2 < p3);
        assert!(p3 <= p4);
    }

    #[test]
    fn test_event_ordering() {
        let e1 = Event {
            point: SweepPoint::from(Coordinate { x: 0., y: 0. }),
            kind: EventKind::Start { segment: 0 },
        };
        let e2 = Event {
            point: SweepPoint::from(Coordinate { x: 1., y: 0. }),
            kind: EventKind::Start { segment: 1 },
        };
        let e3 = Event {
            point: SweepPoint::from(Coordinate { x: 1., y: 0. }),
            kind: EventKind::End { segment: 1 },
        };
        let e4 = Event {
            point: SweepPoint::from(Coordinate { x: 1., y: 1. }),
            kind: EventKind::Crossing { above: 1, below: 0 },
        };

        let mut heap = BinaryHeap::new();
        heap.push(e4);
        heap.push(e3);
        heap.push(e2);
        heap.push(e1);

        let order: Vec<_> = from_fn(|| heap.pop())
            .map(|e| (e.point.x(), e.point.y(), e.kind.rank()))
            .collect();
        assert_eq!(
            order,
            vec![(0., 0., 0), (1., 0., 0), (1., 0., 2), (1., 1., 1)]
        );
    }

    #[test]
    fn test_crossing_dedup() {
        let mut queue = EventQueue::<f64>::with_capacity(4);
        let pt = SweepPoint::from(Coordinate { x: 1., y: 1. });

        assert!(queue.schedule_crossing(pt, 3, 7));
        // Same unordered pair at the same point: rejected.
        assert!(!queue.schedule_crossing(pt, 7, 3));
        // Different pair at the same point: allowed.
        assert!(queue.schedule_crossing(pt, 3, 8));

        assert!(queue.pop().is_some());
        assert!(queue.pop().is_some());
        assert!(queue.is_empty());
    }
}
