use std::collections::BTreeSet;

use geo::{Coordinate, GeoFloat, Line};
use log::{debug, trace};
use slab::Slab;
use smallvec::SmallVec;

use crate::active::ActiveOrder;
use crate::events::{Event, EventKind, EventQueue, SweepPoint};
use crate::geometry::{intersection_point, segments_intersect};
use crate::segments::Segment;

/// Sweep algorithm for detecting all crossings.
///
/// This is an internal data-structure that implements the
/// [Bentley-Ottman] sweep: a heap of pending events, the ordered set
/// of segments straddling the sweep position, and the accumulated
/// intersection points. End-users should use the iterator interface
/// built around this sweep.
///
/// [Bentley-Ottman]: //en.wikipedia.org/wiki/Bentley%E2%80%93Ottmann_algorithm
pub(crate) struct Sweep<T: GeoFloat> {
    segments: Slab<Segment<T>>,
    events: EventQueue<T>,
    active: ActiveOrder<T>,
    sweep_x: T,
    intersections: BTreeSet<SweepPoint<T>>,
}

impl<T: GeoFloat> Sweep<T> {
    /// Build a sweep over the given segments, seeding one start and
    /// one end event per segment.
    pub(crate) fn new<I: IntoIterator<Item = Line<T>>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let size = {
            let (min_size, max_size) = iter.size_hint();
            max_size.unwrap_or(min_size)
        };

        let mut sweep = Sweep {
            segments: Slab::with_capacity(size),
            events: EventQueue::with_capacity(size),
            active: ActiveOrder::new(),
            sweep_x: T::neg_infinity(),
            intersections: BTreeSet::new(),
        };
        for line in iter {
            let key = Segment::create_in_slab(&mut sweep.segments, line);
            for e in sweep.segments[key].events().iter() {
                sweep.events.push(*e);
            }
        }

        sweep
    }

    /// Drain the event queue and return the deduplicated intersection
    /// points in sweep order.
    pub(crate) fn run(mut self) -> Vec<Coordinate<T>> {
        while let Some(event) = self.events.pop() {
            self.handle_event(event);
        }
        debug_assert!(self.active.is_empty());
        self.intersections.into_iter().map(|p| p.coord()).collect()
    }

    fn handle_event(&mut self, event: Event<T>) {
        trace!("handling event: {:?}", event);

        // Advance the sweep position; this refreshes the y-value of
        // every active segment without disturbing their order.
        let x = event.point.x();
        if x != self.sweep_x {
            self.active.advance_to(x, &self.segments);
            self.sweep_x = x;
        }

        // Candidate (above, below) pairs to check after the mutation.
        let mut pairs: SmallVec<[(usize, usize); 2]> = SmallVec::new();

        match event.kind {
            EventKind::Start { segment } => {
                self.active.insert(segment, &self.segments, x);
                if let Some(below) = self.active.prev_key(segment) {
                    pairs.push((segment, below));
                }
                if let Some(above) = self.active.next_key(segment) {
                    pairs.push((above, segment));
                }
            }
            EventKind::End { segment } => {
                let below = self.active.prev_key(segment);
                let above = self.active.next_key(segment);
                self.active.remove(segment);
                // The two segments adjacent to the vacated slot are
                // now adjacent to each other.
                if let (Some(above), Some(below)) = (above, below) {
                    pairs.push((above, below));
                }
            }
            EventKind::Crossing { above, below } => {
                // The stored handles may be stale: either segment may
                // have left the active order since the event was
                // scheduled, in which case the crossing has already
                // been resolved by another path.
                //
                // Otherwise perform the rank exchange in place. Every
                // active segment positioned between the two handles
                // also passes through the event point, so the exchange
                // reorders that whole block at once.
                let (lower, upper) =
                    match self.active.exchange_at(above, below, event.point.y()) {
                        Some(block) => block,
                        None => {
                            trace!(
                                "dropping crossing event with stale handles: {:?} / {:?}",
                                above,
                                below
                            );
                            return;
                        }
                    };

                // Crossings exposed by the exchange involve the outer
                // neighbors of the exchanged block.
                if let Some(next) = self.active.next_key(upper) {
                    pairs.push((next, upper));
                }
                if let Some(prev) = self.active.prev_key(lower) {
                    pairs.push((lower, prev));
                }
            }
        }

        for (above, below) in pairs {
            self.check_pair(above, below);
        }
    }

    /// Check a newly adjacent (above, below) pair: if the segments
    /// cross at or after the sweep position, record the intersection
    /// and schedule a crossing event for it.
    fn check_pair(&mut self, above: usize, below: usize) {
        let above_line = self.segments[above].line();
        let below_line = self.segments[below].line();

        if !segments_intersect(&above_line, &below_line) {
            return;
        }
        let point = match intersection_point(&above_line, &below_line) {
            Some(pt) => pt,
            // Collinear pair: touches, but has no unique intersection
            // point to report.
            None => return,
        };
        if point.x < self.sweep_x {
            return;
        }

        let point = SweepPoint::from(point);
        if self.intersections.insert(point) {
            debug!(
                "found intersection:\n\tsegment1: {:?}\n\tsegment2: {:?}\n\tat: {:?}",
                self.segments[above], self.segments[below], point
            );
        }
        if self.events.schedule_crossing(point, above, below) {
            trace!(
                "scheduled crossing of {:?} / {:?} at {:?}",
                above,
                below,
                point
            );
        }
    }
}
