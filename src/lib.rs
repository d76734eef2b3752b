//! Plane-sweep computation of line-segment intersections.
//!
//! This is an implementation of the [Bentley-Ottman] algorithm to
//! efficiently compute all intersection points of a collection of
//! line segments. The simplest usage is the [`Intersections`]
//! iterator, which yields each distinct intersection coordinate once.
//! This is essentially a drop-in replacement to testing all pairs of
//! segments, but is typically more efficient when the number of
//! intersections is small compared to the number of pairs.
//!
//! The sweep advances over the segments from left to right, keeping
//! the segments that straddle the current position ordered by their
//! y-value there. Only segments adjacent in this order are tested
//! against each other: adjacency changes exactly at segment end
//! points and crossings, which is what the event queue tracks.
//!
//! # Usage
//!
//! Construct an [`Intersections`] from an iterator of [`Line`]s:
//!
//! ```rust
//! use geo::Line;
//! use plane_sweep::Intersections;
//! use std::iter::FromIterator;
//! let input = vec![
//!     Line::from([(0., 0.), (4., 4.)]),
//!     Line::from([(0., 3.), (4., 3.)]),
//!     Line::from([(0., 1.), (4., 1.)]),
//! ];
//! let iter = Intersections::<_>::from_iter(input);
//! // The diagonal crosses both horizontals.
//! assert_eq!(iter.count(), 2);
//! ```
//!
//! Segment lists can also be read from and written to the simple
//! whitespace-separated text format supported by [`io`].
//!
//! [Bentley-Ottman]: //en.wikipedia.org/wiki/Bentley%E2%80%93Ottmann_algorithm
//! [`Line`]: geo::Line
mod events;
pub use events::SweepPoint;

pub mod geometry;

mod active;
mod segments;
mod sweep;

pub mod crossings;
pub use crossings::{intersections, Intersections};

pub mod io;
pub use io::{read_segments, write_intersections, ReadSegmentsError};
