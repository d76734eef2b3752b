use std::iter::FromIterator;

use geo::{Coordinate, GeoFloat, Line};

use crate::sweep::Sweep;

/// Compute all pairwise intersection points of a set of line segments.
///
/// Runs a [Bentley-Ottman] sweep over the input and returns the
/// deduplicated intersection coordinates in sweep order (`x` and then
/// `y`). This is a drop-in replacement for testing all pairs, but is
/// typically more efficient when the number of intersections is small
/// compared to the number of pairs.
///
/// [Bentley-Ottman]: //en.wikipedia.org/wiki/Bentley%E2%80%93Ottmann_algorithm
pub fn intersections<T, I>(lines: I) -> Vec<Coordinate<T>>
where
    T: GeoFloat,
    I: IntoIterator<Item = Line<T>>,
{
    Sweep::new(lines).run()
}

/// Iterator that yields all intersection points.
///
/// Construct it by `collect`-ing an iterator of [`Line`]s. The sweep
/// runs to completion at construction; the iterator then yields each
/// distinct intersection coordinate once, in sweep order.
pub struct Intersections<T: GeoFloat> {
    points: std::vec::IntoIter<Coordinate<T>>,
}

impl<T: GeoFloat> FromIterator<Line<T>> for Intersections<T> {
    fn from_iter<I: IntoIterator<Item = Line<T>>>(iter: I) -> Self {
        Intersections {
            points: intersections(iter).into_iter(),
        }
    }
}

impl<T: GeoFloat> Iterator for Intersections<T> {
    type Item = Coordinate<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.points.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.points.size_hint()
    }
}

impl<T: GeoFloat> ExactSizeIterator for Intersections<T> {}
