//! Geometric primitives used by the sweep.
//!
//! The intersection predicate follows the classic four-orientation
//! scheme: two segments cross if each straddles the other's supporting
//! line, with collinear end-point containment handled as special
//! cases. The intersection point itself is solved from the implicit
//! line equations via Cramer's rule.

use geo::{
    kernels::{HasKernel, Kernel, Orientation},
    Coordinate, GeoFloat, Line,
};

/// Orientation of the ordered triple `(p, q, r)`.
///
/// Sign of the cross product of `q - p` and `r - q`, computed with the
/// robust kernel for `T`.
#[inline]
pub fn orientation<T: GeoFloat>(
    p: Coordinate<T>,
    q: Coordinate<T>,
    r: Coordinate<T>,
) -> Orientation {
    T::Ker::orient2d(p, q, r)
}

/// Checks that `q` lies within the axis-aligned bounding box of `p`
/// and `r`.
///
/// Only meaningful when the three points are collinear; used for the
/// collinear special cases of [`segments_intersect`].
pub fn lies_on_segment<T: GeoFloat>(p: Coordinate<T>, q: Coordinate<T>, r: Coordinate<T>) -> bool {
    q.x <= p.x.max(r.x) && q.x >= p.x.min(r.x) && q.y <= p.y.max(r.y) && q.y >= p.y.min(r.y)
}

/// Checks if two line segments cross or touch.
pub fn segments_intersect<T: GeoFloat>(a: &Line<T>, b: &Line<T>) -> bool {
    use Orientation::*;

    let o1 = orientation(a.start, a.end, b.start);
    let o2 = orientation(a.start, a.end, b.end);
    let o3 = orientation(b.start, b.end, a.start);
    let o4 = orientation(b.start, b.end, a.end);

    // General case: each segment straddles the other's line.
    if o1 != o2 && o3 != o4 {
        return true;
    }

    // Collinear special cases: an end point of one segment lies on the
    // other segment.
    if o1 == Collinear && lies_on_segment(a.start, b.start, a.end) {
        return true;
    }
    if o2 == Collinear && lies_on_segment(a.start, b.end, a.end) {
        return true;
    }
    if o3 == Collinear && lies_on_segment(b.start, a.start, b.end) {
        return true;
    }
    if o4 == Collinear && lies_on_segment(b.start, a.end, b.end) {
        return true;
    }

    false
}

/// Coefficients `(A, B, C)` of the implicit line equation
/// `A x + B y + C = 0` through the segment's end points.
fn line_equation<T: GeoFloat>(line: &Line<T>) -> (T, T, T) {
    let a = line.end.y - line.start.y;
    let b = line.start.x - line.end.x;
    let c = line.end.x * line.start.y - line.start.x * line.end.y;
    (a, b, c)
}

/// Intersection point of the supporting lines of two segments.
///
/// Solves the 2x2 linear system via Cramer's rule. Returns `None` if
/// the determinant is zero (parallel or coincident lines): such pairs
/// have no unique intersection point even when [`segments_intersect`]
/// reports them as touching via the collinear special cases.
pub fn intersection_point<T: GeoFloat>(a: &Line<T>, b: &Line<T>) -> Option<Coordinate<T>> {
    let (a1, b1, c1) = line_equation(a);
    let (a2, b2, c2) = line_equation(b);

    let determinant = a1 * b2 - a2 * b1;
    if determinant == T::zero() {
        return None;
    }

    Some(Coordinate {
        x: (b1 * c2 - b2 * c1) / determinant,
        y: (a2 * c1 - a1 * c2) / determinant,
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Line<f64> {
        Line::new(Coordinate { x: x1, y: y1 }, Coordinate { x: x2, y: y2 })
    }

    #[test]
    fn test_orientation() {
        use Orientation::*;
        let p = Coordinate { x: 0., y: 0. };
        let q = Coordinate { x: 1., y: 1. };

        assert_eq!(orientation(p, q, Coordinate { x: 2., y: 2. }), Collinear);
        assert_eq!(
            orientation(p, q, Coordinate { x: 2., y: 0. }),
            orientation(p, q, Coordinate { x: 1., y: 0. }),
        );
        assert_ne!(
            orientation(p, q, Coordinate { x: 2., y: 0. }),
            orientation(p, q, Coordinate { x: 0., y: 2. }),
        );
    }

    #[test]
    fn test_segments_intersect() {
        // Proper crossing.
        assert!(segments_intersect(
            &line(0., 0., 2., 2.),
            &line(0., 2., 2., 0.)
        ));
        // Disjoint parallels.
        assert!(!segments_intersect(
            &line(0., 0., 5., 0.),
            &line(0., 1., 5., 1.)
        ));
        // Shared end point.
        assert!(segments_intersect(
            &line(0., 0., 2., 2.),
            &line(0., 0., 2., -2.)
        ));
        // End point in the interior of the other segment.
        assert!(segments_intersect(
            &line(0., 0., 4., 0.),
            &line(2., 0., 2., 3.)
        ));
        // Collinear with overlap.
        assert!(segments_intersect(
            &line(0., 0., 3., 0.),
            &line(2., 0., 5., 0.)
        ));
        // Collinear without overlap.
        assert!(!segments_intersect(
            &line(0., 0., 1., 1.),
            &line(2., 2., 3., 3.)
        ));
    }

    #[test]
    fn test_intersection_point() {
        let pt = intersection_point(&line(0., 0., 2., 2.), &line(0., 2., 2., 0.)).unwrap();
        assert_relative_eq!(pt.x, 1.);
        assert_relative_eq!(pt.y, 1.);

        // Vertical against horizontal.
        let pt = intersection_point(&line(1., 0., 1., 4.), &line(0., 2., 3., 2.)).unwrap();
        assert_relative_eq!(pt.x, 1.);
        assert_relative_eq!(pt.y, 2.);
    }

    #[test]
    fn test_intersection_point_degenerate() {
        // Parallel lines have no unique intersection.
        assert!(intersection_point(&line(0., 0., 5., 0.), &line(0., 1., 5., 1.)).is_none());
        // Coincident lines neither, even though the segments touch.
        let a = line(0., 0., 3., 0.);
        let b = line(2., 0., 5., 0.);
        assert!(segments_intersect(&a, &b));
        assert!(intersection_point(&a, &b).is_none());
    }
}
