//! Parametric segment-segment intersection.

use crate::point::Point;

/// Edges closer to parallel than this denominator are treated as
/// non-intersecting.
pub const PARALLEL_EPSILON: f32 = 1e-4;

/// An intersection between two segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// The intersection point.
    pub point: Point,
    /// Parameter along the first segment, in [0, 1].
    pub t: f32,
    /// Parameter along the second segment, in [0, 1].
    pub s: f32,
}

/// Intersect segment `p1`-`p2` with segment `p3`-`p4`.
///
/// Solves `p1 + t*(p2-p1) = p3 + s*(p4-p3)` and accepts the solution only
/// when both parameters land inside their segments. Near-parallel pairs
/// (denominator below [`PARALLEL_EPSILON`]) return `None` rather than a
/// far-away numeric artifact.
pub fn segment_intersection(p1: Point, p2: Point, p3: Point, p4: Point) -> Option<Intersection> {
    let d1x = p2.x - p1.x;
    let d1y = p2.y - p1.y;
    let d2x = p4.x - p3.x;
    let d2y = p4.y - p3.y;

    let denominator = d1x * d2y - d1y * d2x;
    if denominator.abs() < PARALLEL_EPSILON {
        return None;
    }

    let t = ((p3.x - p1.x) * d2y - (p3.y - p1.y) * d2x) / denominator;
    let s = ((p3.x - p1.x) * d1y - (p3.y - p1.y) * d1x) / denominator;

    if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&s) {
        return None;
    }

    Some(Intersection {
        point: Point::new(p1.x + t * d1x, p1.y + t * d1y),
        t,
        s,
    })
}
