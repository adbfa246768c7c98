//! Point type and point/segment primitives.

use serde::{Deserialize, Serialize};

/// A 2D point in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Calculate distance to another point.
    pub fn distance_to(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Squared distance to another point (avoids the sqrt when only
    /// comparing distances).
    pub fn distance_sq(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Linear interpolation between `self` and `other` at parameter `t`.
    pub fn lerp(&self, other: &Point, t: f32) -> Point {
        Point::new(self.x + (other.x - self.x) * t, self.y + (other.y - self.y) * t)
    }
}

/// Result of projecting a point onto a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentProjection {
    /// Distance from the point to the closest point on the segment.
    pub distance: f32,
    /// The closest point on the segment.
    pub closest: Point,
    /// Projection parameter along the segment, clamped to [0, 1].
    pub t: f32,
}

/// Project `p` onto the segment `a`-`b`.
///
/// The projection parameter is clamped to the segment, so the closest point
/// is always between `a` and `b` inclusive. When `a == b` the segment
/// degenerates to a point and the result is the plain point distance with
/// `t = 0`.
pub fn point_to_segment(p: Point, a: Point, b: Point) -> SegmentProjection {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let length_sq = dx * dx + dy * dy;

    if length_sq == 0.0 {
        return SegmentProjection {
            distance: p.distance_to(&a),
            closest: a,
            t: 0.0,
        };
    }

    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / length_sq).clamp(0.0, 1.0);
    let closest = Point::new(a.x + t * dx, a.y + t * dy);

    SegmentProjection {
        distance: p.distance_to(&closest),
        closest,
        t,
    }
}
