//! Polygon ring metrics and queries.
//!
//! All functions take a plain vertex slice; the ring is implicitly closed
//! (last vertex connects back to the first) unless stated otherwise.
//! Degenerate input (fewer vertices than the operation needs) yields a
//! zero/`None`/`false` result instead of an error.

use serde::{Deserialize, Serialize};

use crate::point::{point_to_segment, Point};

/// Signed shoelace area. Positive for counter-clockwise rings in a
/// y-up coordinate system; image coordinates are y-down, so the sign is
/// flipped there. Only the sign and magnitude matter to callers.
pub fn signed_area(points: &[Point]) -> f32 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for i in 0..points.len() {
        let j = (i + 1) % points.len();
        area += points[i].x * points[j].y;
        area -= points[j].x * points[i].y;
    }
    area / 2.0
}

/// Absolute polygon area via the shoelace formula. Winding-order agnostic.
pub fn polygon_area(points: &[Point]) -> f32 {
    signed_area(points).abs()
}

/// Winding test based on the sign of the shoelace sum.
///
/// In image coordinates (y grows downward) a positive shoelace sum means
/// the ring winds clockwise on screen.
pub fn is_clockwise(points: &[Point]) -> bool {
    signed_area(points) > 0.0
}

/// Perimeter of the vertex chain. When `closed`, the wrap-around segment
/// from the last vertex back to the first is included.
pub fn polygon_perimeter(points: &[Point], closed: bool) -> f32 {
    if points.len() < 2 {
        return 0.0;
    }
    let mut perimeter = 0.0;
    for pair in points.windows(2) {
        perimeter += pair[0].distance_to(&pair[1]);
    }
    if closed {
        perimeter += points[points.len() - 1].distance_to(&points[0]);
    }
    perimeter
}

/// The nearest ring edge to a query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestSegment {
    /// Index of the edge's first vertex; the edge runs to `(index + 1) % n`.
    pub index: usize,
    /// Distance from the query point to the edge.
    pub distance: f32,
    /// Closest point on the edge.
    pub closest: Point,
}

/// Scan all edges (wrapping last→first) for the globally nearest one.
///
/// Returns `None` for rings with fewer than 2 vertices.
pub fn nearest_segment(point: Point, points: &[Point]) -> Option<NearestSegment> {
    if points.len() < 2 {
        return None;
    }

    let mut best: Option<NearestSegment> = None;
    for i in 0..points.len() {
        let j = (i + 1) % points.len();
        let proj = point_to_segment(point, points[i], points[j]);
        if best.map_or(true, |b| proj.distance < b.distance) {
            best = Some(NearestSegment {
                index: i,
                distance: proj.distance,
                closest: proj.closest,
            });
        }
    }
    best
}

/// Ray-casting point-in-polygon test (even-odd rule).
///
/// Points exactly on an edge get an unspecified but stable verdict; the
/// function never panics or loops regardless of input.
pub fn point_in_polygon(point: Point, points: &[Point]) -> bool {
    if points.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let pi = points[i];
        let pj = points[j];
        if ((pi.y > point.y) != (pj.y > point.y))
            && (point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x)
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl BoundingBox {
    /// Bounding box of a vertex set. `None` when empty.
    pub fn of_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let mut bbox = BoundingBox {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for p in &points[1..] {
            bbox.min_x = bbox.min_x.min(p.x);
            bbox.min_y = bbox.min_y.min(p.y);
            bbox.max_x = bbox.max_x.max(p.x);
            bbox.max_y = bbox.max_y.max(p.y);
        }
        Some(bbox)
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    /// Check if a point is inside the box (inclusive).
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }
}
