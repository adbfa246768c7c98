//! Polygon slicing along a user-drawn line.
//!
//! A slice line must enter and leave the ring exactly once; the ring is
//! then split into the two boundary walks between the intersection points.
//! Validation failures leave the input untouched and carry the reason the
//! UI layer surfaces to the user.

use thiserror::Error;

use crate::intersect::segment_intersection;
use crate::point::Point;
use crate::polygon::{polygon_area, polygon_perimeter};
use crate::simplify::MIN_RING_VERTICES;

/// Minimum slice-line length in model units.
pub const MIN_LINE_LENGTH: f32 = 5.0;

/// Intersections closer than this to an existing vertex are discarded to
/// avoid degenerate splits.
pub const VERTEX_EPSILON: f32 = 1e-4;

/// Reasons a slice operation is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SliceError {
    /// The slice line is shorter than [`MIN_LINE_LENGTH`].
    #[error("slice line is too short")]
    LineTooShort,

    /// The slice line crosses itself.
    #[error("slice line is self-intersecting")]
    SelfIntersecting,

    /// The line does not intersect the polygon boundary at all.
    #[error("slice line does not cross the polygon")]
    DoesNotCross,

    /// The line intersects the boundary exactly once.
    #[error("slice line must cross the polygon at least twice")]
    CrossesOnce,

    /// The line intersects the boundary more than twice.
    #[error("slice line crosses the polygon too many times")]
    CrossesTooMany,

    /// One of the resulting pieces would have fewer than 3 points.
    #[error("slicing would create a polygon with fewer than {MIN_RING_VERTICES} points")]
    PieceTooSmall,
}

/// The two rings produced by a successful slice.
///
/// Ordering is deterministic: `first` starts at the intersection closer to
/// the slice line's start point.
#[derive(Debug, Clone, PartialEq)]
pub struct SlicedRings {
    pub first: Vec<Point>,
    pub second: Vec<Point>,
}

/// A boundary crossing of the slice line.
#[derive(Debug, Clone, Copy)]
struct Crossing {
    /// Edge index: the edge from ring vertex `edge` to `edge + 1` (wrapped).
    edge: usize,
    /// Parametric position along the slice line; the sort key.
    t: f32,
    point: Point,
}

/// Split `ring` along the line `start`-`end` into two rings.
///
/// Deterministic for identical inputs: crossings are sorted by their
/// parametric position along the slice line before the ring walks are
/// built, so tie-breaking never depends on edge iteration order.
pub fn slice_into_two(ring: &[Point], start: Point, end: Point) -> Result<SlicedRings, SliceError> {
    if start.distance_to(&end) < MIN_LINE_LENGTH {
        log::debug!("slice rejected: line too short");
        return Err(SliceError::LineTooShort);
    }
    if polyline_self_intersects(&[start, end]) {
        log::debug!("slice rejected: self-intersecting line");
        return Err(SliceError::SelfIntersecting);
    }

    let mut crossings = find_crossings(ring, start, end);
    match crossings.len() {
        0 => {
            log::debug!("slice rejected: no boundary crossings");
            return Err(SliceError::DoesNotCross);
        }
        1 => {
            log::debug!("slice rejected: single boundary crossing");
            return Err(SliceError::CrossesOnce);
        }
        2 => {}
        n => {
            log::debug!("slice rejected: {n} boundary crossings");
            return Err(SliceError::CrossesTooMany);
        }
    }

    crossings.sort_by(|a, b| a.t.partial_cmp(&b.t).unwrap_or(std::cmp::Ordering::Equal));
    let (h1, h2) = (crossings[0], crossings[1]);

    let first = walk_ring(ring, h1, h2);
    let second = walk_ring(ring, h2, h1);

    if first.len() < MIN_RING_VERTICES || second.len() < MIN_RING_VERTICES {
        log::debug!("slice rejected: resulting piece below {MIN_RING_VERTICES} points");
        return Err(SliceError::PieceTooSmall);
    }

    Ok(SlicedRings { first, second })
}

/// Split the ring and keep only the piece with the larger combined
/// perimeter + area score. Thin wrapper over [`slice_into_two`].
pub fn slice_keep_larger(ring: &[Point], start: Point, end: Point) -> Result<Vec<Point>, SliceError> {
    let pieces = slice_into_two(ring, start, end)?;
    let score_first = piece_score(&pieces.first);
    let score_second = piece_score(&pieces.second);
    if score_first >= score_second {
        Ok(pieces.first)
    } else {
        Ok(pieces.second)
    }
}

/// Perimeter + area score used to pick the retained piece.
fn piece_score(ring: &[Point]) -> f32 {
    polygon_perimeter(ring, true) + polygon_area(ring)
}

/// All slice-line crossings of the ring boundary, excluding crossings that
/// coincide with a ring vertex (within [`VERTEX_EPSILON`]).
fn find_crossings(ring: &[Point], start: Point, end: Point) -> Vec<Crossing> {
    let n = ring.len();
    let mut crossings = Vec::new();
    for i in 0..n {
        let j = (i + 1) % n;
        let Some(hit) = segment_intersection(start, end, ring[i], ring[j]) else {
            continue;
        };
        if hit.point.distance_to(&ring[i]) < VERTEX_EPSILON
            || hit.point.distance_to(&ring[j]) < VERTEX_EPSILON
        {
            continue;
        }
        crossings.push(Crossing {
            edge: i,
            t: hit.t,
            point: hit.point,
        });
    }
    crossings
}

/// Walk the ring boundary from crossing `from` forward to crossing `to`,
/// capping both ends with the crossing points.
fn walk_ring(ring: &[Point], from: Crossing, to: Crossing) -> Vec<Point> {
    let n = ring.len();
    let mut piece = vec![from.point];

    if from.edge != to.edge {
        let mut idx = (from.edge + 1) % n;
        loop {
            piece.push(ring[idx]);
            if idx == to.edge {
                break;
            }
            idx = (idx + 1) % n;
        }
    }

    piece.push(to.point);
    piece
}

/// Check a polyline for self-intersection between non-adjacent segments.
///
/// A straight two-point slice line can never self-intersect; this exists
/// for the freehand multi-point slice line, which reuses the same
/// validation pipeline.
pub fn polyline_self_intersects(line: &[Point]) -> bool {
    if line.len() < 4 {
        return false;
    }
    let segments = line.len() - 1;
    for i in 0..segments {
        for j in (i + 2)..segments {
            // Skip the closing pair sharing the first vertex.
            if i == 0 && j == segments - 1 && line[0] == line[segments] {
                continue;
            }
            if segment_intersection(line[i], line[i + 1], line[j], line[j + 1]).is_some() {
                return true;
            }
        }
    }
    false
}
