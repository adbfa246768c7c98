//! Ring simplification using the Ramer-Douglas-Peucker algorithm.

use thiserror::Error;

use crate::point::{point_to_segment, Point};

/// Minimum number of vertices a simplified ring must keep.
pub const MIN_RING_VERTICES: usize = 3;

/// Errors from ring simplification.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimplifyError {
    /// The simplified ring would have fewer than 3 vertices.
    #[error("simplification would leave fewer than {MIN_RING_VERTICES} points")]
    TooFewPoints,
}

/// Simplify a closed ring, dropping vertices within `tolerance` of the
/// chord between their surviving neighbors.
///
/// The ring is anchored at vertex 0 and at the vertex farthest from it, so
/// the wrap-around edge participates like any other. Fails (input
/// unchanged) when fewer than [`MIN_RING_VERTICES`] vertices would survive.
/// Simplifying an already-simplified ring with the same tolerance is a
/// no-op.
pub fn simplify_ring(points: &[Point], tolerance: f32) -> Result<Vec<Point>, SimplifyError> {
    if points.len() < MIN_RING_VERTICES {
        return Err(SimplifyError::TooFewPoints);
    }
    if points.len() == MIN_RING_VERTICES {
        return Ok(points.to_vec());
    }

    // Anchor the closed ring at vertex 0 and at the vertex farthest from it;
    // both halves then simplify as open polylines.
    let far = points
        .iter()
        .enumerate()
        .skip(1)
        .max_by(|(_, a), (_, b)| {
            points[0]
                .distance_sq(a)
                .partial_cmp(&points[0].distance_sq(b))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(i, _)| i)
        .unwrap_or(points.len() / 2);

    let mut kept = vec![false; points.len()];
    kept[0] = true;
    kept[far] = true;

    rdp_recurse(points, 0, far, tolerance, &mut kept);
    rdp_wrap_span(points, far, tolerance, &mut kept);

    let simplified: Vec<Point> = points
        .iter()
        .zip(&kept)
        .filter(|&(_, k)| *k)
        .map(|(&p, _)| p)
        .collect();

    if simplified.len() < MIN_RING_VERTICES {
        return Err(SimplifyError::TooFewPoints);
    }
    Ok(simplified)
}

/// Recursive step over the open span `start..end` (both already kept):
/// keep the farthest interior vertex when it exceeds `tolerance`, recurse
/// into both halves.
fn rdp_recurse(points: &[Point], start: usize, end: usize, tolerance: f32, kept: &mut [bool]) {
    if end <= start + 1 {
        return;
    }

    let mut max_dist = 0.0;
    let mut max_idx = start;
    for i in (start + 1)..end {
        let d = point_to_segment(points[i], points[start], points[end]).distance;
        if d > max_dist {
            max_dist = d;
            max_idx = i;
        }
    }

    if max_dist > tolerance {
        kept[max_idx] = true;
        rdp_recurse(points, start, max_idx, tolerance, kept);
        rdp_recurse(points, max_idx, end, tolerance, kept);
    }
}

/// Like [`rdp_recurse`] for the wrap-around span from `start` through the
/// end of the ring back to vertex 0.
fn rdp_wrap_span(points: &[Point], start: usize, tolerance: f32, kept: &mut [bool]) {
    let n = points.len();
    if start + 1 >= n {
        return;
    }

    let mut max_dist = 0.0;
    let mut max_idx = start;
    for i in (start + 1)..n {
        let d = point_to_segment(points[i], points[start], points[0]).distance;
        if d > max_dist {
            max_dist = d;
            max_idx = i;
        }
    }

    if max_dist > tolerance {
        kept[max_idx] = true;
        rdp_recurse(points, start, max_idx, tolerance, kept);
        rdp_wrap_span(points, max_idx, tolerance, kept);
    }
}
