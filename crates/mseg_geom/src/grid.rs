//! Spatial grid acceleration for nearest-segment queries on large rings.
//!
//! Vertex indices are bucketed into uniform cells; a query only evaluates
//! the segments touching vertices in cells near the probe point. A segment
//! whose both endpoints fall outside the search window can be missed - an
//! accepted approximation for large polygons, where the exact scan is the
//! bottleneck. Small rings take the exact linear path.

use std::collections::HashMap;

use crate::point::{point_to_segment, Point};
use crate::polygon::{nearest_segment, NearestSegment};

/// Default grid cell size in model units.
pub const DEFAULT_CELL_SIZE: f32 = 50.0;

/// Rings below this vertex count always use the exact linear scan.
pub const GRID_MIN_VERTICES: usize = 50;

/// Uniform spatial grid over the vertices of a single ring.
#[derive(Debug)]
pub struct SegmentGrid {
    cell_size: f32,
    /// Vertex indices bucketed by integer cell coordinate.
    cells: HashMap<(i32, i32), Vec<usize>>,
}

impl SegmentGrid {
    /// Bucket all ring vertices with the given cell size.
    pub fn build(points: &[Point], cell_size: f32) -> Self {
        let cell_size = if cell_size > 0.0 { cell_size } else { DEFAULT_CELL_SIZE };
        let mut cells: HashMap<(i32, i32), Vec<usize>> = HashMap::new();
        for (i, p) in points.iter().enumerate() {
            cells.entry(Self::cell_of(p, cell_size)).or_default().push(i);
        }
        Self { cell_size, cells }
    }

    fn cell_of(p: &Point, cell_size: f32) -> (i32, i32) {
        ((p.x / cell_size).floor() as i32, (p.y / cell_size).floor() as i32)
    }

    /// Find the nearest ring segment within `threshold` of `point`,
    /// evaluating only segments that touch a vertex in the cells within
    /// the search window.
    pub fn query(&self, points: &[Point], point: Point, threshold: f32) -> Option<NearestSegment> {
        if points.len() < 2 {
            return None;
        }

        let rings = ((threshold * 2.0) / self.cell_size).ceil() as i32;
        let center = Self::cell_of(&point, self.cell_size);

        // Candidate segment start indices: each candidate vertex touches the
        // segment starting at it and the one ending at it.
        let n = points.len();
        let mut candidates: Vec<usize> = Vec::new();
        for cx in (center.0 - rings)..=(center.0 + rings) {
            for cy in (center.1 - rings)..=(center.1 + rings) {
                if let Some(indices) = self.cells.get(&(cx, cy)) {
                    for &i in indices {
                        candidates.push(i);
                        candidates.push((i + n - 1) % n);
                    }
                }
            }
        }
        candidates.sort_unstable();
        candidates.dedup();

        let mut best: Option<NearestSegment> = None;
        for i in candidates {
            let j = (i + 1) % n;
            let proj = point_to_segment(point, points[i], points[j]);
            if proj.distance <= threshold && best.map_or(true, |b| proj.distance < b.distance) {
                best = Some(NearestSegment {
                    index: i,
                    distance: proj.distance,
                    closest: proj.closest,
                });
            }
        }
        best
    }
}

/// Find the nearest ring segment within `threshold` of `point`.
///
/// Small rings (below [`GRID_MIN_VERTICES`]) and callers that disable the
/// optimization get the exact linear scan; larger rings build a
/// [`SegmentGrid`] with [`DEFAULT_CELL_SIZE`] cells. Returns `None` when no
/// segment is within `threshold`.
pub fn find_closest_segment(
    points: &[Point],
    point: Point,
    threshold: f32,
    use_grid: bool,
) -> Option<NearestSegment> {
    if !use_grid || points.len() < GRID_MIN_VERTICES {
        return nearest_segment(point, points).filter(|s| s.distance <= threshold);
    }

    SegmentGrid::build(points, DEFAULT_CELL_SIZE).query(points, point, threshold)
}
