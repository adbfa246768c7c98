//! Pure 2D geometry for the MSEG segmentation editor.
//!
//! Everything in this crate is a value type or a pure function of its
//! inputs: no editor state, no I/O, no clocks. The editing engine in the
//! root crate builds its hit-testing, slicing and simplification on top of
//! these primitives, and the same functions can run on a worker thread
//! without behavioral drift.

pub mod grid;
pub mod intersect;
pub mod point;
pub mod polygon;
pub mod simplify;
pub mod slice;

pub use grid::{find_closest_segment, SegmentGrid, DEFAULT_CELL_SIZE, GRID_MIN_VERTICES};
pub use intersect::{segment_intersection, Intersection};
pub use point::{point_to_segment, Point, SegmentProjection};
pub use polygon::{
    is_clockwise, nearest_segment, point_in_polygon, polygon_area, polygon_perimeter, signed_area,
    BoundingBox, NearestSegment,
};
pub use simplify::{simplify_ring, SimplifyError};
pub use slice::{slice_into_two, slice_keep_larger, SliceError, SlicedRings};
