//! Data model for segmentation editing.

mod polygon;
mod segmentation;

pub use polygon::{Polygon, PolygonId, PolygonKind, MIN_POLYGON_VERTICES};
pub use segmentation::SegmentationData;
