//! Segmentation snapshot value type.

use std::collections::HashMap;

use mseg_geom::Point;
use serde::{Deserialize, Serialize};

use crate::model::Polygon;

/// One segmentation result for one image.
///
/// Treated as an immutable snapshot by the editor: every committed edit
/// produces a fresh `SegmentationData` instead of mutating fields in
/// place. Reference-equality change detection in the embedding layer and
/// the snapshot history both rely on this discipline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentationData {
    pub polygons: Vec<Polygon>,
    #[serde(rename = "imageWidth")]
    pub image_width: u32,
    #[serde(rename = "imageHeight")]
    pub image_height: u32,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl SegmentationData {
    /// Create an empty segmentation for an image of the given size.
    pub fn new(image_width: u32, image_height: u32) -> Self {
        Self {
            polygons: Vec::new(),
            image_width,
            image_height,
            metadata: HashMap::new(),
        }
    }

    /// Find a polygon by id.
    pub fn polygon(&self, id: &str) -> Option<&Polygon> {
        self.polygons.iter().find(|p| p.id == id)
    }

    /// Find the polygon containing `point`, preferring the smallest area.
    ///
    /// The smallest-area tie-break deliberately selects holes and nested
    /// shapes over their containing parent on overlapping clicks.
    pub fn polygon_at(&self, point: Point) -> Option<&Polygon> {
        self.polygons
            .iter()
            .filter(|p| p.is_valid() && p.contains(point))
            .min_by(|a, b| {
                a.area()
                    .partial_cmp(&b.area())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }

    /// Copy of this segmentation with one polygon's ring replaced.
    /// Returns `None` if the id is unknown.
    pub fn with_polygon_points(&self, id: &str, points: Vec<Point>) -> Option<Self> {
        let mut next = self.clone();
        let target = next.polygons.iter_mut().find(|p| p.id == id)?;
        target.points = points;
        Some(next)
    }

    /// Copy of this segmentation with a polygon appended.
    pub fn with_polygon(&self, polygon: Polygon) -> Self {
        let mut next = self.clone();
        next.polygons.push(polygon);
        next
    }

    /// Copy of this segmentation with a polygon removed (and any holes
    /// that referenced it as parent).
    /// Returns `None` if the id is unknown.
    pub fn without_polygon(&self, id: &str) -> Option<Self> {
        if self.polygon(id).is_none() {
            return None;
        }
        let mut next = self.clone();
        next.polygons
            .retain(|p| p.id != id && p.parent_id.as_deref() != Some(id));
        Some(next)
    }

    /// Copy of this segmentation with one polygon replaced by several
    /// (used by slicing). The replacements take the original's list slot.
    /// Returns `None` if the id is unknown.
    pub fn with_polygon_replaced(&self, id: &str, replacements: Vec<Polygon>) -> Option<Self> {
        let index = self.polygons.iter().position(|p| p.id == id)?;
        let mut next = self.clone();
        next.polygons.splice(index..=index, replacements);
        Some(next)
    }
}
