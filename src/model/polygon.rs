//! Polygon model types.

use mseg_geom::{point_in_polygon, polygon_area, polygon_perimeter, Point};
use serde::{Deserialize, Serialize};

/// Unique identifier for a polygon.
///
/// Backend-assigned ids (UUIDs) pass through untouched; polygons created
/// in the editor get session-local `poly-N` ids. The engine never assumes
/// a format.
pub type PolygonId = String;

/// Minimum number of vertices required for a valid polygon.
pub const MIN_POLYGON_VERTICES: usize = 3;

/// Whether a polygon is an outer contour or a hole inside one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PolygonKind {
    /// Outer contour of a cell/spheroid.
    #[default]
    External,
    /// Hole inside an external polygon.
    Internal,
}

impl PolygonKind {
    /// Get the display name for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            PolygonKind::External => "external",
            PolygonKind::Internal => "internal",
        }
    }
}

/// A closed polygon in image coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    /// Unique identifier.
    pub id: PolygonId,
    /// Ring vertices in order; implicitly closed.
    pub points: Vec<Point>,
    /// Outer contour or hole.
    #[serde(rename = "type", default)]
    pub kind: PolygonKind,
    /// Display color, if the backend assigned one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// For holes: the id of the containing external polygon. Advisory,
    /// not enforced by geometry.
    #[serde(rename = "parentId", default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<PolygonId>,
}

impl Polygon {
    /// Create a new polygon with the given ring.
    pub fn new(id: impl Into<PolygonId>, points: Vec<Point>, kind: PolygonKind) -> Self {
        Self {
            id: id.into(),
            points,
            kind,
            color: None,
            parent_id: None,
        }
    }

    /// Set the parent polygon id (builder style).
    pub fn with_parent(mut self, parent_id: impl Into<PolygonId>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Set the display color (builder style).
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Check if the polygon is valid (at least 3 vertices).
    pub fn is_valid(&self) -> bool {
        self.points.len() >= MIN_POLYGON_VERTICES
    }

    /// Absolute area via the shoelace formula.
    pub fn area(&self) -> f32 {
        polygon_area(&self.points)
    }

    /// Closed-ring perimeter.
    pub fn perimeter(&self) -> f32 {
        polygon_perimeter(&self.points, true)
    }

    /// Ray-casting containment test.
    pub fn contains(&self, point: Point) -> bool {
        point_in_polygon(point, &self.points)
    }
}
