//! Native polygon JSON shape.
//!
//! A direct mapping of the model: `{"polygons": [...]}` with optional
//! image dimensions and metadata. Unknown keys are ignored.

use std::collections::HashMap;

use serde::Deserialize;

use crate::format::error::FormatError;
use crate::model::{Polygon, SegmentationData};

/// The polygon wire document. Dimensions are optional; the caller's
/// values fill the gap.
#[derive(Debug, Deserialize)]
struct PolygonDocument {
    polygons: Vec<Polygon>,
    #[serde(rename = "imageWidth", default)]
    image_width: Option<u32>,
    #[serde(rename = "imageHeight", default)]
    image_height: Option<u32>,
    #[serde(default)]
    metadata: HashMap<String, serde_json::Value>,
}

/// Normalize a polygon-shape document into [`SegmentationData`].
///
/// Degenerate polygons (fewer than 3 points) are kept as-is: the model
/// tolerates them and the editor simply treats them as invalid for
/// rendering and hit-testing.
pub fn load_polygon_document(
    value: serde_json::Value,
    image_width: u32,
    image_height: u32,
) -> Result<SegmentationData, FormatError> {
    let doc: PolygonDocument = serde_json::from_value(value)?;

    for polygon in doc.polygons.iter().filter(|p| !p.is_valid()) {
        log::warn!(
            "polygon '{}' has only {} points",
            polygon.id,
            polygon.points.len()
        );
    }

    Ok(SegmentationData {
        polygons: doc.polygons,
        image_width: doc.image_width.unwrap_or(image_width),
        image_height: doc.image_height.unwrap_or(image_height),
        metadata: doc.metadata,
    })
}
