//! Legacy contour JSON shape.
//!
//! The original segmentation pipeline emitted raw OpenCV output:
//! `{"contours": [[[x, y], ...], ...], "hierarchy": [[next, prev, child,
//! parent], ...]}`. A hierarchy row with `parent == -1` describes an
//! outer contour; any other parent index marks the contour as a hole
//! inside that contour's polygon.

use serde::Deserialize;

use crate::format::error::FormatError;
use crate::model::{Polygon, PolygonKind, SegmentationData, MIN_POLYGON_VERTICES};
use mseg_geom::Point;

/// The contour wire document.
#[derive(Debug, Deserialize)]
struct ContourDocument {
    contours: Vec<Vec<[f32; 2]>>,
    #[serde(default)]
    hierarchy: Option<Vec<[i32; 4]>>,
    #[serde(rename = "imageWidth", default)]
    image_width: Option<u32>,
    #[serde(rename = "imageHeight", default)]
    image_height: Option<u32>,
}

/// Normalize a contour-shape document into [`SegmentationData`].
///
/// Contours with fewer than 3 points are skipped with a warning. A
/// missing hierarchy treats every contour as external; a present
/// hierarchy must have one row per contour.
pub fn load_contour_document(
    value: serde_json::Value,
    image_width: u32,
    image_height: u32,
) -> Result<SegmentationData, FormatError> {
    let doc: ContourDocument = serde_json::from_value(value)?;

    if let Some(hierarchy) = &doc.hierarchy {
        if hierarchy.len() != doc.contours.len() {
            return Err(FormatError::HierarchyMismatch {
                contours: doc.contours.len(),
                hierarchy: hierarchy.len(),
            });
        }
    }

    let parent_of = |i: usize| -> i32 {
        doc.hierarchy
            .as_ref()
            .map(|h| h[i][3])
            .unwrap_or(-1)
    };

    // Assign ids contour-by-contour so hole rows can reference the id
    // derived from their parent row, even when other rows get skipped.
    let ids: Vec<String> = (0..doc.contours.len())
        .map(|i| format!("poly-{}", i + 1))
        .collect();

    let mut polygons = Vec::new();
    for (i, contour) in doc.contours.iter().enumerate() {
        if contour.len() < MIN_POLYGON_VERTICES {
            log::warn!("skipping contour {i} with only {} points", contour.len());
            continue;
        }

        let points: Vec<Point> = contour.iter().map(|[x, y]| Point::new(*x, *y)).collect();
        let parent = parent_of(i);

        let polygon = if parent < 0 {
            Polygon::new(ids[i].clone(), points, PolygonKind::External)
        } else {
            let parent_idx = parent as usize;
            if parent_idx >= doc.contours.len() {
                return Err(FormatError::InvalidParent { row: i, parent });
            }
            Polygon::new(ids[i].clone(), points, PolygonKind::Internal)
                .with_parent(ids[parent_idx].clone())
        };
        polygons.push(polygon);
    }

    log::debug!(
        "normalized {} contours into {} polygons",
        doc.contours.len(),
        polygons.len()
    );

    Ok(SegmentationData {
        polygons,
        image_width: doc.image_width.unwrap_or(image_width),
        image_height: doc.image_height.unwrap_or(image_height),
        metadata: Default::default(),
    })
}
