//! Wire-format loading and saving for segmentation data.
//!
//! The backend serves segmentations in one of two JSON shapes: the native
//! polygon shape (a direct mapping of [`SegmentationData`]) and a legacy
//! contour shape carrying OpenCV-style contour/hierarchy arrays. The
//! loader detects the shape by key presence and normalizes both into the
//! polygon model; saving always produces the polygon shape.

mod contour_json;
mod error;
mod polygon_json;

#[cfg(test)]
mod tests;

pub use contour_json::load_contour_document;
pub use error::FormatError;
pub use polygon_json::load_polygon_document;

use crate::model::SegmentationData;

/// Parse a segmentation document in either wire shape.
///
/// `image_width`/`image_height` are the dimensions of the image the
/// segmentation belongs to; they are used when the document does not
/// carry its own.
pub fn load_segmentation(
    json: &str,
    image_width: u32,
    image_height: u32,
) -> Result<SegmentationData, FormatError> {
    let value: serde_json::Value = serde_json::from_str(json)?;

    let data = if value.get("polygons").is_some() {
        load_polygon_document(value, image_width, image_height)?
    } else if value.get("contours").is_some() {
        load_contour_document(value, image_width, image_height)?
    } else {
        return Err(FormatError::UnrecognizedShape);
    };

    log::info!(
        "Loaded segmentation with {} polygons ({}x{})",
        data.polygons.len(),
        data.image_width,
        data.image_height
    );
    Ok(data)
}

/// Serialize a segmentation to the polygon wire shape.
pub fn save_segmentation(data: &SegmentationData) -> Result<String, FormatError> {
    let json = serde_json::to_string(data)?;
    log::debug!("Serialized segmentation with {} polygons", data.polygons.len());
    Ok(json)
}
