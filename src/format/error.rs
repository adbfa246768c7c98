//! Error types for segmentation format operations.

use thiserror::Error;

/// Errors that can occur while loading or saving segmentation documents.
#[derive(Error, Debug)]
pub enum FormatError {
    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document matches neither the polygon nor the contour shape
    #[error("unrecognized segmentation document: expected 'polygons' or 'contours'")]
    UnrecognizedShape,

    /// Contour and hierarchy arrays disagree in length
    #[error("hierarchy length {hierarchy} does not match contour count {contours}")]
    HierarchyMismatch {
        /// Number of contours in the document
        contours: usize,
        /// Number of hierarchy rows in the document
        hierarchy: usize,
    },

    /// A hierarchy row references a parent index that does not exist
    #[error("hierarchy row {row} references invalid parent index {parent}")]
    InvalidParent {
        /// The offending hierarchy row
        row: usize,
        /// The out-of-range parent index
        parent: i32,
    },
}
