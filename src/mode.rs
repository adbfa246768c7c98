//! Edit modes and transient interaction state.
//!
//! The mode is a plain tagged union with one switcher on the editor
//! (`SegmentationEditor::set_mode`): activating any mode first cancels
//! whatever the previous mode had in flight, so at most one mode is ever
//! live. The in-flight operation itself is a second tagged union; exactly
//! one operation can be active at a time by construction.

use mseg_geom::Point;

use crate::model::PolygonId;

/// Mutually exclusive editing modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    /// Pan/zoom and polygon selection.
    #[default]
    View,
    /// Click-by-click (or Shift-freehand) polygon creation.
    CreatePolygon,
    /// Vertex dragging on the selected polygon.
    EditVertices,
    /// Insert a chain of points between two vertices of one polygon.
    AddPoints,
    /// Split a polygon along a two-click line.
    Slice,
    /// Remove polygons by clicking them.
    DeletePolygon,
}

impl EditMode {
    /// Get the display name for this mode.
    pub fn name(&self) -> &'static str {
        match self {
            EditMode::View => "View",
            EditMode::CreatePolygon => "Create Polygon",
            EditMode::EditVertices => "Edit Vertices",
            EditMode::AddPoints => "Add Points",
            EditMode::Slice => "Slice",
            EditMode::DeletePolygon => "Delete Polygon",
        }
    }

    /// Get all available modes.
    pub fn all() -> &'static [EditMode] {
        &[
            EditMode::View,
            EditMode::CreatePolygon,
            EditMode::EditVertices,
            EditMode::AddPoints,
            EditMode::Slice,
            EditMode::DeletePolygon,
        ]
    }

    /// Check if this mode edits geometry (everything except View).
    pub fn is_editing_mode(&self) -> bool {
        !matches!(self, EditMode::View)
    }
}

/// The single in-flight interaction, if any.
///
/// Temp point buffers live inside their variant, so cancelling an
/// interaction cannot leak state into the next one.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Interaction {
    /// Nothing in flight.
    #[default]
    Idle,
    /// A vertex of `polygon_id` follows the cursor until mouse-up.
    DraggingVertex {
        polygon_id: PolygonId,
        vertex_index: usize,
        /// Set once the cursor actually moved; a no-move click commits
        /// nothing.
        moved: bool,
    },
    /// View is being dragged; `last` is the previous screen position.
    Panning { last: Point },
    /// Points accumulated for a new polygon (image coordinates).
    DrawingPolygon { points: Vec<Point> },
    /// Point chain being inserted into `polygon_id`, anchored at
    /// `start_vertex`.
    AddPointsChain {
        polygon_id: PolygonId,
        start_vertex: usize,
        points: Vec<Point>,
    },
    /// Slice line being placed on `polygon_id`; `start` is set by the
    /// first of the two line clicks.
    SliceLine {
        polygon_id: PolygonId,
        start: Option<Point>,
    },
}

impl Interaction {
    /// Check if an operation is in flight.
    pub fn is_active(&self) -> bool {
        !matches!(self, Interaction::Idle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mode_is_view() {
        assert_eq!(EditMode::default(), EditMode::View);
        assert!(!EditMode::View.is_editing_mode());
        assert!(EditMode::Slice.is_editing_mode());
    }

    #[test]
    fn test_all_modes_have_names() {
        for mode in EditMode::all() {
            assert!(!mode.name().is_empty());
        }
    }

    #[test]
    fn test_interaction_activity() {
        assert!(!Interaction::Idle.is_active());
        assert!(Interaction::DrawingPolygon { points: vec![] }.is_active());
    }
}
