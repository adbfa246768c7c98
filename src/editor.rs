//! The segmentation editor session.
//!
//! `SegmentationEditor` owns the working segmentation, the view
//! transform, the edit mode, the in-flight interaction and the snapshot
//! history, and dispatches input events to the mode handlers. Every
//! committed edit replaces the working `SegmentationData` wholesale and
//! pushes exactly one history snapshot; in-progress drags update the
//! working copy only.

use mseg_geom::{simplify_ring, slice_into_two, Point, SimplifyError, SliceError};

use crate::event::Event;
use crate::format::{load_segmentation, save_segmentation, FormatError};
use crate::handlers;
use crate::history::History;
use crate::keybindings::KeyBindings;
use crate::mode::{EditMode, Interaction};
use crate::model::{Polygon, PolygonId, PolygonKind, SegmentationData};
use crate::transform::Transform;

/// What an input event did, from the embedding layer's point of view.
#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    /// The event was not relevant to the current state.
    Ignored,
    /// View or interaction state changed; re-render.
    Handled,
    /// An edit was committed; a new history snapshot exists.
    Committed,
    /// The edit mode changed.
    ModeChanged(EditMode),
    /// An operation was rejected with a user-visible reason.
    Rejected(String),
}

/// Interactive polygon editor for one image's segmentation.
pub struct SegmentationEditor {
    pub(crate) data: SegmentationData,
    pub(crate) transform: Transform,
    pub(crate) interaction: Interaction,
    mode: EditMode,
    selected: Option<PolygonId>,
    history: History,
    bindings: KeyBindings,
    shift_down: bool,
    next_polygon_id: u64,
}

impl SegmentationEditor {
    /// Create an editor session over the given segmentation.
    pub fn new(data: SegmentationData) -> Self {
        let next_polygon_id = next_session_id(&data);
        Self {
            history: History::new(data.clone()),
            data,
            transform: Transform::identity(),
            mode: EditMode::View,
            interaction: Interaction::Idle,
            selected: None,
            bindings: KeyBindings::default(),
            shift_down: false,
            next_polygon_id,
        }
    }

    /// Create an editor from a wire-format document (either JSON shape).
    pub fn from_json(json: &str, image_width: u32, image_height: u32) -> Result<Self, FormatError> {
        Ok(Self::new(load_segmentation(json, image_width, image_height)?))
    }

    /// Serialize the current segmentation to the polygon wire shape.
    pub fn to_json(&self) -> Result<String, FormatError> {
        save_segmentation(&self.data)
    }

    /// The current working segmentation (including live drag previews).
    pub fn data(&self) -> &SegmentationData {
        &self.data
    }

    /// The current view transform.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Replace the view transform (e.g. fit-to-window from the embedding
    /// layer).
    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    /// The active edit mode.
    pub fn mode(&self) -> EditMode {
        self.mode
    }

    /// The id of the selected polygon, if any.
    pub fn selected(&self) -> Option<&PolygonId> {
        self.selected.as_ref()
    }

    /// The selected polygon, if any.
    pub fn selected_polygon(&self) -> Option<&Polygon> {
        self.selected.as_deref().and_then(|id| self.data.polygon(id))
    }

    /// The in-flight interaction (for rendering previews).
    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    /// The undo history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// The keybinding table.
    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Replace the keybinding table.
    pub fn set_bindings(&mut self, bindings: KeyBindings) {
        self.bindings = bindings;
    }

    pub(crate) fn shift_down(&self) -> bool {
        self.shift_down
    }

    pub(crate) fn set_shift_down(&mut self, down: bool) {
        self.shift_down = down;
    }

    /// Switch the edit mode.
    ///
    /// This is the single mode switcher: any in-flight interaction is
    /// cancelled (uncommitted previews reverted) before the new mode
    /// activates, so at most one mode is ever live.
    pub fn set_mode(&mut self, mode: EditMode) {
        if self.interaction.is_active() {
            self.abort_interaction();
        }
        if self.mode != mode {
            log::debug!("🔧 Mode: {} -> {}", self.mode.name(), mode.name());
            self.mode = mode;
        }
    }

    /// Select a polygon by id (or clear the selection).
    pub fn select(&mut self, id: Option<PolygonId>) {
        self.selected = id.filter(|id| self.data.polygon(id).is_some());
    }

    /// Cancel the in-progress operation, clear temp buffers and return
    /// to View mode.
    pub fn cancel(&mut self) {
        self.abort_interaction();
        if self.mode != EditMode::View {
            log::debug!("🔧 Mode: {} -> View (cancel)", self.mode.name());
            self.mode = EditMode::View;
        }
    }

    /// Drop the in-flight interaction, reverting any uncommitted preview
    /// on the working copy.
    fn abort_interaction(&mut self) {
        if let Interaction::DraggingVertex { .. } = self.interaction {
            // The drag preview never reached the history; roll it back.
            self.data = self.history.current().clone();
        }
        self.interaction = Interaction::Idle;
    }

    /// Process one input event.
    pub fn handle_event(&mut self, event: Event) -> EventOutcome {
        match event {
            Event::MousePressed { button, position } => {
                handlers::handle_mouse_pressed(self, button, position)
            }
            Event::MouseReleased { button, position } => {
                handlers::handle_mouse_released(self, button, position)
            }
            Event::MouseMoved { position } => handlers::handle_mouse_moved(self, position),
            Event::MouseWheel { delta, position } => handlers::handle_wheel(self, delta, position),
            Event::KeyPressed { key, modifiers } => {
                handlers::handle_key_pressed(self, key, modifiers)
            }
            Event::KeyReleased { key, modifiers } => {
                handlers::handle_key_released(self, key, modifiers)
            }
        }
    }

    /// Commit a new segmentation: replace the working copy and push one
    /// history snapshot.
    pub(crate) fn commit(&mut self, next: SegmentationData) {
        self.data = next.clone();
        self.history.push(next);
        self.prune_selection();
    }

    /// Push the working copy as a snapshot (used when a drag preview
    /// already updated it in place).
    pub(crate) fn commit_working_copy(&mut self) {
        self.history.push(self.data.clone());
        self.prune_selection();
    }

    /// Step back one snapshot. Returns false at the beginning of history.
    pub fn undo(&mut self) -> bool {
        self.abort_interaction();
        let Some(restored) = self.history.undo().cloned() else {
            return false;
        };
        self.data = restored;
        self.prune_selection();
        true
    }

    /// Step forward one snapshot. Returns false at the end of history.
    pub fn redo(&mut self) -> bool {
        self.abort_interaction();
        let Some(restored) = self.history.redo().cloned() else {
            return false;
        };
        self.data = restored;
        self.prune_selection();
        true
    }

    /// Split a polygon along the line `start`-`end` into two polygons.
    ///
    /// Both pieces inherit the original's kind and parent; the original
    /// is replaced in place. Rejections leave the segmentation untouched.
    pub fn slice_polygon(
        &mut self,
        id: &str,
        start: Point,
        end: Point,
    ) -> Result<(), SliceError> {
        let Some(polygon) = self.data.polygon(id).cloned() else {
            return Err(SliceError::DoesNotCross);
        };

        let pieces = slice_into_two(&polygon.points, start, end)?;

        let make_piece = |editor: &mut Self, ring: Vec<Point>| {
            let mut piece = Polygon::new(editor.alloc_polygon_id(), ring, polygon.kind);
            piece.parent_id = polygon.parent_id.clone();
            piece
        };
        let first = make_piece(self, pieces.first);
        let second = make_piece(self, pieces.second);

        log::debug!(
            "✂️ Sliced '{}' into '{}' ({} pts) and '{}' ({} pts)",
            id,
            first.id,
            first.points.len(),
            second.id,
            second.points.len()
        );

        if let Some(next) = self.data.with_polygon_replaced(id, vec![first, second]) {
            self.commit(next);
        }
        Ok(())
    }

    /// Reduce a polygon's vertex count with the given tolerance.
    /// Rejections leave the polygon unchanged.
    pub fn simplify_polygon(&mut self, id: &str, tolerance: f32) -> Result<(), SimplifyError> {
        let Some(polygon) = self.data.polygon(id) else {
            return Err(SimplifyError::TooFewPoints);
        };

        let simplified = simplify_ring(&polygon.points, tolerance)?;
        let before = polygon.points.len();
        log::debug!(
            "🪚 Simplified '{}': {} -> {} points",
            id,
            before,
            simplified.len()
        );
        if let Some(next) = self.data.with_polygon_points(id, simplified) {
            self.commit(next);
        }
        Ok(())
    }

    /// Simplify the selected polygon with the default tolerance.
    pub fn simplify_selected(&mut self) -> Result<(), SimplifyError> {
        let Some(id) = self.selected.clone() else {
            return Err(SimplifyError::TooFewPoints);
        };
        self.simplify_polygon(&id, crate::constants::simplify::DEFAULT_TOLERANCE)
    }

    /// Build a new external polygon with a session-local id.
    pub(crate) fn new_external_polygon(&mut self, ring: Vec<Point>) -> Polygon {
        Polygon::new(self.alloc_polygon_id(), ring, PolygonKind::External)
    }

    fn alloc_polygon_id(&mut self) -> String {
        self.next_polygon_id += 1;
        format!("poly-{}", self.next_polygon_id)
    }

    /// Drop the selection when the selected polygon no longer exists.
    fn prune_selection(&mut self) {
        if let Some(id) = &self.selected {
            if self.data.polygon(id).is_none() {
                self.selected = None;
            }
        }
    }
}

/// First session-local id counter value that cannot collide with ids
/// already present in the data.
fn next_session_id(data: &SegmentationData) -> u64 {
    data.polygons
        .iter()
        .filter_map(|p| p.id.strip_prefix("poly-"))
        .filter_map(|n| n.parse::<u64>().ok())
        .max()
        .unwrap_or(0)
}
