//! Event handlers for the segmentation editor.
//!
//! Each handler processes one input event category against the active
//! edit mode, keeping the `SegmentationEditor` dispatch function clean
//! and organized. Handlers interpret events through the view transform
//! and the hit-testing layer, mutate the working copy, and decide when a
//! history snapshot is committed.

use mseg_geom::{polygon_area, polygon_perimeter, Point};

use crate::constants::threshold;
use crate::detect::{dynamic_vertex_radius, find_edge_at, find_vertex_at, is_closing_click};
use crate::editor::{EventOutcome, SegmentationEditor};
use crate::event::{Key, Modifiers, MouseButton};
use crate::keybindings::EditorAction;
use crate::mode::{EditMode, Interaction};
use crate::model::MIN_POLYGON_VERTICES;

/// Relative perimeter difference below which the add-points arc choice
/// falls back to comparing areas.
const ARC_PERIMETER_TIE: f32 = 0.001;

/// Handle a mouse button press.
pub(crate) fn handle_mouse_pressed(
    editor: &mut SegmentationEditor,
    button: MouseButton,
    position: Point,
) -> EventOutcome {
    match button {
        MouseButton::Right => {
            // Right-click cancels from any mode.
            editor.cancel();
            EventOutcome::ModeChanged(EditMode::View)
        }
        MouseButton::Left => match editor.mode() {
            EditMode::View => view_pressed(editor, position),
            EditMode::CreatePolygon => create_pressed(editor, position),
            EditMode::EditVertices => edit_vertices_pressed(editor, position),
            EditMode::AddPoints => add_points_pressed(editor, position),
            EditMode::Slice => slice_pressed(editor, position),
            EditMode::DeletePolygon => delete_pressed(editor, position),
        },
        _ => EventOutcome::Ignored,
    }
}

/// View mode: click inside a polygon selects it and enters vertex
/// editing; empty space starts a pan drag.
fn view_pressed(editor: &mut SegmentationEditor, position: Point) -> EventOutcome {
    let image_pos = editor.transform().screen_to_image(position);

    if let Some(id) = editor.data().polygon_at(image_pos).map(|p| p.id.clone()) {
        log::debug!("🖱️ Selected polygon '{id}'");
        editor.select(Some(id));
        editor.set_mode(EditMode::EditVertices);
        return EventOutcome::ModeChanged(EditMode::EditVertices);
    }

    editor.interaction = Interaction::Panning { last: position };
    EventOutcome::Handled
}

/// Create mode: clicks accumulate ring points; a click near the first
/// point (with at least 3 points down) closes and commits the polygon.
fn create_pressed(editor: &mut SegmentationEditor, position: Point) -> EventOutcome {
    let image_pos = editor.transform().screen_to_image(position);
    let transform = *editor.transform();

    if !matches!(editor.interaction, Interaction::DrawingPolygon { .. }) {
        editor.interaction = Interaction::DrawingPolygon { points: Vec::new() };
    }
    let Interaction::DrawingPolygon { points } = &mut editor.interaction else {
        return EventOutcome::Ignored;
    };

    if points.len() >= MIN_POLYGON_VERTICES
        && is_closing_click(position, points[0], threshold::POLYGON_CLOSE, &transform)
    {
        let ring = std::mem::take(points);
        editor.interaction = Interaction::Idle;

        let polygon = editor.new_external_polygon(ring);
        log::debug!("➕ Created polygon '{}' with {} points", polygon.id, polygon.points.len());
        let next = editor.data().with_polygon(polygon);
        editor.commit(next);
        editor.set_mode(EditMode::View);
        return EventOutcome::Committed;
    }

    points.push(image_pos);
    EventOutcome::Handled
}

/// Edit mode: grab a vertex of the selected polygon, insert a point on
/// its boundary, or move the selection to another polygon.
fn edit_vertices_pressed(editor: &mut SegmentationEditor, position: Point) -> EventOutcome {
    let image_pos = editor.transform().screen_to_image(position);
    let zoom = editor.transform().zoom;

    if let Some(selected) = editor.selected_polygon().cloned() {
        // Vertex grab takes priority over everything else.
        if let Some(vertex_index) = find_vertex_at(
            position,
            &selected,
            threshold::VERTEX_HIT_RADIUS,
            editor.transform(),
        ) {
            editor.interaction = Interaction::DraggingVertex {
                polygon_id: selected.id.clone(),
                vertex_index,
                moved: false,
            };
            return EventOutcome::Handled;
        }

        // Click on the boundary inserts a vertex at the closest edge point.
        let edge_threshold = dynamic_vertex_radius(threshold::EDGE_HIT_RADIUS, zoom);
        if let Some(edge) = find_edge_at(image_pos, &selected, edge_threshold, true) {
            let mut ring = selected.points.clone();
            ring.insert(edge.index + 1, edge.closest);
            log::debug!(
                "➕ Inserted point on edge {} of polygon '{}'",
                edge.index,
                selected.id
            );
            if let Some(next) = editor.data().with_polygon_points(&selected.id, ring) {
                editor.commit(next);
                return EventOutcome::Committed;
            }
        }
    }

    // Otherwise selection follows the click.
    match editor.data().polygon_at(image_pos).map(|p| p.id.clone()) {
        Some(id) => {
            log::debug!("🖱️ Selected polygon '{id}'");
            editor.select(Some(id));
        }
        None => editor.select(None),
    }
    EventOutcome::Handled
}

/// Add-points mode: the first vertex click anchors a chain, later clicks
/// extend it, and a click on a different vertex of the same polygon
/// completes the insertion.
fn add_points_pressed(editor: &mut SegmentationEditor, position: Point) -> EventOutcome {
    let image_pos = editor.transform().screen_to_image(position);

    match std::mem::take(&mut editor.interaction) {
        Interaction::Idle => {
            // Anchor on any polygon's vertex.
            let anchor = editor.data().polygons.iter().find_map(|polygon| {
                find_vertex_at(
                    position,
                    polygon,
                    threshold::VERTEX_HIT_RADIUS,
                    editor.transform(),
                )
                .map(|vertex_index| (polygon.id.clone(), vertex_index))
            });

            match anchor {
                Some((id, vertex_index)) => {
                    log::debug!("🔗 Add-points anchored at vertex {vertex_index} of '{id}'");
                    editor.select(Some(id.clone()));
                    editor.interaction = Interaction::AddPointsChain {
                        polygon_id: id,
                        start_vertex: vertex_index,
                        points: Vec::new(),
                    };
                    EventOutcome::Handled
                }
                None => EventOutcome::Ignored,
            }
        }
        Interaction::AddPointsChain {
            polygon_id,
            start_vertex,
            mut points,
        } => {
            let Some(polygon) = editor.data().polygon(&polygon_id).cloned() else {
                return EventOutcome::Ignored;
            };

            let end_vertex = find_vertex_at(
                position,
                &polygon,
                threshold::VERTEX_HIT_RADIUS,
                editor.transform(),
            );

            if let Some(end_vertex) = end_vertex.filter(|&v| v != start_vertex) {
                let ring =
                    replace_arc_with_chain(&polygon.points, start_vertex, end_vertex, &points);
                if ring.len() < MIN_POLYGON_VERTICES {
                    return EventOutcome::Rejected(
                        "insertion would leave fewer than 3 points".into(),
                    );
                }
                log::debug!(
                    "🔗 Add-points completed on '{polygon_id}': {} -> {} vertices",
                    polygon.points.len(),
                    ring.len()
                );
                if let Some(next) = editor.data().with_polygon_points(&polygon_id, ring) {
                    editor.commit(next);
                    return EventOutcome::Committed;
                }
                return EventOutcome::Ignored;
            }

            points.push(image_pos);
            editor.interaction = Interaction::AddPointsChain {
                polygon_id,
                start_vertex,
                points,
            };
            EventOutcome::Handled
        }
        other => {
            editor.interaction = other;
            EventOutcome::Ignored
        }
    }
}

/// Slice mode: pick the target polygon, then the two ends of the slice
/// line; the split runs on the second line click.
fn slice_pressed(editor: &mut SegmentationEditor, position: Point) -> EventOutcome {
    let image_pos = editor.transform().screen_to_image(position);

    match std::mem::take(&mut editor.interaction) {
        Interaction::Idle => match editor.data().polygon_at(image_pos).map(|p| p.id.clone()) {
            Some(id) => {
                log::debug!("✂️ Slice target '{id}'");
                editor.select(Some(id.clone()));
                editor.interaction = Interaction::SliceLine {
                    polygon_id: id,
                    start: None,
                };
                EventOutcome::Handled
            }
            None => EventOutcome::Ignored,
        },
        Interaction::SliceLine {
            polygon_id,
            start: None,
        } => {
            editor.interaction = Interaction::SliceLine {
                polygon_id,
                start: Some(image_pos),
            };
            EventOutcome::Handled
        }
        Interaction::SliceLine {
            polygon_id,
            start: Some(start),
        } => match editor.slice_polygon(&polygon_id, start, image_pos) {
            Ok(()) => {
                editor.set_mode(EditMode::View);
                EventOutcome::Committed
            }
            Err(e) => {
                log::debug!("✂️ Slice of '{polygon_id}' rejected: {e}");
                // Keep the target, drop the line, let the user retry.
                editor.interaction = Interaction::SliceLine {
                    polygon_id,
                    start: None,
                };
                EventOutcome::Rejected(e.to_string())
            }
        },
        other => {
            editor.interaction = other;
            EventOutcome::Ignored
        }
    }
}

/// Delete mode: clicking inside a polygon removes it immediately.
fn delete_pressed(editor: &mut SegmentationEditor, position: Point) -> EventOutcome {
    let image_pos = editor.transform().screen_to_image(position);

    let Some(id) = editor.data().polygon_at(image_pos).map(|p| p.id.clone()) else {
        return EventOutcome::Ignored;
    };
    let Some(next) = editor.data().without_polygon(&id) else {
        return EventOutcome::Ignored;
    };
    log::debug!("🗑️ Deleted polygon '{id}'");
    editor.commit(next);
    EventOutcome::Committed
}

/// Handle mouse movement: pan drags, vertex drags, and Shift-held
/// freehand point insertion.
pub(crate) fn handle_mouse_moved(
    editor: &mut SegmentationEditor,
    position: Point,
) -> EventOutcome {
    let image_pos = editor.transform().screen_to_image(position);
    let zoom = editor.transform().zoom;
    let shift_down = editor.shift_down();
    let auto_spacing = threshold::AUTO_POINT_SPACING / zoom;

    match &mut editor.interaction {
        Interaction::Panning { last } => {
            let dx = position.x - last.x;
            let dy = position.y - last.y;
            // Skip sub-pixel jitter.
            if dx.abs() < threshold::DRAG_MOVEMENT && dy.abs() < threshold::DRAG_MOVEMENT {
                return EventOutcome::Ignored;
            }
            *last = position;
            editor.transform = editor.transform.pan_by(dx, dy);
            EventOutcome::Handled
        }
        Interaction::DraggingVertex {
            polygon_id,
            vertex_index,
            moved,
        } => {
            let polygon_id = polygon_id.clone();
            let vertex_index = *vertex_index;
            *moved = true;

            let Some(polygon) = editor.data.polygon(&polygon_id) else {
                return EventOutcome::Ignored;
            };
            let mut ring = polygon.points.clone();
            if vertex_index >= ring.len() {
                return EventOutcome::Ignored;
            }
            ring[vertex_index] = image_pos;

            // Live preview only: the snapshot is committed on mouse-up.
            if let Some(next) = editor.data.with_polygon_points(&polygon_id, ring) {
                editor.data = next;
            }
            EventOutcome::Handled
        }
        Interaction::DrawingPolygon { points } if shift_down => {
            let far_enough = points
                .last()
                .map_or(true, |last| last.distance_to(&image_pos) >= auto_spacing);
            if far_enough {
                points.push(image_pos);
                return EventOutcome::Handled;
            }
            EventOutcome::Ignored
        }
        Interaction::AddPointsChain {
            polygon_id,
            start_vertex,
            points,
        } if shift_down => {
            // Reference point: the last chain point, or the anchor vertex.
            let polygon_id = polygon_id.clone();
            let start_vertex = *start_vertex;
            let reference = match points.last() {
                Some(p) => Some(*p),
                None => editor
                    .data
                    .polygon(&polygon_id)
                    .and_then(|p| p.points.get(start_vertex))
                    .copied(),
            };
            if reference.map_or(false, |r| r.distance_to(&image_pos) >= auto_spacing) {
                if let Interaction::AddPointsChain { points, .. } = &mut editor.interaction {
                    points.push(image_pos);
                }
                return EventOutcome::Handled;
            }
            EventOutcome::Ignored
        }
        _ => EventOutcome::Ignored,
    }
}

/// Handle a mouse button release: ends pans and commits vertex drags.
pub(crate) fn handle_mouse_released(
    editor: &mut SegmentationEditor,
    button: MouseButton,
    _position: Point,
) -> EventOutcome {
    if button != MouseButton::Left {
        return EventOutcome::Ignored;
    }

    match std::mem::take(&mut editor.interaction) {
        Interaction::Panning { .. } => EventOutcome::Handled,
        Interaction::DraggingVertex { polygon_id, moved, .. } => {
            if moved {
                // The working copy already holds the final position; one
                // snapshot per completed drag.
                log::debug!("📍 Vertex drag on '{polygon_id}' committed");
                editor.commit_working_copy();
                EventOutcome::Committed
            } else {
                EventOutcome::Handled
            }
        }
        other => {
            // Click-driven interactions survive mouse-up.
            editor.interaction = other;
            EventOutcome::Ignored
        }
    }
}

/// Handle a wheel notch: multiplicative zoom centered on the cursor.
pub(crate) fn handle_wheel(
    editor: &mut SegmentationEditor,
    delta: f32,
    position: Point,
) -> EventOutcome {
    if delta == 0.0 {
        return EventOutcome::Ignored;
    }
    editor.transform = editor.transform.zoom_at(position, delta > 0.0);
    EventOutcome::Handled
}

/// Handle a key press: editor actions and Shift tracking.
pub(crate) fn handle_key_pressed(
    editor: &mut SegmentationEditor,
    key: Key,
    modifiers: Modifiers,
) -> EventOutcome {
    if key == Key::Shift || modifiers.shift {
        editor.set_shift_down(true);
    }

    let Some(action) = editor.bindings().action_for_key(key, modifiers) else {
        return EventOutcome::Ignored;
    };

    match action {
        EditorAction::Undo => {
            if editor.undo() {
                EventOutcome::Handled
            } else {
                EventOutcome::Ignored
            }
        }
        EditorAction::Redo => {
            if editor.redo() {
                EventOutcome::Handled
            } else {
                EventOutcome::Ignored
            }
        }
        EditorAction::DeleteSelected => {
            let Some(id) = editor.selected().cloned() else {
                return EventOutcome::Ignored;
            };
            let Some(next) = editor.data().without_polygon(&id) else {
                return EventOutcome::Ignored;
            };
            log::debug!("🗑️ Deleted selected polygon '{id}'");
            editor.commit(next);
            EventOutcome::Committed
        }
        EditorAction::Cancel => {
            editor.cancel();
            EventOutcome::ModeChanged(EditMode::View)
        }
        EditorAction::SetMode(mode) => {
            editor.set_mode(mode);
            EventOutcome::ModeChanged(mode)
        }
    }
}

/// Handle a key release: Shift tracking only.
pub(crate) fn handle_key_released(
    editor: &mut SegmentationEditor,
    key: Key,
    modifiers: Modifiers,
) -> EventOutcome {
    if key == Key::Shift || !modifiers.shift {
        editor.set_shift_down(false);
    }
    EventOutcome::Ignored
}

/// Replace one boundary arc between `start` and `end` with `chain`,
/// keeping the arc that yields the larger perimeter (ties within 0.1%
/// broken by larger area).
///
/// The chain runs from the start vertex towards the end vertex. The two
/// candidates keep opposite arcs of the original ring.
pub(crate) fn replace_arc_with_chain(
    ring: &[Point],
    start: usize,
    end: usize,
    chain: &[Point],
) -> Vec<Point> {
    let n = ring.len();

    // Candidate A keeps the arc end -> start (forward wrap): the chain
    // bridges start -> end directly.
    let mut keep_backward = Vec::with_capacity(chain.len() + n);
    keep_backward.push(ring[start]);
    keep_backward.extend_from_slice(chain);
    let mut idx = end;
    loop {
        keep_backward.push(ring[idx]);
        idx = (idx + 1) % n;
        if idx == start {
            break;
        }
    }

    // Candidate B keeps the arc start -> end: the chain walks back from
    // end to start.
    let mut keep_forward = Vec::with_capacity(chain.len() + n);
    let mut idx = start;
    loop {
        keep_forward.push(ring[idx]);
        if idx == end {
            break;
        }
        idx = (idx + 1) % n;
    }
    keep_forward.extend(chain.iter().rev());

    let perimeter_a = polygon_perimeter(&keep_backward, true);
    let perimeter_b = polygon_perimeter(&keep_forward, true);
    let relative_gap =
        (perimeter_a - perimeter_b).abs() / perimeter_a.max(perimeter_b).max(f32::EPSILON);

    let pick_a = if relative_gap < ARC_PERIMETER_TIE {
        polygon_area(&keep_backward) >= polygon_area(&keep_forward)
    } else {
        perimeter_a > perimeter_b
    };

    if pick_a {
        keep_backward
    } else {
        keep_forward
    }
}
