//! Tests for the legacy contour wire shape.

use crate::format::{load_segmentation, FormatError};
use crate::model::PolygonKind;

#[test]
fn test_hierarchy_derives_holes() {
    // Contour 0 is an outer square, contour 1 a hole inside it
    // (hierarchy row: [next, prev, child, parent]).
    let json = r#"{
        "contours": [
            [[0, 0], [100, 0], [100, 100], [0, 100]],
            [[40, 40], [60, 40], [60, 60], [40, 60]]
        ],
        "hierarchy": [
            [-1, -1, 1, -1],
            [-1, -1, -1, 0]
        ]
    }"#;

    let data = load_segmentation(json, 200, 200).unwrap();
    assert_eq!(data.polygons.len(), 2);

    let outer = &data.polygons[0];
    assert_eq!(outer.kind, PolygonKind::External);
    assert!(outer.parent_id.is_none());

    let hole = &data.polygons[1];
    assert_eq!(hole.kind, PolygonKind::Internal);
    assert_eq!(hole.parent_id.as_deref(), Some(outer.id.as_str()));
}

#[test]
fn test_missing_hierarchy_means_all_external() {
    let json = r#"{
        "contours": [
            [[0, 0], [10, 0], [5, 8]],
            [[20, 20], [30, 20], [25, 28]]
        ]
    }"#;

    let data = load_segmentation(json, 50, 50).unwrap();
    assert_eq!(data.polygons.len(), 2);
    assert!(data.polygons.iter().all(|p| p.kind == PolygonKind::External));
}

#[test]
fn test_degenerate_contours_skipped() {
    let json = r#"{
        "contours": [
            [[0, 0], [10, 0]],
            [[0, 0], [10, 0], [5, 8]]
        ]
    }"#;

    let data = load_segmentation(json, 50, 50).unwrap();
    assert_eq!(data.polygons.len(), 1);
    assert_eq!(data.polygons[0].points.len(), 3);
}

#[test]
fn test_hole_keeps_parent_id_across_skips() {
    // Contour 1 is degenerate and skipped; the hole in contour 2 still
    // points at the polygon derived from contour 0.
    let json = r#"{
        "contours": [
            [[0, 0], [100, 0], [100, 100], [0, 100]],
            [[0, 0]],
            [[40, 40], [60, 40], [60, 60], [40, 60]]
        ],
        "hierarchy": [
            [-1, -1, 2, -1],
            [-1, -1, -1, -1],
            [-1, -1, -1, 0]
        ]
    }"#;

    let data = load_segmentation(json, 200, 200).unwrap();
    assert_eq!(data.polygons.len(), 2);
    let hole = data.polygons.iter().find(|p| p.kind == PolygonKind::Internal).unwrap();
    assert_eq!(hole.parent_id.as_deref(), Some("poly-1"));
}

#[test]
fn test_hierarchy_length_mismatch() {
    let json = r#"{
        "contours": [[[0, 0], [10, 0], [5, 8]]],
        "hierarchy": []
    }"#;

    let result = load_segmentation(json, 50, 50);
    assert!(matches!(
        result,
        Err(FormatError::HierarchyMismatch { contours: 1, hierarchy: 0 })
    ));
}

#[test]
fn test_invalid_parent_index() {
    let json = r#"{
        "contours": [[[0, 0], [10, 0], [5, 8]]],
        "hierarchy": [[-1, -1, -1, 7]]
    }"#;

    let result = load_segmentation(json, 50, 50);
    assert!(matches!(
        result,
        Err(FormatError::InvalidParent { row: 0, parent: 7 })
    ));
}
