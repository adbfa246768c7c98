//! Zoom-adjusted vertex and edge hit-testing.
//!
//! Hit radii are specified at zoom 1 and rescaled so targets keep a
//! roughly constant screen size, with extra widening at high zoom and
//! narrowing at low zoom where the plain `base / zoom` rescale makes
//! targets unusably small or absurdly large in model space.

use mseg_geom::{find_closest_segment, NearestSegment, Point};

use crate::model::Polygon;
use crate::transform::Transform;

/// Effective hit radius in model units for the given zoom.
///
/// The mid range is `base / zoom` (constant screen size). Above zoom 3 the
/// radius is widened 1.5x, above zoom 4 widened 2x; below zoom 0.7 it is
/// narrowed to 0.8x and below 0.5 to 0.6x.
pub fn dynamic_vertex_radius(base: f32, zoom: f32) -> f32 {
    let scaled = base / zoom;
    if zoom > 4.0 {
        scaled * 2.0
    } else if zoom > 3.0 {
        scaled * 1.5
    } else if zoom < 0.5 {
        scaled * 0.6
    } else if zoom < 0.7 {
        scaled * 0.8
    } else {
        scaled
    }
}

/// Check whether a screen position is within hit range of an image-space
/// point.
///
/// The point is converted to screen space and the screen distance is
/// compared against the zoom-adjusted radius.
pub fn is_near_vertex(screen_pos: Point, vertex: Point, base_radius: f32, transform: &Transform) -> bool {
    let vertex_screen = transform.image_to_screen(vertex);
    let radius_screen = dynamic_vertex_radius(base_radius, transform.zoom) * transform.zoom;
    screen_pos.distance_to(&vertex_screen) <= radius_screen
}

/// Find the vertex of a polygon nearest to a screen position, within the
/// zoom-adjusted hit radius. Returns the vertex index.
pub fn find_vertex_at(
    screen_pos: Point,
    polygon: &Polygon,
    base_radius: f32,
    transform: &Transform,
) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, vertex) in polygon.points.iter().enumerate() {
        if !is_near_vertex(screen_pos, *vertex, base_radius, transform) {
            continue;
        }
        let d = screen_pos.distance_to(&transform.image_to_screen(*vertex));
        if best.map_or(true, |(_, bd)| d < bd) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}

/// Find the polygon edge nearest to an image-space point, within
/// `threshold` model units. Delegates to the spatial-grid search for
/// large rings.
pub fn find_edge_at(
    image_pos: Point,
    polygon: &Polygon,
    threshold: f32,
    use_grid: bool,
) -> Option<NearestSegment> {
    find_closest_segment(&polygon.points, image_pos, threshold, use_grid)
}

/// Check whether a click closes the ring being drawn: near the first temp
/// point, using the zoom-adjusted closing distance.
pub fn is_closing_click(
    screen_pos: Point,
    first_point: Point,
    close_distance: f32,
    transform: &Transform,
) -> bool {
    is_near_vertex(screen_pos, first_point, close_distance, transform)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Polygon, PolygonKind};

    fn triangle() -> Polygon {
        Polygon::new(
            "p1",
            vec![
                Point::new(0.0, 0.0),
                Point::new(100.0, 0.0),
                Point::new(50.0, 80.0),
            ],
            PolygonKind::External,
        )
    }

    #[test]
    fn test_effective_radius_monotonic_across_zoom() {
        let base = 10.0;
        // Effective radius in screen pixels: dynamic radius * zoom.
        let screen_radius = |zoom: f32| dynamic_vertex_radius(base, zoom) * zoom;

        assert!(screen_radius(5.0) > screen_radius(1.0));
        assert!(screen_radius(3.5) > screen_radius(1.0));
        assert!(screen_radius(0.3) < screen_radius(1.0));
        assert!(screen_radius(0.6) < screen_radius(1.0));
    }

    #[test]
    fn test_mid_range_radius_is_base_over_zoom() {
        assert!((dynamic_vertex_radius(10.0, 2.0) - 5.0).abs() < 1e-6);
        assert!((dynamic_vertex_radius(10.0, 1.0) - 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_is_near_vertex_at_zoom_levels() {
        let vertex = Point::new(50.0, 50.0);
        let base = 10.0;

        // At zoom 1 the screen radius is 10px: 8px away hits, 15px misses.
        let t1 = Transform::identity();
        assert!(is_near_vertex(Point::new(58.0, 50.0), vertex, base, &t1));
        assert!(!is_near_vertex(Point::new(65.0, 50.0), vertex, base, &t1));

        // At zoom 5 the radius is widened to 20px on screen.
        let t5 = Transform::new(5.0, 0.0, 0.0);
        let vertex_screen = t5.image_to_screen(vertex);
        let probe = Point::new(vertex_screen.x + 15.0, vertex_screen.y);
        assert!(is_near_vertex(probe, vertex, base, &t5));

        // At zoom 0.3 the radius narrows to 6px on screen.
        let t03 = Transform::new(0.3, 0.0, 0.0);
        let vertex_screen = t03.image_to_screen(vertex);
        let probe = Point::new(vertex_screen.x + 8.0, vertex_screen.y);
        assert!(!is_near_vertex(probe, vertex, base, &t03));
    }

    #[test]
    fn test_find_vertex_prefers_nearest() {
        let polygon = triangle();
        let t = Transform::identity();
        // Between vertices 0 and 1 but closer to 1.
        let hit = find_vertex_at(Point::new(95.0, 2.0), &polygon, 10.0, &t);
        assert_eq!(hit, Some(1));
    }

    #[test]
    fn test_find_vertex_none_outside_radius() {
        let polygon = triangle();
        let t = Transform::identity();
        assert_eq!(find_vertex_at(Point::new(50.0, 40.0), &polygon, 10.0, &t), None);
    }

    #[test]
    fn test_find_edge_within_threshold() {
        let polygon = triangle();
        let hit = find_edge_at(Point::new(50.0, -4.0), &polygon, 10.0, true).unwrap();
        assert_eq!(hit.index, 0);
        assert!((hit.distance - 4.0).abs() < 0.001);
    }
}
