//! Screen/image coordinate transform and zoom-to-cursor mathematics.
//!
//! The transform maps image (model) coordinates to screen coordinates via
//! a uniform zoom and a pan offset. All editing math converts through
//! these two functions, so they must stay exact algebraic inverses of each
//! other.

use mseg_geom::Point;

use crate::constants::zoom as zoom_const;

/// Represents pan/zoom view state.
///
/// `zoom` is always inside `[zoom::MIN, zoom::MAX]`; the constructors and
/// zoom operations clamp, so `screen_to_image` never divides by zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub zoom: f32,
    pub translate_x: f32,
    pub translate_y: f32,
}

impl Transform {
    /// Create a new transform with the given zoom (clamped) and pan.
    pub fn new(zoom: f32, translate_x: f32, translate_y: f32) -> Self {
        Self {
            zoom: zoom.clamp(zoom_const::MIN, zoom_const::MAX),
            translate_x,
            translate_y,
        }
    }

    /// Create an identity transform (zoom=1, no pan).
    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    /// Convert a screen position to image coordinates.
    pub fn screen_to_image(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.translate_x) / self.zoom,
            (screen.y - self.translate_y) / self.zoom,
        )
    }

    /// Convert an image position to screen coordinates.
    pub fn image_to_screen(&self, image: Point) -> Point {
        Point::new(
            image.x * self.zoom + self.translate_x,
            image.y * self.zoom + self.translate_y,
        )
    }

    /// Apply a pan delta (screen pixels) to the transform.
    pub fn pan_by(&self, dx: f32, dy: f32) -> Transform {
        Transform {
            zoom: self.zoom,
            translate_x: self.translate_x + dx,
            translate_y: self.translate_y + dy,
        }
    }

    /// One wheel notch of zoom centered on the cursor.
    ///
    /// The zoom step is multiplicative (`zoom::FACTOR` per notch) and
    /// clamped; the pan is adjusted so the image point under the cursor
    /// stays under the cursor.
    pub fn zoom_at(&self, cursor: Point, zoom_in: bool) -> Transform {
        let factor = if zoom_in {
            zoom_const::FACTOR
        } else {
            1.0 / zoom_const::FACTOR
        };
        let new_zoom = (self.zoom * factor).clamp(zoom_const::MIN, zoom_const::MAX);

        // Image-space point under cursor (before zoom)
        let anchor = self.screen_to_image(cursor);

        // New pan keeps the anchor under the cursor
        Transform {
            zoom: new_zoom,
            translate_x: cursor.x - anchor.x * new_zoom,
            translate_y: cursor.y - anchor.y * new_zoom,
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_identity_transform() {
        let t = Transform::identity();
        assert_eq!(t.zoom, 1.0);
        assert_eq!(t.translate_x, 0.0);
        assert_eq!(t.translate_y, 0.0);
    }

    #[test]
    fn test_round_trip() {
        let t = Transform::new(2.5, 120.0, -40.0);
        let p = Point::new(33.7, 81.2);
        let back = t.image_to_screen(t.screen_to_image(p));
        assert!(approx_eq(back.x, p.x));
        assert!(approx_eq(back.y, p.y));
    }

    #[test]
    fn test_round_trip_other_direction() {
        let t = Transform::new(0.4, -15.0, 200.0);
        let p = Point::new(500.0, 123.0);
        let back = t.screen_to_image(t.image_to_screen(p));
        assert!(approx_eq(back.x, p.x));
        assert!(approx_eq(back.y, p.y));
    }

    #[test]
    fn test_zoom_clamped_on_construction() {
        assert_eq!(Transform::new(100.0, 0.0, 0.0).zoom, crate::constants::zoom::MAX);
        assert_eq!(Transform::new(0.0, 0.0, 0.0).zoom, crate::constants::zoom::MIN);
    }

    #[test]
    fn test_zoom_at_preserves_cursor_point() {
        let t = Transform::new(1.0, 50.0, 30.0);
        let cursor = Point::new(150.0, 120.0);

        let anchor_before = t.screen_to_image(cursor);
        let zoomed = t.zoom_at(cursor, true);
        let anchor_after = zoomed.screen_to_image(cursor);

        assert!(approx_eq(anchor_before.x, anchor_after.x));
        assert!(approx_eq(anchor_before.y, anchor_after.y));
        assert!(approx_eq(zoomed.zoom, crate::constants::zoom::FACTOR));
    }

    #[test]
    fn test_zoom_at_center_keeps_origin_pan() {
        // Zooming with the cursor on the pan origin leaves the pan alone.
        let t = Transform::identity();
        let zoomed = t.zoom_at(Point::new(0.0, 0.0), true);
        assert!(approx_eq(zoomed.translate_x, 0.0));
        assert!(approx_eq(zoomed.translate_y, 0.0));
    }

    #[test]
    fn test_zoom_in_then_out_restores_zoom() {
        let t = Transform::identity();
        let cursor = Point::new(400.0, 300.0);
        let back = t.zoom_at(cursor, true).zoom_at(cursor, false);
        assert!(approx_eq(back.zoom, 1.0));
    }

    #[test]
    fn test_zoom_clamps_at_max() {
        let mut t = Transform::new(crate::constants::zoom::MAX, 0.0, 0.0);
        t = t.zoom_at(Point::new(10.0, 10.0), true);
        assert_eq!(t.zoom, crate::constants::zoom::MAX);
    }

    #[test]
    fn test_zoom_clamps_at_min() {
        let mut t = Transform::new(crate::constants::zoom::MIN, 0.0, 0.0);
        t = t.zoom_at(Point::new(10.0, 10.0), false);
        assert_eq!(t.zoom, crate::constants::zoom::MIN);
    }

    #[test]
    fn test_pan_by() {
        let t = Transform::new(1.0, 10.0, 20.0);
        let panned = t.pan_by(5.0, -10.0);
        assert_eq!(panned.zoom, 1.0);
        assert_eq!(panned.translate_x, 15.0);
        assert_eq!(panned.translate_y, 10.0);
    }
}
