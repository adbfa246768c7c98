use mseg_geom::{
    point_in_polygon, point_to_segment, polygon_area, signed_area, simplify_ring, slice_into_two,
    Point,
};
use proptest::prelude::*;

fn square(size: f32) -> Vec<Point> {
    vec![
        Point::new(0.0, 0.0),
        Point::new(size, 0.0),
        Point::new(size, size),
        Point::new(0.0, size),
    ]
}

/// A regular n-gon, convex by construction.
fn ngon(n: usize, radius: f32) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let angle = (i as f32) / (n as f32) * std::f32::consts::TAU;
            Point::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}

proptest! {
    #[test]
    fn point_in_convex_polygon_matches_bounds(x in -150.0f32..150.0, y in -150.0f32..150.0) {
        let ring = square(100.0);
        let p = Point::new(x, y);

        // Strictly outside the bounding box is always outside.
        if !(0.0..=100.0).contains(&x) || !(0.0..=100.0).contains(&y) {
            prop_assert!(!point_in_polygon(p, &ring));
        }
        // Strictly inside (with margin to dodge the unspecified edge
        // behavior) is always inside.
        if (1.0..=99.0).contains(&x) && (1.0..=99.0).contains(&y) {
            prop_assert!(point_in_polygon(p, &ring));
        }
    }

    #[test]
    fn winding_reversal_flips_signed_area(n in 3usize..30, radius in 1.0f32..500.0) {
        let ring = ngon(n, radius);
        let mut reversed = ring.clone();
        reversed.reverse();

        let forward = signed_area(&ring);
        let backward = signed_area(&reversed);
        prop_assert!((forward + backward).abs() < forward.abs().max(1.0) * 1e-3);
        prop_assert!((polygon_area(&ring) - polygon_area(&reversed)).abs()
            < polygon_area(&ring).max(1.0) * 1e-3);
    }

    #[test]
    fn projection_is_no_farther_than_endpoints(
        px in -100.0f32..100.0, py in -100.0f32..100.0,
        ax in -100.0f32..100.0, ay in -100.0f32..100.0,
        bx in -100.0f32..100.0, by in -100.0f32..100.0,
    ) {
        let p = Point::new(px, py);
        let a = Point::new(ax, ay);
        let b = Point::new(bx, by);

        let proj = point_to_segment(p, a, b);
        prop_assert!((0.0..=1.0).contains(&proj.t));
        prop_assert!(proj.distance <= p.distance_to(&a) + 1e-3);
        prop_assert!(proj.distance <= p.distance_to(&b) + 1e-3);
    }

    #[test]
    fn vertical_slice_of_square_conserves_area(x in 10.0f32..90.0) {
        let ring = square(100.0);
        let pieces = slice_into_two(
            &ring,
            Point::new(x, -10.0),
            Point::new(x, 110.0),
        ).expect("a vertical line through the square must split it");

        prop_assert_eq!(pieces.first.len(), 4);
        prop_assert_eq!(pieces.second.len(), 4);

        let total = polygon_area(&pieces.first) + polygon_area(&pieces.second);
        prop_assert!((total - 10000.0).abs() < 1.0);
    }

    #[test]
    fn slice_is_deterministic(x in 10.0f32..90.0) {
        let ring = square(100.0);
        let start = Point::new(x, -10.0);
        let end = Point::new(x, 110.0);

        let a = slice_into_two(&ring, start, end).unwrap();
        let b = slice_into_two(&ring, start, end).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn simplify_is_idempotent(n in 4usize..60, tolerance in 0.0f32..5.0) {
        let ring = ngon(n, 100.0);
        if let Ok(once) = simplify_ring(&ring, tolerance) {
            let twice = simplify_ring(&once, tolerance).expect("simplified ring stays valid");
            prop_assert_eq!(once, twice);
        }
    }

    #[test]
    fn simplify_never_returns_degenerate_ring(n in 3usize..40, tolerance in 0.0f32..1000.0) {
        let ring = ngon(n, 50.0);
        if let Ok(simplified) = simplify_ring(&ring, tolerance) {
            prop_assert!(simplified.len() >= 3);
        }
    }
}
