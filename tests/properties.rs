use mseg::{
    History, HistoryConfig, Point, Polygon, PolygonKind, SegmentationData, Transform,
};
use mseg::detect::dynamic_vertex_radius;
use proptest::prelude::*;

fn marker_state(n: usize) -> SegmentationData {
    let mut data = SegmentationData::new(1000, 1000);
    for i in 0..n {
        data.polygons.push(Polygon::new(
            format!("m{i}"),
            vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(5.0, 8.0),
            ],
            PolygonKind::External,
        ));
    }
    data
}

/// Operations for the model-based history test.
#[derive(Clone, Debug)]
enum Op {
    Push(usize),
    Undo,
    Redo,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (1usize..50).prop_map(Op::Push),
        Just(Op::Undo),
        Just(Op::Redo),
    ]
}

proptest! {
    #[test]
    fn transform_round_trip(
        zoom in 0.1f32..10.0,
        tx in -5000.0f32..5000.0,
        ty in -5000.0f32..5000.0,
        x in -10000.0f32..10000.0,
        y in -10000.0f32..10000.0,
    ) {
        let t = Transform::new(zoom, tx, ty);
        let p = Point::new(x, y);

        let there_and_back = t.image_to_screen(t.screen_to_image(p));
        let tolerance = 1e-2f32.max(x.abs().max(y.abs()) * 1e-4);
        prop_assert!((there_and_back.x - p.x).abs() < tolerance);
        prop_assert!((there_and_back.y - p.y).abs() < tolerance);
    }

    #[test]
    fn hit_radius_widens_with_zoom(base in 1.0f32..50.0) {
        // Effective screen radius at a few representative zoom levels.
        let screen_radius = |zoom: f32| dynamic_vertex_radius(base, zoom) * zoom;

        prop_assert!(screen_radius(5.0) > screen_radius(1.0));
        prop_assert!(screen_radius(0.3) < screen_radius(1.0));
    }

    #[test]
    fn history_matches_reference_model(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let mut history = History::with_config(
            marker_state(0),
            HistoryConfig { max_snapshots: 1000 },
        );

        // Reference model: plain vec of marker sizes plus an index.
        let mut model: Vec<usize> = vec![0];
        let mut index = 0usize;

        for op in ops {
            match op {
                Op::Push(n) => {
                    history.push(marker_state(n));
                    model.truncate(index + 1);
                    model.push(n);
                    index += 1;
                }
                Op::Undo => {
                    let did = history.undo().is_some();
                    if index > 0 {
                        prop_assert!(did);
                        index -= 1;
                    } else {
                        prop_assert!(!did);
                    }
                }
                Op::Redo => {
                    let did = history.redo().is_some();
                    if index + 1 < model.len() {
                        prop_assert!(did);
                        index += 1;
                    } else {
                        prop_assert!(!did);
                    }
                }
            }

            prop_assert_eq!(history.current().polygons.len(), model[index]);
            prop_assert_eq!(history.index(), index);
            prop_assert_eq!(history.len(), model.len());
        }
    }
}
