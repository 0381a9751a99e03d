use chart_hover::core::{
    DistanceMetric, GeometryAccumulator, LayerPosition, SelectionKey, SeriesGeometryBatch,
    SpatialIndex,
};
use proptest::prelude::*;

fn batches_from(raw: &[Vec<(f64, f64)>]) -> Vec<SeriesGeometryBatch> {
    raw.iter()
        .enumerate()
        .map(|(series_index, points)| {
            let points: Vec<(f64, f64, f64)> = points.iter().map(|&(x, y)| (x, y, y)).collect();
            SeriesGeometryBatch::from_positions(series_index, &points).expect("valid batch")
        })
        .collect()
}

fn brute_force_nearest(
    raw: &[Vec<(f64, f64)>],
    position: LayerPosition,
    metric: DistanceMetric,
) -> Option<(f64, SelectionKey)> {
    let mut best: Option<(f64, SelectionKey)> = None;
    for (series_index, points) in raw.iter().enumerate() {
        for (group_index, &(x, y)) in points.iter().enumerate() {
            let distance = metric.distance(position, LayerPosition::new(x, y));
            let key = SelectionKey {
                series_index,
                group_index,
            };
            let better = match best {
                None => true,
                Some((best_distance, best_key)) => {
                    distance < best_distance || (distance == best_distance && key < best_key)
                }
            };
            if better {
                best = Some((distance, key));
            }
        }
    }
    best
}

fn geometry() -> impl Strategy<Value = Vec<Vec<(f64, f64)>>> {
    // Coarse grid so equidistant ties show up regularly.
    let coord = (0i32..40).prop_map(|v| f64::from(v) * 5.0);
    let point = (coord.clone(), coord);
    proptest::collection::vec(proptest::collection::vec(point, 0..24), 1..5)
}

fn distance_metric() -> impl Strategy<Value = DistanceMetric> {
    prop_oneof![
        Just(DistanceMetric::Euclidean),
        Just(DistanceMetric::Horizontal)
    ]
}

proptest! {
    #[test]
    fn unconstrained_query_matches_brute_force(
        raw in geometry(),
        px in -20.0f64..220.0,
        py in -20.0f64..220.0,
        metric in distance_metric(),
    ) {
        let index = SpatialIndex::build(batches_from(&raw), metric);
        let position = LayerPosition::new(px, py);

        let expected = brute_force_nearest(&raw, position, metric).map(|(_, key)| key);
        let actual = index.find_nearest(position, None).map(|found| found.key());
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn raising_the_threshold_never_loses_a_match(
        raw in geometry(),
        px in -20.0f64..220.0,
        py in -20.0f64..220.0,
        low in 0.0f64..60.0,
        extra in 0.0f64..200.0,
    ) {
        let index = SpatialIndex::build(batches_from(&raw), DistanceMetric::Euclidean);
        let position = LayerPosition::new(px, py);

        if let Some(found) = index.find_nearest(position, Some(low)) {
            let wider = index
                .find_nearest(position, Some(low + extra))
                .map(|found| found.key());
            prop_assert_eq!(wider, Some(found.key()));
            let unconstrained = index.find_nearest(position, None).map(|found| found.key());
            prop_assert_eq!(unconstrained, Some(found.key()));
        }
    }

    #[test]
    fn nearest_point_matches_at_exactly_its_distance(
        raw in geometry(),
        px in -20.0f64..220.0,
        py in -20.0f64..220.0,
    ) {
        let index = SpatialIndex::build(batches_from(&raw), DistanceMetric::Euclidean);
        let position = LayerPosition::new(px, py);

        let nearest = brute_force_nearest(&raw, position, DistanceMetric::Euclidean);
        if let Some((distance, key)) = nearest {
            let found = index.find_nearest(position, Some(distance)).map(|found| found.key());
            prop_assert_eq!(found, Some(key));
        }
    }

    #[test]
    fn overflowing_submission_starts_a_fresh_cycle(
        old in geometry(),
        fresh in geometry(),
        px in -20.0f64..220.0,
    ) {
        let series_count = old.len().min(fresh.len());
        let mut accumulator =
            GeometryAccumulator::new(series_count, DistanceMetric::Euclidean).expect("init");

        for batch in batches_from(&old[..series_count]) {
            accumulator.submit(batch).expect("old cycle");
        }
        let mut rebuilt = None;
        for batch in batches_from(&fresh[..series_count]) {
            rebuilt = accumulator.submit(batch).expect("new cycle");
        }
        let index = rebuilt.expect("new cycle completes");

        let position = LayerPosition::new(px, 100.0);
        let expected =
            brute_force_nearest(&fresh[..series_count], position, DistanceMetric::Euclidean)
                .map(|(_, key)| key);
        prop_assert_eq!(index.find_nearest(position, None).map(|found| found.key()), expected);
    }
}
