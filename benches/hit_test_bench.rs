use chart_hover::api::{AreaEventDetector, DetectorConfig, OffsetLayerMapper, TooltipRecorder};
use chart_hover::core::{DistanceMetric, LayerPosition, SeriesGeometryBatch, SpatialIndex};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn wave_series(series_index: usize, points: usize) -> SeriesGeometryBatch {
    let positions: Vec<(f64, f64, f64)> = (0..points)
        .map(|i| {
            let x = i as f64 * 4.0;
            let y = 300.0 + (x * 0.01 + series_index as f64).sin() * 120.0;
            (x, y, y)
        })
        .collect();
    SeriesGeometryBatch::from_positions(series_index, &positions).expect("valid generated batch")
}

fn bench_find_nearest_8x500(c: &mut Criterion) {
    let batches: Vec<SeriesGeometryBatch> = (0..8).map(|s| wave_series(s, 500)).collect();
    let index = SpatialIndex::build(batches, DistanceMetric::Euclidean);

    c.bench_function("find_nearest_8x500", |b| {
        let mut x = 0.0;
        b.iter(|| {
            x = (x + 7.3) % 2_000.0;
            let _ = index.find_nearest(black_box(LayerPosition::new(x, 310.0)), Some(50.0));
        })
    });
}

fn bench_index_rebuild_8x500(c: &mut Criterion) {
    let batches: Vec<SeriesGeometryBatch> = (0..8).map(|s| wave_series(s, 500)).collect();

    c.bench_function("index_rebuild_8x500", |b| {
        b.iter(|| {
            let _ = SpatialIndex::build(black_box(batches.clone()), DistanceMetric::Euclidean);
        })
    });
}

fn bench_mouse_move_stream(c: &mut Criterion) {
    let mut detector = AreaEventDetector::new(
        DetectorConfig::new(4),
        OffsetLayerMapper::new(20.0, 10.0),
        TooltipRecorder::default(),
    )
    .expect("detector init");
    for series_index in 0..4 {
        detector
            .submit_series_geometry(wave_series(series_index, 500))
            .expect("submit series");
    }

    c.bench_function("mouse_move_stream_4x500", |b| {
        let mut x = 0.0;
        b.iter(|| {
            x = (x + 3.1) % 2_000.0;
            detector.handle_mouse_move(black_box(x), black_box(320.0));
            detector.sink_mut().take();
        })
    });
}

criterion_group!(
    benches,
    bench_find_nearest_8x500,
    bench_index_rebuild_8x500,
    bench_mouse_move_stream
);
criterion_main!(benches);
