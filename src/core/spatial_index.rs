use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::warn;

use crate::core::{FoundData, GeometryPoint, LayerPosition, SeriesGeometryBatch};

/// Distance used to rank candidate points against the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DistanceMetric {
    /// Straight-line distance in layer space.
    #[default]
    Euclidean,
    /// Horizontal distance only; vertical pointer position is ignored.
    Horizontal,
}

impl DistanceMetric {
    #[must_use]
    pub fn distance(self, from: LayerPosition, to: LayerPosition) -> f64 {
        let dx = to.x - from.x;
        match self {
            Self::Euclidean => dx.hypot(to.y - from.y),
            Self::Horizontal => dx.abs(),
        }
    }
}

/// Which end of a series to resolve in [`SpatialIndex::edge_of`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeriesEdge {
    First,
    Last,
}

#[derive(Debug, Clone)]
struct SeriesPoints {
    /// Points in group-index order.
    points: Vec<GeometryPoint>,
    /// Offsets into `points`, ordered by x then group index.
    by_x: Vec<usize>,
}

type Ranked = (OrderedFloat<f64>, usize, usize);

impl SeriesPoints {
    fn new(mut points: Vec<GeometryPoint>) -> Self {
        points.sort_by_key(|point| point.group_index);
        let mut by_x: Vec<usize> = (0..points.len()).collect();
        by_x.sort_by_key(|&offset| {
            let point = &points[offset];
            (OrderedFloat(point.position.x), point.group_index)
        });
        Self { points, by_x }
    }

    /// Returns `(distance, group_index, offset)` of the closest point.
    ///
    /// Walks outward from the pointer's x slot in both directions and stops a
    /// side once its horizontal gap alone exceeds the best distance, which is
    /// a lower bound for either metric.
    fn nearest(&self, position: LayerPosition, metric: DistanceMetric) -> Option<Ranked> {
        let split = self
            .by_x
            .partition_point(|&offset| self.points[offset].position.x < position.x);

        let mut best: Option<Ranked> = None;
        self.scan(self.by_x[split..].iter(), position, metric, &mut best);
        self.scan(self.by_x[..split].iter().rev(), position, metric, &mut best);
        best
    }

    fn scan<'a>(
        &self,
        offsets: impl Iterator<Item = &'a usize>,
        position: LayerPosition,
        metric: DistanceMetric,
        best: &mut Option<Ranked>,
    ) {
        for &offset in offsets {
            let point = &self.points[offset];
            let gap = OrderedFloat((point.position.x - position.x).abs());
            if best.is_some_and(|(distance, _, _)| gap > distance) {
                break;
            }
            let ranked = (
                OrderedFloat(metric.distance(position, point.position)),
                point.group_index,
                offset,
            );
            if best.is_none_or(|current| (ranked.0, ranked.1) < (current.0, current.1)) {
                *best = Some(ranked);
            }
        }
    }
}

/// Immutable nearest-point lookup over one complete render cycle.
///
/// Series are kept in ascending series-index order, which is also the
/// tie-break order for equidistant points.
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    series: IndexMap<usize, SeriesPoints>,
    metric: DistanceMetric,
}

impl SpatialIndex {
    #[must_use]
    pub fn build(mut batches: Vec<SeriesGeometryBatch>, metric: DistanceMetric) -> Self {
        batches.sort_by_key(SeriesGeometryBatch::series_index);

        let mut series = IndexMap::with_capacity(batches.len());
        for batch in batches {
            let series_index = batch.series_index();
            if series
                .insert(series_index, SeriesPoints::new(batch.into_points()))
                .is_some()
            {
                warn!(
                    series_index,
                    "duplicate series geometry in one render cycle; keeping the later batch"
                );
            }
        }

        Self { series, metric }
    }

    #[must_use]
    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    #[must_use]
    pub fn series_len(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn points_len(&self) -> usize {
        self.series.values().map(|series| series.points.len()).sum()
    }

    pub fn series_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.series.keys().copied()
    }

    /// Finds the point closest to `position`.
    ///
    /// With `Some(threshold)`, points farther than `threshold` do not match;
    /// a point exactly at the threshold does, and a NaN threshold matches
    /// nothing. With `None` the globally nearest point is returned whenever
    /// the index holds any point.
    #[must_use]
    pub fn find_nearest(
        &self,
        position: LayerPosition,
        threshold: Option<f64>,
    ) -> Option<FoundData> {
        if !position.is_finite() {
            return None;
        }

        let mut candidates: SmallVec<[(OrderedFloat<f64>, usize, &GeometryPoint); 4]> =
            SmallVec::new();
        for (&series_index, series) in &self.series {
            if let Some((distance, _, offset)) = series.nearest(position, self.metric) {
                candidates.push((distance, series_index, &series.points[offset]));
            }
        }

        // Candidates are in series order and each already won its own group
        // tie-break, so the first minimum is the lowest (series, group).
        let (distance, series_index, point) = candidates
            .into_iter()
            .min_by_key(|&(distance, _, _)| distance)?;

        let within_threshold = match threshold {
            Some(limit) => distance.into_inner() <= limit,
            None => true,
        };
        if !within_threshold {
            return None;
        }
        Some(found(series_index, point))
    }

    #[must_use]
    pub fn first_of(&self, series_index: usize) -> Option<FoundData> {
        self.edge_of(series_index, SeriesEdge::First)
    }

    #[must_use]
    pub fn last_of(&self, series_index: usize) -> Option<FoundData> {
        self.edge_of(series_index, SeriesEdge::Last)
    }

    #[must_use]
    pub fn edge_of(&self, series_index: usize, edge: SeriesEdge) -> Option<FoundData> {
        let points = &self.series.get(&series_index)?.points;
        let point = match edge {
            SeriesEdge::First => points.first(),
            SeriesEdge::Last => points.last(),
        }?;
        Some(found(series_index, point))
    }
}

fn found(series_index: usize, point: &GeometryPoint) -> FoundData {
    FoundData {
        series_index,
        group_index: point.group_index,
        position: point.position,
        value: point.value,
    }
}

#[cfg(test)]
mod tests {
    use super::{DistanceMetric, SeriesPoints};
    use crate::core::{GeometryPoint, LayerPosition};

    #[test]
    fn series_points_order_by_group_and_x_independently() {
        let series = SeriesPoints::new(vec![
            GeometryPoint::new(30.0, 0.0, 2, 3.0),
            GeometryPoint::new(10.0, 0.0, 0, 1.0),
            GeometryPoint::new(20.0, 0.0, 1, 2.0),
            GeometryPoint::new(5.0, 0.0, 3, 4.0),
        ]);
        let groups: Vec<usize> = series.points.iter().map(|p| p.group_index).collect();
        assert_eq!(groups, vec![0, 1, 2, 3]);
        let xs: Vec<f64> = series
            .by_x
            .iter()
            .map(|&offset| series.points[offset].position.x)
            .collect();
        assert_eq!(xs, vec![5.0, 10.0, 20.0, 30.0]);
    }

    #[test]
    fn scan_keeps_closer_point_behind_a_nearer_column() {
        // x=49 is horizontally closest but far away vertically.
        let series = SeriesPoints::new(vec![
            GeometryPoint::new(49.0, 500.0, 0, 0.0),
            GeometryPoint::new(60.0, 0.0, 1, 0.0),
            GeometryPoint::new(40.0, 0.0, 2, 0.0),
        ]);
        let (distance, group_index, _) = series
            .nearest(LayerPosition::new(50.0, 0.0), DistanceMetric::Euclidean)
            .expect("nearest point");
        assert_eq!(group_index, 1);
        assert!((distance.into_inner() - 10.0).abs() <= 1e-12);

        let (_, group_index, _) = series
            .nearest(LayerPosition::new(50.0, 0.0), DistanceMetric::Horizontal)
            .expect("nearest point");
        assert_eq!(group_index, 0);
    }

    #[test]
    fn equidistant_points_prefer_lower_group_index() {
        let series = SeriesPoints::new(vec![
            GeometryPoint::new(60.0, 0.0, 0, 0.0),
            GeometryPoint::new(40.0, 0.0, 1, 0.0),
        ]);
        let (_, group_index, _) = series
            .nearest(LayerPosition::new(50.0, 0.0), DistanceMetric::Euclidean)
            .expect("nearest point");
        assert_eq!(group_index, 0);
    }

    #[test]
    fn empty_series_has_no_nearest_point() {
        let series = SeriesPoints::new(Vec::new());
        assert!(
            series
                .nearest(LayerPosition::new(0.0, 0.0), DistanceMetric::Euclidean)
                .is_none()
        );
    }
}
