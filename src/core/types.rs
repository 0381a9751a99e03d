use serde::{Deserialize, Serialize};

use crate::error::{DetectorError, DetectorResult};

/// Chart-local coordinate used for hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerPosition {
    pub x: f64,
    pub y: f64,
}

impl LayerPosition {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// One rendered point of a series, already projected into layer space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometryPoint {
    pub position: LayerPosition,
    pub group_index: usize,
    pub value: f64,
}

impl GeometryPoint {
    #[must_use]
    pub fn new(x: f64, y: f64, group_index: usize, value: f64) -> Self {
        Self {
            position: LayerPosition::new(x, y),
            group_index,
            value,
        }
    }
}

/// Rendered geometry of one series for one render cycle.
///
/// Construction validates coordinates so a batch that reaches the
/// accumulator can always be indexed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesGeometryBatch {
    series_index: usize,
    points: Vec<GeometryPoint>,
}

impl SeriesGeometryBatch {
    pub fn new(series_index: usize, points: Vec<GeometryPoint>) -> DetectorResult<Self> {
        let batch = Self {
            series_index,
            points,
        };
        batch.validate()?;
        Ok(batch)
    }

    /// Builds a batch from `(x, y, value)` triples, using the slice position
    /// as the group index.
    pub fn from_positions(series_index: usize, points: &[(f64, f64, f64)]) -> DetectorResult<Self> {
        let points = points
            .iter()
            .enumerate()
            .map(|(group_index, &(x, y, value))| GeometryPoint::new(x, y, group_index, value))
            .collect();
        Self::new(series_index, points)
    }

    #[must_use]
    pub fn series_index(&self) -> usize {
        self.series_index
    }

    #[must_use]
    pub fn points(&self) -> &[GeometryPoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub(crate) fn into_points(self) -> Vec<GeometryPoint> {
        self.points
    }

    /// Re-checks coordinates and group indexes.
    ///
    /// Fields are private, so this only fails for batches that bypassed
    /// [`SeriesGeometryBatch::new`], e.g. through deserialization.
    pub fn validate(&self) -> DetectorResult<()> {
        let mut seen = Vec::with_capacity(self.points.len());
        for point in &self.points {
            if !point.position.is_finite() {
                return Err(DetectorError::MalformedGeometry {
                    series_index: self.series_index,
                    group_index: point.group_index,
                    reason: format!(
                        "layer position must be finite, got ({}, {})",
                        point.position.x, point.position.y
                    ),
                });
            }
            seen.push(point.group_index);
        }

        seen.sort_unstable();
        if let Some(pair) = seen.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(DetectorError::MalformedGeometry {
                series_index: self.series_index,
                group_index: pair[0],
                reason: "duplicate group index".to_owned(),
            });
        }
        Ok(())
    }
}

/// Identity of a selected point; two results are the same selection when
/// their keys match, regardless of position or value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SelectionKey {
    pub series_index: usize,
    pub group_index: usize,
}

/// Result of a nearest-point query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FoundData {
    pub series_index: usize,
    pub group_index: usize,
    pub position: LayerPosition,
    pub value: f64,
}

impl FoundData {
    #[must_use]
    pub fn key(&self) -> SelectionKey {
        SelectionKey {
            series_index: self.series_index,
            group_index: self.group_index,
        }
    }

    #[must_use]
    pub fn is_same_selection(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}
