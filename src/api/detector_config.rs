use serde::{Deserialize, Serialize};

use crate::core::DistanceMetric;
use crate::error::DetectorResult;
use crate::interaction::ZoomGateConfig;

use super::config_validation::validate_detector_config;

/// Hover threshold used when the config does not provide one, in layer units.
pub const DEFAULT_DISTANCE_THRESHOLD: f64 = 50.0;

/// Construction-time detector configuration.
///
/// Serializable so hosts can keep it next to the rest of their chart setup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    #[serde(default)]
    pub zoomable: bool,
    pub expected_series_count: usize,
    #[serde(default = "default_distance_threshold")]
    pub distance_threshold: f64,
    #[serde(default)]
    pub distance_metric: DistanceMetric,
    #[serde(default)]
    pub zoom: ZoomGateConfig,
}

impl DetectorConfig {
    #[must_use]
    pub fn new(expected_series_count: usize) -> Self {
        Self {
            zoomable: false,
            expected_series_count,
            distance_threshold: default_distance_threshold(),
            distance_metric: DistanceMetric::default(),
            zoom: ZoomGateConfig::default(),
        }
    }

    #[must_use]
    pub fn with_zoomable(mut self, zoomable: bool) -> Self {
        self.zoomable = zoomable;
        self
    }

    #[must_use]
    pub fn with_distance_threshold(mut self, distance_threshold: f64) -> Self {
        self.distance_threshold = distance_threshold;
        self
    }

    #[must_use]
    pub fn with_distance_metric(mut self, metric: DistanceMetric) -> Self {
        self.distance_metric = metric;
        self
    }

    #[must_use]
    pub fn with_zoom_config(mut self, zoom: ZoomGateConfig) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn validate(self) -> DetectorResult<Self> {
        validate_detector_config(self)
    }
}

fn default_distance_threshold() -> f64 {
    DEFAULT_DISTANCE_THRESHOLD
}
