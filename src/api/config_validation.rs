use crate::error::{DetectorError, DetectorResult};
use crate::interaction::ZoomGateConfig;

use super::DetectorConfig;

pub(super) fn validate_detector_config(config: DetectorConfig) -> DetectorResult<DetectorConfig> {
    if config.expected_series_count == 0 {
        return Err(DetectorError::InvalidConfig(
            "expected_series_count must be >= 1".to_owned(),
        ));
    }
    if !config.distance_threshold.is_finite() || config.distance_threshold <= 0.0 {
        return Err(DetectorError::InvalidConfig(
            "distance_threshold must be finite and > 0".to_owned(),
        ));
    }
    validate_zoom_gate_config(config.zoom)?;
    Ok(config)
}

fn validate_zoom_gate_config(config: ZoomGateConfig) -> DetectorResult<ZoomGateConfig> {
    if !config.min_drag_distance.is_finite() || config.min_drag_distance < 0.0 {
        return Err(DetectorError::InvalidConfig(
            "zoom min_drag_distance must be finite and >= 0".to_owned(),
        ));
    }
    Ok(config)
}
