mod area_event_detector;
mod config_validation;
mod detector_config;
mod detector_snapshot;
mod layer_mapper;
mod tooltip;

pub use area_event_detector::AreaEventDetector;
pub use detector_config::{DEFAULT_DISTANCE_THRESHOLD, DetectorConfig};
pub use detector_snapshot::{
    DETECTOR_SNAPSHOT_JSON_SCHEMA_V1, DetectorSnapshot, DetectorSnapshotJsonContractV1,
};
pub use layer_mapper::{LayerMapper, OffsetLayerMapper};
pub use tooltip::{TooltipEvent, TooltipRecorder, TooltipSink};
