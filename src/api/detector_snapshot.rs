use serde::{Deserialize, Serialize};

use crate::core::FoundData;
use crate::error::{DetectorError, DetectorResult};
use crate::interaction::{MouseEventBase, ZoomGate};

use super::{AreaEventDetector, DetectorConfig, LayerMapper, TooltipSink};

pub const DETECTOR_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Serializable detector state used by regression tests and debugging tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorSnapshot {
    pub config: DetectorConfig,
    pub pending_batches: usize,
    pub completed_cycles: u64,
    pub indexed_series: Vec<usize>,
    pub indexed_points: usize,
    pub selection: Option<FoundData>,
    pub last_client_position: Option<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: DetectorSnapshot,
}

impl<M, S, G, B> AreaEventDetector<M, S, G, B>
where
    M: LayerMapper,
    S: TooltipSink,
    G: ZoomGate,
    B: MouseEventBase,
{
    #[must_use]
    pub fn snapshot(&self) -> DetectorSnapshot {
        let index = self.spatial_index();
        DetectorSnapshot {
            config: self.config(),
            pending_batches: self.accumulator().pending_len(),
            completed_cycles: self.accumulator().completed_cycles(),
            indexed_series: index
                .map(|index| index.series_indices().collect())
                .unwrap_or_default(),
            indexed_points: index.map_or(0, |index| index.points_len()),
            selection: self.selection(),
            last_client_position: self.last_client_position(),
        }
    }
}

impl DetectorSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> DetectorResult<String> {
        let payload = DetectorSnapshotJsonContractV1 {
            schema_version: DETECTOR_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            DetectorError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Parses either a bare snapshot or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> DetectorResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<DetectorSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: DetectorSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            DetectorError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != DETECTOR_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(DetectorError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}
