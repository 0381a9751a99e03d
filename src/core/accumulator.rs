use tracing::{debug, trace, warn};

use crate::core::{DistanceMetric, SeriesGeometryBatch, SpatialIndex};
use crate::error::{DetectorError, DetectorResult};

/// Collects per-series geometry until a full render cycle is available.
///
/// Partial cycles are never exposed: [`GeometryAccumulator::submit`] only
/// yields an index once every expected series has reported. The first batch
/// after a completed cycle starts a new one.
#[derive(Debug, Clone)]
pub struct GeometryAccumulator {
    expected_series_count: usize,
    metric: DistanceMetric,
    pending: Vec<SeriesGeometryBatch>,
    completed_cycles: u64,
}

impl GeometryAccumulator {
    pub fn new(expected_series_count: usize, metric: DistanceMetric) -> DetectorResult<Self> {
        validate_series_count(expected_series_count)?;
        Ok(Self {
            expected_series_count,
            metric,
            pending: Vec::with_capacity(expected_series_count),
            completed_cycles: 0,
        })
    }

    #[must_use]
    pub fn expected_series_count(&self) -> usize {
        self.expected_series_count
    }

    /// Number of batches received for the cycle currently being assembled.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn completed_cycles(&self) -> u64 {
        self.completed_cycles
    }

    /// Changes the series count and drops any partially assembled cycle.
    pub fn set_expected_series_count(
        &mut self,
        expected_series_count: usize,
    ) -> DetectorResult<()> {
        validate_series_count(expected_series_count)?;
        self.expected_series_count = expected_series_count;
        self.reset();
        Ok(())
    }

    pub fn reset(&mut self) {
        self.pending.clear();
    }

    /// Adds one series batch and returns the rebuilt index when this batch
    /// completes the cycle.
    ///
    /// A malformed batch, or a second batch for a series already received in
    /// this cycle, is rejected without touching the pending cycle.
    pub fn submit(&mut self, batch: SeriesGeometryBatch) -> DetectorResult<Option<SpatialIndex>> {
        if let Err(err) = self.check_batch(&batch) {
            warn!(error = %err, "rejecting series geometry batch");
            return Err(err);
        }

        if self.pending.is_empty() {
            trace!(cycle = self.completed_cycles + 1, "starting render cycle");
        }

        self.pending.push(batch);
        if self.pending.len() < self.expected_series_count {
            trace!(
                received = self.pending.len(),
                expected = self.expected_series_count,
                "series geometry accumulated"
            );
            return Ok(None);
        }

        let batches = std::mem::replace(
            &mut self.pending,
            Vec::with_capacity(self.expected_series_count),
        );
        let index = SpatialIndex::build(batches, self.metric);
        self.completed_cycles += 1;
        debug!(
            cycle = self.completed_cycles,
            series = index.series_len(),
            points = index.points_len(),
            "spatial index rebuilt"
        );
        Ok(Some(index))
    }

    fn check_batch(&self, batch: &SeriesGeometryBatch) -> DetectorResult<()> {
        batch.validate()?;
        let series_index = batch.series_index();
        if self
            .pending
            .iter()
            .any(|pending| pending.series_index() == series_index)
        {
            return Err(DetectorError::DuplicateSeries { series_index });
        }
        Ok(())
    }
}

fn validate_series_count(expected_series_count: usize) -> DetectorResult<()> {
    if expected_series_count == 0 {
        return Err(DetectorError::InvalidConfig(
            "expected_series_count must be >= 1".to_owned(),
        ));
    }
    Ok(())
}
