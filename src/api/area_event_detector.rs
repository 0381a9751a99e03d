use tracing::{debug, trace};

use crate::core::{FoundData, GeometryAccumulator, LayerPosition, SeriesGeometryBatch, SpatialIndex};
use crate::error::DetectorResult;
use crate::interaction::{
    DragGesture, MouseEventBase, PointerTracker, ZoomGate, ZoomRange, ZoomSupport,
};

use super::{DetectorConfig, LayerMapper, TooltipEvent, TooltipSink};

/// Mouse event detector for area and line charts.
///
/// Turns pointer events into edge-triggered tooltip show/hide signals by
/// hit-testing against the geometry of the latest complete render cycle.
///
/// `M` maps client coordinates into layer space, `S` receives tooltip
/// events, `G` is the zoom capability and `B` the shared pointer plumbing
/// that every handler calls through to.
pub struct AreaEventDetector<M, S, G = ZoomSupport, B = PointerTracker> {
    config: DetectorConfig,
    mapper: M,
    sink: S,
    zoom: G,
    base: B,
    accumulator: GeometryAccumulator,
    index: Option<SpatialIndex>,
    selection: Option<FoundData>,
    /// Last render cycle that may still hold pre-zoom geometry.
    pre_zoom_cycle: Option<u64>,
}

impl<M: LayerMapper, S: TooltipSink> AreaEventDetector<M, S> {
    /// Creates a detector whose zoom capability follows `config.zoomable`.
    pub fn new(config: DetectorConfig, mapper: M, sink: S) -> DetectorResult<Self> {
        let zoom = ZoomSupport::from_flag(config.zoomable, config.zoom);
        Self::with_parts(config, mapper, sink, zoom, PointerTracker::default())
    }
}

impl<M, S, G, B> AreaEventDetector<M, S, G, B>
where
    M: LayerMapper,
    S: TooltipSink,
    G: ZoomGate,
    B: MouseEventBase,
{
    /// Creates a detector with a caller-provided zoom gate and pointer base.
    ///
    /// The gate is initialized and consulted only when `config.zoomable` is set.
    pub fn with_parts(
        config: DetectorConfig,
        mapper: M,
        sink: S,
        mut zoom: G,
        base: B,
    ) -> DetectorResult<Self> {
        let config = config.validate()?;
        let accumulator =
            GeometryAccumulator::new(config.expected_series_count, config.distance_metric)?;
        if config.zoomable {
            zoom.initialize(config.zoom);
        }

        Ok(Self {
            config,
            mapper,
            sink,
            zoom,
            base,
            accumulator,
            index: None,
            selection: None,
            pre_zoom_cycle: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> DetectorConfig {
        self.config
    }

    #[must_use]
    pub fn selection(&self) -> Option<FoundData> {
        self.selection
    }

    /// Index of the latest complete render cycle, if one has completed.
    #[must_use]
    pub fn spatial_index(&self) -> Option<&SpatialIndex> {
        self.index.as_ref()
    }

    #[must_use]
    pub fn accumulator(&self) -> &GeometryAccumulator {
        &self.accumulator
    }

    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    #[must_use]
    pub fn zoom_gate(&self) -> &G {
        &self.zoom
    }

    pub fn zoom_gate_mut(&mut self) -> &mut G {
        &mut self.zoom
    }

    #[must_use]
    pub fn base(&self) -> &B {
        &self.base
    }

    /// Receives one series' geometry for the current render cycle.
    ///
    /// The spatial index is swapped only when the cycle completes, so hover
    /// queries keep using the previous index until then. A malformed batch
    /// is a caller bug and is returned as an error.
    pub fn submit_series_geometry(&mut self, batch: SeriesGeometryBatch) -> DetectorResult<()> {
        if let Some(index) = self.accumulator.submit(batch)? {
            self.index = Some(index);
        }
        if self.config.zoomable {
            self.after_zoom_refresh();
        }
        Ok(())
    }

    /// Changes how many series make up a render cycle.
    ///
    /// Any partially received cycle is discarded; the current index stays.
    pub fn set_expected_series_count(
        &mut self,
        expected_series_count: usize,
    ) -> DetectorResult<()> {
        self.accumulator.set_expected_series_count(expected_series_count)?;
        self.config.expected_series_count = expected_series_count;
        self.forget_pending_cycle();
        Ok(())
    }

    /// Drops pending geometry and the built index. The current selection is
    /// kept so the next mouse move can hide it.
    pub fn clear_geometry(&mut self) {
        self.accumulator.reset();
        self.index = None;
        self.forget_pending_cycle();
    }

    pub fn handle_mouse_move(&mut self, client_x: f64, client_y: f64) {
        self.base.on_mouse_move(client_x, client_y);

        let position = self.mapper.map_to_layer(client_x, client_y);
        let found = self.find_data(position);

        if self.config.zoomable && self.zoom.just_released_drag() {
            trace!(
                x = position.x,
                y = position.y,
                "skipping hover right after drag release"
            );
            return;
        }
        if !is_changed_selection(self.selection.as_ref(), found.as_ref()) {
            return;
        }

        match (found, self.selection) {
            (Some(found), _) => self.emit(TooltipEvent::Show(found)),
            (None, Some(previous)) => self.emit(TooltipEvent::Hide(previous)),
            (None, None) => {}
        }
        self.selection = found;
    }

    pub fn handle_mouse_out(&mut self) {
        if let Some(previous) = self.selection.take() {
            self.emit(TooltipEvent::Hide(previous));
        }
        self.base.on_mouse_out();
    }

    /// Re-shows the tooltip after a zoom once the zoomed geometry is complete.
    ///
    /// Does nothing while a render cycle is only partially received, or
    /// until a cycle started after the zoom has completed, so the tooltip is
    /// never anchored to pre-zoom geometry.
    pub fn after_zoom_refresh(&mut self) {
        if !self.config.zoomable || !self.has_post_zoom_geometry() {
            return;
        }
        self.pre_zoom_cycle = None;
        let Some(refresh) = self.zoom.after_zoom_refresh() else {
            return;
        };
        let Some(found) = self
            .index
            .as_ref()
            .and_then(|index| index.edge_of(refresh.series_index, refresh.edge))
        else {
            debug!(
                series_index = refresh.series_index,
                "no point to restore tooltip after zoom"
            );
            return;
        };

        self.emit(TooltipEvent::Show(found));
        self.selection = Some(found);
    }

    /// Hit-tests a layer position the way mouse moves do.
    #[must_use]
    pub fn find_data(&self, position: LayerPosition) -> Option<FoundData> {
        let threshold = if self.config.zoomable {
            self.zoom.query_threshold(self.config.distance_threshold)
        } else {
            Some(self.config.distance_threshold)
        };
        self.index.as_ref()?.find_nearest(position, threshold)
    }

    #[must_use]
    pub fn first_data(&self, series_index: usize) -> Option<FoundData> {
        self.index.as_ref()?.first_of(series_index)
    }

    #[must_use]
    pub fn last_data(&self, series_index: usize) -> Option<FoundData> {
        self.index.as_ref()?.last_of(series_index)
    }

    pub(super) fn last_client_position(&self) -> Option<(f64, f64)> {
        self.base.last_client_position()
    }

    fn has_post_zoom_geometry(&self) -> bool {
        let completed = self.accumulator.completed_cycles();
        self.accumulator.pending_len() == 0
            && self.pre_zoom_cycle.is_none_or(|cycle| completed > cycle)
    }

    /// A discarded partial cycle can no longer complete with pre-zoom
    /// geometry, so the next completed cycle is post-zoom.
    fn forget_pending_cycle(&mut self) {
        let completed = self.accumulator.completed_cycles();
        if let Some(cycle) = self.pre_zoom_cycle.as_mut() {
            *cycle = (*cycle).min(completed);
        }
    }

    fn emit(&mut self, event: TooltipEvent) {
        let data = event.data();
        debug!(
            event = event.name(),
            series_index = data.series_index,
            group_index = data.group_index,
            "tooltip event"
        );
        self.sink.emit(event);
    }
}

impl<M, S, G, B> AreaEventDetector<M, S, G, B>
where
    M: LayerMapper,
    S: TooltipSink,
    G: ZoomGate + DragGesture,
    B: MouseEventBase,
{
    pub fn drag_start(&mut self, client_x: f64, client_y: f64) {
        if !self.config.zoomable {
            return;
        }
        let position = self.mapper.map_to_layer(client_x, client_y);
        self.zoom.begin_drag(position);
    }

    /// Ends a drag and returns the committed zoom range.
    ///
    /// A committed zoom hides the tooltip; it is restored on the series that
    /// was selected once the zoomed geometry arrives.
    pub fn drag_end(&mut self, client_x: f64, client_y: f64) -> Option<ZoomRange> {
        if !self.config.zoomable {
            return None;
        }
        let position = self.mapper.map_to_layer(client_x, client_y);
        let selected_series = self.selection.map(|found| found.series_index);
        let range = self.zoom.end_drag(position, selected_series)?;

        let in_flight = u64::from(self.accumulator.pending_len() > 0);
        self.pre_zoom_cycle = Some(self.accumulator.completed_cycles() + in_flight);
        if let Some(previous) = self.selection.take() {
            self.emit(TooltipEvent::Hide(previous));
        }
        Some(range)
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.config.zoomable && self.zoom.is_dragging()
    }
}

fn is_changed_selection(previous: Option<&FoundData>, next: Option<&FoundData>) -> bool {
    match (previous, next) {
        (Some(previous), Some(next)) => !previous.is_same_selection(next),
        (None, None) => false,
        _ => true,
    }
}
