use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{LayerPosition, SeriesEdge};

/// Tuning for drag-to-zoom gestures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomGateConfig {
    /// Drags shorter than this (layer units, horizontal) count as clicks.
    pub min_drag_distance: f64,
}

impl Default for ZoomGateConfig {
    fn default() -> Self {
        Self {
            min_drag_distance: 5.0,
        }
    }
}

/// Tooltip target to restore once zoomed geometry is in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoomRefresh {
    pub series_index: usize,
    pub edge: SeriesEdge,
}

/// Capability consulted by the detector when zoom is enabled.
pub trait ZoomGate {
    fn initialize(&mut self, config: ZoomGateConfig);

    /// Threshold to use for hover queries; `None` means unconstrained.
    fn query_threshold(&self, distance_threshold: f64) -> Option<f64> {
        Some(distance_threshold)
    }

    /// `true` exactly once after a drag ends; reading the flag clears it.
    fn just_released_drag(&mut self) -> bool;

    /// Takes the pending post-zoom tooltip target, if any.
    fn after_zoom_refresh(&mut self) -> Option<ZoomRefresh>;
}

/// Gate used when zoom is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NoZoomGate;

impl ZoomGate for NoZoomGate {
    fn initialize(&mut self, _config: ZoomGateConfig) {}

    fn just_released_drag(&mut self) -> bool {
        false
    }

    fn after_zoom_refresh(&mut self) -> Option<ZoomRefresh> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragDirection {
    LeftToRight,
    RightToLeft,
}

/// Horizontal layer range selected by a committed drag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomRange {
    pub start_x: f64,
    pub end_x: f64,
    pub direction: DragDirection,
}

/// Drag lifecycle hooks for gates that track gestures themselves.
pub trait DragGesture {
    fn begin_drag(&mut self, position: LayerPosition);

    /// Ends the drag. `selected_series` is the series under the tooltip at
    /// release time and anchors the post-zoom refresh.
    fn end_drag(
        &mut self,
        position: LayerPosition,
        selected_series: Option<usize>,
    ) -> Option<ZoomRange>;

    fn is_dragging(&self) -> bool;
}

/// Drag-to-zoom gate: unconstrained queries, one-shot release suppression
/// and tooltip restore after the zoomed redraw.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragZoomGate {
    config: ZoomGateConfig,
    drag_origin: Option<LayerPosition>,
    released: bool,
    pending_refresh: Option<ZoomRefresh>,
}

impl DragZoomGate {
    #[must_use]
    pub fn new(config: ZoomGateConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn config(&self) -> ZoomGateConfig {
        self.config
    }

    #[must_use]
    pub fn has_pending_refresh(&self) -> bool {
        self.pending_refresh.is_some()
    }
}

impl ZoomGate for DragZoomGate {
    fn initialize(&mut self, config: ZoomGateConfig) {
        *self = Self::new(config);
    }

    fn query_threshold(&self, _distance_threshold: f64) -> Option<f64> {
        None
    }

    fn just_released_drag(&mut self) -> bool {
        std::mem::take(&mut self.released)
    }

    fn after_zoom_refresh(&mut self) -> Option<ZoomRefresh> {
        self.pending_refresh.take()
    }
}

impl DragGesture for DragZoomGate {
    fn begin_drag(&mut self, position: LayerPosition) {
        self.drag_origin = Some(position);
    }

    fn end_drag(
        &mut self,
        position: LayerPosition,
        selected_series: Option<usize>,
    ) -> Option<ZoomRange> {
        let origin = self.drag_origin.take()?;
        self.released = true;

        let delta = position.x - origin.x;
        if !delta.is_finite() || delta.abs() < self.config.min_drag_distance {
            return None;
        }

        let direction = if delta < 0.0 {
            DragDirection::RightToLeft
        } else {
            DragDirection::LeftToRight
        };
        self.pending_refresh = selected_series.map(|series_index| ZoomRefresh {
            series_index,
            edge: match direction {
                DragDirection::RightToLeft => SeriesEdge::First,
                DragDirection::LeftToRight => SeriesEdge::Last,
            },
        });

        let range = ZoomRange {
            start_x: origin.x.min(position.x),
            end_x: origin.x.max(position.x),
            direction,
        };
        debug!(
            start_x = range.start_x,
            end_x = range.end_x,
            "zoom drag committed"
        );
        Some(range)
    }

    fn is_dragging(&self) -> bool {
        self.drag_origin.is_some()
    }
}

/// Zoom capability chosen from the `zoomable` config flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZoomSupport {
    Disabled(NoZoomGate),
    Drag(DragZoomGate),
}

impl ZoomSupport {
    #[must_use]
    pub fn from_flag(zoomable: bool, config: ZoomGateConfig) -> Self {
        if zoomable {
            Self::Drag(DragZoomGate::new(config))
        } else {
            Self::Disabled(NoZoomGate)
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Drag(_))
    }

    #[must_use]
    pub fn drag_gate(&self) -> Option<&DragZoomGate> {
        match self {
            Self::Drag(gate) => Some(gate),
            Self::Disabled(_) => None,
        }
    }
}

impl ZoomGate for ZoomSupport {
    fn initialize(&mut self, config: ZoomGateConfig) {
        match self {
            Self::Disabled(gate) => gate.initialize(config),
            Self::Drag(gate) => gate.initialize(config),
        }
    }

    fn query_threshold(&self, distance_threshold: f64) -> Option<f64> {
        match self {
            Self::Disabled(gate) => gate.query_threshold(distance_threshold),
            Self::Drag(gate) => gate.query_threshold(distance_threshold),
        }
    }

    fn just_released_drag(&mut self) -> bool {
        match self {
            Self::Disabled(gate) => gate.just_released_drag(),
            Self::Drag(gate) => gate.just_released_drag(),
        }
    }

    fn after_zoom_refresh(&mut self) -> Option<ZoomRefresh> {
        match self {
            Self::Disabled(gate) => gate.after_zoom_refresh(),
            Self::Drag(gate) => gate.after_zoom_refresh(),
        }
    }
}

impl DragGesture for ZoomSupport {
    fn begin_drag(&mut self, position: LayerPosition) {
        if let Self::Drag(gate) = self {
            gate.begin_drag(position);
        }
    }

    fn end_drag(
        &mut self,
        position: LayerPosition,
        selected_series: Option<usize>,
    ) -> Option<ZoomRange> {
        match self {
            Self::Drag(gate) => gate.end_drag(position, selected_series),
            Self::Disabled(_) => None,
        }
    }

    fn is_dragging(&self) -> bool {
        self.drag_gate().is_some_and(DragGesture::is_dragging)
    }
}
