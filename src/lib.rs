//! chart-hover: tooltip hit-testing for area and line charts.
//!
//! Series geometry is accumulated per render cycle into a nearest-point
//! index, and pointer events are turned into edge-triggered tooltip
//! show/hide signals, with optional drag-to-zoom gating.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod telemetry;

pub use api::{AreaEventDetector, DetectorConfig, TooltipEvent, TooltipSink};
pub use error::{DetectorError, DetectorResult};
