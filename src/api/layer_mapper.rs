use serde::{Deserialize, Serialize};

use crate::core::LayerPosition;

/// Converts client (page) coordinates into the chart layer's local space.
pub trait LayerMapper {
    fn map_to_layer(&self, client_x: f64, client_y: f64) -> LayerPosition;
}

impl<F> LayerMapper for F
where
    F: Fn(f64, f64) -> LayerPosition,
{
    fn map_to_layer(&self, client_x: f64, client_y: f64) -> LayerPosition {
        self(client_x, client_y)
    }
}

/// Mapper for a layer whose origin sits at a fixed client offset.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OffsetLayerMapper {
    pub left: f64,
    pub top: f64,
}

impl OffsetLayerMapper {
    #[must_use]
    pub fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }
}

impl LayerMapper for OffsetLayerMapper {
    fn map_to_layer(&self, client_x: f64, client_y: f64) -> LayerPosition {
        LayerPosition::new(client_x - self.left, client_y - self.top)
    }
}
