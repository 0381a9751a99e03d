pub mod accumulator;
pub mod spatial_index;
pub mod types;

pub use accumulator::GeometryAccumulator;
pub use spatial_index::{DistanceMetric, SeriesEdge, SpatialIndex};
pub use types::{FoundData, GeometryPoint, LayerPosition, SelectionKey, SeriesGeometryBatch};
