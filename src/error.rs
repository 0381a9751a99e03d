use thiserror::Error;

pub type DetectorResult<T> = Result<T, DetectorError>;

#[derive(Debug, Error)]
pub enum DetectorError {
    #[error("invalid detector config: {0}")]
    InvalidConfig(String),

    #[error("malformed geometry in series {series_index} at group {group_index}: {reason}")]
    MalformedGeometry {
        series_index: usize,
        group_index: usize,
        reason: String,
    },

    #[error("series {series_index} was already submitted in the current render cycle")]
    DuplicateSeries { series_index: usize },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
