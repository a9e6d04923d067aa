use thiserror::Error;

/// Rejected configuration values.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("`{field}` must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("`{field}` must lie in [0, 1], got {value}")]
    OutOfUnitRange { field: &'static str, value: f32 },

    #[error("`{field}` range is empty: min {min} > max {max}")]
    EmptyRange {
        field: &'static str,
        min: f32,
        max: f32,
    },

    #[error("population bounds are inverted: min_count {min} > max_count {max}")]
    CountBounds { min: usize, max: usize },
}

/// Failures decoding transport messages.
#[derive(Debug, Error)]
pub enum EventError {
    #[error("malformed event: {0}")]
    Decode(#[from] serde_json::Error),
}
