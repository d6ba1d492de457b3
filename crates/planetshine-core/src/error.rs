use thiserror::Error;

/// Errors raised while reading colors out of a pixel buffer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SampleError {
    #[error("sample rect ({x}, {y}, {width}x{height}) exceeds buffer bounds {buffer_width}x{buffer_height}")]
    RectOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        buffer_width: u32,
        buffer_height: u32,
    },

    #[error("cannot sample an empty buffer")]
    EmptyBuffer,

    #[error("buffer dimensions differ: {0}x{1} vs {2}x{3}")]
    DimensionMismatch(u32, u32, u32, u32),

    #[error("pixel data length {actual} does not match {width}x{height}")]
    InvalidLength {
        width: u32,
        height: u32,
        actual: usize,
    },
}

/// Errors raised while loading or validating settings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Failed to parse settings RON: {0}")]
    ParseError(String),

    #[error("Failed to serialize settings: {0}")]
    SerializeError(String),

    #[error("'{field}' = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("fade band '{name}' has min {min} above max {max}")]
    InvertedFadeBand { name: &'static str, min: f32, max: f32 },

    #[error("albedo camera dimension {0} must be a power of two")]
    DimensionNotPowerOfTwo(u32),
}
