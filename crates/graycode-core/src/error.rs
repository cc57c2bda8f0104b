/// Errors raised while validating projector / camera geometry.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("projector resolution must be at least 2x2 (got {width}x{height})")]
    InvalidProjectorSize { width: usize, height: usize },
    #[error("camera resolution must be positive (got {width}x{height})")]
    InvalidCameraSize { width: usize, height: usize },
    #[error("dimension {dimension} needs more than {max_bits} Gray-code bits")]
    DimensionTooLarge { dimension: usize, max_bits: u32 },
}

/// Errors raised when wrapping raw grayscale buffers.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    #[error("invalid grayscale image buffer length (expected {expected} bytes, got {got})")]
    BufferLength { expected: usize, got: usize },
    #[error("invalid grayscale image dimensions (width={width}, height={height})")]
    InvalidDimensions { width: usize, height: usize },
}
