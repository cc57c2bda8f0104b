use std::path::PathBuf;

use crate::core::ConfigError;
use crate::decode::DecodeError;
use crate::pattern::PatternIoError;

/// Errors produced by the high-level scanner, config and capture helpers.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    PatternIo(#[from] PatternIoError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "image")]
    #[error(transparent)]
    Image(#[from] ::image::ImageError),

    #[error("capture {index} not found at {}", .path.display())]
    CaptureNotFound { index: usize, path: PathBuf },
}
