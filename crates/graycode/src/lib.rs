//! High-level facade crate for the `graycode-*` workspace.
//!
//! This crate provides:
//! - re-exports of the layout, pattern and decode crates,
//! - [`GrayCodeScanner`], which pairs pattern playback with decoding for one
//!   projector/camera pair,
//! - JSON configuration and reports,
//! - (feature `image`) capture loading from image files,
//! - (feature `cli`) the `graycode` command-line tool.
//!
//! ## API map
//! - `graycode::core`: bit-plane layout, Gray bit math, grayscale buffers.
//! - `graycode::pattern`: pattern sequence generation, playback, PNG export.
//! - `graycode::decode`: capture decoding and the correspondence map.
//!
//! ## Protocol
//!
//! 1. `required_image_count()` frames make one pass.
//! 2. Show `current()`, capture a frame, `advance()`; stop when `advance()`
//!    returns `false` and call `reset()` before the next pass.
//! 3. `decode(&captures)` with the frames in display order, then query
//!    `correspondence_at(x, y)`.

pub use graycode_core as core;
pub use graycode_decode as decode;
pub use graycode_pattern as pattern;

pub use graycode_core::{Axis, BitPlaneLayout, ConfigError, GrayImage, GrayImageView};
pub use graycode_decode::{Correspondence, CorrespondenceMap, DecodeError, DecodeParams};

mod config;
mod error;
mod report;
mod scanner;

#[cfg(feature = "image")]
pub mod capture;

pub use config::ScannerConfig;
pub use error::ScanError;
pub use report::{DecodeReport, SampledCorrespondence, TimingsMs};
pub use scanner::GrayCodeScanner;
