//! JSON decode report written by the CLI.

use std::{fs, path::Path};

use serde::Serialize;

use crate::core::BitPlaneLayout;
use crate::decode::CorrespondenceMap;
use crate::{ScanError, ScannerConfig};

#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct TimingsMs {
    pub load_captures: u64,
    pub decode: u64,
    pub total: u64,
}

/// One sampled camera pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SampledCorrespondence {
    pub x: usize,
    pub y: usize,
    pub column: i32,
    pub row: i32,
    pub decoded: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct DecodeReport {
    pub config: ScannerConfig,
    pub layout: BitPlaneLayout,
    pub decoded_pixels: usize,
    pub total_pixels: usize,
    pub timings_ms: TimingsMs,
    /// Correspondences on a regular grid of camera pixels.
    pub samples: Vec<SampledCorrespondence>,
}

impl DecodeReport {
    /// Summarize `map`, sampling every `step` pixels along both axes.
    pub fn new(
        config: ScannerConfig,
        layout: BitPlaneLayout,
        map: &CorrespondenceMap,
        step: usize,
        timings_ms: TimingsMs,
    ) -> Self {
        let step = step.max(1);
        let samples = map
            .iter()
            .filter(|(x, y, _)| x % step == 0 && y % step == 0)
            .map(|(x, y, c)| SampledCorrespondence {
                x,
                y,
                column: c.column,
                row: c.row,
                decoded: map.is_decoded(x, y),
            })
            .collect();
        Self {
            config,
            layout,
            decoded_pixels: map.decoded_count(),
            total_pixels: map.width() * map.height(),
            timings_ms,
            samples,
        }
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ScanError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
