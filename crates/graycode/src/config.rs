//! JSON configuration shared by the scanner and the CLI.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::core::{BitPlaneLayout, ConfigError};
use crate::decode::DecodeParams;
use crate::ScanError;

/// Projector and camera geometry plus decoder settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannerConfig {
    pub projector_width: usize,
    pub projector_height: usize,
    pub camera_width: usize,
    pub camera_height: usize,
    #[serde(default)]
    pub decode: DecodeParams,
}

impl ScannerConfig {
    pub fn new(
        projector_width: usize,
        projector_height: usize,
        camera_width: usize,
        camera_height: usize,
    ) -> Self {
        Self {
            projector_width,
            projector_height,
            camera_width,
            camera_height,
            decode: DecodeParams::default(),
        }
    }

    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ScanError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ScanError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Bit-plane layout for the projector side.
    pub fn layout(&self) -> Result<BitPlaneLayout, ConfigError> {
        BitPlaneLayout::new(self.projector_width, self.projector_height)
    }
}
