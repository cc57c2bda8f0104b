//! Projector-side playback and camera-side decoding behind one handle.

use crate::core::{Axis, BitPlaneLayout, ConfigError, GrayImage, GrayImageView};
use crate::decode::{Correspondence, CorrespondenceMap, DecodeError, DecodeParams, Decoder};
use crate::pattern::{PatternGenerator, PatternSet};
use crate::ScannerConfig;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Gray-code scanner for one projector/camera pair.
///
/// ```
/// use graycode::{GrayCodeScanner, ScannerConfig};
///
/// let mut scanner = GrayCodeScanner::new(&ScannerConfig::new(32, 16, 32, 16)).unwrap();
/// let mut captures = Vec::with_capacity(scanner.required_image_count());
/// loop {
///     // display `current()`, grab a camera frame
///     captures.push(scanner.current().clone());
///     if !scanner.advance() {
///         break;
///     }
/// }
/// let views: Vec<_> = captures.iter().map(|c| c.view()).collect();
/// scanner.decode(&views).unwrap();
/// assert_eq!(scanner.correspondence_at(5, 9).map(|c| (c.column, c.row)), Some((5, 9)));
/// ```
#[derive(Clone, Debug)]
pub struct GrayCodeScanner {
    generator: PatternGenerator,
    decoder: Decoder,
    params: DecodeParams,
}

impl GrayCodeScanner {
    pub fn new(config: &ScannerConfig) -> Result<Self, ConfigError> {
        let layout = config.layout()?;
        let decoder = Decoder::new(layout, config.camera_width, config.camera_height)?;
        let generator = PatternGenerator::from_layout(&layout);
        log::debug!(
            "scanner ready: projector {}x{}, camera {}x{}, {} patterns",
            config.projector_width,
            config.projector_height,
            config.camera_width,
            config.camera_height,
            layout.total_patterns
        );
        Ok(Self {
            generator,
            decoder,
            params: config.decode,
        })
    }

    #[inline]
    pub fn layout(&self) -> &BitPlaneLayout {
        self.generator.layout()
    }

    #[inline]
    pub fn patterns(&self) -> &PatternSet {
        self.generator.patterns()
    }

    #[inline]
    pub fn params(&self) -> &DecodeParams {
        &self.params
    }

    #[inline]
    pub fn required_image_count(&self) -> usize {
        self.generator.required_image_count()
    }

    /// Pattern to display now.
    #[inline]
    pub fn current(&self) -> &GrayImage {
        self.generator.current()
    }

    #[inline]
    pub fn stage(&self) -> usize {
        self.generator.stage()
    }

    /// Next pattern; `false` once the whole sequence has been shown.
    #[inline]
    pub fn advance(&mut self) -> bool {
        self.generator.advance()
    }

    /// Rewind playback. Patterns and decoded correspondences are kept.
    #[inline]
    pub fn reset(&mut self) {
        self.generator.reset();
    }

    /// Decode a capture pass with the configured parameters.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, captures), fields(images = captures.len()))
    )]
    pub fn decode(&mut self, captures: &[GrayImageView<'_>]) -> Result<(), DecodeError> {
        self.decoder.decode_with(captures, &self.params)
    }

    /// Decode with an explicit threshold, keeping the configured decision mode.
    pub fn decode_with_threshold(
        &mut self,
        captures: &[GrayImageView<'_>],
        threshold: u8,
    ) -> Result<(), DecodeError> {
        let params = self.params.with_threshold(threshold);
        self.decoder.decode_with(captures, &params)
    }

    #[inline]
    pub fn correspondence_at(&self, x: usize, y: usize) -> Option<Correspondence> {
        self.decoder.correspondence_at(x, y)
    }

    #[inline]
    pub fn correspondences(&self) -> &CorrespondenceMap {
        self.decoder.map()
    }

    /// Normalized 8-bit rendering of the decoded columns.
    pub fn column_visualization(&self) -> GrayImage {
        self.decoder.visualize(Axis::Column)
    }

    pub fn visualize(&self, axis: Axis) -> GrayImage {
        self.decoder.visualize(axis)
    }

    /// Zero the correspondence map without touching playback.
    pub fn clear_correspondences(&mut self) {
        self.decoder.reset();
    }
}
