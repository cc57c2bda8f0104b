//! Materialization of the full bit-plane sequence.

use graycode_core::{gray_bit, Axis, BitPlaneLayout, ConfigError, GrayImage, PlaneKind};
use graycode_core::{BLACK, WHITE};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::cursor::SequenceCursor;

/// The ordered, immutable image sequence for one projector resolution.
#[derive(Clone, Debug)]
pub struct PatternSet {
    layout: BitPlaneLayout,
    images: Vec<GrayImage>,
}

impl PatternSet {
    /// Render every pattern of `layout`.
    ///
    /// Even indices are rendered first; each odd index is then filled as the
    /// pixel-wise `255 - v` of its even predecessor, reference frames included.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "info",
            skip(layout),
            fields(
                width = layout.projector_width,
                height = layout.projector_height,
                patterns = layout.total_patterns
            )
        )
    )]
    pub fn generate(layout: &BitPlaneLayout) -> Self {
        let mut images = render_even_planes(layout);
        invert_into_odd_planes(&mut images);
        log::debug!(
            "generated {} patterns of {}x{}",
            images.len(),
            layout.projector_width,
            layout.projector_height
        );
        Self {
            layout: *layout,
            images,
        }
    }

    #[inline]
    pub fn layout(&self) -> &BitPlaneLayout {
        &self.layout
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&GrayImage> {
        self.images.get(index)
    }

    #[inline]
    pub fn images(&self) -> &[GrayImage] {
        &self.images
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GrayImage> {
        self.images.iter()
    }
}

impl<'a> IntoIterator for &'a PatternSet {
    type Item = &'a GrayImage;
    type IntoIter = std::slice::Iter<'a, GrayImage>;

    fn into_iter(self) -> Self::IntoIter {
        self.images.iter()
    }
}

/// Owns a [`PatternSet`] and the playback position over it.
///
/// Producer loop: show [`current`](Self::current), call
/// [`advance`](Self::advance); once it returns `false` every pattern has been
/// shown and the cursor is back at stage 0.
#[derive(Clone, Debug)]
pub struct PatternGenerator {
    patterns: PatternSet,
    cursor: SequenceCursor,
}

impl PatternGenerator {
    /// Plan and render the sequence for a projector resolution.
    pub fn new(projector_width: usize, projector_height: usize) -> Result<Self, ConfigError> {
        let layout = BitPlaneLayout::new(projector_width, projector_height)?;
        Ok(Self::from_layout(&layout))
    }

    pub fn from_layout(layout: &BitPlaneLayout) -> Self {
        let patterns = PatternSet::generate(layout);
        let cursor = SequenceCursor::new(patterns.len());
        Self { patterns, cursor }
    }

    #[inline]
    pub fn layout(&self) -> &BitPlaneLayout {
        self.patterns.layout()
    }

    #[inline]
    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    /// Number of frames the camera side must capture.
    #[inline]
    pub fn required_image_count(&self) -> usize {
        self.patterns.len()
    }

    /// Image at the current stage.
    #[inline]
    pub fn current(&self) -> &GrayImage {
        &self.patterns.images[self.cursor.stage()]
    }

    #[inline]
    pub fn stage(&self) -> usize {
        self.cursor.stage()
    }

    /// Step to the next pattern; `false` means the cycle wrapped to stage 0.
    #[inline]
    pub fn advance(&mut self) -> bool {
        self.cursor.advance()
    }

    /// Rewind playback. The rendered patterns are kept.
    #[inline]
    pub fn reset(&mut self) {
        self.cursor.reset();
    }
}

fn render_even_planes(layout: &BitPlaneLayout) -> Vec<GrayImage> {
    let (w, h) = (layout.projector_width, layout.projector_height);
    let render = |index: usize| {
        if index % 2 == 1 {
            // placeholder, overwritten by the inversion pass
            return GrayImage::filled(w, h, BLACK);
        }
        match layout.plane_kind(index) {
            Some(PlaneKind::Gray { axis, bit, .. }) => render_gray_plane(layout, axis, bit),
            _ => GrayImage::filled(w, h, WHITE),
        }
    };

    #[cfg(feature = "rayon")]
    {
        (0..layout.total_patterns)
            .into_par_iter()
            .map(render)
            .collect()
    }
    #[cfg(not(feature = "rayon"))]
    {
        (0..layout.total_patterns).map(render).collect()
    }
}

fn invert_into_odd_planes(images: &mut [GrayImage]) {
    let invert = |pair: &mut [GrayImage]| {
        let (src, dst) = pair.split_at_mut(1);
        dst[0].data.clear();
        dst[0].data.extend(src[0].data.iter().map(|&v| WHITE - v));
    };

    #[cfg(feature = "rayon")]
    images.par_chunks_exact_mut(2).for_each(invert);
    #[cfg(not(feature = "rayon"))]
    images.chunks_exact_mut(2).for_each(invert);
}

fn render_gray_plane(layout: &BitPlaneLayout, axis: Axis, bit: u32) -> GrayImage {
    let (w, h) = (layout.projector_width, layout.projector_height);
    let bits = layout.bits(axis);
    let phase = layout.phase(axis);
    let level = |coord: usize| {
        if gray_bit(coord as u32 + phase, bits, bit) {
            WHITE
        } else {
            BLACK
        }
    };

    let mut img = GrayImage::filled(w, h, BLACK);
    match axis {
        Axis::Column => {
            let row: Vec<u8> = (0..w).map(level).collect();
            for dst in img.data.chunks_exact_mut(w) {
                dst.copy_from_slice(&row);
            }
        }
        Axis::Row => {
            for (y, dst) in img.data.chunks_exact_mut(w).enumerate() {
                dst.fill(level(y));
            }
        }
    }
    img
}
