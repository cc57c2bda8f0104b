//! Gray-code sequence decoding.

use graycode_core::{
    Axis, BitPlaneLayout, ConfigError, GrayAccumulator, GrayImage, GrayImageView, PlaneBlock,
};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{Correspondence, CorrespondenceMap, DecodeError, DecodeParams, RangeGuard};

/// Turns a captured pattern sequence into a [`CorrespondenceMap`].
///
/// The decoder owns its map; results stay readable until the next
/// [`decode`](Self::decode) or [`reset`](Self::reset).
#[derive(Clone, Debug)]
pub struct Decoder {
    layout: BitPlaneLayout,
    map: CorrespondenceMap,
}

/// Plane/invert rows for one bit of one axis.
type PlanePair<'a> = (GrayImageView<'a>, GrayImageView<'a>);

struct AxisPlanes<'a> {
    phase: u32,
    bits: u32,
    pairs: Vec<PlanePair<'a>>,
}

impl<'a> AxisPlanes<'a> {
    fn collect(block: PlaneBlock, captures: &[GrayImageView<'a>]) -> Self {
        let pairs = (0..block.bits)
            .filter_map(|b| block.pair(captures, b))
            .map(|(plane, invert)| (*plane, *invert))
            .collect();
        Self {
            phase: block.phase,
            bits: block.bits,
            pairs,
        }
    }

    /// Phase-corrected code at pixel offset `i`, `None` if a bit was undecidable.
    #[inline]
    fn decode_at(&self, i: usize, params: &DecodeParams) -> Option<i64> {
        let mut acc = GrayAccumulator::new(self.bits);
        for (plane, invert) in &self.pairs {
            acc.push(params.decide(plane.data[i], invert.data[i])?);
        }
        Some(acc.value() as i64 - self.phase as i64)
    }
}

impl Decoder {
    /// Decoder for patterns planned by `layout`, observed by a
    /// `camera_width × camera_height` camera.
    pub fn new(
        layout: BitPlaneLayout,
        camera_width: usize,
        camera_height: usize,
    ) -> Result<Self, ConfigError> {
        if camera_width == 0 || camera_height == 0 {
            return Err(ConfigError::InvalidCameraSize {
                width: camera_width,
                height: camera_height,
            });
        }
        Ok(Self {
            layout,
            map: CorrespondenceMap::new(camera_width, camera_height),
        })
    }

    #[inline]
    pub fn layout(&self) -> &BitPlaneLayout {
        &self.layout
    }

    #[inline]
    pub fn camera_size(&self) -> (usize, usize) {
        (self.map.width(), self.map.height())
    }

    #[inline]
    pub fn required_image_count(&self) -> usize {
        self.layout.total_patterns
    }

    /// Decode with default parameters and the given threshold.
    ///
    /// With the default [`BitDecision::Compare`](crate::BitDecision::Compare)
    /// the threshold does not influence the result.
    pub fn decode(
        &mut self,
        captures: &[GrayImageView<'_>],
        threshold: u8,
    ) -> Result<(), DecodeError> {
        self.decode_with(captures, &DecodeParams::default().with_threshold(threshold))
    }

    /// Decode `captures`, given in pattern sequence order.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "info",
            skip(self, captures, params),
            fields(images = captures.len(), width = self.map.width(), height = self.map.height())
        )
    )]
    pub fn decode_with(
        &mut self,
        captures: &[GrayImageView<'_>],
        params: &DecodeParams,
    ) -> Result<(), DecodeError> {
        self.validate(captures)?;

        let columns = AxisPlanes::collect(self.layout.column_planes(), captures);
        let rows = AxisPlanes::collect(self.layout.row_planes(), captures);
        let (width, height) = self.camera_size();
        let bounds = (width as i64, height as i64);

        let decode_row = |(y, (out, mask)): (usize, (&mut [Correspondence], &mut [bool]))| {
            for (x, (c, ok)) in out.iter_mut().zip(mask.iter_mut()).enumerate() {
                (*c, *ok) = decode_pixel(&columns, &rows, y * width + x, params, bounds);
            }
        };

        #[cfg(feature = "rayon")]
        {
            let (values, decoded) = self.map.par_rows_mut();
            values.zip(decoded).enumerate().for_each(decode_row);
        }
        #[cfg(not(feature = "rayon"))]
        {
            let (values, decoded) = self.map.rows_mut();
            values.zip(decoded).enumerate().for_each(decode_row);
        }

        let decoded = self.map.decoded_count();
        if decoded == 0 {
            log::warn!("no camera pixel decoded to a valid projector coordinate");
        } else {
            log::debug!("decoded {decoded}/{} camera pixels", width * height);
        }
        Ok(())
    }

    /// Correspondence at camera pixel `(x, y)`, `None` outside the camera frame.
    #[inline]
    pub fn correspondence_at(&self, x: usize, y: usize) -> Option<Correspondence> {
        self.map.get(x, y)
    }

    #[inline]
    pub fn map(&self) -> &CorrespondenceMap {
        &self.map
    }

    /// Normalized debug rendering of one decoded axis.
    pub fn visualize(&self, axis: Axis) -> GrayImage {
        self.map.visualize(axis)
    }

    /// Clear the map back to `(0, 0)`.
    pub fn reset(&mut self) {
        self.map.reset();
    }

    fn validate(&self, captures: &[GrayImageView<'_>]) -> Result<(), DecodeError> {
        let expected = self.layout.total_patterns;
        if captures.len() != expected {
            return Err(DecodeError::ImageCount {
                expected,
                got: captures.len(),
            });
        }
        let (width, height) = self.camera_size();
        for (index, img) in captures.iter().enumerate() {
            if img.data.is_empty() {
                return Err(DecodeError::MissingImage { index });
            }
            if img.width != width || img.height != height || img.data.len() != width * height {
                return Err(DecodeError::ImageSize {
                    index,
                    expected_width: width,
                    expected_height: height,
                    width: img.width,
                    height: img.height,
                    len: img.data.len(),
                });
            }
        }
        Ok(())
    }
}

fn decode_pixel(
    columns: &AxisPlanes<'_>,
    rows: &AxisPlanes<'_>,
    i: usize,
    params: &DecodeParams,
    (width, height): (i64, i64),
) -> (Correspondence, bool) {
    let (Some(mut column), Some(mut row)) =
        (columns.decode_at(i, params), rows.decode_at(i, params))
    else {
        return (Correspondence::default(), false);
    };

    let column_ok = (0..width).contains(&column);
    let row_ok = (0..height).contains(&row);
    match params.range_guard {
        RangeGuard::PerAxis => {
            if !column_ok {
                column = 0;
            }
            if !row_ok {
                row = 0;
            }
        }
        RangeGuard::Legacy => {
            if !column_ok || !row_ok {
                row = 0;
            }
        }
    }

    (
        Correspondence::new(column as i32, row as i32),
        column_ok && row_ok,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BitDecision;

    /// Hand-built captures where every pixel sees projector `(column, row)`.
    fn uniform_captures(
        layout: &BitPlaneLayout,
        w: usize,
        h: usize,
        column: u32,
        row: u32,
    ) -> Vec<GrayImage> {
        (0..layout.total_patterns)
            .map(|i| {
                let v = match layout.plane_kind(i) {
                    Some(graycode_core::PlaneKind::Gray { axis, bit, inverted }) => {
                        let coord = match axis {
                            Axis::Column => column,
                            Axis::Row => row,
                        };
                        let set = graycode_core::gray_bit(coord, layout.bits(axis), bit);
                        if set != inverted {
                            200
                        } else {
                            40
                        }
                    }
                    Some(graycode_core::PlaneKind::Reference { inverted, .. }) => {
                        if inverted {
                            40
                        } else {
                            200
                        }
                    }
                    None => 0,
                };
                GrayImage::filled(w, h, v)
            })
            .collect()
    }

    fn views(images: &[GrayImage]) -> Vec<GrayImageView<'_>> {
        images.iter().map(GrayImage::view).collect()
    }

    #[test]
    fn rejects_zero_camera() {
        let layout = BitPlaneLayout::new(8, 8).expect("layout");
        assert!(matches!(
            Decoder::new(layout, 0, 4),
            Err(ConfigError::InvalidCameraSize { .. })
        ));
    }

    #[test]
    fn wrong_image_count_is_rejected() {
        let layout = BitPlaneLayout::new(8, 8).expect("layout");
        let mut decoder = Decoder::new(layout, 2, 2).expect("decoder");
        let images = vec![GrayImage::filled(2, 2, 0); 15];
        assert_eq!(
            decoder.decode(&views(&images), 64),
            Err(DecodeError::ImageCount {
                expected: 16,
                got: 15
            })
        );
    }

    #[test]
    fn empty_buffer_counts_as_missing() {
        let layout = BitPlaneLayout::new(8, 8).expect("layout");
        let mut decoder = Decoder::new(layout, 2, 2).expect("decoder");
        let images = vec![GrayImage::filled(2, 2, 0); 16];
        let mut v = views(&images);
        v[3] = GrayImageView {
            width: 2,
            height: 2,
            data: &[],
        };
        assert_eq!(
            decoder.decode(&v, 64),
            Err(DecodeError::MissingImage { index: 3 })
        );
    }

    #[test]
    fn mismatched_resolution_is_rejected() {
        let layout = BitPlaneLayout::new(8, 8).expect("layout");
        let mut decoder = Decoder::new(layout, 2, 2).expect("decoder");
        let mut images = vec![GrayImage::filled(2, 2, 0); 16];
        images[5] = GrayImage::filled(3, 2, 0);
        assert!(matches!(
            decoder.decode(&views(&images), 64),
            Err(DecodeError::ImageSize { index: 5, .. })
        ));
    }

    #[test]
    fn decodes_uniform_scene() {
        let layout = BitPlaneLayout::new(100, 60).expect("layout");
        let (column, row) = (37 + layout.column_phase, 21 + layout.row_phase);
        let images = uniform_captures(&layout, 40, 25, column, row);
        let mut decoder = Decoder::new(layout, 40, 25).expect("decoder");
        decoder.decode(&views(&images), 64).expect("decode");
        assert_eq!(
            decoder.correspondence_at(2, 1),
            Some(Correspondence::new(37, 21))
        );
        assert!(decoder.map().is_decoded(0, 0));
        assert_eq!(decoder.map().decoded_count(), 40 * 25);
        assert_eq!(decoder.correspondence_at(40, 0), None);
    }

    #[test]
    fn per_axis_guard_zeroes_only_the_bad_axis() {
        let layout = BitPlaneLayout::new(16, 16).expect("layout");
        // camera narrower than the decoded column
        let images = uniform_captures(&layout, 2, 2, 12, 1);
        let mut decoder = Decoder::new(layout, 2, 2).expect("decoder");
        decoder.decode(&views(&images), 64).expect("decode");
        assert_eq!(
            decoder.correspondence_at(0, 0),
            Some(Correspondence::new(0, 1))
        );
        assert!(!decoder.map().is_decoded(0, 0));
    }

    #[test]
    fn legacy_guard_zeroes_row_on_column_overflow() {
        let layout = BitPlaneLayout::new(16, 16).expect("layout");
        let images = uniform_captures(&layout, 2, 2, 12, 1);
        let mut decoder = Decoder::new(layout, 2, 2).expect("decoder");
        let params = DecodeParams {
            range_guard: RangeGuard::Legacy,
            ..DecodeParams::default()
        };
        decoder.decode_with(&views(&images), &params).expect("decode");
        assert_eq!(
            decoder.correspondence_at(1, 1),
            Some(Correspondence::new(12, 0))
        );
        assert!(!decoder.map().is_decoded(1, 1));
    }

    #[test]
    fn per_axis_guard_zeroes_only_the_row() {
        let layout = BitPlaneLayout::new(16, 16).expect("layout");
        // row 14 lies below a 2-pixel-high camera, column 1 is inside
        let images = uniform_captures(&layout, 2, 2, 1, 14);
        let mut decoder = Decoder::new(layout, 2, 2).expect("decoder");
        decoder.decode(&views(&images), 64).expect("decode");
        assert_eq!(
            decoder.correspondence_at(1, 0),
            Some(Correspondence::new(1, 0))
        );
        assert!(!decoder.map().is_decoded(1, 0));
        assert_eq!(decoder.map().decoded_count(), 0);
    }

    #[test]
    fn legacy_guard_zeroes_row_on_row_overflow() {
        let layout = BitPlaneLayout::new(16, 16).expect("layout");
        let images = uniform_captures(&layout, 2, 2, 1, 14);
        let mut decoder = Decoder::new(layout, 2, 2).expect("decoder");
        let params = DecodeParams {
            range_guard: RangeGuard::Legacy,
            ..DecodeParams::default()
        };
        decoder.decode_with(&views(&images), &params).expect("decode");
        assert_eq!(
            decoder.correspondence_at(0, 0),
            Some(Correspondence::new(1, 0))
        );
    }

    #[test]
    fn negative_codes_are_guarded() {
        // 6 columns: phase 1, so raw code 0 decodes to column -1.
        let layout = BitPlaneLayout::new(6, 6).expect("layout");
        let images = uniform_captures(&layout, 6, 6, 0, 3);
        let mut decoder = Decoder::new(layout, 6, 6).expect("decoder");
        decoder.decode(&views(&images), 64).expect("decode");
        assert_eq!(
            decoder.correspondence_at(0, 0),
            Some(Correspondence::new(0, 2))
        );
        assert!(!decoder.map().is_decoded(0, 0));
    }

    #[test]
    fn compare_mode_ignores_low_contrast() {
        let layout = BitPlaneLayout::new(8, 8).expect("layout");
        let mut images = uniform_captures(&layout, 8, 8, 5, 2);
        // squash contrast: 200/40 -> 121/119
        for img in &mut images {
            for v in &mut img.data {
                *v = if *v > 100 { 121 } else { 119 };
            }
        }
        let mut decoder = Decoder::new(layout, 8, 8).expect("decoder");
        decoder.decode(&views(&images), 64).expect("decode");
        assert_eq!(
            decoder.correspondence_at(0, 0),
            Some(Correspondence::new(5, 2))
        );

        let params = DecodeParams::strict(64);
        assert_eq!(params.bit_decision, BitDecision::Strict);
        decoder.decode_with(&views(&images), &params).expect("decode");
        assert_eq!(
            decoder.correspondence_at(0, 0),
            Some(Correspondence::new(0, 0))
        );
        assert!(!decoder.map().is_decoded(0, 0));

        decoder
            .decode_with(&views(&images), &DecodeParams::strict(2))
            .expect("decode");
        assert_eq!(
            decoder.correspondence_at(0, 0),
            Some(Correspondence::new(5, 2))
        );
        assert!(decoder.map().is_decoded(0, 0));
    }

    #[test]
    fn reset_clears_previous_decode() {
        let layout = BitPlaneLayout::new(8, 8).expect("layout");
        let images = uniform_captures(&layout, 8, 8, 6, 7);
        let mut decoder = Decoder::new(layout, 8, 8).expect("decoder");
        decoder.decode(&views(&images), 64).expect("decode");
        assert_eq!(
            decoder.correspondence_at(0, 0),
            Some(Correspondence::new(6, 7))
        );
        decoder.reset();
        assert_eq!(
            decoder.correspondence_at(0, 0),
            Some(Correspondence::new(0, 0))
        );
        assert_eq!(decoder.map().decoded_count(), 0);
    }
}
