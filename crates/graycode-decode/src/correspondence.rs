//! Per-camera-pixel projector coordinates.

use graycode_core::{Axis, GrayImage};
use serde::{Deserialize, Serialize};

/// Projector `(column, row)` observed by one camera pixel.
///
/// Codes are signed: with [`RangeGuard::Legacy`](crate::RangeGuard::Legacy)
/// an out-of-range column is stored as computed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Correspondence {
    pub column: i32,
    pub row: i32,
}

impl Correspondence {
    #[inline]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    #[inline]
    pub fn get(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Column => self.column,
            Axis::Row => self.row,
        }
    }
}

/// `width × height` grid of correspondences, row-major, plus a mask of
/// pixels whose decode was fully trusted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorrespondenceMap {
    width: usize,
    height: usize,
    values: Vec<Correspondence>,
    decoded: Vec<bool>,
}

impl CorrespondenceMap {
    /// All-`(0, 0)` map with nothing decoded.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            values: vec![Correspondence::default(); width * height],
            decoded: vec![false; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Correspondence at camera pixel `(x, y)`, `None` outside the frame.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<Correspondence> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.values.get(y * self.width + x).copied()
    }

    /// True if every bit at `(x, y)` was decidable and both axes were in range.
    #[inline]
    pub fn is_decoded(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.decoded[y * self.width + x]
    }

    pub fn decoded_count(&self) -> usize {
        self.decoded.iter().filter(|&&d| d).count()
    }

    #[inline]
    pub fn values(&self) -> &[Correspondence] {
        &self.values
    }

    /// `(x, y, correspondence)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Correspondence)> + '_ {
        let w = self.width;
        self.values
            .iter()
            .enumerate()
            .map(move |(i, c)| (i % w, i / w, *c))
    }

    /// Back to all `(0, 0)`, nothing decoded.
    pub fn reset(&mut self) {
        self.values.fill(Correspondence::default());
        self.decoded.fill(false);
    }

    /// Render one axis as an 8-bit image for inspection.
    ///
    /// Values are clamped to the camera extent along `axis` and stretched to
    /// `0..=255`. A new image is allocated on every call.
    pub fn visualize(&self, axis: Axis) -> GrayImage {
        let range = match axis {
            Axis::Column => self.width,
            Axis::Row => self.height,
        };
        let top = range.saturating_sub(1).max(1) as i64;
        let data = self
            .values
            .iter()
            .map(|c| {
                let v = (c.get(axis) as i64).clamp(0, top);
                (v * 255 / top) as u8
            })
            .collect();
        GrayImage {
            width: self.width,
            height: self.height,
            data,
        }
    }

    #[cfg_attr(feature = "rayon", allow(dead_code))]
    pub(crate) fn rows_mut(
        &mut self,
    ) -> (
        std::slice::ChunksExactMut<'_, Correspondence>,
        std::slice::ChunksExactMut<'_, bool>,
    ) {
        (
            self.values.chunks_exact_mut(self.width),
            self.decoded.chunks_exact_mut(self.width),
        )
    }

    #[cfg(feature = "rayon")]
    pub(crate) fn par_rows_mut(
        &mut self,
    ) -> (
        rayon::slice::ChunksExactMut<'_, Correspondence>,
        rayon::slice::ChunksExactMut<'_, bool>,
    ) {
        use rayon::prelude::*;
        (
            self.values.par_chunks_exact_mut(self.width),
            self.decoded.par_chunks_exact_mut(self.width),
        )
    }
}
