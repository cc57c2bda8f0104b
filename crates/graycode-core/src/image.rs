//! Lightweight 8-bit grayscale buffers.
//!
//! Patterns and captures cross the crate boundary as plain row-major luma
//! bytes. `GrayImage` owns its pixels, `GrayImageView` borrows them.

use crate::error::ImageError;

#[derive(Clone, Copy, Debug)]
pub struct GrayImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major, len = w*h
}

impl<'a> GrayImageView<'a> {
    /// Wrap a raw buffer, checking that it holds exactly `width * height` bytes.
    pub fn new(width: usize, height: usize, data: &'a [u8]) -> Result<Self, ImageError> {
        let expected = checked_area(width, height)?;
        if data.len() != expected {
            return Err(ImageError::BufferLength {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Pixel at `(x, y)`, or `None` outside the image.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    /// One row of pixels.
    #[inline]
    pub fn row(&self, y: usize) -> &'a [u8] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl GrayImage {
    /// Allocate a `width × height` image filled with `value`.
    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Take ownership of a raw row-major buffer.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self, ImageError> {
        GrayImageView::new(width, height, &data)?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn view(&self) -> GrayImageView<'_> {
        GrayImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        self.view().get(x, y)
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.data.len()
    }
}

fn checked_area(width: usize, height: usize) -> Result<usize, ImageError> {
    if width == 0 || height == 0 {
        return Err(ImageError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(ImageError::InvalidDimensions { width, height })
}
