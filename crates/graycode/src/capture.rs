//! Loading camera captures with the `image` crate.

use std::path::{Path, PathBuf};

use ::image::ImageReader;

use crate::core::{GrayImage, GrayImageView};
use crate::pattern::frame_file_name;
use crate::ScanError;

/// Borrow an `image::GrayImage` as the lightweight core view type.
pub fn gray_view(img: &::image::GrayImage) -> GrayImageView<'_> {
    GrayImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Read any supported image file and convert it to 8-bit luma.
pub fn load_capture(path: impl AsRef<Path>) -> Result<GrayImage, ScanError> {
    let luma = ImageReader::open(path.as_ref())?.decode()?.to_luma8();
    let (width, height) = (luma.width() as usize, luma.height() as usize);
    Ok(GrayImage {
        width,
        height,
        data: luma.into_raw(),
    })
}

/// Path of capture `index` inside `dir`.
pub fn capture_path(dir: impl AsRef<Path>, prefix: &str, index: usize) -> PathBuf {
    dir.as_ref().join(frame_file_name(prefix, index))
}

/// Load `{prefix}_000.png ..` up to `count` frames, in sequence order.
pub fn load_capture_sequence(
    dir: impl AsRef<Path>,
    prefix: &str,
    count: usize,
) -> Result<Vec<GrayImage>, ScanError> {
    let dir = dir.as_ref();
    let mut captures = Vec::with_capacity(count);
    for index in 0..count {
        let path = capture_path(dir, prefix, index);
        if !path.is_file() {
            return Err(ScanError::CaptureNotFound { index, path });
        }
        captures.push(load_capture(&path)?);
    }
    log::debug!("loaded {} captures from {}", captures.len(), dir.display());
    Ok(captures)
}
