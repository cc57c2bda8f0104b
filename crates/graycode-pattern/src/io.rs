//! PNG export of pattern frames.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use graycode_core::GrayImage;

use crate::PatternSet;

#[derive(thiserror::Error, Debug)]
pub enum PatternIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Png(#[from] png::EncodingError),
}

/// File name used for frame `index` of a sequence.
pub fn frame_file_name(prefix: &str, index: usize) -> String {
    format!("{prefix}_{index:03}.png")
}

/// Write one image as an 8-bit grayscale PNG.
pub fn write_png(path: impl AsRef<Path>, img: &GrayImage) -> Result<(), PatternIoError> {
    let file = File::create(path.as_ref())?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), img.width as u32, img.height as u32);
    encoder.set_color(png::ColorType::Grayscale);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&img.data)?;
    writer.finish()?;
    Ok(())
}

impl PatternSet {
    /// Write every frame to `dir` as `{prefix}_{index:03}.png`, creating `dir` if needed.
    pub fn write_png_sequence(
        &self,
        dir: impl AsRef<Path>,
        prefix: &str,
    ) -> Result<Vec<PathBuf>, PatternIoError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let mut written = Vec::with_capacity(self.len());
        for (index, img) in self.iter().enumerate() {
            let path = dir.join(frame_file_name(prefix, index));
            write_png(&path, img)?;
            written.push(path);
        }
        log::info!("wrote {} patterns to {}", written.len(), dir.display());
        Ok(written)
    }
}
