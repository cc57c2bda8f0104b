//! Core types for binary-reflected Gray-code structured light.
//!
//! This crate is intentionally small. It knows how a projector resolution
//! maps onto a sequence of bit planes and how Gray bits encode and decode,
//! but it does not render or decode images itself. See `graycode-pattern`
//! and `graycode-decode` for that.
//!
//! ```
//! use graycode_core::{gray_bit, gray_to_binary, BitPlaneLayout};
//!
//! let layout = BitPlaneLayout::new(640, 480).unwrap();
//! assert_eq!(layout.required_image_count(), 4 + 2 * (10 + 9));
//!
//! let bits: Vec<bool> = (0..10).map(|b| gray_bit(321, 10, b)).collect();
//! assert_eq!(gray_to_binary(bits, 10), 321);
//! ```

mod error;
mod gray;
mod image;
mod layout;
mod logger;

pub use error::{ConfigError, ImageError};
pub use gray::{gray_bit, gray_to_binary, GrayAccumulator};
pub use image::{GrayImage, GrayImageView};
pub use layout::{Axis, BitPlaneLayout, PlaneBlock, PlaneKind, MAX_BITS};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;

/// Pixel value of a lit pattern pixel.
pub const WHITE: u8 = 255;
/// Pixel value of a dark pattern pixel.
pub const BLACK: u8 = 0;
