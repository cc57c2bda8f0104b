//! Decoding of captured Gray-code structured-light sequences.
//!
//! A [`Decoder`] reads one capture per pattern, in sequence order, and
//! recovers for every camera pixel the projector column and row it observed.
//! Each bit is decided by comparing a Gray plane with its invert, and the
//! Gray bits are turned back into binary with a running XOR.
//!
//! ## Quickstart
//!
//! ```
//! use graycode_core::BitPlaneLayout;
//! use graycode_decode::{Correspondence, Decoder};
//! use graycode_pattern::PatternSet;
//!
//! let layout = BitPlaneLayout::new(40, 30).unwrap();
//! let patterns = PatternSet::generate(&layout);
//! let captures: Vec<_> = patterns.iter().map(|img| img.view()).collect();
//!
//! let mut decoder = Decoder::new(layout, 40, 30).unwrap();
//! decoder.decode(&captures, 64).unwrap();
//! assert_eq!(decoder.correspondence_at(17, 9), Some(Correspondence::new(17, 9)));
//! ```
//!
//! ## Out-of-range codes
//!
//! Codes outside the camera frame are not errors. By default
//! ([`RangeGuard::PerAxis`]) the offending axis is set to 0;
//! [`RangeGuard::Legacy`] reproduces older maps where any overflow zeroes
//! the row. [`CorrespondenceMap::is_decoded`] tells both cases apart from a
//! genuine `(0, 0)`.

mod correspondence;
mod decoder;
mod error;
mod params;

pub use correspondence::{Correspondence, CorrespondenceMap};
pub use decoder::Decoder;
pub use error::DecodeError;
pub use params::{BitDecision, DecodeParams, RangeGuard, DEFAULT_THRESHOLD};
