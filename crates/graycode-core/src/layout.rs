//! Bit-plane layout derived from the projector resolution.
//!
//! Sequence order:
//! - `0`, `1`: column reference (all white) and its invert,
//! - `2 + 2b`, `3 + 2b`: column Gray plane `b` and its invert,
//! - `2 + 2*column_bits`, `+1`: row reference and its invert,
//! - `4 + 2*column_bits + 2b`, `+1`: row Gray plane `b` and its invert.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Largest supported Gray code width; decoded codes are stored as `i32`.
pub const MAX_BITS: u32 = 31;

/// Projector axis encoded by a block of bit planes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Column,
    Row,
}

/// Immutable bit-plane constants for one projector resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitPlaneLayout {
    pub projector_width: usize,
    pub projector_height: usize,
    pub column_bits: u32,
    pub row_bits: u32,
    pub column_phase: u32,
    pub row_phase: u32,
    pub total_patterns: usize,
}

impl BitPlaneLayout {
    /// Plan the pattern sequence for a `projector_width × projector_height` display.
    pub fn new(projector_width: usize, projector_height: usize) -> Result<Self, ConfigError> {
        if projector_width < 2 || projector_height < 2 {
            return Err(ConfigError::InvalidProjectorSize {
                width: projector_width,
                height: projector_height,
            });
        }
        let column_bits = bits_for(projector_width)?;
        let row_bits = bits_for(projector_height)?;
        let column_phase = phase_for(projector_width, column_bits);
        let row_phase = phase_for(projector_height, row_bits);
        let total_patterns = 4 + 2 * (column_bits + row_bits) as usize;

        log::debug!(
            "planned {total_patterns} patterns for {projector_width}x{projector_height} \
             (column bits={column_bits} phase={column_phase}, row bits={row_bits} phase={row_phase})"
        );

        Ok(Self {
            projector_width,
            projector_height,
            column_bits,
            row_bits,
            column_phase,
            row_phase,
            total_patterns,
        })
    }

    /// Number of images a full capture pass must contain.
    #[inline]
    pub fn required_image_count(&self) -> usize {
        self.total_patterns
    }

    #[inline]
    pub fn bits(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Column => self.column_bits,
            Axis::Row => self.row_bits,
        }
    }

    #[inline]
    pub fn phase(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Column => self.column_phase,
            Axis::Row => self.row_phase,
        }
    }

    /// Projector extent along `axis`.
    #[inline]
    pub fn extent(&self, axis: Axis) -> usize {
        match axis {
            Axis::Column => self.projector_width,
            Axis::Row => self.projector_height,
        }
    }

    /// Index of the all-white reference frame that opens the block for `axis`.
    #[inline]
    pub fn reference_index(&self, axis: Axis) -> usize {
        match axis {
            Axis::Column => 0,
            Axis::Row => 2 + 2 * self.column_bits as usize,
        }
    }

    #[inline]
    pub fn column_planes(&self) -> PlaneBlock {
        self.planes(Axis::Column)
    }

    #[inline]
    pub fn row_planes(&self) -> PlaneBlock {
        self.planes(Axis::Row)
    }

    /// Describe the frame at sequence `index`, or `None` past the end.
    pub fn plane_kind(&self, index: usize) -> Option<PlaneKind> {
        if index >= self.total_patterns {
            return None;
        }
        let inverted = index % 2 == 1;
        let even = index - index % 2;
        let row_ref = self.reference_index(Axis::Row);
        let (axis, offset) = if even < row_ref {
            (Axis::Column, even)
        } else {
            (Axis::Row, even - row_ref)
        };
        if offset == 0 {
            return Some(PlaneKind::Reference { axis, inverted });
        }
        Some(PlaneKind::Gray {
            axis,
            bit: ((offset - 2) / 2) as u32,
            inverted,
        })
    }

    pub fn planes(&self, axis: Axis) -> PlaneBlock {
        PlaneBlock {
            axis,
            start: self.reference_index(axis) + 2,
            bits: self.bits(axis),
            phase: self.phase(axis),
        }
    }
}

/// What a given sequence index shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlaneKind {
    /// Uniform frame opening the block for `axis`; white unless `inverted`.
    Reference { axis: Axis, inverted: bool },
    /// Gray-code bit `bit` (0 = MSB) of the projector coordinate along `axis`.
    Gray { axis: Axis, bit: u32, inverted: bool },
}

impl PlaneKind {
    #[inline]
    pub fn is_inverted(&self) -> bool {
        match *self {
            PlaneKind::Reference { inverted, .. } | PlaneKind::Gray { inverted, .. } => inverted,
        }
    }
}

/// The Gray-code planes of one axis inside the full sequence.
///
/// Plane `b` lives at `start + 2b`, its invert at `start + 2b + 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaneBlock {
    pub axis: Axis,
    pub start: usize,
    pub bits: u32,
    pub phase: u32,
}

impl PlaneBlock {
    /// Sequence index of Gray plane `b` (not its invert).
    #[inline]
    pub fn plane_index(&self, b: u32) -> Option<usize> {
        (b < self.bits).then(|| self.start + 2 * b as usize)
    }

    /// `(plane, invert)` pair for bit `b`, or `None` if `b` or the slice is out of range.
    #[inline]
    pub fn pair<'s, T>(&self, images: &'s [T], b: u32) -> Option<(&'s T, &'s T)> {
        let i = self.plane_index(b)?;
        Some((images.get(i)?, images.get(i + 1)?))
    }

    /// Sequence index range covered by this block, inverts included.
    #[inline]
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.start + 2 * self.bits as usize
    }
}

fn bits_for(dimension: usize) -> Result<u32, ConfigError> {
    let bits = usize::BITS - (dimension - 1).leading_zeros();
    if bits > MAX_BITS {
        return Err(ConfigError::DimensionTooLarge {
            dimension,
            max_bits: MAX_BITS,
        });
    }
    Ok(bits)
}

fn phase_for(dimension: usize, bits: u32) -> u32 {
    (((1usize << bits) - dimension) / 2) as u32
}
