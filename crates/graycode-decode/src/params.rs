use serde::{Deserialize, Serialize};

/// Threshold used when a caller has no better value.
pub const DEFAULT_THRESHOLD: u8 = 64;

/// How one Gray bit is decided from a plane and its invert.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BitDecision {
    /// Bit is set when `plane >= invert`. The threshold is not consulted.
    #[default]
    Compare,
    /// As `Compare`, but `|plane - invert|` must also reach the threshold;
    /// otherwise the pixel is left undecoded.
    Strict,
}

/// What happens to a decoded code that lands outside the camera frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeGuard {
    /// Zero the offending axis only.
    #[default]
    PerAxis,
    /// Column overflow zeroes the row and keeps the raw column; row overflow
    /// zeroes the row. Matches maps produced by older decoders.
    Legacy,
}

/// Decoder configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeParams {
    /// Minimum `|plane - invert|` contrast; only used by [`BitDecision::Strict`].
    pub threshold: u8,
    pub bit_decision: BitDecision,
    pub range_guard: RangeGuard,
}

impl Default for DecodeParams {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            bit_decision: BitDecision::Compare,
            range_guard: RangeGuard::PerAxis,
        }
    }
}

impl DecodeParams {
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn strict(threshold: u8) -> Self {
        Self {
            threshold,
            bit_decision: BitDecision::Strict,
            ..Self::default()
        }
    }

    /// Decide one Gray bit; `None` if the pair lacks contrast in strict mode.
    #[inline]
    pub fn decide(&self, plane: u8, invert: u8) -> Option<bool> {
        match self.bit_decision {
            BitDecision::Compare => Some(plane >= invert),
            BitDecision::Strict => {
                (plane.abs_diff(invert) >= self.threshold).then_some(plane >= invert)
            }
        }
    }
}
