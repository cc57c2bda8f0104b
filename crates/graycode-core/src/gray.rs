//! Reflected binary Gray code helpers.
//!
//! Bit index `b = 0` is always the most significant bit of an `N`-bit code.

/// Gray-code bit `b` of `value` encoded on `bits` bits.
///
/// The leading Gray bit equals the natural-binary MSB; every following bit is
/// the XOR of two adjacent natural-binary bits.
#[inline]
pub fn gray_bit(value: u32, bits: u32, b: u32) -> bool {
    debug_assert!(b < bits);
    if b == 0 {
        return (value >> (bits - 1)) & 1 == 1;
    }
    let lo = (value >> (bits - b - 1)) & 1;
    let hi = (value >> (bits - b)) & 1;
    lo ^ hi == 1
}

/// Running-XOR Gray-to-binary decoder fed one bit at a time, MSB first.
#[derive(Clone, Copy, Debug)]
pub struct GrayAccumulator {
    bits: u32,
    next: u32,
    running: bool,
    code: u32,
}

impl GrayAccumulator {
    pub fn new(bits: u32) -> Self {
        Self {
            bits,
            next: 0,
            running: false,
            code: 0,
        }
    }

    /// Feed the next decided Gray bit. Extra bits past `bits` are ignored.
    #[inline]
    pub fn push(&mut self, gray: bool) {
        if self.next >= self.bits {
            return;
        }
        self.running = if self.next == 0 {
            gray
        } else {
            self.running ^ gray
        };
        if self.running {
            self.code |= 1 << (self.bits - self.next - 1);
        }
        self.next += 1;
    }

    /// Natural-binary value decoded so far.
    #[inline]
    pub fn value(&self) -> u32 {
        self.code
    }

    /// True once all `bits` planes have been consumed.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.next == self.bits
    }
}

/// Decode a full MSB-first Gray bit sequence back to its integer.
pub fn gray_to_binary<I>(gray_bits: I, bits: u32) -> u32
where
    I: IntoIterator<Item = bool>,
{
    let mut acc = GrayAccumulator::new(bits);
    for bit in gray_bits {
        acc.push(bit);
    }
    acc.value()
}
