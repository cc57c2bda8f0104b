/// Restartable playback position over a sequence of `len` patterns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SequenceCursor {
    stage: usize,
    len: usize,
}

impl SequenceCursor {
    pub fn new(len: usize) -> Self {
        Self { stage: 0, len }
    }

    #[inline]
    pub fn stage(&self) -> usize {
        self.stage
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Move to the next stage.
    ///
    /// Returns `false` when the cycle wraps: the stage is back at 0 and every
    /// pattern has been shown once.
    pub fn advance(&mut self) -> bool {
        self.stage += 1;
        if self.stage >= self.len {
            self.stage = 0;
            return false;
        }
        true
    }

    #[inline]
    pub fn reset(&mut self) {
        self.stage = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_after_len_steps() {
        let n = 16;
        let mut cursor = SequenceCursor::new(n);
        for i in 1..n {
            assert!(cursor.advance(), "step {i}");
            assert_eq!(cursor.stage(), i);
        }
        assert!(!cursor.advance());
        assert_eq!(cursor.stage(), 0);
        assert!(cursor.advance());
    }

    #[test]
    fn reset_rewinds() {
        let mut cursor = SequenceCursor::new(8);
        cursor.advance();
        cursor.advance();
        cursor.reset();
        assert_eq!(cursor.stage(), 0);
    }
}
