//! Fixed-size bit set over a window of old-sequence positions.
//!
//! Positions are addressed absolutely and stored relative to `base`, so the
//! set only costs one bit per position of the window it was built for.
//! Windows up to 256 positions stay on the stack.

use smallvec::SmallVec;

const WORD_BITS: usize = u64::BITS as usize;

/// Old positions already consumed by a move (or by the pivot).
#[derive(Debug, Clone)]
pub(crate) struct MovedSet {
    base: usize,
    len: usize,
    words: SmallVec<[u64; 4]>,
}

impl MovedSet {
    /// Empty set covering positions `base..base + len`.
    pub(crate) fn new(base: usize, len: usize) -> Self {
        Self {
            base,
            len,
            words: SmallVec::from_elem(0, len.div_ceil(WORD_BITS)),
        }
    }

    #[inline]
    fn slot(&self, pos: usize) -> (usize, u64) {
        debug_assert!(
            pos >= self.base && pos - self.base < self.len,
            "position {pos} outside moved-set window {}..{}",
            self.base,
            self.base + self.len
        );
        let offset = pos - self.base;
        (offset / WORD_BITS, 1 << (offset % WORD_BITS))
    }

    /// Mark `pos` as consumed.
    #[inline]
    pub(crate) fn insert(&mut self, pos: usize) {
        let (word, mask) = self.slot(pos);
        self.words[word] |= mask;
    }

    /// Check whether `pos` was consumed.
    #[inline]
    pub(crate) fn contains(&self, pos: usize) -> bool {
        let (word, mask) = self.slot(pos);
        self.words[word] & mask != 0
    }

    /// Number of consumed positions.
    pub(crate) fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }
}
