//! Bitmap run operations
//!
//! Fixed-capacity bit-vector primitive used for handle/slot bookkeeping.
//! The word buffer is caller-owned and only borrowed for the lifetime of
//! the view; out-of-range runs are benign no-ops / false results by
//! contract, never errors.

/// Bits per allocation word.
pub const WORD_BITS: u32 = u32::BITS;

/// Bounds-checked view over a caller-owned word buffer.
///
/// Bit `b` lives in word `b / 32` at position `b % 32`, LSB-first.
#[derive(Debug)]
pub struct Bitmap<'a> {
    bit_count: u32,
    words: &'a mut [u32],
}

impl<'a> Bitmap<'a> {
    /// Create a view of `bit_count` bits over `words`.
    ///
    /// The capacity is clamped to the buffer's bit size, so no operation
    /// on the view can touch memory outside `words`.
    pub fn new(words: &'a mut [u32], bit_count: u32) -> Self {
        let buffer_bits = (words.len() as u64 * WORD_BITS as u64).min(u32::MAX as u64) as u32;
        Self {
            bit_count: bit_count.min(buffer_bits),
            words,
        }
    }

    /// Capacity in bits.
    pub fn len(&self) -> u32 {
        self.bit_count
    }

    /// True when the view holds no bits.
    pub fn is_empty(&self) -> bool {
        self.bit_count == 0
    }

    /// Set bits `[start, start + count)`.
    ///
    /// Silently ignored when `count` is zero or the run does not fit the
    /// capacity.
    pub fn set_bits(&mut self, start: u32, count: u32) {
        let Some(end) = self.run_end(start, count) else {
            return;
        };
        let mut bit = start;
        while bit < end {
            let (word, mask, span) = word_mask(bit, end);
            self.words[word] |= mask;
            bit += span;
        }
    }

    /// True when every bit in `[start, start + count)` is set.
    ///
    /// Guard failures (zero count, run out of range) report `false`.
    pub fn are_bits_set(&self, start: u32, count: u32) -> bool {
        let Some(end) = self.run_end(start, count) else {
            return false;
        };
        let mut bit = start;
        while bit < end {
            let (word, mask, span) = word_mask(bit, end);
            if self.words[word] & mask != mask {
                return false;
            }
            bit += span;
        }
        true
    }

    /// True when every bit in `[start, start + count)` is clear.
    ///
    /// Guard failures report `false`, same as [`Bitmap::are_bits_set`].
    pub fn are_bits_clear(&self, start: u32, count: u32) -> bool {
        let Some(end) = self.run_end(start, count) else {
            return false;
        };
        let mut bit = start;
        while bit < end {
            let (word, mask, span) = word_mask(bit, end);
            if self.words[word] & mask != 0 {
                return false;
            }
            bit += span;
        }
        true
    }

    /// Exclusive end of a run, or `None` when the run fails the guards.
    fn run_end(&self, start: u32, count: u32) -> Option<u32> {
        if count == 0 || start >= self.bit_count || count > self.bit_count - start {
            return None;
        }
        Some(start + count)
    }
}

/// Word index, mask covering the run's bits inside that word, and the
/// number of bits the mask spans.
fn word_mask(bit: u32, end: u32) -> (usize, u32, u32) {
    let offset = bit % WORD_BITS;
    let span = (WORD_BITS - offset).min(end - bit);
    let mask = if span == WORD_BITS {
        u32::MAX
    } else {
        ((1u32 << span) - 1) << offset
    };
    ((bit / WORD_BITS) as usize, mask, span)
}
