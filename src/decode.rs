//! Decoding whole bitmaps into caller-provided position buffers.

use crate::error::DecodeError;
use crate::extract::{Extract, LowestBit, Strategy, TrailingZeros};
use crate::position::{check_span, Position};

/// The number of set bits across `words`.
///
/// This is exactly the buffer length that [`BitDecoder::decode`] requires.
#[inline]
pub fn cardinality(words: &[u64]) -> usize {
    words.iter().map(|word| word.count_ones() as usize).sum()
}

/// Decodes bitmaps with a fixed [`Strategy`].
///
/// The decoder holds no state besides its strategy, and may be shared freely
/// across threads. Each call writes only to the output buffer it is handed.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BitDecoder {
    strategy: Strategy,
}

impl BitDecoder {
    pub fn new(strategy: Strategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Writes the positions of the set bits of `words` to the front of `out`, in
    /// ascending order, and returns how many were written.
    ///
    /// Bit `b` of `words[k]` has position `64 * k + b`. The buffer is only written,
    /// never read, and positions past the returned count are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Capacity`] if `out` is shorter than
    /// [`cardinality(words)`](cardinality), and [`DecodeError::InvalidInput`] if
    /// `words` addresses positions that do not fit in `P`. Nothing about the
    /// contents of `out` is guaranteed after an error.
    pub fn decode<P: Position>(&self, words: &[u64], out: &mut [P]) -> Result<usize, DecodeError> {
        check_span::<P>(words.len())?;
        match self.strategy {
            Strategy::TrailingZeros => decode_checked::<TrailingZeros, P>(words, out),
            Strategy::LowestBit => decode_checked::<LowestBit, P>(words, out),
        }
    }

    /// As [`BitDecoder::decode`], without bounds checks on `out`.
    ///
    /// # Safety
    ///
    /// `out.len()` must be at least [`cardinality(words)`](cardinality), and
    /// `64 * words.len() - 1` must not exceed `P::MAX`. Debug builds assert both.
    pub unsafe fn decode_unchecked<P: Position>(&self, words: &[u64], out: &mut [P]) -> usize {
        debug_assert!(check_span::<P>(words.len()).is_ok());
        debug_assert!(cardinality(words) <= out.len());
        match self.strategy {
            Strategy::TrailingZeros => decode_unchecked::<TrailingZeros, P>(words, out),
            Strategy::LowestBit => decode_unchecked::<LowestBit, P>(words, out),
        }
    }

    /// Decodes `words` into a freshly allocated vector of exactly the right length.
    #[cfg(feature = "std")]
    pub fn decode_to_vec<P: Position>(&self, words: &[u64]) -> Result<Vec<P>, DecodeError> {
        let mut out = vec![P::zeroed(); cardinality(words)];
        let count = self.decode(words, &mut out)?;
        debug_assert_eq!(count, out.len());
        Ok(out)
    }
}

#[inline(always)]
fn decode_checked<E: Extract, P: Position>(words: &[u64], out: &mut [P]) -> Result<usize, DecodeError> {
    let capacity = out.len();
    let mut count = 0;
    for (k, &word) in words.iter().enumerate() {
        let base = (k as u64) << 6;
        let mut bitset = word;
        while bitset != 0 {
            let bit = E::pop_lowest(&mut bitset);
            match out.get_mut(count) {
                Some(slot) => *slot = P::from_position(base | bit as u64),
                None => return Err(DecodeError::Capacity { capacity, required: cardinality(words) }),
            }
            count += 1;
        }
    }
    Ok(count)
}

#[inline(always)]
unsafe fn decode_unchecked<E: Extract, P: Position>(words: &[u64], out: &mut [P]) -> usize {
    let mut count = 0;
    for (k, &word) in words.iter().enumerate() {
        let base = (k as u64) << 6;
        let mut bitset = word;
        while bitset != 0 {
            let bit = E::pop_lowest(&mut bitset);
            *out.get_unchecked_mut(count) = P::from_position(base | bit as u64);
            count += 1;
        }
    }
    count
}
