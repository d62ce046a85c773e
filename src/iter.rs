//! Lazy enumeration of set-bit positions.

use core::iter::FusedIterator;
use core::marker::PhantomData;

use crate::decode::cardinality;
use crate::extract::{Extract, TrailingZeros};

/// An iterator over the positions of the set bits of a word slice, in ascending order.
///
/// Yields the same sequence that [`BitDecoder::decode`](crate::BitDecoder::decode)
/// writes, one position at a time and without a buffer.
#[derive(Clone, Debug)]
pub struct Positions<'a, E = TrailingZeros> {
    words: core::slice::Iter<'a, u64>,
    /// Bits of the current word not yet yielded.
    current: u64,
    /// Position of bit zero of the current word.
    base: u64,
    /// Position of bit zero of the next word.
    next_base: u64,
    marker: PhantomData<E>,
}

impl<'a> Positions<'a, TrailingZeros> {
    pub fn new(words: &'a [u64]) -> Self {
        Self::with_kernel(words)
    }
}

impl<'a, E: Extract> Positions<'a, E> {
    /// Enumerates positions using the kernel `E`.
    pub fn with_kernel(words: &'a [u64]) -> Self {
        Self {
            words: words.iter(),
            current: 0,
            base: 0,
            next_base: 0,
            marker: PhantomData,
        }
    }
}

impl<E: Extract> Iterator for Positions<'_, E> {
    type Item = u64;

    #[inline]
    fn next(&mut self) -> Option<u64> {
        while self.current == 0 {
            self.current = *self.words.next()?;
            self.base = self.next_base;
            self.next_base += 64;
        }
        Some(self.base + E::pop_lowest(&mut self.current) as u64)
    }

    // Exact, at the cost of a popcount over the remaining words.
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.current.count_ones() as usize + cardinality(self.words.as_slice());
        (remaining, Some(remaining))
    }
}

impl<E: Extract> FusedIterator for Positions<'_, E> { }
