//! Strategies for enumerating the set bits of a word.
//!
//! Each strategy repeatedly removes the lowest set bit of a word and reports its
//! index. They are expressed as zero-sized [`Extract`] kernels so that decode loops
//! are monomorphized per strategy, and as the runtime-selectable [`Strategy`].

use smallvec::SmallVec;

/// Removes set bits from a word, lowest first.
pub trait Extract {
    /// Clears the lowest set bit of `bitset` and returns its index.
    ///
    /// `bitset` must be non-zero.
    fn pop_lowest(bitset: &mut u64) -> u32;
}

/// Finds the lowest set bit by counting trailing zeros.
#[derive(Copy, Clone, Debug, Default)]
pub struct TrailingZeros;

impl Extract for TrailingZeros {
    #[inline(always)]
    fn pop_lowest(bitset: &mut u64) -> u32 {
        debug_assert!(*bitset != 0);
        let ntz = trailing_zeros(*bitset);
        *bitset ^= 1u64 << ntz;
        ntz
    }
}

/// Isolates the lowest set bit as `x & -x`, and counts the ones below it.
#[derive(Copy, Clone, Debug, Default)]
pub struct LowestBit;

impl Extract for LowestBit {
    #[inline(always)]
    fn pop_lowest(bitset: &mut u64) -> u32 {
        debug_assert!(*bitset != 0);
        // Two's complement negation; must wrap for words with bit 63 set.
        let lowest = *bitset & bitset.wrapping_neg();
        *bitset ^= lowest;
        popcount(lowest - 1)
    }
}

/// A runtime choice between the [`Extract`] kernels.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[cfg_attr(feature = "harness", derive(clap::ValueEnum))]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// See [`TrailingZeros`].
    #[default]
    TrailingZeros,
    /// See [`LowestBit`].
    LowestBit,
}

impl Strategy {
    /// Every strategy, in a fixed order.
    pub const ALL: [Strategy; 2] = [Strategy::TrailingZeros, Strategy::LowestBit];

    /// The snake_case name, as used by `Display` and the `serde` representation.
    pub fn name(self) -> &'static str {
        match self {
            Strategy::TrailingZeros => "trailing_zeros",
            Strategy::LowestBit => "lowest_bit",
        }
    }

    /// Clears the lowest set bit of the non-zero `bitset` and returns its index.
    ///
    /// This branches on `self` for every call; loops over many bits should
    /// dispatch once and use an [`Extract`] kernel directly.
    #[inline]
    pub fn pop_lowest(self, bitset: &mut u64) -> u32 {
        match self {
            Strategy::TrailingZeros => TrailingZeros::pop_lowest(bitset),
            Strategy::LowestBit => LowestBit::pop_lowest(bitset),
        }
    }
}

impl core::fmt::Display for Strategy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.pad(self.name())
    }
}

/// The indexes of the set bits of `word`, in increasing order.
///
/// At most 64 indexes exist, so the result never spills to the heap.
#[inline]
pub fn word_bits<E: Extract>(mut word: u64) -> SmallVec<[u8; 64]> {
    let mut bits = SmallVec::new();
    while word != 0 {
        bits.push(E::pop_lowest(&mut word) as u8);
    }
    bits
}

#[inline(always)]
fn trailing_zeros(word: u64) -> u32 {
    #[cfg(feature = "portable-bits")]
    { portable::trailing_zeros(word) }
    #[cfg(not(feature = "portable-bits"))]
    { word.trailing_zeros() }
}

#[inline(always)]
fn popcount(word: u64) -> u32 {
    #[cfg(feature = "portable-bits")]
    { portable::popcount(word) }
    #[cfg(not(feature = "portable-bits"))]
    { word.count_ones() }
}

/// Bit counting without the hardware instructions.
#[cfg_attr(not(any(test, feature = "portable-bits")), allow(dead_code))]
pub(crate) mod portable {

    /// Parallel (SWAR) population count.
    #[inline(always)]
    pub fn popcount(mut x: u64) -> u32 {
        const M1: u64 = 0x5555_5555_5555_5555;
        const M2: u64 = 0x3333_3333_3333_3333;
        const M4: u64 = 0x0f0f_0f0f_0f0f_0f0f;
        const H01: u64 = 0x0101_0101_0101_0101;

        x = x - ((x >> 1) & M1);
        x = (x & M2) + ((x >> 2) & M2);
        x = (x + (x >> 4)) & M4;
        (x.wrapping_mul(H01) >> 56) as u32
    }

    const DE_BRUIJN: u64 = 0x03f7_9d71_b4cb_0a89;

    // Maps the top six bits of `(1 << i) * DE_BRUIJN` back to `i`.
    const DE_BRUIJN_INDEX: [u8; 64] = {
        let mut table = [0u8; 64];
        let mut i = 0;
        while i < 64 {
            table[((1u64 << i).wrapping_mul(DE_BRUIJN) >> 58) as usize] = i as u8;
            i += 1;
        }
        table
    };

    /// Trailing zero count of a non-zero word by de Bruijn multiplication.
    #[inline(always)]
    pub fn trailing_zeros(x: u64) -> u32 {
        debug_assert!(x != 0);
        let lowest = x & x.wrapping_neg();
        DE_BRUIJN_INDEX[(lowest.wrapping_mul(DE_BRUIJN) >> 58) as usize] as u32
    }
}

#[cfg(test)]
mod test {
    use super::{portable, word_bits, Extract, LowestBit, Strategy, TrailingZeros};

    fn drain<E: Extract>(mut word: u64) -> Vec<u32> {
        let mut bits = Vec::new();
        while word != 0 { bits.push(E::pop_lowest(&mut word)); }
        bits
    }

    #[test]
    fn single_bits() {
        for i in 0 .. 64 {
            let mut word = 1u64 << i;
            assert_eq!(TrailingZeros::pop_lowest(&mut word), i);
            assert_eq!(word, 0);
            let mut word = 1u64 << i;
            assert_eq!(LowestBit::pop_lowest(&mut word), i);
            assert_eq!(word, 0);
        }
    }

    #[test]
    fn edge_words() {
        let all: Vec<u32> = (0 .. 64).collect();
        assert_eq!(drain::<TrailingZeros>(u64::MAX), all);
        assert_eq!(drain::<LowestBit>(u64::MAX), all);
        assert_eq!(drain::<TrailingZeros>(1 << 63), vec![63]);
        assert_eq!(drain::<LowestBit>(1 << 63), vec![63]);
        assert_eq!(drain::<LowestBit>(0x8000_0000_0000_0001), vec![0, 63]);
        assert!(drain::<TrailingZeros>(0).is_empty());
    }

    #[test]
    fn strategies_agree() {
        let mut word = 0x9e37_79b9_7f4a_7c15u64;
        for _ in 0 .. 1000 {
            assert_eq!(drain::<TrailingZeros>(word), drain::<LowestBit>(word));
            word = word.rotate_left(7).wrapping_mul(0xbf58_476d_1ce4_e5b9) ^ (word >> 3);
        }
    }

    #[test]
    fn runtime_dispatch() {
        for strategy in Strategy::ALL {
            let mut word = 0b1010_0000u64;
            assert_eq!(strategy.pop_lowest(&mut word), 5);
            assert_eq!(strategy.pop_lowest(&mut word), 7);
            assert_eq!(word, 0);
        }
        assert_eq!(Strategy::default(), Strategy::TrailingZeros);
        assert_eq!(Strategy::LowestBit.to_string(), "lowest_bit");
    }

    #[test]
    fn stack_bits() {
        let bits = word_bits::<LowestBit>(u64::MAX);
        assert_eq!(bits.len(), 64);
        assert!(!bits.spilled());
        assert_eq!(&word_bits::<TrailingZeros>(0b1001)[..], &[0, 3]);
    }

    #[test]
    fn portable_matches_hardware() {
        for i in 0 .. 64 {
            let word = 1u64 << i;
            assert_eq!(portable::trailing_zeros(word), word.trailing_zeros());
            assert_eq!(portable::trailing_zeros(u64::MAX << i), i);
            assert_eq!(portable::popcount(word - 1), i);
        }
        let mut word = 0x2545_f491_4f6c_dd1du64;
        for _ in 0 .. 1000 {
            assert_eq!(portable::popcount(word), word.count_ones());
            if word != 0 {
                assert_eq!(portable::trailing_zeros(word), word.trailing_zeros());
            }
            word ^= word << 13;
            word ^= word >> 7;
            word ^= word << 17;
        }
        assert_eq!(portable::popcount(u64::MAX), 64);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_names() {
        let json = serde_json::to_string(&Strategy::LowestBit).unwrap();
        assert_eq!(json, "\"lowest_bit\"");
        let back: Strategy = serde_json::from_str("\"trailing_zeros\"").unwrap();
        assert_eq!(back, Strategy::TrailingZeros);
    }
}
