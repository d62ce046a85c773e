#![no_std]

use bitdecode::{BitDecoder, Strategy};

/// Decodes a fixed bitmap without `std`, to check the core builds for such targets.
pub fn decode_fixed(out: &mut [u32; 4]) -> usize {
    let words = [0b101u64, 1 << 63];
    BitDecoder::new(Strategy::LowestBit)
        .decode(&words, &mut out[..])
        .unwrap_or(0)
}
