//! Decoding of packed bitmaps into lists of set-bit positions.
//!
//! A bitmap is a slice of `u64` words, where bit `b` of word `k` stands for the
//! position `64 * k + b`. Decoding writes the positions of all set bits, in
//! ascending order, into a caller-provided buffer and returns how many it wrote.
//! This is the step that expands the dense containers of roaring-style bitmap
//! indexes back into element identifiers.
//!
//! Two bit-enumeration strategies are available, selected by [`Strategy`]:
//! scanning trailing zeros, and isolating the lowest set bit. They produce the
//! same output for every input and differ only in which instructions they use.
//!
//! ```
//! use bitdecode::{BitDecoder, Strategy};
//!
//! let words = [0b1u64, 0b1];
//! let mut out = [0u32; 2];
//! let count = BitDecoder::new(Strategy::LowestBit).decode(&words, &mut out).unwrap();
//! assert_eq!(&out[..count], &[0, 64]);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod bytes;
pub mod decode;
pub mod error;
pub mod extract;
pub mod iter;
pub mod position;

pub use decode::{cardinality, BitDecoder};
pub use error::{DecodeError, InputError};
pub use extract::{word_bits, Extract, LowestBit, Strategy, TrailingZeros};
pub use iter::Positions;
pub use position::Position;
