//! Errors reported by the checked decode paths.

use thiserror::Error;

/// A violation of the decoder's calling contract.
///
/// Both kinds are caller errors: nothing here is transient, and nothing is retried.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// The output buffer cannot hold every set bit of the input.
    #[error("output buffer holds {capacity} positions, but the bitmap has {required} set bits")]
    Capacity {
        /// Length of the buffer that was provided.
        capacity: usize,
        /// Number of set bits in the input.
        required: usize,
    },
    /// The word array is malformed for this call.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),
}

/// Ways in which an input can be malformed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    /// The bitmap addresses positions beyond what the output type can represent.
    #[error("{words} words address positions beyond the output type's maximum of {max}")]
    PositionOverflow {
        /// Length of the word array.
        words: usize,
        /// The largest position the output type can hold.
        max: u64,
    },
    /// A byte payload whose length is not a whole number of words.
    #[error("byte length {0} is not a multiple of 8")]
    ByteLength(usize),
    /// A byte payload that is not aligned for `u64` access.
    #[error("byte payload is not 8-byte aligned")]
    Misaligned,
}

#[cfg(test)]
mod test {
    use super::{DecodeError, InputError};

    #[test]
    fn messages() {
        let err = DecodeError::Capacity { capacity: 3, required: 5 };
        assert_eq!(err.to_string(), "output buffer holds 3 positions, but the bitmap has 5 set bits");

        let err: DecodeError = InputError::ByteLength(12).into();
        assert_eq!(err, DecodeError::InvalidInput(InputError::ByteLength(12)));
        assert_eq!(err.to_string(), "invalid input: byte length 12 is not a multiple of 8");
    }
}
