//! Zero-copy views between byte payloads and word or position slices.
//!
//! Bitmap containers typically arrive as raw bytes from a deserializer, and
//! decoded positions are often handed on as bytes again. Neither direction copies.

use bytemuck::PodCastError;

use crate::error::{DecodeError, InputError};
use crate::position::Position;

/// Presents a byte payload as the words of a bitmap, in native byte order.
///
/// The payload must be a whole number of words and 8-byte aligned.
pub fn words_from_bytes(bytes: &[u8]) -> Result<&[u64], DecodeError> {
    if bytes.len() % core::mem::size_of::<u64>() != 0 {
        return Err(InputError::ByteLength(bytes.len()).into());
    }
    bytemuck::try_cast_slice(bytes).map_err(|err| match err {
        PodCastError::OutputSliceWouldHaveSlop | PodCastError::SizeMismatch => {
            InputError::ByteLength(bytes.len()).into()
        }
        _ => InputError::Misaligned.into(),
    })
}

/// Presents decoded positions as bytes, with their required alignment.
#[inline(always)]
pub fn positions_as_bytes<P: Position>(positions: &[P]) -> (usize, &[u8]) {
    (core::mem::align_of::<P>(), bytemuck::cast_slice(positions))
}
