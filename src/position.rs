//! Integer types that decoded positions can be written as.

use crate::error::InputError;

/// An integer type able to hold bit positions.
///
/// The decoder never produces a position above `64 * words.len() - 1`, and refuses
/// inputs for which that bound exceeds [`Position::MAX`]. Once that check passes,
/// [`Position::from_position`] is a plain narrowing cast.
pub trait Position : bytemuck::Pod {
    /// The largest position this type can hold.
    const MAX: u64;
    /// Converts a position known to be at most `Self::MAX`.
    fn from_position(position: u64) -> Self;
}

macro_rules! implement_position {
    ($($index_type:ty),*) => { $(
        impl Position for $index_type {
            const MAX: u64 = <$index_type>::MAX as u64;
            #[inline(always)]
            fn from_position(position: u64) -> Self {
                debug_assert!(position <= <Self as Position>::MAX);
                position as $index_type
            }
        }
    )* }
}

implement_position!(u32, u64, usize);
implement_position!(i32, i64);

/// The largest number of words whose positions all fit in `P`.
#[inline(always)]
pub fn max_words<P: Position>() -> u64 {
    // `P::MAX + 1` is a power of two for every implementor.
    (P::MAX >> 6) + 1
}

/// Confirms that every position of a `words`-long bitmap fits in `P`.
#[inline]
pub fn check_span<P: Position>(words: usize) -> Result<(), InputError> {
    if words as u64 > max_words::<P>() {
        Err(InputError::PositionOverflow { words, max: P::MAX })
    }
    else { Ok(()) }
}

#[cfg(test)]
mod test {
    use super::{check_span, max_words, Position};
    use crate::error::InputError;

    #[test]
    fn largest_positions() {
        assert_eq!(<i32 as Position>::from_position(i32::MAX as u64), i32::MAX);
        assert_eq!(<u32 as Position>::from_position(u32::MAX as u64), u32::MAX);
        assert_eq!(<i64 as Position>::from_position(i64::MAX as u64), i64::MAX);
        assert_eq!(<usize as Position>::from_position(63), 63usize);
        assert_eq!(<u64 as Position>::from_position(u64::MAX), u64::MAX);
    }

    #[test]
    fn spans() {
        assert_eq!(max_words::<i32>(), 1 << 25);
        assert_eq!(max_words::<u32>(), 1 << 26);
        assert_eq!(max_words::<u64>(), 1 << 58);

        assert!(check_span::<i32>(1 << 25).is_ok());
        assert_eq!(
            check_span::<i32>((1 << 25) + 1),
            Err(InputError::PositionOverflow { words: (1 << 25) + 1, max: i32::MAX as u64 }),
        );
        assert!(check_span::<u32>(1 << 26).is_ok());
        assert!(check_span::<u32>((1 << 26) + 1).is_err());
        assert!(check_span::<u64>(1 << 40).is_ok());
    }
}
