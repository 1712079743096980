//! Build-time configuration.
//!
//! Everything in here is decided when the crate is compiled. Nothing is read at run time.
//!
//! | Knob                         | Effect                                                     |
//! |------------------------------|------------------------------------------------------------|
//! | feature `unchecked`          | [`SIZE_CHECKS`] becomes `false`                            |
//! | feature `no-unroll`          | [`UNROLL_LIMIT`] becomes 0                                 |
//! | env `LAMINA_UNROLL_LIMIT`    | overrides [`UNROLL_LIMIT`] (read by `option_env!`)         |
//! | feature `col-major`          | [`DefaultLayout`] becomes [`ColMajor`]                     |
//! | feature `row-basis`          | [`DefaultBasis`] becomes [`RowBasis`]                      |

#[allow(unused_imports)]
use crate::layout::{ColBasis, ColMajor, RowBasis, RowMajor};

/// Whether operations on dynamically sized operands check that the sizes are compatible.
///
/// When disabled, combining operands of mismatched sizes reads out of bounds, which panics (the
/// storage is always accessed through bounds-checked slices) instead of returning an
/// [`Error`][crate::Error].
pub const SIZE_CHECKS: bool = !cfg!(feature = "unchecked");

/// Largest number of elements a fixed-size destination may have for assignments to it to be
/// evaluated as straight-line code instead of a loop.
///
/// Values above [`MAX_UNROLL`] behave like [`MAX_UNROLL`].
pub const UNROLL_LIMIT: usize = if cfg!(feature = "no-unroll") {
    0
} else {
    match option_env!("LAMINA_UNROLL_LIMIT") {
        Some(limit) => parse_limit(limit),
        None => 16,
    }
};

/// Largest element count for which straight-line assignment code exists.
pub const MAX_UNROLL: usize = 32;

/// Unroll limit actually used by the assignment engine.
pub(crate) const EFFECTIVE_UNROLL_LIMIT: usize = if UNROLL_LIMIT > MAX_UNROLL {
    MAX_UNROLL
} else {
    UNROLL_LIMIT
};

const fn parse_limit(s: &str) -> usize {
    let bytes = s.as_bytes();
    assert!(!bytes.is_empty(), "LAMINA_UNROLL_LIMIT is empty");
    let mut value = 0;
    let mut i = 0;
    while i < bytes.len() {
        let digit = bytes[i];
        assert!(
            digit.is_ascii_digit(),
            "LAMINA_UNROLL_LIMIT must be a decimal integer"
        );
        value = value * 10 + (digit - b'0') as usize;
        i += 1;
    }
    value
}

/// Memory layout used when none is specified, and when operands of different layouts are
/// combined.
#[cfg(not(feature = "col-major"))]
pub type DefaultLayout = RowMajor;
/// Memory layout used when none is specified, and when operands of different layouts are
/// combined.
#[cfg(feature = "col-major")]
pub type DefaultLayout = ColMajor;

/// Basis orientation used when none is specified, and when operands of different bases are
/// combined.
#[cfg(not(feature = "row-basis"))]
pub type DefaultBasis = ColBasis;
/// Basis orientation used when none is specified, and when operands of different bases are
/// combined.
#[cfg(feature = "row-basis")]
pub type DefaultBasis = RowBasis;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse() {
        assert_eq!(parse_limit("0"), 0);
        assert_eq!(parse_limit("16"), 16);
        assert_eq!(parse_limit("1024"), 1024);
    }

    #[test]
    #[should_panic(expected = "decimal integer")]
    fn parse_garbage() {
        parse_limit("1x");
    }

    #[test]
    fn effective_limit() {
        assert!(EFFECTIVE_UNROLL_LIMIT <= MAX_UNROLL);
        assert!(EFFECTIVE_UNROLL_LIMIT <= UNROLL_LIMIT);
    }
}
