//! Run-time errors.
//!
//! Errors carry no data besides their kind. Callers that need the offending sizes should query
//! the operands.

/// Errors detected while combining or assigning expressions.
///
/// The `std::ops` operators cannot return this type, so they panic with the [`Display`] message
/// of the error instead. Every operator has a fallible counterpart (the free functions in this
/// crate, and the `try_*` methods of the containers).
///
/// [`Display`]: std::fmt::Display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Two vector operands of an elementwise operation have different sizes.
    #[error("incompatible vector expression sizes")]
    IncompatibleVectorSizes,

    /// Two matrix operands of an elementwise operation have different shapes.
    #[error("incompatible matrix expression sizes")]
    IncompatibleMatrixSizes,

    /// The inner dimensions of a matrix-matrix, matrix-vector or vector-matrix product differ.
    #[error("incompatible matrix product sizes")]
    IncompatibleProductSizes,

    /// A square matrix was required.
    #[error("matrix is not square")]
    NonSquareMatrix,

    /// A vector of one exact size was required.
    #[error("vector expression has the wrong size")]
    WrongVectorSize,

    /// A vector of at least some size was required.
    #[error("vector expression is too small")]
    VectorTooSmall,

    /// A matrix of at least some shape was required.
    #[error("matrix expression is too small")]
    MatrixTooSmall,

    /// Quaternions are always made of exactly 4 elements.
    #[error("quaternion requires exactly 4 elements")]
    QuaternionSize,

    /// External storage can only be reshaped if the number of elements stays the same.
    #[error("external storage cannot change its element count")]
    ExternalResize,
}

/// Shorthand for results carrying a lamina [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Converts an error into a panic carrying its message, at the caller's location.
pub(crate) trait OrPanic<T> {
    fn or_panic(self) -> T;
}

impl<T> OrPanic<T> for Result<T> {
    #[track_caller]
    #[inline]
    fn or_panic(self) -> T {
        match self {
            Ok(value) => value,
            Err(e) => panic!("{e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            Error::IncompatibleMatrixSizes.to_string(),
            "incompatible matrix expression sizes"
        );
        assert_eq!(
            Error::QuaternionSize.to_string(),
            "quaternion requires exactly 4 elements"
        );
    }

    #[test]
    #[should_panic(expected = "matrix is not square")]
    fn or_panic() {
        Err::<(), _>(Error::NonSquareMatrix).or_panic();
    }
}
