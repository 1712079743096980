//! Size checks.
//!
//! Mismatches between two fixed sizes never get here: [`DimPromote`] has no impl for them, so they
//! are compile errors. The functions in this module handle the cases involving at least one
//! dynamic size. They always succeed if run-time checks are disabled with the `unchecked` feature.

use std::marker::PhantomData;

use crate::{config::SIZE_CHECKS, Const, Dim, DimPromote, Error, Result};

#[inline]
fn ensure(ok: bool, error: Error) -> Result<()> {
    if SIZE_CHECKS && !ok {
        Err(error)
    } else {
        Ok(())
    }
}

/// Checks that two vector operands of an elementwise operation have compatible sizes.
#[inline]
pub fn vectors<A: DimPromote<B>, B: Dim>(lhs: A, rhs: B) -> Result<()> {
    ensure(lhs.compatible(rhs), Error::IncompatibleVectorSizes)
}

/// Checks that two matrix operands of an elementwise operation have compatible shapes.
#[inline]
pub fn matrices<R1, C1, R2, C2>(lhs: (R1, C1), rhs: (R2, C2)) -> Result<()>
where
    R1: DimPromote<R2>,
    C1: DimPromote<C2>,
    R2: Dim,
    C2: Dim,
{
    ensure(
        lhs.0.compatible(rhs.0) && lhs.1.compatible(rhs.1),
        Error::IncompatibleMatrixSizes,
    )
}

/// Checks the inner dimensions of a product.
///
/// `lhs` is the column count of the left operand (or the size of a left vector operand), `rhs` is
/// the row count of the right operand (or the size of a right vector operand).
#[inline]
pub fn product<A: DimPromote<B>, B: Dim>(lhs: A, rhs: B) -> Result<()> {
    ensure(lhs.compatible(rhs), Error::IncompatibleProductSizes)
}

/// Checks that a matrix is square.
#[inline]
pub fn square<R: DimPromote<C>, C: Dim>(rows: R, cols: C) -> Result<()> {
    ensure(rows.compatible(cols), Error::NonSquareMatrix)
}

/// Checks that a vector has exactly `N` elements.
#[inline]
pub fn exact<const N: usize, D: DimPromote<Const<N>>>(dim: D) -> Result<()> {
    ensure(dim.compatible(Const), Error::WrongVectorSize)
}

struct MinSize<D, const MIN: usize>(PhantomData<D>);

impl<D: Dim, const MIN: usize> MinSize<D, MIN> {
    const CHECK: () = match D::FIXED {
        Some(n) => assert!(n >= MIN, "fixed size is smaller than the required minimum"),
        None => {}
    };
}

/// Checks that a vector has at least `MIN` elements.
///
/// A fixed size below `MIN` fails the build.
#[inline]
pub fn min_size<const MIN: usize, D: Dim>(dim: D) -> Result<()> {
    #[allow(clippy::let_unit_value)]
    let () = MinSize::<D, MIN>::CHECK;
    ensure(dim.value() >= MIN, Error::VectorTooSmall)
}

/// Checks that a matrix has at least `MIN_ROWS` rows and `MIN_COLS` columns.
///
/// A fixed row or column count below the minimum fails the build.
#[inline]
pub fn min_shape<const MIN_ROWS: usize, const MIN_COLS: usize, R: Dim, C: Dim>(
    rows: R,
    cols: C,
) -> Result<()> {
    #[allow(clippy::let_unit_value)]
    let () = MinSize::<R, MIN_ROWS>::CHECK;
    #[allow(clippy::let_unit_value)]
    let () = MinSize::<C, MIN_COLS>::CHECK;
    ensure(
        rows.value() >= MIN_ROWS && cols.value() >= MIN_COLS,
        Error::MatrixTooSmall,
    )
}
