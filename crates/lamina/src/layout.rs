//! Matrix basis orientation and memory layout tags.
//!
//! The *basis* of a matrix decides whether its basis vectors (as used by
//! [`MatrixExpr::basis_vector`][crate::MatrixExpr::basis_vector] and the transform builders in
//! `lamina-mathlib`) run along its columns or along its rows. The *layout* decides in which order
//! its elements are stored in memory. Both are independent of each other, and neither affects the
//! logical `(row, col)` indexing of a matrix.

use std::fmt;

use crate::{config, Dim};

/// Basis orientation of a matrix.
pub trait Basis: Copy + Default + fmt::Debug + Send + Sync + 'static {
    /// `true` for [`RowBasis`], `false` for [`ColBasis`].
    const ROW_BASIS: bool;

    /// Size tag of a single basis vector of a matrix with `R` rows and `C` columns.
    type Size<R: Dim, C: Dim>: Dim;

    /// Returns the size of a basis vector of a matrix with the given shape.
    fn basis_size<R: Dim, C: Dim>(rows: R, cols: C) -> Self::Size<R, C>;

    /// Returns the `(row, col)` position of element `k` of basis vector `i`.
    #[inline]
    fn position(i: usize, k: usize) -> (usize, usize) {
        if Self::ROW_BASIS {
            (i, k)
        } else {
            (k, i)
        }
    }
}

/// Basis vectors are stored in the rows of the matrix; vectors are transformed as `v * M`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RowBasis;

/// Basis vectors are stored in the columns of the matrix; vectors are transformed as `M * v`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ColBasis;

impl Basis for RowBasis {
    const ROW_BASIS: bool = true;
    type Size<R: Dim, C: Dim> = C;

    #[inline]
    fn basis_size<R: Dim, C: Dim>(_: R, cols: C) -> C {
        cols
    }
}

impl Basis for ColBasis {
    const ROW_BASIS: bool = false;
    type Size<R: Dim, C: Dim> = R;

    #[inline]
    fn basis_size<R: Dim, C: Dim>(rows: R, _: C) -> R {
        rows
    }
}

/// Memory layout of a matrix.
pub trait Layout: Copy + Default + fmt::Debug + Send + Sync + 'static {
    /// `true` for [`RowMajor`], `false` for [`ColMajor`].
    const ROW_MAJOR: bool;

    /// Returns the storage offset of element `(row, col)` in a `rows` by `cols` matrix.
    #[inline]
    fn offset(row: usize, col: usize, rows: usize, cols: usize) -> usize {
        if Self::ROW_MAJOR {
            row * cols + col
        } else {
            col * rows + row
        }
    }

    /// Inverse of [`Layout::offset`]: returns the `(row, col)` of the element stored at `offset`.
    #[inline]
    fn position(offset: usize, rows: usize, cols: usize) -> (usize, usize) {
        if Self::ROW_MAJOR {
            (offset / cols, offset % cols)
        } else {
            (offset % rows, offset / rows)
        }
    }
}

/// Rows are stored contiguously.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RowMajor;

/// Columns are stored contiguously.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ColMajor;

impl Layout for RowMajor {
    const ROW_MAJOR: bool = true;
}

impl Layout for ColMajor {
    const ROW_MAJOR: bool = false;
}

/// Basis promotion: equal bases are kept, mismatched ones become [`config::DefaultBasis`].
pub trait BasisPromote<Rhs: Basis>: Basis {
    type Output: Basis;
}

/// Layout promotion: equal layouts are kept, mismatched ones become [`config::DefaultLayout`].
pub trait LayoutPromote<Rhs: Layout>: Layout {
    type Output: Layout;
}

macro_rules! promote_tags {
    ($promote:ident: $($a:ty, $b:ty => $out:ty;)+) => {
        $(
            impl $promote<$b> for $a {
                type Output = $out;
            }
        )+
    };
}
promote_tags!(BasisPromote:
    RowBasis, RowBasis => RowBasis;
    ColBasis, ColBasis => ColBasis;
    RowBasis, ColBasis => config::DefaultBasis;
    ColBasis, RowBasis => config::DefaultBasis;
);
promote_tags!(LayoutPromote:
    RowMajor, RowMajor => RowMajor;
    ColMajor, ColMajor => ColMajor;
    RowMajor, ColMajor => config::DefaultLayout;
    ColMajor, RowMajor => config::DefaultLayout;
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets() {
        // 2x3 matrix
        assert_eq!(RowMajor::offset(1, 2, 2, 3), 5);
        assert_eq!(ColMajor::offset(1, 2, 2, 3), 5);
        assert_eq!(RowMajor::offset(1, 0, 2, 3), 3);
        assert_eq!(ColMajor::offset(1, 0, 2, 3), 1);
        assert_eq!(RowMajor::offset(0, 1, 2, 3), 1);
        assert_eq!(ColMajor::offset(0, 1, 2, 3), 2);

        for offset in 0..6 {
            let (r, c) = RowMajor::position(offset, 2, 3);
            assert_eq!(RowMajor::offset(r, c, 2, 3), offset);
            let (r, c) = ColMajor::position(offset, 2, 3);
            assert_eq!(ColMajor::offset(r, c, 2, 3), offset);
        }
    }

    #[test]
    fn basis_positions() {
        assert_eq!(RowBasis::position(1, 2), (1, 2));
        assert_eq!(ColBasis::position(1, 2), (2, 1));
    }
}
