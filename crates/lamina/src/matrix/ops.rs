use std::ops::{AddAssign, DivAssign, Index, IndexMut, MulAssign, SubAssign};

use crate::{
    approx::ApproxEq,
    assign::{self, AssignOp, OpAddAssign, OpDivAssign, OpMulAssign, OpSubAssign},
    error::OrPanic,
    expr::all_pairs_2d,
    layout::{Basis, Layout},
    storage::{MatrixBuf, MatrixBufMut},
    DimPromote, MatrixExpr, MatrixExprMut, Scalar, Splat, Vector,
};

use super::Matrix;

impl<S: MatrixBuf, B: Basis, L: Layout> Index<(usize, usize)> for Matrix<S, B, L> {
    type Output = S::Elem;

    #[inline]
    #[track_caller]
    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        match self.try_get(row, col) {
            Some(elem) => elem,
            None => super::out_of_bounds(row, col, self.rows(), self.cols()),
        }
    }
}

impl<S: MatrixBufMut, B: Basis, L: Layout> IndexMut<(usize, usize)> for Matrix<S, B, L> {
    #[inline]
    #[track_caller]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        self.get_mut(row, col)
    }
}

// Compares logical elements, so matrices with different storage, basis or layout can be equal.
impl<S, B, L, E> PartialEq<E> for Matrix<S, B, L>
where
    S: MatrixBuf,
    B: Basis,
    L: Layout,
    E: MatrixExpr,
    S::Elem: PartialEq<E::Elem>,
{
    fn eq(&self, other: &E) -> bool {
        all_pairs_2d(self, other, |a, b| a == b)
    }
}

impl<S: MatrixBuf, B: Basis, L: Layout> Eq for Matrix<S, B, L> where S::Elem: Eq {}

/// Element-wise addition.
///
/// # Panics
///
/// Panics if `rhs` has a dynamic shape that differs from the shape of `self`.
impl<S, B, L, Rhs> AddAssign<Rhs> for Matrix<S, B, L>
where
    S: MatrixBufMut,
    B: Basis,
    L: Layout,
    Rhs: MatrixExpr,
    S::Rows: DimPromote<Rhs::Rows>,
    S::Cols: DimPromote<Rhs::Cols>,
    OpAddAssign: AssignOp<S::Elem, Rhs::Elem>,
{
    #[track_caller]
    fn add_assign(&mut self, rhs: Rhs) {
        assign::matrix::<OpAddAssign, _, _>(self, &rhs).or_panic();
    }
}

/// Element-wise subtraction.
///
/// # Panics
///
/// Panics if `rhs` has a dynamic shape that differs from the shape of `self`.
impl<S, B, L, Rhs> SubAssign<Rhs> for Matrix<S, B, L>
where
    S: MatrixBufMut,
    B: Basis,
    L: Layout,
    Rhs: MatrixExpr,
    S::Rows: DimPromote<Rhs::Rows>,
    S::Cols: DimPromote<Rhs::Cols>,
    OpSubAssign: AssignOp<S::Elem, Rhs::Elem>,
{
    #[track_caller]
    fn sub_assign(&mut self, rhs: Rhs) {
        assign::matrix::<OpSubAssign, _, _>(self, &rhs).or_panic();
    }
}

// Scaling touches every element once, so the storage order can be used directly.

/// Matrix-Scalar multiplication.
impl<S, B, L, K> MulAssign<K> for Matrix<S, B, L>
where
    S: MatrixBufMut,
    B: Basis,
    L: Layout,
    K: Scalar,
    OpMulAssign: AssignOp<S::Elem, K>,
{
    fn mul_assign(&mut self, rhs: K) {
        let mut elems = Vector::external(self.as_mut_slice());
        assign::run_vector::<OpMulAssign, _, _>(&mut elems, &Splat(rhs));
    }
}

/// Matrix-Scalar division.
impl<S, B, L, K> DivAssign<K> for Matrix<S, B, L>
where
    S: MatrixBufMut,
    B: Basis,
    L: Layout,
    K: Scalar,
    OpDivAssign: AssignOp<S::Elem, K>,
{
    fn div_assign(&mut self, rhs: K) {
        let mut elems = Vector::external(self.as_mut_slice());
        assign::run_vector::<OpDivAssign, _, _>(&mut elems, &Splat(rhs));
    }
}

impl<S1, B1, L1, S2, B2, L2> ApproxEq<Matrix<S2, B2, L2>> for Matrix<S1, B1, L1>
where
    S1: MatrixBuf,
    S2: MatrixBuf,
    B1: Basis,
    B2: Basis,
    L1: Layout,
    L2: Layout,
    S1::Elem: ApproxEq<S2::Elem>,
{
    type Tolerance = <S1::Elem as ApproxEq<S2::Elem>>::Tolerance;

    fn abs_diff_eq(&self, other: &Matrix<S2, B2, L2>, abs_tolerance: Self::Tolerance) -> bool {
        all_pairs_2d(self, other, |a, b| a.abs_diff_eq(&b, abs_tolerance))
    }

    fn rel_diff_eq(&self, other: &Matrix<S2, B2, L2>, rel_tolerance: Self::Tolerance) -> bool {
        all_pairs_2d(self, other, |a, b| a.rel_diff_eq(&b, rel_tolerance))
    }

    fn ulps_diff_eq(&self, other: &Matrix<S2, B2, L2>, ulps_tolerance: u32) -> bool {
        all_pairs_2d(self, other, |a, b| a.ulps_diff_eq(&b, ulps_tolerance))
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn assign_ops() {
        let mut m = Mat2::from_rows([[1.0, 2.0], [3.0, 4.0]]);
        m += Mat2::<f64>::identity();
        assert_eq!(m, [[2.0, 2.0], [3.0, 5.0]]);
        m -= [[1.0, 1.0], [1.0, 1.0]];
        assert_eq!(m, [[1.0, 1.0], [2.0, 4.0]]);
        m *= 2.0;
        assert_eq!(m, [[2.0, 2.0], [4.0, 8.0]]);
        m /= 4.0;
        assert_eq!(m, [[0.5, 0.5], [1.0, 2.0]]);
    }

    #[test]
    fn assign_from_expression() {
        let a = Mat2::from_rows([[1, 2], [3, 4]]);
        let mut d = DynMatrix::<i32>::zeros(2, 2);
        d += &a * 2 - a.transpose();
        assert_eq!(d, [[1, 1], [4, 4]]);
        d.try_mul_assign(a).unwrap();
        assert_eq!(d, [[1, 2], [12, 16]]);
    }

    #[test]
    #[cfg(not(feature = "unchecked"))]
    #[should_panic(expected = "incompatible matrix expression sizes")]
    fn mismatched_add_assign() {
        let mut d = DynMatrix::<i32>::zeros(2, 3);
        d += Mat2::<i32>::identity();
    }

    #[test]
    fn equality_ignores_storage() {
        let rm = Matrix::<[[u8; 2]; 2], RowBasis, RowMajor>::from_rows([[1, 2], [3, 4]]);
        let cm = Matrix::<[[u8; 2]; 2], ColBasis, ColMajor>::from_rows([[1, 2], [3, 4]]);
        assert_eq!(rm, cm);
        assert_eq!(DynMatrix::from_row_slice(2, 2, &[1u8, 2, 3, 4]).unwrap(), cm);
        assert_ne!(rm, rm.transpose());
        assert_ne!(DynMatrix::<u8>::zeros(2, 1), DynMatrix::<u8>::zeros(1, 2));
    }

    #[test]
    fn approx() {
        let a = Mat2::from_rows([[1.0, 2.0], [3.0, 4.0]]);
        let b = DynMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0 + 1e-12]).unwrap();
        assert_approx_eq!(a, b).abs(1e-9);
        assert_approx_ne!(a, b).ulps(0);
        assert_approx_ne!(a, DynMatrix::<f64>::zeros(2, 3));
    }
}
