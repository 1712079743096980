//! Matrix products.
//!
//! Each product is a private node whose elements are inner products of a row and a column. The
//! public functions check the inner dimensions and evaluate the node right away, so the operands
//! are only borrowed for the duration of the call.

use crate::{
    check,
    layout::{BasisPromote, LayoutPromote},
    promote::{Promote, PromotedElem},
    storage::{MatrixAlloc, MatrixOf, VectorAlloc, VectorOf},
    DimPromote, MatrixExpr, Number, Result, VectorExpr, Zero,
};

#[inline]
fn inner<A, B>(len: usize, a: impl Fn(usize) -> A, b: impl Fn(usize) -> B) -> PromotedElem<A, B>
where
    A: Promote<B>,
    PromotedElem<A, B>: Number,
{
    (0..len).fold(<PromotedElem<A, B> as Zero>::ZERO, |acc, k| {
        acc + a(k).promote_lhs() * A::promote_rhs(b(k))
    })
}

struct MatMul<'a, L, R> {
    lhs: &'a L,
    rhs: &'a R,
}

impl<'a, L, R> MatrixExpr for MatMul<'a, L, R>
where
    L: MatrixExpr,
    R: MatrixExpr,
    L::Elem: Promote<R::Elem>,
    PromotedElem<L::Elem, R::Elem>: Number,
    L::Basis: BasisPromote<R::Basis>,
    L::Layout: LayoutPromote<R::Layout>,
{
    type Elem = PromotedElem<L::Elem, R::Elem>;
    type Rows = L::Rows;
    type Cols = R::Cols;
    type Basis = <L::Basis as BasisPromote<R::Basis>>::Output;
    type Layout = <L::Layout as LayoutPromote<R::Layout>>::Output;

    #[inline]
    fn shape(&self) -> (L::Rows, R::Cols) {
        (self.lhs.shape().0, self.rhs.shape().1)
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> Self::Elem {
        inner(
            self.lhs.cols(),
            |k| self.lhs.get(row, k),
            |k| self.rhs.get(k, col),
        )
    }
}

struct MatVecMul<'a, M, V> {
    lhs: &'a M,
    rhs: &'a V,
}

impl<'a, M, V> VectorExpr for MatVecMul<'a, M, V>
where
    M: MatrixExpr,
    V: VectorExpr,
    M::Elem: Promote<V::Elem>,
    PromotedElem<M::Elem, V::Elem>: Number,
{
    type Elem = PromotedElem<M::Elem, V::Elem>;
    type Size = M::Rows;

    #[inline]
    fn dim(&self) -> M::Rows {
        self.lhs.shape().0
    }

    #[inline]
    fn get(&self, i: usize) -> Self::Elem {
        inner(self.lhs.cols(), |k| self.lhs.get(i, k), |k| self.rhs.get(k))
    }
}

struct VecMatMul<'a, V, M> {
    lhs: &'a V,
    rhs: &'a M,
}

impl<'a, V, M> VectorExpr for VecMatMul<'a, V, M>
where
    V: VectorExpr,
    M: MatrixExpr,
    V::Elem: Promote<M::Elem>,
    PromotedElem<V::Elem, M::Elem>: Number,
{
    type Elem = PromotedElem<V::Elem, M::Elem>;
    type Size = M::Cols;

    #[inline]
    fn dim(&self) -> M::Cols {
        self.rhs.shape().1
    }

    #[inline]
    fn get(&self, j: usize) -> Self::Elem {
        inner(self.lhs.size(), |k| self.lhs.get(k), |k| self.rhs.get(k, j))
    }
}

/// Computes the matrix product `lhs * rhs`.
///
/// The result has the row count of `lhs` and the column count of `rhs`. It uses array storage if
/// both are fixed, and heap storage otherwise.
///
/// # Errors
///
/// Returns [`Error::IncompatibleProductSizes`][crate::Error::IncompatibleProductSizes] if the
/// column count of `lhs` differs from the row count of `rhs` at run time.
///
/// # Examples
///
/// ```
/// # use lamina::*;
/// let a = DynMatrix::from_row_slice(2, 3, &[1, 2, 3, 4, 5, 6])?;
/// let b = Mat::from_rows([[1, 0], [0, 1], [1, 1]]);
/// assert_eq!(mat_mul(&a, &b)?, [[4, 5], [10, 11]]);
/// assert_eq!(mat_mul(&a, &a), Err(Error::IncompatibleProductSizes));
/// # Ok::<_, lamina::Error>(())
/// ```
pub fn mat_mul<L, R>(
    lhs: L,
    rhs: R,
) -> Result<
    MatrixOf<
        L::Rows,
        R::Cols,
        PromotedElem<L::Elem, R::Elem>,
        <L::Basis as BasisPromote<R::Basis>>::Output,
        <L::Layout as LayoutPromote<R::Layout>>::Output,
    >,
>
where
    L: MatrixExpr,
    R: MatrixExpr,
    L::Cols: DimPromote<R::Rows>,
    L::Elem: Promote<R::Elem>,
    PromotedElem<L::Elem, R::Elem>: Number,
    L::Rows: MatrixAlloc<PromotedElem<L::Elem, R::Elem>, R::Cols>,
    L::Basis: BasisPromote<R::Basis>,
    L::Layout: LayoutPromote<R::Layout>,
{
    check::product(lhs.shape().1, rhs.shape().0)?;
    Ok(MatMul {
        lhs: &lhs,
        rhs: &rhs,
    }
    .eval())
}

/// Computes the product of the matrix `lhs` and the vector `rhs`.
///
/// # Errors
///
/// Returns [`Error::IncompatibleProductSizes`][crate::Error::IncompatibleProductSizes] if the
/// column count of `lhs` differs from the size of `rhs` at run time.
pub fn mat_vec_mul<M, V>(lhs: M, rhs: V) -> Result<VectorOf<M::Rows, PromotedElem<M::Elem, V::Elem>>>
where
    M: MatrixExpr,
    V: VectorExpr,
    M::Cols: DimPromote<V::Size>,
    M::Elem: Promote<V::Elem>,
    PromotedElem<M::Elem, V::Elem>: Number,
    M::Rows: VectorAlloc<PromotedElem<M::Elem, V::Elem>>,
{
    check::product(lhs.shape().1, rhs.dim())?;
    Ok(MatVecMul {
        lhs: &lhs,
        rhs: &rhs,
    }
    .eval())
}

/// Computes the product of the vector `lhs` and the matrix `rhs`.
///
/// # Errors
///
/// Returns [`Error::IncompatibleProductSizes`][crate::Error::IncompatibleProductSizes] if the
/// size of `lhs` differs from the row count of `rhs` at run time.
pub fn vec_mat_mul<V, M>(lhs: V, rhs: M) -> Result<VectorOf<M::Cols, PromotedElem<V::Elem, M::Elem>>>
where
    V: VectorExpr,
    M: MatrixExpr,
    V::Size: DimPromote<M::Rows>,
    V::Elem: Promote<M::Elem>,
    PromotedElem<V::Elem, M::Elem>: Number,
    M::Cols: VectorAlloc<PromotedElem<V::Elem, M::Elem>>,
{
    check::product(lhs.dim(), rhs.shape().0)?;
    Ok(VecMatMul {
        lhs: &lhs,
        rhs: &rhs,
    }
    .eval())
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn storage_follows_operands() {
        let a = Mat::from_rows([[1, 2, 3], [4, 5, 6]]);
        let b = DynMatrix::from_row_slice(3, 1, &[1, 1, 1]).unwrap();

        let fixed = mat_mul(&a, a.transpose()).unwrap();
        assert_eq!(fixed, [[14, 32], [32, 77]]);

        let mixed = mat_mul(&a, &b).unwrap();
        assert_eq!(mixed.rows(), 2);
        assert_eq!(mixed.cols(), 1);
        assert_eq!(mixed, [[6], [15]]);
    }

    #[test]
    fn element_promotion() {
        let a = Mat2::from_rows([[1.0f32, 2.0], [3.0, 4.0]]);
        let b = Mat2::from_rows([[0.5f64, 0.0], [0.0, 0.5]]);
        let c: Mat2<f64> = mat_mul(a, b).unwrap();
        assert_eq!(c, [[0.5, 1.0], [1.5, 2.0]]);
    }

    #[test]
    fn vector_products() {
        let m = Mat::from_rows([[1, 2, 3], [4, 5, 6]]);
        assert_eq!(mat_vec_mul(&m, vec3(1, 0, -1)).unwrap(), vec2(-2, -2));
        assert_eq!(vec_mat_mul(vec2(1, 1), &m).unwrap(), vec3(5, 7, 9));

        let v = DynVector::from_slice(&[1, 1]);
        assert_eq!(vec_mat_mul(&v, &m).unwrap(), vec3(5, 7, 9));
    }

    #[test]
    #[cfg(not(feature = "unchecked"))]
    fn mismatched_inner_dimensions() {
        let m = DynMatrix::<i32>::zeros(2, 3);
        let v = DynVector::<i32>::zeros(2);
        assert_eq!(mat_vec_mul(&m, &v), Err(Error::IncompatibleProductSizes));
        assert_eq!(
            vec_mat_mul(DynVector::<i32>::zeros(3), &m),
            Err(Error::IncompatibleProductSizes)
        );
    }
}
