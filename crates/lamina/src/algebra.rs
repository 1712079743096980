//! Free-function algebra.
//!
//! The fallible functions here are what the operators and the convenience methods on
//! [`VectorExpr`], [`MatrixExpr`] and [`Matrix`][crate::Matrix] call. They return an [`Error`]
//! where the operators would panic.
//!
//! [`Error`]: crate::Error

mod inverse;
mod lu;
mod product;

pub use inverse::{determinant, inverse};
pub use lu::{lu, lu_pivot, lu_pivot_solve, lu_solve, Pivots};
pub use product::{mat_mul, mat_vec_mul, vec_mat_mul};

use crate::{
    check,
    functor::{BinaryOp, OpMul},
    promote::{Promote, PromotedElem},
    Const, Cross, DimPromote, MatBinary, MatrixExpr, Number, Outer, Result, Transposed, VecBinary,
    VectorExpr, Zero,
};

/// Computes the dot product of two vectors.
///
/// Vectors carry no row or column orientation, so any two vectors of the same size can be
/// combined.
///
/// # Errors
///
/// Returns [`Error::IncompatibleVectorSizes`][crate::Error::IncompatibleVectorSizes] if the sizes
/// differ at run time.
///
/// # Examples
///
/// ```
/// # use lamina::*;
/// assert_eq!(dot(vec3(1i32, 2, 3), vec3(4i32, 5, 6))?, 32);
/// assert_eq!(dot(vec2(1.0f32, 2.0), vec2(0.5f64, 0.25))?, 1.0f64);
///
/// let short = DynVector::from_slice(&[1, 2]);
/// assert_eq!(dot(&short, vec3(1, 2, 3)), Err(Error::IncompatibleVectorSizes));
/// # Ok::<_, lamina::Error>(())
/// ```
pub fn dot<A, B>(a: A, b: B) -> Result<PromotedElem<A::Elem, B::Elem>>
where
    A: VectorExpr,
    B: VectorExpr,
    A::Size: DimPromote<B::Size>,
    A::Elem: Promote<B::Elem>,
    PromotedElem<A::Elem, B::Elem>: Number,
{
    check::vectors(a.dim(), b.dim())?;
    let sum = (0..a.size()).fold(<PromotedElem<A::Elem, B::Elem> as Zero>::ZERO, |acc, i| {
        acc + a.get(i).promote_lhs() * <A::Elem as Promote<B::Elem>>::promote_rhs(b.get(i))
    });
    Ok(sum)
}

/// Lazily computes the outer product `a * bᵀ`.
///
/// The operands may have any sizes. The result has one row per element of `a` and one column per
/// element of `b`.
pub fn outer<A, B>(a: A, b: B) -> Outer<A, B>
where
    A: VectorExpr,
    B: VectorExpr,
    OpMul: BinaryOp<A::Elem, B::Elem>,
{
    Outer::new(a, b)
}

/// Lazily computes the cross product of two 3-dimensional vectors.
///
/// # Errors
///
/// Returns [`Error::WrongVectorSize`][crate::Error::WrongVectorSize] if a dynamic operand does
/// not have exactly 3 elements.
pub fn cross<A, B>(a: A, b: B) -> Result<Cross<A, B>>
where
    A: VectorExpr,
    B: VectorExpr,
    A::Size: DimPromote<Const<3>>,
    B::Size: DimPromote<Const<3>>,
{
    Cross::new(a, b)
}

/// Computes the perpendicular dot product of two 2-dimensional vectors.
///
/// This is the z component of the cross product of `a` and `b` extended with a zero z component.
/// It is positive if `b` points counterclockwise of `a`.
///
/// # Errors
///
/// Returns [`Error::WrongVectorSize`][crate::Error::WrongVectorSize] if a dynamic operand does
/// not have exactly 2 elements.
///
/// # Examples
///
/// ```
/// # use lamina::*;
/// assert_eq!(perp_dot(vec2(1i32, 0), vec2(0i32, 1))?, 1);
/// assert_eq!(perp_dot(vec2(0i32, 1), vec2(1i32, 0))?, -1);
/// assert_eq!(
///     perp_dot(DynVector::from_slice(&[1, 2, 3]), vec2(1, 0)),
///     Err(Error::WrongVectorSize),
/// );
/// # Ok::<_, lamina::Error>(())
/// ```
pub fn perp_dot<A, B>(a: A, b: B) -> Result<PromotedElem<A::Elem, B::Elem>>
where
    A: VectorExpr,
    B: VectorExpr,
    A::Size: DimPromote<Const<2>>,
    B::Size: DimPromote<Const<2>>,
    A::Elem: Promote<B::Elem>,
    PromotedElem<A::Elem, B::Elem>: Number,
{
    check::exact::<2, _>(a.dim())?;
    check::exact::<2, _>(b.dim())?;
    let rhs = |i| <A::Elem as Promote<B::Elem>>::promote_rhs(b.get(i));
    Ok(a.get(0).promote_lhs() * rhs(1) - a.get(1).promote_lhs() * rhs(0))
}

/// Lazily multiplies two vectors elementwise.
///
/// # Errors
///
/// Returns [`Error::IncompatibleVectorSizes`][crate::Error::IncompatibleVectorSizes] if the sizes
/// differ at run time.
pub fn hadamard<A, B>(a: A, b: B) -> Result<VecBinary<A, B, OpMul>>
where
    A: VectorExpr,
    B: VectorExpr,
    A::Size: DimPromote<B::Size>,
    OpMul: BinaryOp<A::Elem, B::Elem>,
{
    VecBinary::new(a, b)
}

/// Lazily multiplies two matrices elementwise.
///
/// # Errors
///
/// Returns [`Error::IncompatibleMatrixSizes`][crate::Error::IncompatibleMatrixSizes] if the
/// shapes differ at run time.
///
/// # Examples
///
/// ```
/// # use lamina::*;
/// let a = Mat2::from_rows([[1, 2], [3, 4]]);
/// assert_eq!(mat_hadamard(&a, &a)?.eval(), [[1, 4], [9, 16]]);
/// # Ok::<_, lamina::Error>(())
/// ```
pub fn mat_hadamard<A, B>(a: A, b: B) -> Result<MatBinary<A, B, OpMul>>
where
    A: MatrixExpr,
    B: MatrixExpr,
    A::Rows: DimPromote<B::Rows>,
    A::Cols: DimPromote<B::Cols>,
    OpMul: BinaryOp<A::Elem, B::Elem>,
{
    MatBinary::new(a, b)
}

/// Lazily swaps rows and columns of `m`.
///
/// Transposing twice yields the original elements.
///
/// # Examples
///
/// ```
/// # use lamina::*;
/// let m = Mat::from_rows([[1, 2, 3], [4, 5, 6]]);
/// assert_eq!(transpose(&m).eval(), [[1, 4], [2, 5], [3, 6]]);
/// assert_eq!(transpose(transpose(&m)).eval(), m);
/// ```
pub fn transpose<M: MatrixExpr>(m: M) -> Transposed<M> {
    Transposed::new(m)
}

/// Computes the sum of the diagonal elements of a square matrix.
///
/// # Errors
///
/// Returns [`Error::NonSquareMatrix`][crate::Error::NonSquareMatrix] if `m` is not square.
///
/// # Examples
///
/// ```
/// # use lamina::*;
/// let diag = Mat3::from_diagonal([1, 2, 3]);
/// assert_eq!(trace(&diag)?, 1 + 2 + 3);
/// assert_eq!(Mat3f::identity().trace(), 3.0);
/// # Ok::<_, lamina::Error>(())
/// ```
pub fn trace<M>(m: M) -> Result<M::Elem>
where
    M: MatrixExpr,
    M::Elem: Number,
    M::Rows: DimPromote<M::Cols>,
{
    let (rows, cols) = m.shape();
    check::square(rows, cols)?;
    Ok((0..m.rows()).fold(M::Elem::ZERO, |acc, i| acc + m.get(i, i)))
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn dot_products() {
        assert_eq!(dot(Vec3f::X, Vec3f::Y).unwrap(), 0.0);
        assert_eq!(vec3(1, 3, -5).dot(vec3(4, -2, -1)), 3);
        let m = Mat::from_rows([[1, 2, 3], [4, 5, 6]]);
        assert_eq!(dot(m.row(1), m.row(0)).unwrap(), 4 + 5 * 2 + 6 * 3);
    }

    #[test]
    fn outer_product() {
        let m = outer(vec2(1, 2), DynVector::from_slice(&[1, 10, 100]));
        assert_eq!(m.rows(), 2);
        assert_eq!(m.cols(), 3);
        assert_eq!(m.eval(), [[1, 10, 100], [2, 20, 200]]);
    }

    #[test]
    fn cross_product() {
        let c = cross(vec3(1.0, 0.0, 0.0), DynVector::from_slice(&[0.0, 1.0, 0.0])).unwrap();
        assert_eq!(c.eval(), vec3(0.0, 0.0, 1.0));

        let a = vec3(2.0, -1.0, 0.5);
        let b = vec3(0.25, 3.0, -2.0);
        let n = a.cross(b).eval();
        assert_approx_eq!(n.dot(a), 0.0).abs(1e-12);
        assert_approx_eq!(n.dot(b), 0.0).abs(1e-12);
    }

    #[test]
    #[cfg(not(feature = "unchecked"))]
    fn size_errors() {
        let two = DynVector::from_slice(&[1.0, 2.0]);
        assert!(matches!(cross(&two, vec3(1.0, 2.0, 3.0)), Err(Error::WrongVectorSize)));
        assert!(matches!(
            hadamard(&two, vec3(1.0, 2.0, 3.0)),
            Err(Error::IncompatibleVectorSizes)
        ));
        assert!(matches!(
            mat_hadamard(DynMatrix::<i32>::zeros(2, 2), Mat::<i32, 2, 3>::ZERO),
            Err(Error::IncompatibleMatrixSizes)
        ));
    }

    #[test]
    fn hadamard_product() {
        let v = hadamard(vec3(1, 2, 3), vec3(4, 5, 6)).unwrap().eval();
        assert_eq!(v, [4, 10, 18]);
    }

    #[test]
    fn transpose_is_an_involution() {
        let m = DynMatrix::from_row_slice(2, 3, &[1, 2, 3, 4, 5, 6]).unwrap();
        let t = transpose(&m).eval();
        assert_eq!(t.rows(), 3);
        assert_eq!(t[(2, 1)], 6);
        assert_eq!(transpose(&t).eval(), m);
    }

    #[test]
    fn trace_of_dynamic() {
        let m = DynMatrix::<i32>::from_fn_dyn(4, 4, |r, c| (r * 4 + c) as i32);
        assert_eq!(trace(&m).unwrap(), 30);
    }
}
