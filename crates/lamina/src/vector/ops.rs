//! Indexing, comparison and operator-assignment for [`Vector`].
//!
//! The value-producing operators live in [`crate::overload`], next to the ones of the expression
//! nodes.

use std::ops::{AddAssign, DivAssign, Index, IndexMut, MulAssign, SubAssign};

use crate::{
    approx::ApproxEq,
    assign::{self, AssignOp, OpAddAssign, OpDivAssign, OpMulAssign, OpSubAssign},
    error::OrPanic,
    expr::all_pairs_1d,
    storage::{VectorBuf, VectorBufMut},
    DimPromote, Scalar, Splat, VectorExpr,
};

use super::Vector;

impl<S: VectorBuf> Index<usize> for Vector<S> {
    type Output = S::Elem;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl<S: VectorBufMut> IndexMut<usize> for Vector<S> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.as_mut_slice()[index]
    }
}

// More general than what the derive generates: any vector expression with comparable elements can
// be on the right-hand side. Vectors of different sizes compare unequal.
impl<S, E> PartialEq<E> for Vector<S>
where
    S: VectorBuf,
    E: VectorExpr,
    S::Elem: PartialEq<E::Elem>,
{
    fn eq(&self, other: &E) -> bool {
        all_pairs_1d(self, other, |a, b| a == b)
    }
}

impl<S: VectorBuf> Eq for Vector<S> where S::Elem: Eq {}

/// `v + w`, elementwise.
///
/// # Panics
///
/// Panics if `rhs` is dynamically sized and its size differs from the size of `self`.
impl<S, Rhs> AddAssign<Rhs> for Vector<S>
where
    S: VectorBufMut,
    Rhs: VectorExpr,
    S::Size: DimPromote<Rhs::Size>,
    OpAddAssign: AssignOp<S::Elem, Rhs::Elem>,
{
    #[track_caller]
    fn add_assign(&mut self, rhs: Rhs) {
        assign::vector::<OpAddAssign, _, _>(self, &rhs).or_panic();
    }
}

/// `v - w`, elementwise.
///
/// # Panics
///
/// Panics if `rhs` is dynamically sized and its size differs from the size of `self`.
impl<S, Rhs> SubAssign<Rhs> for Vector<S>
where
    S: VectorBufMut,
    Rhs: VectorExpr,
    S::Size: DimPromote<Rhs::Size>,
    OpSubAssign: AssignOp<S::Elem, Rhs::Elem>,
{
    #[track_caller]
    fn sub_assign(&mut self, rhs: Rhs) {
        assign::vector::<OpSubAssign, _, _>(self, &rhs).or_panic();
    }
}

/// Scales every element by a scalar.
impl<S, K> MulAssign<K> for Vector<S>
where
    S: VectorBufMut,
    K: Scalar,
    OpMulAssign: AssignOp<S::Elem, K>,
{
    fn mul_assign(&mut self, rhs: K) {
        assign::run_vector::<OpMulAssign, _, _>(self, &Splat(rhs));
    }
}

/// Divides every element by a scalar.
impl<S, K> DivAssign<K> for Vector<S>
where
    S: VectorBufMut,
    K: Scalar,
    OpDivAssign: AssignOp<S::Elem, K>,
{
    fn div_assign(&mut self, rhs: K) {
        assign::run_vector::<OpDivAssign, _, _>(self, &Splat(rhs));
    }
}

// NB: `*=` with a vector on the right is not supported, since it would be ambiguous between the
// elementwise product and a product with a matrix. Use `try_mul_assign` for the elementwise one.

impl<S1, S2> ApproxEq<Vector<S2>> for Vector<S1>
where
    S1: VectorBuf,
    S2: VectorBuf,
    S1::Elem: ApproxEq<S2::Elem>,
{
    type Tolerance = <S1::Elem as ApproxEq<S2::Elem>>::Tolerance;

    fn abs_diff_eq(&self, other: &Vector<S2>, abs_tolerance: Self::Tolerance) -> bool {
        self.as_slice().abs_diff_eq(other.as_slice(), abs_tolerance)
    }

    fn rel_diff_eq(&self, other: &Vector<S2>, rel_tolerance: Self::Tolerance) -> bool {
        self.as_slice().rel_diff_eq(other.as_slice(), rel_tolerance)
    }

    fn ulps_diff_eq(&self, other: &Vector<S2>, ulps_tolerance: u32) -> bool {
        self.as_slice().ulps_diff_eq(other.as_slice(), ulps_tolerance)
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn assign_ops() {
        let mut v = vec3(1.0, 2.0, 3.0);
        v += vec3(1.0, 1.0, 1.0);
        assert_eq!(v, [2.0, 3.0, 4.0]);
        v -= &vec3(2.0, 2.0, 2.0);
        assert_eq!(v, [0.0, 1.0, 2.0]);
        v *= 3.0;
        assert_eq!(v, [0.0, 3.0, 6.0]);
        v /= 2.0;
        assert_eq!(v, [0.0, 1.5, 3.0]);
    }

    #[test]
    fn assign_from_expression() {
        let a = vec3(1, 2, 3);
        let mut v = DynVector::from_slice(&[10, 20, 30]);
        v += &a * 2 - a;
        assert_eq!(v, [11, 22, 33]);
        v.try_mul_assign(vec3(2, 2, 2)).unwrap();
        assert_eq!(v, [22, 44, 66]);
    }

    #[test]
    #[cfg(not(feature = "unchecked"))]
    #[should_panic(expected = "incompatible vector expression sizes")]
    fn mismatched_add_assign() {
        let mut v = DynVector::from_slice(&[1, 2]);
        v += vec3(1, 2, 3);
    }

    #[test]
    fn equality() {
        assert_eq!(vec2(1, 2), [1, 2]);
        assert_ne!(vec2(1, 2), [2, 1]);
        assert_eq!(DynVector::from_slice(&[1, 2]), vec2(1, 2));
        assert_ne!(DynVector::from_slice(&[1, 2, 3]), DynVector::from_slice(&[1, 2]));
    }

    #[test]
    fn approx() {
        let a = vec3(0.1, 0.2, 0.3) * 3.0;
        assert_approx_eq!(a.eval(), vec3(0.3, 0.6, 0.9)).abs(1e-12);
        assert_approx_eq!(a.eval(), DynVector::from_slice(&[0.3, 0.6, 0.9])).abs(1e-12);
        assert_approx_ne!(vec2(0.3, 0.6), DynVector::from_slice(&[0.3, 0.6, 0.9]));
    }
}
