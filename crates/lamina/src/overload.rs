//! `std::ops` operator implementations for containers and expression nodes.
//!
//! Elementwise operators (`+`, `-`, unary `-`, `/ scalar`) build lazy expression nodes. `*` has
//! to distinguish between its right operand being a scalar, a vector or a matrix, which is done
//! through the [`Operand`] trait: every operand type declares its [`Operand::Kind`], and the
//! [`VectorMul`] and [`MatrixMul`] traits have one blanket impl per kind. Products involving a
//! matrix are evaluated eagerly; scaling by a scalar stays lazy.
//!
//! Operators cannot return errors, so size mismatches between dynamically sized operands panic.
//! The free functions in the crate root ([`hadamard`][crate::hadamard],
//! [`mat_mul`][crate::mat_mul], ...) and the `try_*` assignment methods report them as
//! [`Error`][crate::Error]s instead.

use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::{
    algebra,
    error::OrPanic,
    expr::*,
    functor::{BinaryOp, OpAdd, OpDiv, OpMul, OpNeg, OpSub, UnaryOp},
    promote::{Promote, PromotedElem},
    storage::{MatrixAlloc, MatrixBuf, MatrixOf, VectorAlloc, VectorBuf, VectorOf},
    DimPromote, Layout, Matrix, Number, Scalar, Vector,
};
use crate::layout::{Basis, BasisPromote, LayoutPromote};

/// Declares what kind of right-hand operand of `*` a type is.
pub trait Operand {
    /// One of [`ScalarKind`], [`VectorKind`] or [`MatrixKind`].
    type Kind;
}

/// [`Operand::Kind`] of the primitive scalar types.
#[derive(Debug)]
pub enum ScalarKind {}

/// [`Operand::Kind`] of vector containers and expressions.
#[derive(Debug)]
pub enum VectorKind {}

/// [`Operand::Kind`] of matrix containers and expressions.
#[derive(Debug)]
pub enum MatrixKind {}

/// Computes `lhs * self` for a vector expression `lhs`.
pub trait VectorMul<Lhs, Kind> {
    type Output;

    fn mul_vector(self, lhs: Lhs) -> Self::Output;
}

/// Computes `lhs * self` for a matrix expression `lhs`.
pub trait MatrixMul<Lhs, Kind> {
    type Output;

    fn mul_matrix(self, lhs: Lhs) -> Self::Output;
}

// vector * scalar
impl<Lhs, K> VectorMul<Lhs, ScalarKind> for K
where
    Lhs: VectorExpr,
    K: Scalar,
    OpMul: BinaryOp<Lhs::Elem, K>,
{
    type Output = VecScalar<Lhs, K, OpMul>;

    #[inline]
    fn mul_vector(self, lhs: Lhs) -> Self::Output {
        VecScalar::new(lhs, self)
    }
}

// vector * matrix
impl<Lhs, M> VectorMul<Lhs, MatrixKind> for M
where
    Lhs: VectorExpr,
    M: MatrixExpr,
    Lhs::Size: DimPromote<M::Rows>,
    Lhs::Elem: Promote<M::Elem>,
    PromotedElem<Lhs::Elem, M::Elem>: Number,
    M::Cols: VectorAlloc<PromotedElem<Lhs::Elem, M::Elem>>,
{
    type Output = VectorOf<M::Cols, PromotedElem<Lhs::Elem, M::Elem>>;

    #[track_caller]
    fn mul_vector(self, lhs: Lhs) -> Self::Output {
        algebra::vec_mat_mul(lhs, self).or_panic()
    }
}

// matrix * scalar
impl<Lhs, K> MatrixMul<Lhs, ScalarKind> for K
where
    Lhs: MatrixExpr,
    K: Scalar,
    OpMul: BinaryOp<Lhs::Elem, K>,
{
    type Output = MatScalar<Lhs, K, OpMul>;

    #[inline]
    fn mul_matrix(self, lhs: Lhs) -> Self::Output {
        MatScalar::new(lhs, self)
    }
}

// matrix * vector
impl<Lhs, V> MatrixMul<Lhs, VectorKind> for V
where
    Lhs: MatrixExpr,
    V: VectorExpr,
    Lhs::Cols: DimPromote<V::Size>,
    Lhs::Elem: Promote<V::Elem>,
    PromotedElem<Lhs::Elem, V::Elem>: Number,
    Lhs::Rows: VectorAlloc<PromotedElem<Lhs::Elem, V::Elem>>,
{
    type Output = VectorOf<Lhs::Rows, PromotedElem<Lhs::Elem, V::Elem>>;

    #[track_caller]
    fn mul_matrix(self, lhs: Lhs) -> Self::Output {
        algebra::mat_vec_mul(lhs, self).or_panic()
    }
}

// matrix * matrix
impl<Lhs, M> MatrixMul<Lhs, MatrixKind> for M
where
    Lhs: MatrixExpr,
    M: MatrixExpr,
    Lhs::Cols: DimPromote<M::Rows>,
    Lhs::Elem: Promote<M::Elem>,
    PromotedElem<Lhs::Elem, M::Elem>: Number,
    Lhs::Rows: MatrixAlloc<PromotedElem<Lhs::Elem, M::Elem>, M::Cols>,
    Lhs::Basis: BasisPromote<M::Basis>,
    Lhs::Layout: LayoutPromote<M::Layout>,
{
    type Output = MatrixOf<
        Lhs::Rows,
        M::Cols,
        PromotedElem<Lhs::Elem, M::Elem>,
        <Lhs::Basis as BasisPromote<M::Basis>>::Output,
        <Lhs::Layout as LayoutPromote<M::Layout>>::Output,
    >;

    #[track_caller]
    fn mul_matrix(self, lhs: Lhs) -> Self::Output {
        algebra::mat_mul(lhs, self).or_panic()
    }
}

macro_rules! scalar_operands {
    ($($t:ty),+) => {
        $(
            impl Operand for $t {
                type Kind = ScalarKind;
            }
        )+
    };
}
scalar_operands!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64);

// `scalar * expr` for every primitive scalar type, expanded once per expression type.
macro_rules! scalar_lhs_mul {
    (@each $gen:tt $ty:ty, $expr:ident, $node:ident; $($scalar:ty),+) => {
        $(
            scalar_lhs_mul!(@one $gen $ty, $expr, $node, $scalar);
        )+
    };
    (@one [$($gen:tt)*] $ty:ty, $expr:ident, $node:ident, $scalar:ty) => {
        impl<$($gen)*> Mul<$ty> for $scalar
        where
            $ty: $expr,
            OpMul: BinaryOp<<$ty as $expr>::Elem, $scalar>,
        {
            type Output = $node<$ty, $scalar, OpMul>;

            #[inline]
            fn mul(self, rhs: $ty) -> Self::Output {
                $node::new(rhs, self)
            }
        }
    };
    ($gen:tt $ty:ty, $expr:ident, $node:ident) => {
        scalar_lhs_mul!(@each $gen $ty, $expr, $node;
            u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64);
    };
}

macro_rules! impl_vector_ops {
    ($([$($gen:tt)*] $ty:ty;)+) => {
        $(
            impl<$($gen)*> Operand for $ty {
                type Kind = VectorKind;
            }

            impl<$($gen)*, Rhs> Add<Rhs> for $ty
            where
                $ty: VectorExpr,
                Rhs: VectorExpr,
                <$ty as VectorExpr>::Size: DimPromote<Rhs::Size>,
                OpAdd: BinaryOp<<$ty as VectorExpr>::Elem, Rhs::Elem>,
            {
                type Output = VecBinary<$ty, Rhs, OpAdd>;

                #[track_caller]
                fn add(self, rhs: Rhs) -> Self::Output {
                    VecBinary::new(self, rhs).or_panic()
                }
            }

            impl<$($gen)*, Rhs> Sub<Rhs> for $ty
            where
                $ty: VectorExpr,
                Rhs: VectorExpr,
                <$ty as VectorExpr>::Size: DimPromote<Rhs::Size>,
                OpSub: BinaryOp<<$ty as VectorExpr>::Elem, Rhs::Elem>,
            {
                type Output = VecBinary<$ty, Rhs, OpSub>;

                #[track_caller]
                fn sub(self, rhs: Rhs) -> Self::Output {
                    VecBinary::new(self, rhs).or_panic()
                }
            }

            impl<$($gen)*> Neg for $ty
            where
                $ty: VectorExpr,
                OpNeg: UnaryOp<<$ty as VectorExpr>::Elem>,
            {
                type Output = VecUnary<$ty, OpNeg>;

                #[inline]
                fn neg(self) -> Self::Output {
                    VecUnary::new(self)
                }
            }

            impl<$($gen)*, Rhs> Mul<Rhs> for $ty
            where
                $ty: VectorExpr,
                Rhs: Operand + VectorMul<$ty, <Rhs as Operand>::Kind>,
            {
                type Output = <Rhs as VectorMul<$ty, <Rhs as Operand>::Kind>>::Output;

                #[track_caller]
                fn mul(self, rhs: Rhs) -> Self::Output {
                    rhs.mul_vector(self)
                }
            }

            impl<$($gen)*, Sc> Div<Sc> for $ty
            where
                $ty: VectorExpr,
                Sc: Scalar,
                OpDiv: BinaryOp<<$ty as VectorExpr>::Elem, Sc>,
            {
                type Output = VecScalar<$ty, Sc, OpDiv>;

                #[inline]
                fn div(self, rhs: Sc) -> Self::Output {
                    VecScalar::new(self, rhs)
                }
            }

            scalar_lhs_mul!([$($gen)*] $ty, VectorExpr, VecScalar);
        )+
    };
}

macro_rules! impl_matrix_ops {
    ($([$($gen:tt)*] $ty:ty;)+) => {
        $(
            impl<$($gen)*> Operand for $ty {
                type Kind = MatrixKind;
            }

            impl<$($gen)*, Rhs> Add<Rhs> for $ty
            where
                $ty: MatrixExpr,
                Rhs: MatrixExpr,
                <$ty as MatrixExpr>::Rows: DimPromote<Rhs::Rows>,
                <$ty as MatrixExpr>::Cols: DimPromote<Rhs::Cols>,
                <$ty as MatrixExpr>::Basis: BasisPromote<Rhs::Basis>,
                <$ty as MatrixExpr>::Layout: LayoutPromote<Rhs::Layout>,
                OpAdd: BinaryOp<<$ty as MatrixExpr>::Elem, Rhs::Elem>,
            {
                type Output = MatBinary<$ty, Rhs, OpAdd>;

                #[track_caller]
                fn add(self, rhs: Rhs) -> Self::Output {
                    MatBinary::new(self, rhs).or_panic()
                }
            }

            impl<$($gen)*, Rhs> Sub<Rhs> for $ty
            where
                $ty: MatrixExpr,
                Rhs: MatrixExpr,
                <$ty as MatrixExpr>::Rows: DimPromote<Rhs::Rows>,
                <$ty as MatrixExpr>::Cols: DimPromote<Rhs::Cols>,
                <$ty as MatrixExpr>::Basis: BasisPromote<Rhs::Basis>,
                <$ty as MatrixExpr>::Layout: LayoutPromote<Rhs::Layout>,
                OpSub: BinaryOp<<$ty as MatrixExpr>::Elem, Rhs::Elem>,
            {
                type Output = MatBinary<$ty, Rhs, OpSub>;

                #[track_caller]
                fn sub(self, rhs: Rhs) -> Self::Output {
                    MatBinary::new(self, rhs).or_panic()
                }
            }

            impl<$($gen)*> Neg for $ty
            where
                $ty: MatrixExpr,
                OpNeg: UnaryOp<<$ty as MatrixExpr>::Elem>,
            {
                type Output = MatUnary<$ty, OpNeg>;

                #[inline]
                fn neg(self) -> Self::Output {
                    MatUnary::new(self)
                }
            }

            impl<$($gen)*, Rhs> Mul<Rhs> for $ty
            where
                $ty: MatrixExpr,
                Rhs: Operand + MatrixMul<$ty, <Rhs as Operand>::Kind>,
            {
                type Output = <Rhs as MatrixMul<$ty, <Rhs as Operand>::Kind>>::Output;

                #[track_caller]
                fn mul(self, rhs: Rhs) -> Self::Output {
                    rhs.mul_matrix(self)
                }
            }

            impl<$($gen)*, Sc> Div<Sc> for $ty
            where
                $ty: MatrixExpr,
                Sc: Scalar,
                OpDiv: BinaryOp<<$ty as MatrixExpr>::Elem, Sc>,
            {
                type Output = MatScalar<$ty, Sc, OpDiv>;

                #[inline]
                fn div(self, rhs: Sc) -> Self::Output {
                    MatScalar::new(self, rhs)
                }
            }

            scalar_lhs_mul!([$($gen)*] $ty, MatrixExpr, MatScalar);
        )+
    };
}

impl_vector_ops!(
    [S: VectorBuf] Vector<S>;
    ['a, S: VectorBuf] &'a Vector<S>;
    [E, Op] VecUnary<E, Op>;
    [L, R, Op] VecBinary<L, R, Op>;
    [E, K, Op] VecScalar<E, K, Op>;
    [E, F] VecMap<E, F>;
    [L, R] Cross<L, R>;
    [T] Splat<T>;
    [E] Row<E>;
    [E] Column<E>;
    [E] BasisVector<E>;
);

impl_matrix_ops!(
    [S: MatrixBuf, B: Basis, L: Layout] Matrix<S, B, L>;
    ['a, S: MatrixBuf, B: Basis, L: Layout] &'a Matrix<S, B, L>;
    [E, Op] MatUnary<E, Op>;
    [L, R, Op] MatBinary<L, R, Op>;
    [E, K, Op] MatScalar<E, K, Op>;
    [E] Transposed<E>;
    [L, R] Outer<L, R>;
);

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn scalar_on_either_side() {
        let v = vec3(1.0f32, 2.0, 3.0);
        assert_eq!((v * 2.0f32).eval(), [2.0, 4.0, 6.0]);
        assert_eq!((2.0f32 * v).eval(), [2.0, 4.0, 6.0]);
        assert_eq!((v / 2.0f32).eval(), [0.5, 1.0, 1.5]);

        let m = Mat2::from_rows([[1, 2], [3, 4]]);
        assert_eq!((3i32 * m).eval(), [[3, 6], [9, 12]]);
    }

    #[test]
    fn scalar_promotion() {
        let v = vec2(1i32, 2);
        let scaled: Vec2<f64> = (v * 0.5f64).eval();
        assert_eq!(scaled, vec2(0.5, 1.0));
    }

    #[test]
    fn products() {
        #[rustfmt::skip]
        let m = Mat::<i32, 2, 3>::from_rows([
            [1, 2, 3],
            [4, 5, 6],
        ]);
        let v = vec3(1, 0, -1);
        assert_eq!(m * v, [-2, -2]);
        assert_eq!(vec2(1, 1) * m, [5, 7, 9]);
        assert_eq!(m * m.transpose(), [[14, 32], [32, 77]]);
    }

    #[test]
    fn nested() {
        let a = vec3(1, 2, 3);
        let b = vec3(4, 5, 6);
        let c = vec3(7, 8, 9);
        let e = (a + b) * 2 - c / 1 + -a;
        assert_eq!(e.eval(), [2, 4, 6]);
    }

    #[test]
    #[cfg(not(feature = "unchecked"))]
    #[should_panic(expected = "incompatible vector expression sizes")]
    fn operator_panics() {
        let a = DynVector::from_slice(&[1, 2]);
        let b = DynVector::from_slice(&[1, 2, 3]);
        let _ = &a + &b;
    }

    #[test]
    #[cfg(not(feature = "unchecked"))]
    #[should_panic(expected = "incompatible matrix product sizes")]
    fn product_panics() {
        let a = DynMatrix::<f32>::zeros(2, 3);
        let b = DynMatrix::<f32>::zeros(2, 3);
        let _ = &a * &b;
    }
}
