//! Operator functors.
//!
//! Expression nodes are parameterized by a stateless operator type that computes one result
//! element from one or two operand elements. The functor also declares the element type of the
//! result, which is how a node deduces its own element type.

use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::promote::Promote;

/// An operator taking one element.
pub trait UnaryOp<A> {
    /// Element type of the result.
    type Output: Copy;

    fn apply(a: A) -> Self::Output;
}

/// An operator taking two elements.
pub trait BinaryOp<A, B> {
    /// Element type of the result.
    type Output: Copy;

    fn apply(a: A, b: B) -> Self::Output;
}

/// Unary `-`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpNeg;

/// Unary `+` (returns its operand unchanged).
#[derive(Debug, Clone, Copy, Default)]
pub struct OpPlus;

/// Binary `+`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpAdd;

/// Binary `-`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpSub;

/// Binary `*`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpMul;

/// Binary `/`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpDiv;

impl<A: Copy + Neg<Output = A>> UnaryOp<A> for OpNeg {
    type Output = A;

    #[inline]
    fn apply(a: A) -> A {
        -a
    }
}

impl<A: Copy> UnaryOp<A> for OpPlus {
    type Output = A;

    #[inline]
    fn apply(a: A) -> A {
        a
    }
}

macro_rules! binary_op {
    ($($op:ident: $tr:ident, $method:ident;)+) => {
        $(
            impl<A, B> BinaryOp<A, B> for $op
            where
                A: Promote<B>,
                A::Output: $tr<Output = A::Output>,
            {
                type Output = A::Output;

                #[inline]
                fn apply(a: A, b: B) -> A::Output {
                    a.promote_lhs().$method(A::promote_rhs(b))
                }
            }
        )+
    };
}
binary_op!(
    OpAdd: Add, add;
    OpSub: Sub, sub;
    OpMul: Mul, mul;
    OpDiv: Div, div;
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply() {
        assert_eq!(<OpNeg as UnaryOp<i32>>::apply(4), -4);
        assert_eq!(<OpPlus as UnaryOp<u8>>::apply(4), 4);
        assert_eq!(<OpAdd as BinaryOp<f32, f64>>::apply(1.0, 2.0), 3.0f64);
        assert_eq!(<OpSub as BinaryOp<i8, i32>>::apply(1, 2), -1i32);
        assert_eq!(<OpMul as BinaryOp<u16, f32>>::apply(3, 0.5), 1.5f32);
        assert_eq!(<OpDiv as BinaryOp<f64, f64>>::apply(1.0, 4.0), 0.25);
    }
}
