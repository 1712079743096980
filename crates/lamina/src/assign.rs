//! The assignment engine.
//!
//! Every evaluation ends up here: an expression is written into a destination element by element,
//! combining each destination element with the source element through an [`AssignOp`].
//!
//! Destinations whose size is known at compile time and does not exceed the unroll limit (see
//! [`config::UNROLL_LIMIT`]) are written by a fully unrolled sequence of element assignments, in
//! order of increasing index. Everything else uses a plain loop with the same visiting order, so
//! both paths produce identical results.

use std::ops::{Add, Div, Mul, Sub};

use crate::{
    check, config, Dim, DimPromote, MatrixExpr, MatrixExprMut, Result, VectorExpr, VectorExprMut,
};

/// Combines a destination element with a source element.
pub trait AssignOp<T, S> {
    /// `true` if assigning with this operator resizes owned dynamic destinations to the size of
    /// the source.
    const RESIZES: bool = false;

    fn apply(dest: &mut T, src: S);
}

/// `dest = src`
#[derive(Debug, Clone, Copy, Default)]
pub struct OpAssign;

/// `dest += src`
#[derive(Debug, Clone, Copy, Default)]
pub struct OpAddAssign;

/// `dest -= src`
#[derive(Debug, Clone, Copy, Default)]
pub struct OpSubAssign;

/// `dest *= src`
#[derive(Debug, Clone, Copy, Default)]
pub struct OpMulAssign;

/// `dest /= src`
#[derive(Debug, Clone, Copy, Default)]
pub struct OpDivAssign;

impl<T: From<S>, S> AssignOp<T, S> for OpAssign {
    const RESIZES: bool = true;

    #[inline]
    fn apply(dest: &mut T, src: S) {
        *dest = T::from(src);
    }
}

macro_rules! compound_assign {
    ($($op:ident: $tr:ident, $method:ident;)+) => {
        $(
            impl<T, S> AssignOp<T, S> for $op
            where
                T: Copy + From<S> + $tr<Output = T>,
            {
                #[inline]
                fn apply(dest: &mut T, src: S) {
                    *dest = (*dest).$method(T::from(src));
                }
            }
        )+
    };
}
compound_assign!(
    OpAddAssign: Add, add;
    OpSubAssign: Sub, sub;
    OpMulAssign: Mul, mul;
    OpDivAssign: Div, div;
);

/// Evaluates `src` into `dest`, after checking (and possibly fitting) the destination size.
pub fn vector<Op, D, E>(dest: &mut D, src: &E) -> Result<()>
where
    D: VectorExprMut + ?Sized,
    E: VectorExpr + ?Sized,
    D::Size: DimPromote<E::Size>,
    Op: AssignOp<D::Elem, E::Elem>,
{
    if <Op as AssignOp<D::Elem, E::Elem>>::RESIZES && !E::Size::BROADCAST {
        dest.fit(src.size());
    }
    check::vectors(dest.dim(), src.dim())?;
    run_vector::<Op, D, E>(dest, src);
    Ok(())
}

/// Evaluates `src` into `dest`, after checking (and possibly fitting) the destination shape.
///
/// The destination is only resized if its fixed dimensions already match `src`, so a failed check
/// leaves it untouched.
pub fn matrix<Op, D, E>(dest: &mut D, src: &E) -> Result<()>
where
    D: MatrixExprMut + ?Sized,
    E: MatrixExpr + ?Sized,
    D::Rows: DimPromote<E::Rows>,
    D::Cols: DimPromote<E::Cols>,
    Op: AssignOp<D::Elem, E::Elem>,
{
    let (rows, cols) = (src.rows(), src.cols());
    if <Op as AssignOp<D::Elem, E::Elem>>::RESIZES
        && D::Rows::try_from_usize(rows).is_some()
        && D::Cols::try_from_usize(cols).is_some()
    {
        dest.fit(rows, cols);
    }
    check::matrices(dest.shape(), src.shape())?;
    run_matrix::<Op, D, E>(dest, src);
    Ok(())
}

/// Evaluates `src` into `dest` without any checks.
///
/// The destination determines the number of elements written.
pub(crate) fn run_vector<Op, D, E>(dest: &mut D, src: &E)
where
    D: VectorExprMut + ?Sized,
    E: VectorExpr + ?Sized,
    Op: AssignOp<D::Elem, E::Elem>,
{
    let len = dest.size();
    for_each_index(D::Size::FIXED, len, |i| Op::apply(dest.get_mut(i), src.get(i)));
}

/// Evaluates `src` into `dest` without any checks, visiting elements in row-major order.
pub(crate) fn run_matrix<Op, D, E>(dest: &mut D, src: &E)
where
    D: MatrixExprMut + ?Sized,
    E: MatrixExpr + ?Sized,
    Op: AssignOp<D::Elem, E::Elem>,
{
    match (D::Rows::FIXED, D::Cols::FIXED) {
        (Some(rows), Some(cols)) if rows * cols <= config::EFFECTIVE_UNROLL_LIMIT => {
            unrolled(rows * cols, |k| {
                let (r, c) = (k / cols, k % cols);
                Op::apply(dest.get_mut(r, c), src.get(r, c));
            });
        }
        _ => {
            let (rows, cols) = (dest.rows(), dest.cols());
            for r in 0..rows {
                for c in 0..cols {
                    Op::apply(dest.get_mut(r, c), src.get(r, c));
                }
            }
        }
    }
}

/// Calls `f` with every index in `0..len`, unrolled if `fixed` is small enough.
#[inline]
pub(crate) fn for_each_index<F: FnMut(usize)>(fixed: Option<usize>, len: usize, f: F) {
    match fixed {
        Some(n) if n <= config::EFFECTIVE_UNROLL_LIMIT => unrolled(n, f),
        _ => looped(len, f),
    }
}

#[inline]
pub(crate) fn looped<F: FnMut(usize)>(len: usize, mut f: F) {
    for i in 0..len {
        f(i);
    }
}

// Expands to one `match` arm per count up to `MAX_UNROLL`, each calling `f` with the indices
// `0..count` in order.
macro_rules! unroll_arms {
    ($n:expr, $f:ident; [$($done:tt)*]; ) => {
        match $n {
            0 => {}
            $($done)*
            n => looped(n, &mut $f),
        }
    };
    ($n:expr, $f:ident; [$($done:tt)*]; ($count:literal: $($i:literal)+) $($rest:tt)*) => {
        unroll_arms!($n, $f; [$($done)* $count => { $($f($i);)+ }]; $($rest)*)
    };
}

/// Calls `f` with every index in `0..n`, as straight-line code for `n <= MAX_UNROLL`.
#[inline(always)]
pub(crate) fn unrolled<F: FnMut(usize)>(n: usize, mut f: F) {
    const _: () = assert!(config::MAX_UNROLL == 32);
    unroll_arms!(n, f; [];
        (1: 0)
        (2: 0 1)
        (3: 0 1 2)
        (4: 0 1 2 3)
        (5: 0 1 2 3 4)
        (6: 0 1 2 3 4 5)
        (7: 0 1 2 3 4 5 6)
        (8: 0 1 2 3 4 5 6 7)
        (9: 0 1 2 3 4 5 6 7 8)
        (10: 0 1 2 3 4 5 6 7 8 9)
        (11: 0 1 2 3 4 5 6 7 8 9 10)
        (12: 0 1 2 3 4 5 6 7 8 9 10 11)
        (13: 0 1 2 3 4 5 6 7 8 9 10 11 12)
        (14: 0 1 2 3 4 5 6 7 8 9 10 11 12 13)
        (15: 0 1 2 3 4 5 6 7 8 9 10 11 12 13 14)
        (16: 0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15)
        (17: 0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16)
        (18: 0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17)
        (19: 0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18)
        (20: 0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19)
        (21: 0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20)
        (22: 0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21)
        (23: 0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22)
        (24: 0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23)
        (25: 0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24)
        (26: 0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24 25)
        (27: 0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24 25 26)
        (28: 0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24 25 26 27)
        (29: 0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24 25 26 27 28)
        (30: 0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24 25 26 27 28 29)
        (31: 0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24 25 26 27 28 29 30)
        (32: 0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24 25 26 27 28 29 30 31)
    )
}

#[cfg(test)]
mod tests {
    use super::{
        looped, matrix, run_matrix, unrolled, vector, AssignOp, OpAddAssign, OpAssign,
        OpDivAssign, OpMulAssign, OpSubAssign,
    };
    use crate::*;

    #[test]
    fn unrolled_matches_looped() {
        for n in 0..=40 {
            let mut a = Vec::new();
            let mut b = Vec::new();
            unrolled(n, |i| a.push(i));
            looped(n, |i| b.push(i));
            assert_eq!(a, b, "n = {n}");
            assert_eq!(a, (0..n).collect::<Vec<_>>());
        }
    }

    #[test]
    fn compound() {
        let mut x = 6.0f64;
        OpAddAssign::apply(&mut x, 2.0f32);
        assert_eq!(x, 8.0);
        OpSubAssign::apply(&mut x, 1i32);
        assert_eq!(x, 7.0);
        OpMulAssign::apply(&mut x, 2u8);
        assert_eq!(x, 14.0);
        OpDivAssign::apply(&mut x, 4.0f64);
        assert_eq!(x, 3.5);
        OpAssign::apply(&mut x, 1u32);
        assert_eq!(x, 1.0);
    }

    #[test]
    fn fits_owned_dynamic() {
        let mut v = DynVector::<f32>::zeros(0);
        vector::<OpAssign, _, _>(&mut v, &vec3(1.0f32, 2.0, 3.0)).unwrap();
        assert_eq!(v, [1.0, 2.0, 3.0]);

        // compound assignment does not resize
        let mut v = DynVector::<f32>::zeros(2);
        assert_eq!(
            vector::<OpAddAssign, _, _>(&mut v, &vec3(1.0f32, 2.0, 3.0)),
            Err(Error::IncompatibleVectorSizes)
        );

        // broadcast sources keep the destination size
        let mut v = DynVector::<f32>::zeros(3);
        vector::<OpAssign, _, _>(&mut v, &splat(7.0f32)).unwrap();
        assert_eq!(v, [7.0, 7.0, 7.0]);
    }

    #[test]
    fn matrix_paths() {
        // 3x3 is unrolled, 6x6 is looped (with the default limit), both row-major
        let small = Mat3::<i32>::from_fn(|r, c| (r * 3 + c) as i32);
        let mut dest = DynMatrix::<i32>::zeros(0, 0);
        matrix::<OpAssign, _, _>(&mut dest, &small).unwrap();
        assert_eq!(dest, small);

        let big = Mat::<i32, 6, 6>::from_fn(|r, c| (r * 6 + c) as i32);
        let mut dest = Mat::<i32, 6, 6>::ZERO;
        run_matrix::<OpAssign, _, _>(&mut dest, &big);
        assert_eq!(dest, big);
    }

    #[test]
    fn partially_dynamic_destination() {
        let buf = HeapBuf::from_vec(vec![1, 2, 3, 4], Const::<2>, Dyn(2)).unwrap();
        let mut dest: Matrix<HeapBuf<i32, Const<2>, Dyn>> = Matrix::from_buf(buf);

        let wide = Mat2x3::from_rows([[1, 2, 3], [4, 5, 6]]);
        matrix::<OpAssign, _, _>(&mut dest, &wide).unwrap();
        assert_eq!((dest.rows(), dest.cols()), (2, 3));
        assert_eq!(dest, wide);

        if config::SIZE_CHECKS {
            let before = dest.clone();
            assert_eq!(
                matrix::<OpAssign, _, _>(&mut dest, &DynMatrix::<i32>::zeros(3, 3)),
                Err(Error::IncompatibleMatrixSizes)
            );
            assert_eq!(dest, before);
        }
    }
}
