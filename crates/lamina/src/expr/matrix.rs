//! Matrix expression nodes.

use std::marker::PhantomData;

use crate::{
    check,
    config::{DefaultBasis, DefaultLayout},
    dim::PromotedDim,
    functor::{BinaryOp, OpMul, UnaryOp},
    layout::{BasisPromote, LayoutPromote},
    DimPromote, MatrixExpr, MatrixExprMut, Result, VectorExpr,
};

/// Applies a [`UnaryOp`] to every element of a matrix expression.
#[derive(Debug, Clone, Copy)]
pub struct MatUnary<E, Op> {
    expr: E,
    _op: PhantomData<Op>,
}

impl<E, Op> MatUnary<E, Op> {
    #[inline]
    pub fn new(expr: E) -> Self {
        Self {
            expr,
            _op: PhantomData,
        }
    }
}

impl<E: MatrixExpr, Op: UnaryOp<E::Elem>> MatrixExpr for MatUnary<E, Op> {
    type Elem = Op::Output;
    type Rows = E::Rows;
    type Cols = E::Cols;
    type Basis = E::Basis;
    type Layout = E::Layout;

    #[inline]
    fn shape(&self) -> (E::Rows, E::Cols) {
        self.expr.shape()
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> Op::Output {
        Op::apply(self.expr.get(row, col))
    }
}

/// Combines two matrix expressions elementwise with a [`BinaryOp`].
///
/// The basis and layout of the result are those of the operands if they agree, and the defaults
/// from [`config`][crate::config] otherwise.
#[derive(Debug, Clone, Copy)]
pub struct MatBinary<L, R, Op> {
    lhs: L,
    rhs: R,
    _op: PhantomData<Op>,
}

impl<L: MatrixExpr, R: MatrixExpr, Op> MatBinary<L, R, Op>
where
    L::Rows: DimPromote<R::Rows>,
    L::Cols: DimPromote<R::Cols>,
{
    /// Creates the node, checking that the operand shapes are compatible.
    #[inline]
    pub fn new(lhs: L, rhs: R) -> Result<Self> {
        check::matrices(lhs.shape(), rhs.shape())?;
        Ok(Self {
            lhs,
            rhs,
            _op: PhantomData,
        })
    }
}

impl<L, R, Op> MatrixExpr for MatBinary<L, R, Op>
where
    L: MatrixExpr,
    R: MatrixExpr,
    L::Rows: DimPromote<R::Rows>,
    L::Cols: DimPromote<R::Cols>,
    L::Basis: BasisPromote<R::Basis>,
    L::Layout: LayoutPromote<R::Layout>,
    Op: BinaryOp<L::Elem, R::Elem>,
{
    type Elem = Op::Output;
    type Rows = PromotedDim<L::Rows, R::Rows>;
    type Cols = PromotedDim<L::Cols, R::Cols>;
    type Basis = <L::Basis as BasisPromote<R::Basis>>::Output;
    type Layout = <L::Layout as LayoutPromote<R::Layout>>::Output;

    #[inline]
    fn shape(&self) -> (Self::Rows, Self::Cols) {
        let (r1, c1) = self.lhs.shape();
        let (r2, c2) = self.rhs.shape();
        (r1.promote(r2), c1.promote(c2))
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> Op::Output {
        Op::apply(self.lhs.get(row, col), self.rhs.get(row, col))
    }
}

/// Combines every element of a matrix expression with a scalar (the right operand of `Op`).
#[derive(Debug, Clone, Copy)]
pub struct MatScalar<E, K, Op> {
    expr: E,
    scalar: K,
    _op: PhantomData<Op>,
}

impl<E, K, Op> MatScalar<E, K, Op> {
    #[inline]
    pub fn new(expr: E, scalar: K) -> Self {
        Self {
            expr,
            scalar,
            _op: PhantomData,
        }
    }
}

impl<E, K, Op> MatrixExpr for MatScalar<E, K, Op>
where
    E: MatrixExpr,
    K: Copy,
    Op: BinaryOp<E::Elem, K>,
{
    type Elem = Op::Output;
    type Rows = E::Rows;
    type Cols = E::Cols;
    type Basis = E::Basis;
    type Layout = E::Layout;

    #[inline]
    fn shape(&self) -> (E::Rows, E::Cols) {
        self.expr.shape()
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> Op::Output {
        Op::apply(self.expr.get(row, col), self.scalar)
    }
}

/// A matrix expression with rows and columns swapped. Created by [`MatrixExpr::transpose`].
///
/// Transposing keeps the basis and layout tags. Transposing twice yields a `Transposed` of a
/// `Transposed`, which reads the same elements as the original expression.
#[derive(Debug, Clone, Copy)]
pub struct Transposed<E> {
    expr: E,
}

impl<E> Transposed<E> {
    #[inline]
    pub fn new(expr: E) -> Self {
        Self { expr }
    }
}

impl<E: MatrixExpr> MatrixExpr for Transposed<E> {
    type Elem = E::Elem;
    type Rows = E::Cols;
    type Cols = E::Rows;
    type Basis = E::Basis;
    type Layout = E::Layout;

    #[inline]
    fn shape(&self) -> (E::Cols, E::Rows) {
        let (rows, cols) = self.expr.shape();
        (cols, rows)
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> E::Elem {
        self.expr.get(col, row)
    }
}

impl<E: MatrixExprMut> MatrixExprMut for Transposed<E> {
    #[inline]
    fn get_mut(&mut self, row: usize, col: usize) -> &mut E::Elem {
        self.expr.get_mut(col, row)
    }
}

/// Outer product of two vector expressions. Created by [`VectorExpr::outer`].
#[derive(Debug, Clone, Copy)]
pub struct Outer<L, R> {
    lhs: L,
    rhs: R,
}

impl<L, R> Outer<L, R> {
    #[inline]
    pub fn new(lhs: L, rhs: R) -> Self {
        Self { lhs, rhs }
    }
}

impl<L, R> MatrixExpr for Outer<L, R>
where
    L: VectorExpr,
    R: VectorExpr,
    OpMul: BinaryOp<L::Elem, R::Elem>,
{
    type Elem = <OpMul as BinaryOp<L::Elem, R::Elem>>::Output;
    type Rows = L::Size;
    type Cols = R::Size;
    type Basis = DefaultBasis;
    type Layout = DefaultLayout;

    #[inline]
    fn shape(&self) -> (L::Size, R::Size) {
        (self.lhs.dim(), self.rhs.dim())
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> Self::Elem {
        OpMul::apply(self.lhs.get(row), self.rhs.get(col))
    }
}
