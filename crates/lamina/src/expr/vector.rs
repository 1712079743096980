//! Vector expression nodes.

use std::marker::PhantomData;

use crate::{
    check,
    dim::PromotedDim,
    functor::{BinaryOp, UnaryOp},
    promote::{Promote, PromotedElem},
    Const, DimPromote, Number, Result, Unit, VectorExpr,
};

/// Applies a [`UnaryOp`] to every element of a vector expression.
#[derive(Debug, Clone, Copy)]
pub struct VecUnary<E, Op> {
    expr: E,
    _op: PhantomData<Op>,
}

impl<E, Op> VecUnary<E, Op> {
    #[inline]
    pub fn new(expr: E) -> Self {
        Self {
            expr,
            _op: PhantomData,
        }
    }
}

impl<E: VectorExpr, Op: UnaryOp<E::Elem>> VectorExpr for VecUnary<E, Op> {
    type Elem = Op::Output;
    type Size = E::Size;

    #[inline]
    fn dim(&self) -> E::Size {
        self.expr.dim()
    }

    #[inline]
    fn get(&self, i: usize) -> Op::Output {
        Op::apply(self.expr.get(i))
    }
}

/// Combines two vector expressions elementwise with a [`BinaryOp`].
#[derive(Debug, Clone, Copy)]
pub struct VecBinary<L, R, Op> {
    lhs: L,
    rhs: R,
    _op: PhantomData<Op>,
}

impl<L: VectorExpr, R: VectorExpr, Op> VecBinary<L, R, Op>
where
    L::Size: DimPromote<R::Size>,
{
    /// Creates the node, checking that the operand sizes are compatible.
    #[inline]
    pub fn new(lhs: L, rhs: R) -> Result<Self> {
        check::vectors(lhs.dim(), rhs.dim())?;
        Ok(Self {
            lhs,
            rhs,
            _op: PhantomData,
        })
    }
}

impl<L, R, Op> VectorExpr for VecBinary<L, R, Op>
where
    L: VectorExpr,
    R: VectorExpr,
    L::Size: DimPromote<R::Size>,
    Op: BinaryOp<L::Elem, R::Elem>,
{
    type Elem = Op::Output;
    type Size = PromotedDim<L::Size, R::Size>;

    #[inline]
    fn dim(&self) -> Self::Size {
        self.lhs.dim().promote(self.rhs.dim())
    }

    #[inline]
    fn get(&self, i: usize) -> Op::Output {
        Op::apply(self.lhs.get(i), self.rhs.get(i))
    }
}

/// Combines every element of a vector expression with a scalar.
///
/// The scalar is always the right operand of `Op`. `scalar * v` is represented as `v * scalar`.
#[derive(Debug, Clone, Copy)]
pub struct VecScalar<E, K, Op> {
    expr: E,
    scalar: K,
    _op: PhantomData<Op>,
}

impl<E, K, Op> VecScalar<E, K, Op> {
    #[inline]
    pub fn new(expr: E, scalar: K) -> Self {
        Self {
            expr,
            scalar,
            _op: PhantomData,
        }
    }
}

impl<E, K, Op> VectorExpr for VecScalar<E, K, Op>
where
    E: VectorExpr,
    K: Copy,
    Op: BinaryOp<E::Elem, K>,
{
    type Elem = Op::Output;
    type Size = E::Size;

    #[inline]
    fn dim(&self) -> E::Size {
        self.expr.dim()
    }

    #[inline]
    fn get(&self, i: usize) -> Op::Output {
        Op::apply(self.expr.get(i), self.scalar)
    }
}

/// Applies a closure to every element of a vector expression. Created by [`VectorExpr::map`].
#[derive(Debug, Clone, Copy)]
pub struct VecMap<E, F> {
    expr: E,
    f: F,
}

impl<E, F> VecMap<E, F> {
    #[inline]
    pub fn new(expr: E, f: F) -> Self {
        Self { expr, f }
    }
}

impl<E, F, U> VectorExpr for VecMap<E, F>
where
    E: VectorExpr,
    F: Fn(E::Elem) -> U,
    U: Copy,
{
    type Elem = U;
    type Size = E::Size;

    #[inline]
    fn dim(&self) -> E::Size {
        self.expr.dim()
    }

    #[inline]
    fn get(&self, i: usize) -> U {
        (self.f)(self.expr.get(i))
    }
}

/// Cross product of two 3-dimensional vector expressions. Created by [`VectorExpr::cross`].
#[derive(Debug, Clone, Copy)]
pub struct Cross<L, R> {
    lhs: L,
    rhs: R,
}

impl<L: VectorExpr, R: VectorExpr> Cross<L, R>
where
    L::Size: DimPromote<Const<3>>,
    R::Size: DimPromote<Const<3>>,
{
    /// Creates the node, checking that both operands have 3 elements.
    #[inline]
    pub fn new(lhs: L, rhs: R) -> Result<Self> {
        check::exact::<3, _>(lhs.dim())?;
        check::exact::<3, _>(rhs.dim())?;
        Ok(Self { lhs, rhs })
    }
}

impl<L, R> VectorExpr for Cross<L, R>
where
    L: VectorExpr,
    R: VectorExpr,
    L::Elem: Promote<R::Elem>,
    PromotedElem<L::Elem, R::Elem>: Number,
{
    type Elem = PromotedElem<L::Elem, R::Elem>;
    type Size = Const<3>;

    #[inline]
    fn dim(&self) -> Const<3> {
        Const
    }

    #[inline]
    fn get(&self, i: usize) -> Self::Elem {
        assert!(i < 3, "index {i} out of bounds for a 3-dimensional vector");
        let (j, k) = ((i + 1) % 3, (i + 2) % 3);
        let a = |n| self.lhs.get(n).promote_lhs();
        let b = |n| <L::Elem as Promote<R::Elem>>::promote_rhs(self.rhs.get(n));
        a(j) * b(k) - a(k) * b(j)
    }
}

/// A scalar standing in for a vector of any size, with every element equal to the scalar.
///
/// # Examples
///
/// ```
/// # use lamina::*;
/// let v = (vec3(1, 2, 3) + splat(10)).eval();
/// assert_eq!(v, vec3(11, 12, 13));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Splat<T>(pub T);

/// Creates a [`Splat`] expression.
#[inline]
pub fn splat<T: Copy>(value: T) -> Splat<T> {
    Splat(value)
}

impl<T: Copy> VectorExpr for Splat<T> {
    type Elem = T;
    type Size = Unit;

    #[inline]
    fn dim(&self) -> Unit {
        Unit
    }

    #[inline]
    fn get(&self, _: usize) -> T {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn promotion() {
        let a = vec3(1i32, 2, 3);
        let b = vec3(0.5f32, 0.5, 0.5);
        let sum = (a + b).eval();
        assert_eq!(sum, vec3(1.5f32, 2.5, 3.5));

        let wide = (vec2(1u8, 2) + vec2(300u16, 400)).eval();
        assert_eq!(wide, vec2(301u16, 402));
    }

    #[test]
    fn mixed_dynamic() {
        let a = DynVector::from_slice(&[1.0, 2.0, 3.0]);
        let sum = &a + vec3(1.0, 1.0, 1.0);
        assert_eq!(sum.size(), 3);
        // fixed wins
        let v: Vec3<f64> = sum.eval();
        assert_eq!(v, [2.0, 3.0, 4.0]);
    }

    #[test]
    #[cfg(not(feature = "unchecked"))]
    fn mismatch() {
        let a = DynVector::from_slice(&[1.0, 2.0]);
        let b = DynVector::from_slice(&[1.0, 2.0, 3.0]);
        assert_eq!(
            hadamard(&a, &b).err(),
            Some(Error::IncompatibleVectorSizes)
        );
        let c = DynVector::from_slice(&[1.0, 2.0]);
        assert_eq!(
            Cross::new(&a, &c).err().map(|e| e.to_string()),
            Some("vector expression has the wrong size".into())
        );
    }

    #[test]
    fn cross() {
        let a = vec3(1.0, 2.0, 3.0);
        let b = vec3(-4.0, 0.5, 2.0);
        let c = a.cross(b).eval();
        assert_eq!(c.dot(a), 0.0);
        assert_eq!(c.dot(b), 0.0);
        assert_eq!(c, vec3(2.5, -14.0, 8.5));
    }

    #[test]
    fn lazy_map() {
        let v = vec4(1, 2, 3, 4);
        let m = (&v).map(|e| e as f32 * 0.5);
        assert_eq!(m.get(3), 2.0);
        assert_eq!(m.eval(), [0.5, 1.0, 1.5, 2.0]);
    }
}
