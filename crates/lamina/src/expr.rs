//! Readable and writable expressions.
//!
//! Every container and every expression node implements [`VectorExpr`] or [`MatrixExpr`]. These
//! traits only require element access and the size tags; everything else (evaluation, products,
//! comparisons) is built on top of them. Writable containers and views additionally implement
//! [`VectorExprMut`] or [`MatrixExprMut`].
//!
//! Expression nodes hold their operands *by value*. Passing a reference (`&v + &w`) makes the node
//! borrow the operand instead, since shared references to expressions are expressions too. The
//! borrow checker makes sure that such a node never outlives its operands.
//!
//! Nodes compute their elements on every access and never cache anything. An expression is
//! typically consumed right away, by [`VectorExpr::eval`], by an assignment like
//! [`VectorExprMut::try_assign`], or by an operator-assignment like `+=`.

mod matrix;
mod vector;
mod view;

pub use matrix::*;
pub use vector::*;
pub use view::*;

use crate::{
    assign::{self, OpAddAssign, OpAssign, OpDivAssign, OpMulAssign, OpSubAssign},
    error::OrPanic,
    functor::{BinaryOp, OpDiv, OpMul},
    layout::{Basis, Layout},
    promote::{Promote, PromotedElem},
    storage::{MatrixAlloc, MatrixOf, VectorAlloc, VectorOf},
    AssignOp, Const, Dim, DimPromote, Matrix, Number, Real, Result, Sqrt, Vector, Zero,
};

/// A readable vector: a container, a view, or a lazily evaluated expression.
pub trait VectorExpr {
    /// Element type.
    type Elem: Copy;
    /// Size tag.
    type Size: Dim;

    /// Returns the size tag of this expression.
    fn dim(&self) -> Self::Size;

    /// Computes element `i`.
    ///
    /// # Panics
    ///
    /// Containers and views panic if `i` is out of bounds. Nodes forward the index to their
    /// operands.
    fn get(&self, i: usize) -> Self::Elem;

    /// Returns the number of elements.
    #[inline]
    fn size(&self) -> usize {
        self.dim().value()
    }

    /// Evaluates this expression into a new owned [`Vector`].
    ///
    /// Fixed-size expressions evaluate into array storage, dynamically sized ones into a
    /// [`Vec`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use lamina::*;
    /// let v = (vec3(1, 2, 3) + vec3(10, 20, 30)).eval();
    /// assert_eq!(v, vec3(11, 22, 33));
    /// ```
    fn eval(&self) -> VectorOf<Self::Size, Self::Elem>
    where
        Self::Size: VectorAlloc<Self::Elem>,
    {
        let mut out = Vector::from_buf(<Self::Size as VectorAlloc<Self::Elem>>::alloc(self.dim()));
        assign::run_vector::<OpAssign, _, _>(&mut out, self);
        out
    }

    /// Lazily applies `f` to every element.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lamina::*;
    /// let v = vec3(1, -2, 3).map(|i| i * i).eval();
    /// assert_eq!(v, [1, 4, 9]);
    /// ```
    fn map<F, U>(self, f: F) -> VecMap<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Elem) -> U,
        U: Copy,
    {
        VecMap::new(self, f)
    }

    /// Computes the dot product of `self` and `rhs`.
    ///
    /// Vectors have no orientation here, so any two vectors of the same size can be combined.
    ///
    /// # Panics
    ///
    /// Panics if the sizes differ (see [`dot`][crate::dot] for a non-panicking version).
    ///
    /// # Examples
    ///
    /// ```
    /// # use lamina::*;
    /// let u = vec3(2, 0, -1);
    /// assert_eq!(u.dot(vec3(3, 7, 4)), 2);
    /// ```
    #[track_caller]
    fn dot<R>(&self, rhs: R) -> PromotedElem<Self::Elem, R::Elem>
    where
        R: VectorExpr,
        Self::Size: DimPromote<R::Size>,
        Self::Elem: Promote<R::Elem>,
        PromotedElem<Self::Elem, R::Elem>: Number,
    {
        crate::dot(self, rhs).or_panic()
    }

    /// Returns the squared length of this vector.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lamina::*;
    /// assert_eq!(vec2(-2, 3).length2(), 13);
    /// ```
    fn length2(&self) -> Self::Elem
    where
        Self::Elem: Number,
    {
        let mut acc = Self::Elem::ZERO;
        for i in 0..self.size() {
            let e = self.get(i);
            acc = acc + e * e;
        }
        acc
    }

    /// Returns the length of this vector.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lamina::*;
    /// assert_eq!(vec3(0.0, 3.0, 4.0).length(), 5.0);
    /// ```
    #[doc(alias = "norm", alias = "magnitude")]
    fn length(&self) -> Self::Elem
    where
        Self::Elem: Real,
    {
        self.length2().sqrt()
    }

    /// Scales this vector to length 1.
    ///
    /// The length is computed right away, the division happens lazily.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lamina::*;
    /// let n = vec2(0.0, -4.0).normalize().eval();
    /// assert_eq!(n, [0.0, -1.0]);
    /// ```
    fn normalize(self) -> VecScalar<Self, Self::Elem, OpDiv>
    where
        Self: Sized,
        Self::Elem: Real,
    {
        let length = self.length();
        VecScalar::new(self, length)
    }

    /// Lazily multiplies `self` and `rhs` elementwise.
    ///
    /// # Panics
    ///
    /// Panics if the sizes differ (see [`hadamard`][crate::hadamard] for a non-panicking version).
    ///
    /// # Examples
    ///
    /// ```
    /// # use lamina::*;
    /// let v = vec3(1, 2, 3).hadamard(vec3(4, 5, 6)).eval();
    /// assert_eq!(v, vec3(4, 10, 18));
    /// ```
    #[track_caller]
    fn hadamard<R>(self, rhs: R) -> VecBinary<Self, R, OpMul>
    where
        Self: Sized,
        R: VectorExpr,
        Self::Size: DimPromote<R::Size>,
        OpMul: BinaryOp<Self::Elem, R::Elem>,
    {
        VecBinary::new(self, rhs).or_panic()
    }

    /// Lazily computes the cross product of two 3-dimensional vectors.
    ///
    /// The result is perpendicular to both `self` and `rhs`. Swapping the operands inverts its
    /// direction.
    ///
    /// # Panics
    ///
    /// Panics if either operand is a dynamic vector without exactly 3 elements. For fixed-size
    /// vectors, any other size is a compile error.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lamina::*;
    /// let x = Vec3f::X;
    /// let y = Vec3f::Y;
    /// assert_eq!(x.cross(y).eval(), Vec3f::Z);
    /// assert_eq!(y.cross(x).eval(), -Vec3f::Z);
    /// ```
    #[track_caller]
    fn cross<R>(self, rhs: R) -> Cross<Self, R>
    where
        Self: Sized,
        R: VectorExpr,
        Self::Size: DimPromote<Const<3>>,
        R::Size: DimPromote<Const<3>>,
        Self::Elem: Promote<R::Elem>,
        PromotedElem<Self::Elem, R::Elem>: Number,
    {
        Cross::new(self, rhs).or_panic()
    }

    /// Lazily computes the outer product of `self` and `rhs`.
    ///
    /// Element `(i, j)` of the resulting matrix is `self[i] * rhs[j]`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lamina::*;
    /// let m = vec2(1, 2).outer(vec3(1, 10, 100)).eval();
    /// assert_eq!(m, [
    ///     [1, 10, 100],
    ///     [2, 20, 200],
    /// ]);
    /// ```
    fn outer<R>(self, rhs: R) -> Outer<Self, R>
    where
        Self: Sized,
        R: VectorExpr,
        OpMul: BinaryOp<Self::Elem, R::Elem>,
    {
        Outer::new(self, rhs)
    }

    /// Returns `true` if every element of `self` equals the corresponding element of `rhs`.
    ///
    /// Vectors of different run-time sizes are never equal.
    fn all_eq<R>(&self, rhs: R) -> bool
    where
        R: VectorExpr,
        Self::Size: DimPromote<R::Size>,
        Self::Elem: PartialEq<R::Elem>,
    {
        all_pairs_1d(self, &rhs, |a, b| a == b)
    }

    /// Returns `true` if every element of `self` is less than the corresponding element of `rhs`.
    ///
    /// This is not a lexicographic comparison.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lamina::*;
    /// assert!(vec2(1, 2).all_lt(vec2(2, 3)));
    /// assert!(!vec2(1, 4).all_lt(vec2(2, 3)));
    /// ```
    fn all_lt<R>(&self, rhs: R) -> bool
    where
        R: VectorExpr,
        Self::Size: DimPromote<R::Size>,
        Self::Elem: PartialOrd<R::Elem>,
    {
        all_pairs_1d(self, &rhs, |a, b| a < b)
    }

    /// Returns `true` if every element of `self` is less than or equal to the corresponding
    /// element of `rhs`.
    fn all_le<R>(&self, rhs: R) -> bool
    where
        R: VectorExpr,
        Self::Size: DimPromote<R::Size>,
        Self::Elem: PartialOrd<R::Elem>,
    {
        all_pairs_1d(self, &rhs, |a, b| a <= b)
    }

    /// Returns `true` if every element of `self` is greater than the corresponding element of
    /// `rhs`.
    fn all_gt<R>(&self, rhs: R) -> bool
    where
        R: VectorExpr,
        Self::Size: DimPromote<R::Size>,
        Self::Elem: PartialOrd<R::Elem>,
    {
        all_pairs_1d(self, &rhs, |a, b| a > b)
    }

    /// Returns `true` if every element of `self` is greater than or equal to the corresponding
    /// element of `rhs`.
    fn all_ge<R>(&self, rhs: R) -> bool
    where
        R: VectorExpr,
        Self::Size: DimPromote<R::Size>,
        Self::Elem: PartialOrd<R::Elem>,
    {
        all_pairs_1d(self, &rhs, |a, b| a >= b)
    }
}

/// Applies `f` to every pair of elements. A broadcast operand pairs up with every element of the
/// other one; otherwise the sizes have to be equal.
pub(crate) fn all_pairs_1d<A, B>(a: &A, b: &B, f: impl Fn(A::Elem, B::Elem) -> bool) -> bool
where
    A: VectorExpr + ?Sized,
    B: VectorExpr,
{
    let len = match (A::Size::BROADCAST, B::Size::BROADCAST) {
        (false, false) if a.size() != b.size() => return false,
        (true, false) => b.size(),
        _ => a.size(),
    };
    (0..len).all(|i| f(a.get(i), b.get(i)))
}

/// A writable vector: a container, or a writable view of a matrix.
pub trait VectorExprMut: VectorExpr {
    /// Returns a mutable reference to element `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds.
    fn get_mut(&mut self, i: usize) -> &mut Self::Elem;

    /// Makes room for `len` elements, if this vector has resizable storage.
    ///
    /// Everything else keeps its size.
    #[inline]
    fn fit(&mut self, len: usize) {
        let _ = len;
    }

    /// Evaluates `src` and stores the result in `self`.
    ///
    /// Vectors with owned dynamic storage are resized to the size of `src`. Everything else has
    /// to match the size of `src` already.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lamina::*;
    /// let mut v = DynVector::<i32>::zeros(1);
    /// v.try_assign(vec3(1, 2, 3) * 2)?;
    /// assert_eq!(v, [2, 4, 6]);
    ///
    /// let mut fixed = Vec2::<i32>::ZERO;
    /// assert_eq!(fixed.try_assign(&v), Err(Error::IncompatibleVectorSizes));
    /// # Ok::<_, lamina::Error>(())
    /// ```
    fn try_assign<E>(&mut self, src: E) -> Result<()>
    where
        E: VectorExpr,
        Self::Size: DimPromote<E::Size>,
        OpAssign: AssignOp<Self::Elem, E::Elem>,
    {
        assign::vector::<OpAssign, _, _>(self, &src)
    }

    /// Adds `src` to `self` elementwise.
    fn try_add_assign<E>(&mut self, src: E) -> Result<()>
    where
        E: VectorExpr,
        Self::Size: DimPromote<E::Size>,
        OpAddAssign: AssignOp<Self::Elem, E::Elem>,
    {
        assign::vector::<OpAddAssign, _, _>(self, &src)
    }

    /// Subtracts `src` from `self` elementwise.
    fn try_sub_assign<E>(&mut self, src: E) -> Result<()>
    where
        E: VectorExpr,
        Self::Size: DimPromote<E::Size>,
        OpSubAssign: AssignOp<Self::Elem, E::Elem>,
    {
        assign::vector::<OpSubAssign, _, _>(self, &src)
    }

    /// Multiplies `self` by `src` elementwise.
    fn try_mul_assign<E>(&mut self, src: E) -> Result<()>
    where
        E: VectorExpr,
        Self::Size: DimPromote<E::Size>,
        OpMulAssign: AssignOp<Self::Elem, E::Elem>,
    {
        assign::vector::<OpMulAssign, _, _>(self, &src)
    }

    /// Divides `self` by `src` elementwise.
    fn try_div_assign<E>(&mut self, src: E) -> Result<()>
    where
        E: VectorExpr,
        Self::Size: DimPromote<E::Size>,
        OpDivAssign: AssignOp<Self::Elem, E::Elem>,
    {
        assign::vector::<OpDivAssign, _, _>(self, &src)
    }
}

/// A readable matrix: a container, or a lazily evaluated expression.
///
/// Elements are addressed by `(row, col)`, independent of the memory layout and of the basis
/// orientation of the matrix.
pub trait MatrixExpr {
    /// Element type.
    type Elem: Copy;
    /// Size tag of the row count.
    type Rows: Dim;
    /// Size tag of the column count.
    type Cols: Dim;
    /// Basis orientation.
    type Basis: Basis;
    /// Memory layout of the result of evaluating this expression.
    type Layout: Layout;

    /// Returns the size tags of the row and column count.
    fn shape(&self) -> (Self::Rows, Self::Cols);

    /// Computes the element at `(row, col)`.
    fn get(&self, row: usize, col: usize) -> Self::Elem;

    /// Returns the number of rows.
    #[inline]
    fn rows(&self) -> usize {
        self.shape().0.value()
    }

    /// Returns the number of columns.
    #[inline]
    fn cols(&self) -> usize {
        self.shape().1.value()
    }

    /// Evaluates this expression into a new owned [`Matrix`] with the same basis and layout.
    fn eval(&self) -> MatrixOf<Self::Rows, Self::Cols, Self::Elem, Self::Basis, Self::Layout>
    where
        Self::Rows: MatrixAlloc<Self::Elem, Self::Cols>,
    {
        let (rows, cols) = self.shape();
        let mut out = Matrix::from_buf(<Self::Rows as MatrixAlloc<Self::Elem, Self::Cols>>::alloc(
            rows, cols,
        ));
        assign::run_matrix::<OpAssign, _, _>(&mut out, self);
        out
    }

    /// Lazily swaps rows and columns.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lamina::*;
    /// let m = Mat::from_rows([
    ///     [0, 1, 2],
    ///     [3, 4, 5],
    /// ]);
    /// assert_eq!(m.transpose().eval(), [
    ///     [0, 3],
    ///     [1, 4],
    ///     [2, 5],
    /// ]);
    /// ```
    fn transpose(self) -> Transposed<Self>
    where
        Self: Sized,
    {
        Transposed::new(self)
    }

    /// Returns a view of row `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    #[track_caller]
    fn row(self, row: usize) -> Row<Self>
    where
        Self: Sized,
    {
        Row::new(self, row)
    }

    /// Returns a view of column `col`.
    ///
    /// # Panics
    ///
    /// Panics if `col` is out of bounds.
    #[track_caller]
    fn column(self, col: usize) -> Column<Self>
    where
        Self: Sized,
    {
        Column::new(self, col)
    }

    /// Returns a view of basis vector `index`.
    ///
    /// This is column `index` for column-basis matrices, and row `index` for row-basis matrices.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[track_caller]
    fn basis_vector(self, index: usize) -> BasisVector<Self>
    where
        Self: Sized,
    {
        BasisVector::new(self, index)
    }

    /// Returns `true` if every element of `self` equals the corresponding element of `rhs`.
    ///
    /// Matrices of different run-time shapes are never equal.
    fn all_eq<R>(&self, rhs: R) -> bool
    where
        R: MatrixExpr,
        Self::Rows: DimPromote<R::Rows>,
        Self::Cols: DimPromote<R::Cols>,
        Self::Elem: PartialEq<R::Elem>,
    {
        all_pairs_2d(self, &rhs, |a, b| a == b)
    }

    /// Returns `true` if every element of `self` is less than the corresponding element of `rhs`.
    fn all_lt<R>(&self, rhs: R) -> bool
    where
        R: MatrixExpr,
        Self::Rows: DimPromote<R::Rows>,
        Self::Cols: DimPromote<R::Cols>,
        Self::Elem: PartialOrd<R::Elem>,
    {
        all_pairs_2d(self, &rhs, |a, b| a < b)
    }

    /// Returns `true` if every element of `self` is less than or equal to the corresponding
    /// element of `rhs`.
    fn all_le<R>(&self, rhs: R) -> bool
    where
        R: MatrixExpr,
        Self::Rows: DimPromote<R::Rows>,
        Self::Cols: DimPromote<R::Cols>,
        Self::Elem: PartialOrd<R::Elem>,
    {
        all_pairs_2d(self, &rhs, |a, b| a <= b)
    }

    /// Returns `true` if every element of `self` is greater than the corresponding element of
    /// `rhs`.
    fn all_gt<R>(&self, rhs: R) -> bool
    where
        R: MatrixExpr,
        Self::Rows: DimPromote<R::Rows>,
        Self::Cols: DimPromote<R::Cols>,
        Self::Elem: PartialOrd<R::Elem>,
    {
        all_pairs_2d(self, &rhs, |a, b| a > b)
    }

    /// Returns `true` if every element of `self` is greater than or equal to the corresponding
    /// element of `rhs`.
    fn all_ge<R>(&self, rhs: R) -> bool
    where
        R: MatrixExpr,
        Self::Rows: DimPromote<R::Rows>,
        Self::Cols: DimPromote<R::Cols>,
        Self::Elem: PartialOrd<R::Elem>,
    {
        all_pairs_2d(self, &rhs, |a, b| a >= b)
    }
}

pub(crate) fn all_pairs_2d<A, B>(a: &A, b: &B, f: impl Fn(A::Elem, B::Elem) -> bool) -> bool
where
    A: MatrixExpr + ?Sized,
    B: MatrixExpr + ?Sized,
{
    let (rows, cols) = (a.rows(), a.cols());
    if rows != b.rows() || cols != b.cols() {
        return false;
    }
    (0..rows).all(|r| (0..cols).all(|c| f(a.get(r, c), b.get(r, c))))
}

/// A writable matrix.
pub trait MatrixExprMut: MatrixExpr {
    /// Returns a mutable reference to the element at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `(row, col)` is out of bounds.
    fn get_mut(&mut self, row: usize, col: usize) -> &mut Self::Elem;

    /// Makes room for a `rows` by `cols` matrix, if this matrix has resizable storage.
    #[inline]
    fn fit(&mut self, rows: usize, cols: usize) {
        let _ = (rows, cols);
    }

    /// Evaluates `src` and stores the result in `self`.
    ///
    /// Matrices with owned dynamic storage are resized along their dynamic dimensions. Everything
    /// else has to match the shape of `src` already.
    fn try_assign<E>(&mut self, src: E) -> Result<()>
    where
        E: MatrixExpr,
        Self::Rows: DimPromote<E::Rows>,
        Self::Cols: DimPromote<E::Cols>,
        OpAssign: AssignOp<Self::Elem, E::Elem>,
    {
        assign::matrix::<OpAssign, _, _>(self, &src)
    }

    /// Adds `src` to `self` elementwise.
    fn try_add_assign<E>(&mut self, src: E) -> Result<()>
    where
        E: MatrixExpr,
        Self::Rows: DimPromote<E::Rows>,
        Self::Cols: DimPromote<E::Cols>,
        OpAddAssign: AssignOp<Self::Elem, E::Elem>,
    {
        assign::matrix::<OpAddAssign, _, _>(self, &src)
    }

    /// Subtracts `src` from `self` elementwise.
    fn try_sub_assign<E>(&mut self, src: E) -> Result<()>
    where
        E: MatrixExpr,
        Self::Rows: DimPromote<E::Rows>,
        Self::Cols: DimPromote<E::Cols>,
        OpSubAssign: AssignOp<Self::Elem, E::Elem>,
    {
        assign::matrix::<OpSubAssign, _, _>(self, &src)
    }

    /// Multiplies `self` by `src` elementwise.
    fn try_mul_assign<E>(&mut self, src: E) -> Result<()>
    where
        E: MatrixExpr,
        Self::Rows: DimPromote<E::Rows>,
        Self::Cols: DimPromote<E::Cols>,
        OpMulAssign: AssignOp<Self::Elem, E::Elem>,
    {
        assign::matrix::<OpMulAssign, _, _>(self, &src)
    }

    /// Divides `self` by `src` elementwise.
    fn try_div_assign<E>(&mut self, src: E) -> Result<()>
    where
        E: MatrixExpr,
        Self::Rows: DimPromote<E::Rows>,
        Self::Cols: DimPromote<E::Cols>,
        OpDivAssign: AssignOp<Self::Elem, E::Elem>,
    {
        assign::matrix::<OpDivAssign, _, _>(self, &src)
    }

    /// Overwrites basis vector `index` with `v`.
    ///
    /// Reading basis vector `index` back with [`MatrixExpr::basis_vector`] returns `v`, whatever
    /// the basis orientation and memory layout of the matrix.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lamina::*;
    /// let mut m = Matrix::<[[i32; 3]; 3], RowBasis, ColMajor>::ZERO;
    /// m.set_basis_vector(1, vec3(1, 2, 3))?;
    /// assert_eq!(m.row(1).eval(), vec3(1, 2, 3));
    /// assert_eq!((&m).basis_vector(1).eval(), vec3(1, 2, 3));
    /// # Ok::<_, lamina::Error>(())
    /// ```
    #[track_caller]
    fn set_basis_vector<V>(&mut self, index: usize, v: V) -> Result<()>
    where
        Self: Sized,
        V: VectorExpr,
        <Self::Basis as Basis>::Size<Self::Rows, Self::Cols>: DimPromote<V::Size>,
        OpAssign: AssignOp<Self::Elem, V::Elem>,
    {
        BasisVector::new(self, index).try_assign(v)
    }
}

impl<E: VectorExpr + ?Sized> VectorExpr for &E {
    type Elem = E::Elem;
    type Size = E::Size;

    #[inline]
    fn dim(&self) -> E::Size {
        (**self).dim()
    }

    #[inline]
    fn get(&self, i: usize) -> E::Elem {
        (**self).get(i)
    }
}

impl<E: VectorExpr + ?Sized> VectorExpr for &mut E {
    type Elem = E::Elem;
    type Size = E::Size;

    #[inline]
    fn dim(&self) -> E::Size {
        (**self).dim()
    }

    #[inline]
    fn get(&self, i: usize) -> E::Elem {
        (**self).get(i)
    }
}

impl<E: VectorExprMut + ?Sized> VectorExprMut for &mut E {
    #[inline]
    fn get_mut(&mut self, i: usize) -> &mut E::Elem {
        (**self).get_mut(i)
    }

    #[inline]
    fn fit(&mut self, len: usize) {
        (**self).fit(len)
    }
}

impl<E: MatrixExpr + ?Sized> MatrixExpr for &E {
    type Elem = E::Elem;
    type Rows = E::Rows;
    type Cols = E::Cols;
    type Basis = E::Basis;
    type Layout = E::Layout;

    #[inline]
    fn shape(&self) -> (E::Rows, E::Cols) {
        (**self).shape()
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> E::Elem {
        (**self).get(row, col)
    }
}

impl<E: MatrixExpr + ?Sized> MatrixExpr for &mut E {
    type Elem = E::Elem;
    type Rows = E::Rows;
    type Cols = E::Cols;
    type Basis = E::Basis;
    type Layout = E::Layout;

    #[inline]
    fn shape(&self) -> (E::Rows, E::Cols) {
        (**self).shape()
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> E::Elem {
        (**self).get(row, col)
    }
}

impl<E: MatrixExprMut + ?Sized> MatrixExprMut for &mut E {
    #[inline]
    fn get_mut(&mut self, row: usize, col: usize) -> &mut E::Elem {
        (**self).get_mut(row, col)
    }

    #[inline]
    fn fit(&mut self, rows: usize, cols: usize) {
        (**self).fit(rows, cols)
    }
}

/// Arrays are fixed-size vector expressions.
impl<T: Copy, const N: usize> VectorExpr for [T; N] {
    type Elem = T;
    type Size = Const<N>;

    #[inline]
    fn dim(&self) -> Const<N> {
        Const
    }

    #[inline]
    fn get(&self, i: usize) -> T {
        self[i]
    }
}

/// Arrays of rows are fixed-size matrix expressions.
impl<T: Copy, const R: usize, const C: usize> MatrixExpr for [[T; C]; R] {
    type Elem = T;
    type Rows = Const<R>;
    type Cols = Const<C>;
    type Basis = crate::config::DefaultBasis;
    type Layout = crate::config::DefaultLayout;

    #[inline]
    fn shape(&self) -> (Const<R>, Const<C>) {
        (Const, Const)
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> T {
        self[row][col]
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn reference_capture() {
        let a = vec3(1, 2, 3);
        let b = vec3(4, 5, 6);
        let sum = &a + &b;
        assert_eq!(sum.get(2), 9);
        assert_eq!(sum.size(), 3);
        // `a` and `b` are still usable
        assert_eq!(a.dot(b), 32);
    }

    #[test]
    fn arrays() {
        let v = vec3(1, 2, 3) + [10, 20, 30];
        assert_eq!(v.eval(), [11, 22, 33]);
        assert!([1, 2].all_lt([2, 3]));
        assert_eq!([[1, 2], [3, 4]].transpose().eval(), [[1, 3], [2, 4]]);
    }

    #[test]
    fn comparisons() {
        let a = vec3(1.0, 2.0, 3.0);
        assert!(a.all_eq(a));
        assert!(a.all_le(a));
        assert!(a.all_ge(a));
        assert!(!a.all_lt(a));
        assert!(!a.all_gt(a));
        assert!(a.all_gt(vec3(0.0, 1.0, 2.0)));

        let short = DynVector::from_slice(&[1.0, 2.0]);
        let long = DynVector::from_slice(&[1.0, 2.0, 3.0]);
        assert!(!short.all_eq(&long));
        assert!(!short.all_le(&long));
    }

    #[test]
    fn comparisons_broadcast() {
        assert!(vec3(1, 1, 1).all_eq(splat(1)));
        assert!(!vec3(1, 2, 1).all_eq(splat(1)));
        assert!(splat(0).all_lt(vec3(1, 2, 3)));
        assert!(DynVector::from_slice(&[4.0, 5.0]).all_ge(splat(4.0)));
        assert!(DynVector::<f64>::zeros(0).all_gt(splat(1.0)));
        assert_eq!(vec2(7, 7), splat(7));
    }

    #[test]
    fn length() {
        assert_eq!(vec2(3.0, 4.0).length(), 5.0);
        assert_eq!(vec2(3, 4).length2(), 25);
        let n = vec2(3.0, 4.0).normalize().eval();
        assert_approx_eq!(n.length(), 1.0);
    }
}
