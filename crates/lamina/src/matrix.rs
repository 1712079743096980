//! The [`Matrix`] container.
//!
//! A matrix owns (or borrows) a flat buffer and carries two type tags besides it: the basis
//! orientation, which decides whether basis vectors are its rows or its columns, and the memory
//! layout, which decides where element `(row, col)` lives in the buffer. Neither tag affects
//! indexing: `m[(row, col)]` always means the same logical element.

use std::{array, fmt, marker::PhantomData};

use crate::{
    algebra,
    config::{DefaultBasis, DefaultLayout},
    error::OrPanic,
    layout::{Basis, Layout},
    storage::{ExtBuf, HeapBuf, MatrixAlloc, MatrixBuf, MatrixBufMut, MatrixOf},
    DimPromote, Dyn, Error, MatrixExpr, MatrixExprMut, Number, One, Real, Result, Vector, Zero,
};

mod ops;

/// A matrix with `R` rows and `C` columns, stored inline with the default basis and layout.
pub type Mat<T, const R: usize, const C: usize> = Matrix<[[T; C]; R]>;

macro_rules! aliases {
    ($($r:literal x $c:literal: $name:ident $(, $f32:ident)?;)+) => {$(
        #[doc = concat!("Inline matrix of ", stringify!($r), " rows by ", stringify!($c), " columns.")]
        pub type $name<T> = Mat<T, $r, $c>;
        $(
            #[doc = concat!("[`", stringify!($name), "`] of [`f32`].")]
            pub type $f32 = $name<f32>;
        )?
    )+};
}
aliases! {
    1 x 1: Mat1, Mat1f;
    2 x 2: Mat2, Mat2f;
    3 x 3: Mat3, Mat3f;
    4 x 4: Mat4, Mat4f;
    2 x 3: Mat2x3;
    3 x 2: Mat3x2;
    3 x 4: Mat3x4;
    4 x 3: Mat4x3;
}

/// A matrix whose shape is only known at run time, stored on the heap.
pub type DynMatrix<T> = Matrix<HeapBuf<T>>;
/// A matrix stored in borrowed memory that is owned by someone else.
pub type ExtMatrix<'a, T> = Matrix<ExtBuf<'a, T>>;

/// A matrix storing its elements in `S`, with basis orientation `B` and memory layout `L`.
///
/// The storage decides the size tags: `[[T; C]; R]` makes an `R`x`C` matrix with inline storage,
/// [`HeapBuf`] and [`ExtBuf`] make matrices with dynamic (or partially dynamic) shapes. The basis
/// and layout tags default to [`DefaultBasis`] and [`DefaultLayout`], which are chosen with cargo
/// features.
///
/// # Construction
///
/// - [`Matrix::from_rows`] and [`Matrix::from_columns`] fill a matrix from arrays or vectors.
/// - [`Matrix::from_fn`] creates each element by invoking a closure with its row and column.
/// - [`Matrix::try_from_slice`] copies a slice of elements listed row by row.
/// - [`Matrix::from_diagonal`] creates a square matrix with the given diagonal.
/// - [`Matrix::ZERO`] has every element set to 0, [`Matrix::identity`] has ones on its diagonal.
/// - [`DynMatrix::zeros`] and [`DynMatrix::from_row_slice`] create heap-allocated matrices.
/// - [`Matrix::external`] wraps a mutable slice without copying it.
///
/// # Element Access
///
/// Elements are addressed as `m[(row, col)]` through [`Index`] and [`IndexMut`], counting from 0.
/// The row always comes first, whatever the memory layout.
///
/// ```
/// # use lamina::*;
/// let mut mat = Mat::from_rows([
///     [0, 1]
/// ]);
/// mat[(0, 1)] += 6;
/// assert_eq!(mat[(0, 0)], 0);
/// assert_eq!(mat[(0, 1)], 7);
/// ```
///
/// Indexing out of bounds will result in a panic, just like it does for slices.
/// [`Matrix::try_get`] and [`Matrix::try_get_mut`] return [`Option`]s instead:
///
/// ```
/// # use lamina::*;
/// let mat = Mat::from_rows([
///     [0, 1]
/// ]);
/// assert_eq!(mat.try_get(0, 1), Some(&1));
/// assert_eq!(mat.try_get(0, 2), None);
/// ```
///
/// [`Index`]: core::ops::Index
/// [`IndexMut`]: core::ops::IndexMut
#[derive(Clone, Copy, Hash, Default)]
#[repr(transparent)]
pub struct Matrix<S, B = DefaultBasis, L = DefaultLayout> {
    buf: S,
    _tags: PhantomData<(B, L)>,
}

#[rustfmt::skip]
unsafe impl<T: bytemuck::Zeroable, const R: usize, const C: usize, B, L> bytemuck::Zeroable for Matrix<[[T; C]; R], B, L> {}
#[rustfmt::skip]
unsafe impl<T: bytemuck::Pod, const R: usize, const C: usize, B: Basis, L: Layout> bytemuck::Pod for Matrix<[[T; C]; R], B, L> {}

impl<S, B, L> Matrix<S, B, L> {
    /// Wraps a storage value.
    ///
    /// The elements of `buf` are interpreted in the memory layout `L`.
    #[inline]
    pub const fn from_buf(buf: S) -> Self {
        Self {
            buf,
            _tags: PhantomData,
        }
    }

    /// Returns the underlying storage.
    #[inline]
    pub fn into_buf(self) -> S {
        self.buf
    }
}

impl<S: MatrixBuf, B: Basis, L: Layout> Matrix<S, B, L> {
    /// Returns all elements as a slice, in memory layout order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lamina::*;
    /// let m = Matrix::<_, RowBasis, ColMajor>::from_rows([
    ///     [1, 2],
    ///     [3, 4],
    /// ]);
    /// assert_eq!(m.as_slice(), &[1, 3, 2, 4]);
    /// ```
    #[inline]
    pub fn as_slice(&self) -> &[S::Elem] {
        self.buf.as_slice()
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> Option<usize> {
        let (rows, cols) = (self.rows(), self.cols());
        (row < rows && col < cols).then(|| L::offset(row, col, rows, cols))
    }

    /// Element at `(row, col)`, or [`None`] when either index is past the end.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lamina::*;
    /// let mat = Mat::from_rows([
    ///     [0, 1, 2],
    ///     [3, 4, 5],
    /// ]);
    /// assert_eq!(mat.try_get(0, 0), Some(&0));
    /// assert_eq!(mat.try_get(1, 0), Some(&3));
    /// assert_eq!(mat.try_get(2, 0), None);
    /// ```
    pub fn try_get(&self, row: usize, col: usize) -> Option<&S::Elem> {
        let offset = self.offset(row, col)?;
        self.buf.as_slice().get(offset)
    }

    /// Sum of the diagonal elements.
    ///
    /// # Panics
    ///
    /// Panics if the matrix is not square, which can only happen for dynamic shapes.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lamina::*;
    /// let diag = Mat::from_diagonal([1, 2, 3]);
    /// assert_eq!(diag.trace(), 6);
    ///
    /// assert_eq!(Mat3f::identity().trace(), 3.0);
    /// ```
    #[track_caller]
    pub fn trace(&self) -> S::Elem
    where
        S::Elem: Number,
        S::Rows: DimPromote<S::Cols>,
    {
        algebra::trace(self).or_panic()
    }

    /// Computes the [determinant].
    ///
    /// # Panics
    ///
    /// Panics if the matrix is not square, which can only happen for dynamic shapes.
    ///
    /// [determinant]: https://mathworld.wolfram.com/Determinant.html
    #[track_caller]
    pub fn determinant(&self) -> S::Elem
    where
        S::Elem: Real,
        S::Rows: DimPromote<S::Cols>,
    {
        algebra::determinant(self).or_panic()
    }

    /// Returns the inverse of this matrix.
    ///
    /// Singular matrices are not detected: their inverse contains infinities or NaNs.
    ///
    /// # Panics
    ///
    /// Panics if the matrix is not square, which can only happen for dynamic shapes.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lamina::*;
    /// assert_eq!(Mat2f::identity().inverse(), Mat2f::identity());
    /// let m = Mat2::from_rows([[2.0, 0.0], [0.0, 4.0]]);
    /// assert_eq!(m.inverse(), [[0.5, 0.0], [0.0, 0.25]]);
    /// ```
    #[track_caller]
    pub fn inverse(&self) -> MatrixOf<S::Rows, S::Cols, S::Elem, B, L>
    where
        S::Elem: Real,
        S::Rows: DimPromote<S::Cols> + MatrixAlloc<S::Elem, S::Cols>,
    {
        algebra::inverse(self).or_panic()
    }
}

impl<S: MatrixBufMut, B: Basis, L: Layout> Matrix<S, B, L> {
    /// Returns all elements as a mutable slice, in memory layout order.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [S::Elem] {
        self.buf.as_mut_slice()
    }

    /// Mutable element at `(row, col)`, or [`None`] when either index is past the end.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lamina::*;
    /// let mut mat = Mat::from_rows([
    ///     [0, 1, 2],
    ///     [3, 4, 5],
    /// ]);
    /// if let Some(elem) = mat.try_get_mut(1, 0) {
    ///     *elem = 999;
    /// }
    /// assert!(mat.try_get_mut(2, 0).is_none());
    /// assert_eq!(mat, [
    ///     [0, 1, 2],
    ///     [999, 4, 5],
    /// ]);
    /// ```
    pub fn try_get_mut(&mut self, row: usize, col: usize) -> Option<&mut S::Elem> {
        let offset = self.offset(row, col)?;
        self.buf.as_mut_slice().get_mut(offset)
    }

    /// Overwrites every element with the elements of `slice`, which lists them row by row.
    ///
    /// Returns [`Error::IncompatibleMatrixSizes`] and leaves the matrix unchanged if `slice` does
    /// not hold exactly one element per matrix element.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lamina::*;
    /// let mut m = DynMatrix::<i32>::zeros(2, 2);
    /// m.try_copy_from_slice(&[1, 2, 3, 4])?;
    /// assert_eq!(m, [[1, 2], [3, 4]]);
    /// assert_eq!(m.try_copy_from_slice(&[1, 2, 3]), Err(Error::IncompatibleMatrixSizes));
    /// # Ok::<_, lamina::Error>(())
    /// ```
    pub fn try_copy_from_slice(&mut self, slice: &[S::Elem]) -> Result<()> {
        let (rows, cols) = (self.rows(), self.cols());
        if slice.len() != rows * cols {
            return Err(Error::IncompatibleMatrixSizes);
        }
        let data = self.buf.as_mut_slice();
        for (i, elem) in slice.iter().enumerate() {
            data[L::offset(i / cols, i % cols, rows, cols)] = *elem;
        }
        Ok(())
    }
}

impl<S: MatrixBuf, B: Basis, L: Layout> MatrixExpr for Matrix<S, B, L> {
    type Elem = S::Elem;
    type Rows = S::Rows;
    type Cols = S::Cols;
    type Basis = B;
    type Layout = L;

    #[inline]
    fn shape(&self) -> (S::Rows, S::Cols) {
        self.buf.shape()
    }

    #[inline]
    #[track_caller]
    fn get(&self, row: usize, col: usize) -> S::Elem {
        match self.offset(row, col) {
            Some(offset) => self.buf.as_slice()[offset],
            None => out_of_bounds(row, col, self.rows(), self.cols()),
        }
    }
}

impl<S: MatrixBufMut, B: Basis, L: Layout> MatrixExprMut for Matrix<S, B, L> {
    #[inline]
    #[track_caller]
    fn get_mut(&mut self, row: usize, col: usize) -> &mut S::Elem {
        match self.offset(row, col) {
            Some(offset) => &mut self.buf.as_mut_slice()[offset],
            None => out_of_bounds(row, col, self.rows(), self.cols()),
        }
    }

    #[inline]
    fn fit(&mut self, rows: usize, cols: usize) {
        self.buf.fit(rows, cols);
    }
}

#[cold]
#[track_caller]
fn out_of_bounds(row: usize, col: usize, rows: usize, cols: usize) -> ! {
    panic!("matrix index ({row}, {col}) out of bounds for a {rows}x{cols} matrix")
}

impl<T: Zero + Copy, const R: usize, const C: usize, B, L> Matrix<[[T; C]; R], B, L> {
    /// All-zero matrix.
    pub const ZERO: Self = Self::from_buf([[T::ZERO; C]; R]);
}

impl<T: Copy, const R: usize, const C: usize, B: Basis, L: Layout> Matrix<[[T; C]; R], B, L> {
    /// Creates a [`Matrix`] by invoking a closure with the position (row and column) of each
    /// element.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lamina::*;
    /// let mat = Mat2x3::from_fn(|row, col| row * 10 + col);
    /// assert_eq!(mat, Mat::from_rows([
    ///     [ 0,  1,  2],
    ///     [10, 11, 12],
    /// ]));
    /// ```
    pub fn from_fn<F>(mut cb: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        // the outer array is only the row index for row-major layouts
        Self::from_buf(array::from_fn(|i| {
            array::from_fn(|j| {
                let (row, col) = L::position(i * C + j, R, C);
                cb(row, col)
            })
        }))
    }

    /// Creates a [`Matrix`] from an array of rows.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lamina::*;
    /// let rows = Mat::from_rows([
    ///     [0, 1],
    ///     [2, 3],
    /// ]);
    /// let columns = Mat::from_columns([
    ///     [0, 2],
    ///     [1, 3],
    /// ]);
    /// assert_eq!(rows, columns);
    /// ```
    pub fn from_rows<U: Into<Vector<[T; C]>>>(rows: [U; R]) -> Self {
        let rows = rows.map(|row| row.into().into_array());
        Self::from_fn(|r, c| rows[r][c])
    }

    /// Creates a [`Matrix`] from an array of columns.
    pub fn from_columns<U: Into<Vector<[T; R]>>>(columns: [U; C]) -> Self {
        let columns = columns.map(|col| col.into().into_array());
        Self::from_fn(|r, c| columns[c][r])
    }

    /// Copies `slice`, which lists the `R * C` elements row by row.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lamina::*;
    /// let m = Mat2::try_from_slice(&[1, 2, 3, 4])?;
    /// assert_eq!(m, [[1, 2], [3, 4]]);
    /// assert_eq!(Mat2::try_from_slice(&[1, 2, 3]), Err(Error::IncompatibleMatrixSizes));
    /// # Ok::<_, lamina::Error>(())
    /// ```
    pub fn try_from_slice(slice: &[T]) -> Result<Self> {
        if slice.len() != R * C {
            return Err(Error::IncompatibleMatrixSizes);
        }
        Ok(Self::from_fn(|r, c| slice[r * C + c]))
    }

    /// Creates a matrix with ones on its diagonal and zeroes everywhere else.
    ///
    /// Non-square shapes are allowed; the diagonal then stops at the shorter side.
    pub fn identity() -> Self
    where
        T: Zero + One,
    {
        Self::from_fn(|r, c| if r == c { T::ONE } else { T::ZERO })
    }

    /// Returns the rows of this matrix as arrays.
    pub fn to_rows(&self) -> [[T; C]; R] {
        array::from_fn(|r| array::from_fn(|c| self.get(r, c)))
    }
}

impl<T: Copy, const N: usize, B: Basis, L: Layout> Matrix<[[T; N]; N], B, L> {
    /// Square matrix with `diag` on its diagonal and zeroes everywhere else.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lamina::*;
    /// let diag = Mat::from_diagonal([1, 2, 3]);
    /// assert_eq!(diag, Mat::from_rows([
    ///     [1, 0, 0],
    ///     [0, 2, 0],
    ///     [0, 0, 3],
    /// ]));
    /// ```
    pub fn from_diagonal<D: Into<Vector<[T; N]>>>(diag: D) -> Self
    where
        T: Zero,
    {
        let diag = diag.into();
        Self::from_fn(|r, c| if r == c { diag[r] } else { T::ZERO })
    }

    /// Copies the diagonal into a [`Vector`].
    pub fn diagonal(&self) -> Vector<[T; N]> {
        Vector::from_fn(|i| self.get(i, i))
    }
}

impl<T: Copy, B: Basis, L: Layout> Matrix<HeapBuf<T>, B, L> {
    /// Creates a `rows` by `cols` matrix filled with zeroes.
    pub fn zeros(rows: usize, cols: usize) -> Self
    where
        T: Zero,
    {
        Self::from_buf(HeapBuf::zeros(Dyn(rows), Dyn(cols)))
    }

    /// Creates a `rows` by `cols` matrix from its elements, listed row by row.
    ///
    /// Returns [`Error::IncompatibleMatrixSizes`] if `slice` does not hold exactly `rows * cols`
    /// elements.
    pub fn from_row_slice(rows: usize, cols: usize, slice: &[T]) -> Result<Self>
    where
        T: Zero,
    {
        let mut this = Self::zeros(rows, cols);
        this.try_copy_from_slice(slice)?;
        Ok(this)
    }

    /// Creates a `rows` by `cols` matrix by invoking a closure with the position of each element.
    pub fn from_fn_dyn<F>(rows: usize, cols: usize, mut cb: F) -> Self
    where
        T: Zero,
        F: FnMut(usize, usize) -> T,
    {
        let mut this = Self::zeros(rows, cols);
        for r in 0..rows {
            for c in 0..cols {
                *this.get_mut(r, c) = cb(r, c);
            }
        }
        this
    }

    /// Creates an `n` by `n` identity matrix.
    pub fn identity_dyn(n: usize) -> Self
    where
        T: Zero + One,
    {
        Self::from_fn_dyn(n, n, |r, c| if r == c { T::ONE } else { T::ZERO })
    }

    /// Changes the shape to `rows` by `cols`.
    ///
    /// Elements whose position exists in both shapes keep their value, new elements are zero.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lamina::*;
    /// let mut m = DynMatrix::from_row_slice(2, 2, &[1, 2, 3, 4])?;
    /// m.resize(3, 1);
    /// assert_eq!(m, [[1], [3], [0]]);
    /// # Ok::<_, lamina::Error>(())
    /// ```
    pub fn resize(&mut self, rows: usize, cols: usize)
    where
        T: Zero,
    {
        let (old_rows, old_cols) = (self.rows(), self.cols());
        if (rows, cols) == (old_rows, old_cols) {
            return;
        }
        log::trace!("resizing dynamic matrix from {old_rows}x{old_cols} to {rows}x{cols}");
        let mut resized = Self::zeros(rows, cols);
        for r in 0..rows.min(old_rows) {
            for c in 0..cols.min(old_cols) {
                *resized.get_mut(r, c) = self.get(r, c);
            }
        }
        *self = resized;
    }
}

impl<'a, T: Copy, B: Basis, L: Layout> Matrix<ExtBuf<'a, T>, B, L> {
    /// Wraps externally owned memory as a `rows` by `cols` matrix.
    ///
    /// The matrix reads and writes the first `rows * cols` elements of `data` directly, in the
    /// memory layout `L`. Returns [`Error::MatrixTooSmall`] if `data` is too short.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lamina::*;
    /// let mut data = [0; 6];
    /// let mut m = Matrix::<_, ColBasis, RowMajor>::external(&mut data, 2, 3)?;
    /// m[(1, 0)] = 7;
    /// assert_eq!(data, [0, 0, 0, 7, 0, 0]);
    /// # Ok::<_, lamina::Error>(())
    /// ```
    pub fn external(data: &'a mut [T], rows: usize, cols: usize) -> Result<Self> {
        Ok(Self::from_buf(ExtBuf::new(data, rows, cols)?))
    }

    /// Reinterprets the borrowed memory as a `rows` by `cols` matrix.
    ///
    /// Returns [`Error::ExternalResize`] if that would change the number of elements.
    pub fn reshape(&mut self, rows: usize, cols: usize) -> Result<()> {
        self.buf.reshape(rows, cols)
    }
}

impl<'a, T: Copy, const R: usize, const C: usize, B: Basis, L: Layout>
    Matrix<&'a mut [[T; C]; R], B, L>
{
    /// Wraps an externally owned array as a fixed-size matrix.
    #[inline]
    pub fn external_fixed(data: &'a mut [[T; C]; R]) -> Self {
        Self::from_buf(data)
    }
}

impl<T, const R: usize, const C: usize, B, L> From<Matrix<[[T; C]; R], B, L>> for [[T; C]; R] {
    #[inline]
    fn from(value: Matrix<[[T; C]; R], B, L>) -> Self {
        value.buf
    }
}

impl<S: MatrixBuf, B: Basis, L: Layout> fmt::Debug for Matrix<S, B, L>
where
    S::Elem: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // A row prints on one line even with `{:#?}`.
        struct Row<'a, S, B, L>(&'a Matrix<S, B, L>, usize);

        impl<S: MatrixBuf, B: Basis, L: Layout> fmt::Debug for Row<'_, S, B, L>
        where
            S::Elem: fmt::Debug,
        {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let Row(m, r) = *self;
                f.write_str("[")?;
                for c in 0..m.cols() {
                    let sep = if c == 0 { "" } else { ", " };
                    write!(f, "{sep}{:?}", m.get(r, c))?;
                }
                f.write_str("]")
            }
        }

        f.debug_list()
            .entries((0..self.rows()).map(|r| Row(self, r)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn from_rows_columns() {
        assert_eq!(
            Mat2x3::from_rows([[1, 2, 3], [4, 5, 6]]),
            Mat2x3::from_columns([[1, 4], [2, 5], [3, 6]]),
        );
        assert_eq!(
            Mat2x3::from_rows([vec3(1, 2, 3), vec3(4, 5, 6)]).to_rows(),
            [[1, 2, 3], [4, 5, 6]],
        );
    }

    #[test]
    fn layouts() {
        let rows = [[1, 2, 3], [4, 5, 6]];
        let rm = Matrix::<[[i32; 3]; 2], ColBasis, RowMajor>::from_rows(rows);
        let cm = Matrix::<[[i32; 3]; 2], ColBasis, ColMajor>::from_rows(rows);
        assert_eq!(rm.as_slice(), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(cm.as_slice(), &[1, 4, 2, 5, 3, 6]);
        assert_eq!(rm, cm);
        assert_eq!(cm[(1, 2)], 6);
        assert_eq!(cm.to_rows(), rows);
    }

    #[test]
    fn diagonal() {
        let mat = Mat::from_diagonal([1, 2]);

        #[rustfmt::skip]
        assert_eq!(mat, Mat::from_rows([
            [1, 0],
            [0, 2],
        ]));

        assert_eq!(mat.diagonal(), [1, 2]);
    }

    #[test]
    fn fmt() {
        let mat = Mat::from_rows([[0, 1], [2, 3]]);

        assert_eq!(format!("{:?}", mat), "[[0, 1], [2, 3]]");

        // pretty printing breaks between rows only
        assert_eq!(
            format!("{:#?}", mat),
            "
[
    [0, 1],
    [2, 3],
]
"
            .trim()
        );

        let cm = Matrix::<[[i32; 2]; 2], ColBasis, ColMajor>::from_rows([[0, 1], [2, 3]]);
        assert_eq!(format!("{:?}", cm), "[[0, 1], [2, 3]]");
    }

    #[test]
    fn constants() {
        assert_eq!(format!("{:?}", Mat2f::identity()), "[[1.0, 0.0], [0.0, 1.0]]");
        assert_eq!(Mat3x2::<u8>::ZERO, [[0, 0], [0, 0], [0, 0]]);
        assert_eq!(Mat2x3::<i32>::identity(), [[1, 0, 0], [0, 1, 0]]);
    }

    #[test]
    #[should_panic(expected = "matrix index (0, 2) out of bounds for a 2x2 matrix")]
    fn index_out_of_bounds() {
        let m = Mat2::<i32>::ZERO;
        let _ = m[(0, 2)];
    }

    #[test]
    fn dynamic() {
        let mut m = DynMatrix::<i32>::zeros(2, 3);
        assert_eq!(m.shape(), (Dyn(2), Dyn(3)));
        m.try_copy_from_slice(&[1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(m, [[1, 2, 3], [4, 5, 6]]);

        m.resize(2, 2);
        assert_eq!(m, [[1, 2], [4, 5]]);

        let id = DynMatrix::<f64>::identity_dyn(3);
        assert_eq!(id, Mat3::<f64>::identity());
    }

    #[test]
    fn wrong_element_count_leaves_matrix_alone() {
        let mut m = DynMatrix::from_row_slice(3, 4, &[1; 12]).unwrap();
        assert_eq!(
            m.try_copy_from_slice(&[2; 13]),
            Err(Error::IncompatibleMatrixSizes)
        );
        assert_eq!(m.as_slice(), &[1; 12]);
    }

    #[test]
    fn external_aliases_caller_buffer() {
        let mut data = [0.0f32; 6];
        {
            let mut m = Matrix::<_, ColBasis, ColMajor>::external(&mut data, 2, 3).unwrap();
            m[(1, 2)] = 5.0;
            m.reshape(3, 2).unwrap();
            assert_eq!(m.reshape(4, 2), Err(Error::ExternalResize));
            assert_eq!(m[(2, 1)], 5.0);
        }
        assert_eq!(data[2 * 2 + 1], 5.0);

        let mut fixed = [[0; 2]; 2];
        Matrix::<_, ColBasis, RowMajor>::external_fixed(&mut fixed)
            .try_assign([[1, 2], [3, 4]])
            .unwrap();
        assert_eq!(fixed, [[1, 2], [3, 4]]);
    }

    #[test]
    fn mat_vec_mul() {
        let mat = Mat::from_rows([[0, 1], [2, 3]]);
        let vec = vec2(4, 5);
        let out = mat * vec;
        assert_eq!(out, [5, 23]);
    }

    #[test]
    fn mat_mat_mul() {
        #[rustfmt::skip]
        let a = Mat::from_rows([
            [1, 2],
            [3, 4],
            [5, 6],
            [7, 8],
        ]);
        #[rustfmt::skip]
        let b = Mat::from_rows([
            [9, 10, 11],
            [12, 13, 14],
        ]);
        let c = a * b;
        assert_eq!(c[(0, 1)], 10 + 2 * 13);
        assert_eq!(c[(2, 2)], 5 * 11 + 6 * 14);
        assert_eq!(c.to_rows()[3], [7 * 9 + 8 * 12, 7 * 10 + 8 * 13, 7 * 11 + 8 * 14]);
    }

    #[test]
    fn pod() {
        let m = Mat2::from_rows([[1.0f32, 2.0], [3.0, 4.0]]);
        let floats: &[f32] = bytemuck::cast_slice(bytemuck::bytes_of(&m));
        assert_eq!(floats, m.as_slice());
        assert_eq!(std::mem::size_of::<Mat4f>(), 16 * 4);
    }
}
