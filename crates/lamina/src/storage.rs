//! Element storage of vectors and matrices.
//!
//! [`Vector`] and [`Matrix`] are generic over a *buffer* that holds their elements. The buffer
//! decides the size tags of the container, and whether it owns its elements:
//!
//! | Buffer               | Container | Size tags                | Ownership                      |
//! |----------------------|-----------|--------------------------|--------------------------------|
//! | `[T; N]`             | vector    | `Const<N>`               | owned, on the stack            |
//! | `Vec<T>`             | vector    | `Dyn`                    | owned, resizable               |
//! | `&mut [T; N]`        | vector    | `Const<N>`               | borrowed                       |
//! | `&mut [T]`, `&[T]`   | vector    | `Dyn`                    | borrowed (`&[T]` is read-only) |
//! | `[[T; C]; R]`        | matrix    | `Const<R>`, `Const<C>`   | owned, on the stack            |
//! | [`HeapBuf<T, R, C>`] | matrix    | `R`, `C`                 | owned, resizable along `Dyn`   |
//! | `&mut [[T; C]; R]`   | matrix    | `Const<R>`, `Const<C>`   | borrowed                       |
//! | [`ExtBuf<T>`]        | matrix    | `Dyn`, `Dyn`             | borrowed, reshapable           |
//!
//! Matrix buffers are flat: the position of element `(row, col)` is decided by the
//! [`Layout`][crate::Layout] of the matrix, not by the buffer. In particular, the outer array of a
//! `[[T; C]; R]` buffer only holds the rows of the matrix if the matrix is row-major.
//!
//! [`VectorAlloc`] and [`MatrixAlloc`] pick the buffer for the result of an operation from its size
//! tags: fixed sizes get array storage, anything dynamic gets heap storage.

use std::fmt;

use crate::{
    config::{DefaultBasis, DefaultLayout},
    Const, Dim, Dyn, Error, Matrix, Result, Vector, Zero,
};

/// Element storage of a [`Vector`].
pub trait VectorBuf {
    /// Element type.
    type Elem: Copy;
    /// Size tag.
    type Size: Dim;

    /// Returns the size of the buffer.
    fn dim(&self) -> Self::Size;

    /// Returns the elements as a slice.
    fn as_slice(&self) -> &[Self::Elem];
}

/// Writable element storage of a [`Vector`].
pub trait VectorBufMut: VectorBuf {
    /// Returns the elements as a mutable slice.
    fn as_mut_slice(&mut self) -> &mut [Self::Elem];

    /// Makes room for `len` elements, if the buffer is resizable.
    ///
    /// Buffers that cannot be resized keep their size. Element values are unspecified afterwards.
    #[inline]
    fn fit(&mut self, len: usize) {
        let _ = len;
    }
}

impl<T: Copy, const N: usize> VectorBuf for [T; N] {
    type Elem = T;
    type Size = Const<N>;

    #[inline]
    fn dim(&self) -> Const<N> {
        Const
    }

    #[inline]
    fn as_slice(&self) -> &[T] {
        self
    }
}

impl<T: Copy, const N: usize> VectorBufMut for [T; N] {
    #[inline]
    fn as_mut_slice(&mut self) -> &mut [T] {
        self
    }
}

impl<T: Copy> VectorBuf for Vec<T> {
    type Elem = T;
    type Size = Dyn;

    #[inline]
    fn dim(&self) -> Dyn {
        Dyn(self.len())
    }

    #[inline]
    fn as_slice(&self) -> &[T] {
        self
    }
}

impl<T: Copy + Zero> VectorBufMut for Vec<T> {
    #[inline]
    fn as_mut_slice(&mut self) -> &mut [T] {
        self
    }

    fn fit(&mut self, len: usize) {
        if self.len() != len {
            log::trace!("resizing dynamic vector from {} to {} elements", self.len(), len);
            self.resize(len, T::ZERO);
        }
    }
}

impl<'a, T: Copy, const N: usize> VectorBuf for &'a mut [T; N] {
    type Elem = T;
    type Size = Const<N>;

    #[inline]
    fn dim(&self) -> Const<N> {
        Const
    }

    #[inline]
    fn as_slice(&self) -> &[T] {
        &self[..]
    }
}

impl<'a, T: Copy, const N: usize> VectorBufMut for &'a mut [T; N] {
    #[inline]
    fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self[..]
    }
}

impl<'a, T: Copy> VectorBuf for &'a mut [T] {
    type Elem = T;
    type Size = Dyn;

    #[inline]
    fn dim(&self) -> Dyn {
        Dyn(self.len())
    }

    #[inline]
    fn as_slice(&self) -> &[T] {
        self
    }
}

impl<'a, T: Copy> VectorBufMut for &'a mut [T] {
    #[inline]
    fn as_mut_slice(&mut self) -> &mut [T] {
        self
    }
}

impl<'a, T: Copy> VectorBuf for &'a [T] {
    type Elem = T;
    type Size = Dyn;

    #[inline]
    fn dim(&self) -> Dyn {
        Dyn(self.len())
    }

    #[inline]
    fn as_slice(&self) -> &[T] {
        self
    }
}

/// Element storage of a [`Matrix`].
pub trait MatrixBuf {
    /// Element type.
    type Elem: Copy;
    /// Size tag of the row count.
    type Rows: Dim;
    /// Size tag of the column count.
    type Cols: Dim;

    /// Returns the number of rows and columns.
    fn shape(&self) -> (Self::Rows, Self::Cols);

    /// Returns all elements, in the order given by the layout of the matrix.
    fn as_slice(&self) -> &[Self::Elem];
}

/// Writable element storage of a [`Matrix`].
pub trait MatrixBufMut: MatrixBuf {
    /// Returns all elements as a mutable slice.
    fn as_mut_slice(&mut self) -> &mut [Self::Elem];

    /// Makes room for a `rows` by `cols` matrix, if the buffer is resizable.
    ///
    /// Only owned buffers whose fixed dimensions already match change. Element values are
    /// unspecified afterwards.
    #[inline]
    fn fit(&mut self, rows: usize, cols: usize) {
        let _ = (rows, cols);
    }
}

impl<T: Copy, const R: usize, const C: usize> MatrixBuf for [[T; C]; R] {
    type Elem = T;
    type Rows = Const<R>;
    type Cols = Const<C>;

    #[inline]
    fn shape(&self) -> (Const<R>, Const<C>) {
        (Const, Const)
    }

    #[inline]
    fn as_slice(&self) -> &[T] {
        self.as_flattened()
    }
}

impl<T: Copy, const R: usize, const C: usize> MatrixBufMut for [[T; C]; R] {
    #[inline]
    fn as_mut_slice(&mut self) -> &mut [T] {
        self.as_flattened_mut()
    }
}

impl<'a, T: Copy, const R: usize, const C: usize> MatrixBuf for &'a mut [[T; C]; R] {
    type Elem = T;
    type Rows = Const<R>;
    type Cols = Const<C>;

    #[inline]
    fn shape(&self) -> (Const<R>, Const<C>) {
        (Const, Const)
    }

    #[inline]
    fn as_slice(&self) -> &[T] {
        self.as_flattened()
    }
}

impl<'a, T: Copy, const R: usize, const C: usize> MatrixBufMut for &'a mut [[T; C]; R] {
    #[inline]
    fn as_mut_slice(&mut self) -> &mut [T] {
        self.as_flattened_mut()
    }
}

/// Heap-allocated matrix storage.
///
/// Each dimension is either fixed (`Const`) or dynamic (`Dyn`). Resizing only affects the dynamic
/// dimensions.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct HeapBuf<T, R: Dim = Dyn, C: Dim = Dyn> {
    data: Vec<T>,
    rows: R,
    cols: C,
}

impl<T: Copy, R: Dim, C: Dim> HeapBuf<T, R, C> {
    /// Allocates a buffer of the given shape, filled with zeroes.
    pub fn zeros(rows: R, cols: C) -> Self
    where
        T: Zero,
    {
        Self {
            data: vec![T::ZERO; rows.value() * cols.value()],
            rows,
            cols,
        }
    }

    /// Wraps a [`Vec`] holding `rows * cols` elements (in layout order).
    pub fn from_vec(data: Vec<T>, rows: R, cols: C) -> Result<Self> {
        if data.len() != rows.value() * cols.value() {
            return Err(Error::IncompatibleMatrixSizes);
        }
        Ok(Self { data, rows, cols })
    }

    /// Returns the underlying [`Vec`].
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T: fmt::Debug, R: Dim, C: Dim> fmt::Debug for HeapBuf<T, R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeapBuf")
            .field("rows", &self.rows.value())
            .field("cols", &self.cols.value())
            .field("data", &self.data)
            .finish()
    }
}

impl<T: Copy, R: Dim, C: Dim> MatrixBuf for HeapBuf<T, R, C> {
    type Elem = T;
    type Rows = R;
    type Cols = C;

    #[inline]
    fn shape(&self) -> (R, C) {
        (self.rows, self.cols)
    }

    #[inline]
    fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T: Copy + Zero, R: Dim, C: Dim> MatrixBufMut for HeapBuf<T, R, C> {
    #[inline]
    fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    fn fit(&mut self, rows: usize, cols: usize) {
        // a fixed dimension that differs means the shapes are incompatible; keep the data
        let (Some(rows), Some(cols)) = (R::try_from_usize(rows), C::try_from_usize(cols)) else {
            return;
        };
        if rows != self.rows || cols != self.cols {
            log::trace!(
                "resizing dynamic matrix from {}x{} to {}x{}",
                self.rows.value(),
                self.cols.value(),
                rows.value(),
                cols.value(),
            );
            self.rows = rows;
            self.cols = cols;
            self.data.clear();
            self.data.resize(rows.value() * cols.value(), T::ZERO);
        }
    }
}

/// Matrix storage borrowed from the caller.
///
/// The borrowed slice is never reallocated. [`ExtBuf::reshape`] can reinterpret it as a
/// different shape with the same number of elements.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct ExtBuf<'a, T> {
    data: &'a mut [T],
    rows: usize,
    cols: usize,
}

impl<'a, T: Copy> ExtBuf<'a, T> {
    /// Uses the first `rows * cols` elements of `data` as matrix storage.
    ///
    /// Returns [`Error::MatrixTooSmall`] if `data` has fewer elements than that, or if `rows * cols`
    /// overflows.
    pub fn new(data: &'a mut [T], rows: usize, cols: usize) -> Result<Self> {
        let len = rows.checked_mul(cols).ok_or(Error::MatrixTooSmall)?;
        if data.len() < len {
            return Err(Error::MatrixTooSmall);
        }
        let (data, _) = data.split_at_mut(len);
        Ok(Self { data, rows, cols })
    }

    /// Reinterprets the storage as a `rows` by `cols` matrix.
    ///
    /// Returns [`Error::ExternalResize`] if that would change the number of elements.
    pub fn reshape(&mut self, rows: usize, cols: usize) -> Result<()> {
        if rows.checked_mul(cols) != Some(self.data.len()) {
            return Err(Error::ExternalResize);
        }
        self.rows = rows;
        self.cols = cols;
        Ok(())
    }
}

impl<'a, T: Copy> MatrixBuf for ExtBuf<'a, T> {
    type Elem = T;
    type Rows = Dyn;
    type Cols = Dyn;

    #[inline]
    fn shape(&self) -> (Dyn, Dyn) {
        (Dyn(self.rows), Dyn(self.cols))
    }

    #[inline]
    fn as_slice(&self) -> &[T] {
        &*self.data
    }
}

impl<'a, T: Copy> MatrixBufMut for ExtBuf<'a, T> {
    #[inline]
    fn as_mut_slice(&mut self) -> &mut [T] {
        &mut *self.data
    }
}

/// Selects the owned buffer used for a vector result of size `Self`.
pub trait VectorAlloc<T: Copy>: Dim {
    /// The buffer type.
    type Buffer: VectorBufMut<Elem = T, Size = Self>;

    /// Allocates a zero-filled buffer.
    fn alloc(size: Self) -> Self::Buffer;
}

impl<T: Copy + Zero, const N: usize> VectorAlloc<T> for Const<N> {
    type Buffer = [T; N];

    #[inline]
    fn alloc(_: Self) -> [T; N] {
        [T::ZERO; N]
    }
}

impl<T: Copy + Zero> VectorAlloc<T> for Dyn {
    type Buffer = Vec<T>;

    #[inline]
    fn alloc(size: Self) -> Vec<T> {
        vec![T::ZERO; size.0]
    }
}

/// Selects the owned buffer used for a matrix result with `Self` rows and `C` columns.
pub trait MatrixAlloc<T: Copy, C: Dim>: Dim {
    /// The buffer type.
    type Buffer: MatrixBufMut<Elem = T, Rows = Self, Cols = C>;

    /// Allocates a zero-filled buffer.
    fn alloc(rows: Self, cols: C) -> Self::Buffer;
}

impl<T: Copy + Zero, const R: usize, const C: usize> MatrixAlloc<T, Const<C>> for Const<R> {
    type Buffer = [[T; C]; R];

    #[inline]
    fn alloc(_: Self, _: Const<C>) -> [[T; C]; R] {
        [[T::ZERO; C]; R]
    }
}

impl<T: Copy + Zero, const R: usize> MatrixAlloc<T, Dyn> for Const<R> {
    type Buffer = HeapBuf<T, Const<R>, Dyn>;

    #[inline]
    fn alloc(rows: Self, cols: Dyn) -> Self::Buffer {
        HeapBuf::zeros(rows, cols)
    }
}

impl<T: Copy + Zero, const C: usize> MatrixAlloc<T, Const<C>> for Dyn {
    type Buffer = HeapBuf<T, Dyn, Const<C>>;

    #[inline]
    fn alloc(rows: Self, cols: Const<C>) -> Self::Buffer {
        HeapBuf::zeros(rows, cols)
    }
}

impl<T: Copy + Zero> MatrixAlloc<T, Dyn> for Dyn {
    type Buffer = HeapBuf<T, Dyn, Dyn>;

    #[inline]
    fn alloc(rows: Self, cols: Dyn) -> Self::Buffer {
        HeapBuf::zeros(rows, cols)
    }
}

/// The owned vector type holding `T` elements with size tag `D`.
pub type VectorOf<D, T> = Vector<<D as VectorAlloc<T>>::Buffer>;

/// The owned matrix type holding `T` elements with size tags `R` and `C`.
pub type MatrixOf<R, C, T, B = DefaultBasis, L = DefaultLayout> =
    Matrix<<R as MatrixAlloc<T, C>>::Buffer, B, L>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_fit() {
        let mut v = vec![1, 2, 3];
        VectorBufMut::fit(&mut v, 5);
        assert_eq!(v.len(), 5);
        assert_eq!(VectorBuf::dim(&v), Dyn(5));

        let mut a = [1, 2, 3];
        VectorBufMut::fit(&mut a, 5);
        assert_eq!(VectorBuf::as_slice(&a), &[1, 2, 3]);
    }

    #[test]
    fn heap_fit() {
        let mut buf = HeapBuf::<f32, Const<2>, Dyn>::zeros(Const, Dyn(3));
        buf.fit(2, 5);
        assert_eq!(buf.shape(), (Const, Dyn(5)));
        assert_eq!(MatrixBuf::as_slice(&buf).len(), 10);
    }

    #[test]
    fn heap_fit_keeps_mismatched_fixed_rows() {
        let mut buf = HeapBuf::from_vec(vec![1, 2, 3, 4], Const::<2>, Dyn(2)).unwrap();
        buf.fit(3, 3);
        assert_eq!(buf.shape(), (Const, Dyn(2)));
        assert_eq!(buf.into_vec(), [1, 2, 3, 4]);
    }

    #[test]
    fn heap_from_vec() {
        assert!(HeapBuf::from_vec(vec![1, 2, 3], Dyn(2), Dyn(2)).is_err());
        let buf = HeapBuf::from_vec(vec![1, 2, 3, 4], Dyn(2), Dyn(2)).unwrap();
        assert_eq!(buf.into_vec(), [1, 2, 3, 4]);
    }

    #[test]
    fn external() {
        let mut data = [0; 7];
        assert_eq!(
            ExtBuf::new(&mut data, 4, 2).unwrap_err(),
            Error::MatrixTooSmall
        );

        let mut ext = ExtBuf::new(&mut data, 2, 3).unwrap();
        assert_eq!(MatrixBuf::as_slice(&ext).len(), 6);
        ext.reshape(3, 2).unwrap();
        assert_eq!(ext.shape(), (Dyn(3), Dyn(2)));
        assert_eq!(ext.reshape(2, 2), Err(Error::ExternalResize));
        assert_eq!(ext.reshape(usize::MAX, 2), Err(Error::ExternalResize));
        ext.fit(10, 10);
        assert_eq!(ext.shape(), (Dyn(3), Dyn(2)));
    }

    #[test]
    fn external_shape_overflow() {
        let mut data = [0u8; 4];
        assert_eq!(
            ExtBuf::new(&mut data, usize::MAX, 2).unwrap_err(),
            Error::MatrixTooSmall
        );
        assert_eq!(
            ExtBuf::new(&mut data, 1 << (usize::BITS / 2), 1 << (usize::BITS / 2)).unwrap_err(),
            Error::MatrixTooSmall
        );
    }

    #[test]
    fn flattened() {
        let buf = [[1, 2, 3], [4, 5, 6]];
        assert_eq!(MatrixBuf::as_slice(&buf), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(buf.shape(), (Const::<2>, Const::<3>));
    }
}
