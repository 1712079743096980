//! The [`Vector`] container and its fixed-size aliases.

use std::{array, fmt};

use crate::{
    storage::{VectorBuf, VectorBufMut},
    Error, One, Result, VectorExpr, VectorExprMut, Zero,
};

mod ops;
mod view;

pub use view::*;

macro_rules! aliases {
    ($($n:literal: $name:ident, $f32:ident;)+) => {$(
        #[doc = concat!("Vector with ", stringify!($n), " inline elements.")]
        pub type $name<T> = Vector<[T; $n]>;
        #[doc = concat!("[`", stringify!($name), "`] of [`f32`].")]
        pub type $f32 = $name<f32>;
    )+};
}
aliases! {
    1: Vec1, Vec1f;
    2: Vec2, Vec2f;
    3: Vec3, Vec3f;
    4: Vec4, Vec4f;
}
/// Vector with `N` inline elements.
pub type VectorN<T, const N: usize> = Vector<[T; N]>;
/// Heap-allocated vector, sized at run time.
pub type DynVector<T> = Vector<Vec<T>>;
/// Vector over a borrowed, caller-owned slice.
pub type ExtVector<'a, T> = Vector<&'a mut [T]>;

/// A column vector storing its elements in `S`.
///
/// The storage decides the size tag: arrays (`[T; N]`, `&mut [T; N]`) make fixed-size vectors,
/// [`Vec<T>`] and slices make dynamically sized ones. Vectors are [`VectorExpr`]s and combine with
/// any other vector expression through the `std::ops` operators.
///
/// Fixed-size vectors are built with [`vec1`] to [`vec4`], [`Vector::splat`], [`Vector::from_fn`],
/// [`Vector::try_from_slice`], `From<[T; N]>` or the `ZERO`, `X`, `Y`, `Z` and `W` constants.
/// Heap vectors come from [`DynVector::zeros`], [`DynVector::from_slice`] and
/// [`DynVector::from_fn_dyn`]. [`Vector::external`] borrows memory owned by the caller instead.
///
/// Small vectors expose their elements as `x`, `y`, `z` and `w` fields, in addition to indexing.
/// Fixed-size vectors have the layout of `[T; N]` and are [`bytemuck::Pod`] whenever `T` is.
#[derive(Clone, Copy, Hash, Default)]
#[repr(transparent)]
pub struct Vector<S>(S);

unsafe impl<T: bytemuck::Zeroable, const N: usize> bytemuck::Zeroable for Vector<[T; N]> {}
unsafe impl<T: bytemuck::Pod, const N: usize> bytemuck::Pod for Vector<[T; N]> {}

impl<S> Vector<S> {
    /// Wraps a storage value.
    #[inline]
    pub const fn from_buf(buf: S) -> Self {
        Self(buf)
    }

    /// Returns the underlying storage.
    #[inline]
    pub fn into_buf(self) -> S {
        self.0
    }
}

impl<S: VectorBuf> Vector<S> {
    /// Returns a reference to the elements as a slice.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lamina::*;
    /// assert_eq!(vec3(1, 2, 3).as_slice(), &[1, 2, 3]);
    /// ```
    #[inline]
    pub fn as_slice(&self) -> &[S::Elem] {
        self.0.as_slice()
    }

    /// Returns an iterator over the elements.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = S::Elem> + '_ {
        self.as_slice().iter().copied()
    }
}

impl<S: VectorBufMut> Vector<S> {
    /// Returns a mutable reference to the elements as a slice.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lamina::*;
    /// let mut v = vec3(1, 2, 3);
    /// v.as_mut_slice()[1] = 777;
    /// assert_eq!(v, [1, 777, 3]);
    /// ```
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [S::Elem] {
        self.0.as_mut_slice()
    }
}

impl<S: VectorBuf> VectorExpr for Vector<S> {
    type Elem = S::Elem;
    type Size = S::Size;

    #[inline]
    fn dim(&self) -> S::Size {
        self.0.dim()
    }

    #[inline]
    fn get(&self, i: usize) -> S::Elem {
        self.0.as_slice()[i]
    }
}

impl<S: VectorBufMut> VectorExprMut for Vector<S> {
    #[inline]
    fn get_mut(&mut self, i: usize) -> &mut S::Elem {
        &mut self.0.as_mut_slice()[i]
    }

    #[inline]
    fn fit(&mut self, len: usize) {
        self.0.fit(len);
    }
}

impl<T: Zero, const N: usize> Vector<[T; N]> {
    /// All elements are [`Zero::ZERO`].
    pub const ZERO: Self = Self([T::ZERO; N]);
}

macro_rules! unit_vectors {
    ($n:literal: $($name:ident => [$($e:ident),+]),+) => {
        impl<T: Zero + One> Vector<[T; $n]> {
            $(
                #[doc = concat!("Unit vector along the ", stringify!($name), " axis.")]
                pub const $name: Self = Self([$(T::$e),+]);
            )+
        }
    };
}
unit_vectors!(1: X => [ONE]);
unit_vectors!(2: X => [ONE, ZERO], Y => [ZERO, ONE]);
unit_vectors!(3: X => [ONE, ZERO, ZERO], Y => [ZERO, ONE, ZERO], Z => [ZERO, ZERO, ONE]);
unit_vectors!(4:
    X => [ONE, ZERO, ZERO, ZERO],
    Y => [ZERO, ONE, ZERO, ZERO],
    Z => [ZERO, ZERO, ONE, ZERO],
    W => [ZERO, ZERO, ZERO, ONE]
);

impl<T, const N: usize> Vector<[T; N]> {
    /// Fills every element with `elem`.
    ///
    /// ```
    /// # use lamina::*;
    /// assert_eq!(Vec4::splat(-1), vec4(-1, -1, -1, -1));
    /// ```
    #[inline]
    pub fn splat(elem: T) -> Self
    where
        T: Copy,
    {
        Self([elem; N])
    }

    /// Computes element `i` as `cb(i)`, in ascending order.
    ///
    /// ```
    /// # use lamina::*;
    /// let squares = VectorN::<u32, 5>::from_fn(|i| (i * i) as u32);
    /// assert_eq!(squares, [0, 1, 4, 9, 16]);
    /// ```
    pub fn from_fn<F>(cb: F) -> Self
    where
        F: FnMut(usize) -> T,
    {
        Self(array::from_fn(cb))
    }

    /// Copies the elements of `slice`, which must have exactly `N` elements.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lamina::*;
    /// assert_eq!(Vec3::try_from_slice(&[1, 2, 3]), Ok(vec3(1, 2, 3)));
    /// assert_eq!(Vec3::try_from_slice(&[1, 2]), Err(Error::WrongVectorSize));
    /// ```
    pub fn try_from_slice(slice: &[T]) -> Result<Self>
    where
        T: Copy,
    {
        <[T; N]>::try_from(slice)
            .map(Self)
            .map_err(|_| Error::WrongVectorSize)
    }

    #[inline]
    pub const fn as_array(&self) -> &[T; N] {
        &self.0
    }

    #[inline]
    pub fn as_mut_array(&mut self) -> &mut [T; N] {
        &mut self.0
    }

    /// Unwraps the element array.
    #[inline]
    pub fn into_array(self) -> [T; N] {
        self.0
    }
}

impl<T: Copy> Vector<Vec<T>> {
    /// Creates a dynamically sized vector with `len` zero elements.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lamina::*;
    /// let v = DynVector::<f32>::zeros(5);
    /// assert_eq!(v.size(), 5);
    /// assert_eq!(v.as_slice(), &[0.0; 5]);
    /// ```
    pub fn zeros(len: usize) -> Self
    where
        T: Zero,
    {
        Self(vec![T::ZERO; len])
    }

    /// Creates a dynamically sized vector holding a copy of `slice`.
    pub fn from_slice(slice: &[T]) -> Self {
        Self(slice.to_vec())
    }

    /// Creates a dynamically sized vector by invoking a closure with the index of each element.
    pub fn from_fn_dyn<F>(len: usize, cb: F) -> Self
    where
        F: FnMut(usize) -> T,
    {
        Self((0..len).map(cb).collect())
    }

    /// Changes the number of elements to `len`, filling new elements with zero.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lamina::*;
    /// let mut v = DynVector::from_slice(&[1, 2]);
    /// v.resize(4);
    /// assert_eq!(v, [1, 2, 0, 0]);
    /// ```
    pub fn resize(&mut self, len: usize)
    where
        T: Zero,
    {
        self.0.resize(len, T::ZERO);
    }

    /// Returns the underlying [`Vec`].
    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.0
    }
}

impl<'a, T: Copy> Vector<&'a mut [T]> {
    /// Wraps externally owned memory as a dynamically sized vector.
    ///
    /// The vector reads and writes `data` directly. Its size is fixed to `data.len()`: assigning
    /// an expression of any other size is an error.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lamina::*;
    /// let mut data = [0.0; 3];
    /// let mut v = Vector::external(&mut data[..]);
    /// v.try_assign(vec3(1.0, 2.0, 3.0) * 2.0)?;
    /// assert_eq!(data, [2.0, 4.0, 6.0]);
    /// # Ok::<_, lamina::Error>(())
    /// ```
    #[inline]
    pub fn external(data: &'a mut [T]) -> Self {
        Self(data)
    }
}

impl<'a, T: Copy, const N: usize> Vector<&'a mut [T; N]> {
    /// Wraps an externally owned array as a fixed-size vector.
    #[inline]
    pub fn external_fixed(data: &'a mut [T; N]) -> Self {
        Self(data)
    }
}

impl<T: Copy> Vector<[T; 1]> {
    /// Returns `(x, value)`.
    pub fn extend(self, value: T) -> Vec2<T> {
        let [x] = self.0;
        vec2(x, value)
    }
}

impl<T: Copy> Vector<[T; 2]> {
    /// Drops `y`.
    pub fn truncate(self) -> Vec1<T> {
        let [x, _] = self.0;
        vec1(x)
    }

    /// Returns `(x, y, value)`.
    ///
    /// ```
    /// # use lamina::*;
    /// assert_eq!(vec2(3, 4).extend(0), vec3(3, 4, 0));
    /// ```
    pub fn extend(self, value: T) -> Vec3<T> {
        let [x, y] = self.0;
        vec3(x, y, value)
    }
}

impl<T: Copy> Vector<[T; 3]> {
    /// Drops `z`.
    pub fn truncate(self) -> Vec2<T> {
        let [x, y, _] = self.0;
        vec2(x, y)
    }

    /// Returns `(x, y, z, value)`, for example a point in homogeneous coordinates when `value` is
    /// 1.
    pub fn extend(self, value: T) -> Vec4<T> {
        let [x, y, z] = self.0;
        vec4(x, y, z, value)
    }
}

impl<T: Copy> Vector<[T; 4]> {
    /// Drops `w`.
    ///
    /// ```
    /// # use lamina::*;
    /// let p = vec4(2.0, 4.0, 6.0, 2.0);
    /// assert_eq!((p / p.w).eval().truncate(), vec3(1.0, 2.0, 3.0));
    /// ```
    pub fn truncate(self) -> Vec3<T> {
        let [x, y, z, _] = self.0;
        vec3(x, y, z)
    }
}

impl<T, const N: usize> From<[T; N]> for Vector<[T; N]> {
    #[inline]
    fn from(value: [T; N]) -> Self {
        Self(value)
    }
}

impl<T, const N: usize> From<Vector<[T; N]>> for [T; N] {
    #[inline]
    fn from(value: Vector<[T; N]>) -> Self {
        value.0
    }
}

impl<T> From<Vec<T>> for Vector<Vec<T>> {
    #[inline]
    fn from(value: Vec<T>) -> Self {
        Self(value)
    }
}

impl<S: VectorBuf> AsRef<[S::Elem]> for Vector<S> {
    #[inline]
    fn as_ref(&self) -> &[S::Elem] {
        self.0.as_slice()
    }
}

impl<S: VectorBufMut> AsMut<[S::Elem]> for Vector<S> {
    #[inline]
    fn as_mut(&mut self) -> &mut [S::Elem] {
        self.0.as_mut_slice()
    }
}

/// Writes `(a, b, c)` using `each` for the elements.
fn write_tuple<T>(
    f: &mut fmt::Formatter<'_>,
    elems: &[T],
    mut each: impl FnMut(&T, &mut fmt::Formatter<'_>) -> fmt::Result,
) -> fmt::Result {
    f.write_str("(")?;
    for (i, elem) in elems.iter().enumerate() {
        if i != 0 {
            f.write_str(", ")?;
        }
        each(elem, &mut *f)?;
    }
    f.write_str(")")
}

impl<S: VectorBuf> fmt::Debug for Vector<S>
where
    S::Elem: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_tuple(f, self.as_slice(), fmt::Debug::fmt)
    }
}

impl<S: VectorBuf> fmt::Display for Vector<S>
where
    S::Elem: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_tuple(f, self.as_slice(), fmt::Display::fmt)
    }
}

#[inline]
pub const fn vec1<T>(x: T) -> Vec1<T> {
    Vector([x])
}

#[inline]
pub const fn vec2<T>(x: T, y: T) -> Vec2<T> {
    Vector([x, y])
}

#[inline]
pub const fn vec3<T>(x: T, y: T, z: T) -> Vec3<T> {
    Vector([x, y, z])
}

#[inline]
pub const fn vec4<T>(x: T, y: T, z: T, w: T) -> Vec4<T> {
    Vector([x, y, z, w])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_and_indexed() {
        let v = Vec4::<i8>::Z;
        assert_eq!((v.x, v.y, v.z, v.w), (0, 0, 1, 0));
        assert_eq!(v[2], 1);
        assert_eq!(Vec1::<u8>::X.x, 1);

        let mut v = vec3(4, 5, 6);
        v.z -= 6;
        v[0] *= 2;
        assert_eq!(v, [8, 5, 0]);
    }

    #[test]
    fn formatting() {
        assert_eq!(vec2(1.5f32, -2.0).to_string(), "(1.5, -2)");
        assert_eq!(format!("{:?}", vec2(1.5f32, -2.0)), "(1.5, -2.0)");
        assert_eq!(format!("{:?}", DynVector::from_slice(&[7u8])), "(7)");
        assert_eq!(format!("{}", DynVector::<i32>::zeros(0)), "()");
    }

    #[test]
    fn dot_across_storage() {
        let fixed = vec4(2, 0, -1, 3);
        assert_eq!(fixed.dot(fixed), 14);
        assert_eq!(fixed.dot(Vec4::<i32>::W), 3);

        let dynamic = DynVector::from_slice(&[0.5, 0.5]);
        assert_eq!(dynamic.dot(vec2(4.0, -2.0)), 1.0);
    }

    #[test]
    fn external_writes_through() {
        let mut data = [1, 2, 3, 4];
        {
            let mut v = Vector::external(&mut data[1..]);
            v += vec3(10, 10, 10);
            assert_eq!(v.size(), 3);
        }
        assert_eq!(data, [1, 12, 13, 14]);

        let mut fixed = [0u8; 2];
        Vector::external_fixed(&mut fixed).try_assign(vec2(5u8, 6)).unwrap();
        assert_eq!(fixed, [5, 6]);
    }

    #[test]
    #[cfg(not(feature = "unchecked"))]
    fn external_keeps_its_size() {
        let mut data = [0; 2];
        let mut v = Vector::external(&mut data[..]);
        assert_eq!(v.try_assign(vec3(1, 2, 3)), Err(Error::IncompatibleVectorSizes));
    }

    #[test]
    fn dynamic_resizes_on_assign() {
        let mut v = DynVector::<i64>::zeros(0);
        v.try_assign(vec4(1, 2, 3, 4)).unwrap();
        assert_eq!(v.size(), 4);
        v.try_assign(vec2(5, 6)).unwrap();
        assert_eq!(v, [5, 6]);
    }

    #[test]
    fn pod() {
        let v = vec3(1.0f32, 2.0, 3.0);
        let bytes: &[u8] = bytemuck::bytes_of(&v);
        assert_eq!(bytes.len(), 12);
        let back: Vec3f = bytemuck::pod_read_unaligned(bytes);
        assert_eq!(back, v);
    }
}
