mod ops;

use std::{fmt, ops::Deref};

use crate::{
    vec3, Const, Error, Number, One, Real, Result, Vec3, Vec4, Vector, VectorExpr, Zero, XYZW,
};

/// Quaternion `xi + yj + zk + w`.
///
/// Unit quaternions represent 3D rotations.
///
/// Quaternions are stored like a 4-dimensional vector, imaginary part first: the `x`, `y` and
/// `z` components are the `i`, `j` and `k` coefficients, and `w` is the real part.
///
/// A quaternion is a [`VectorExpr`] with 4 elements in that order, so it can be assigned to any
/// 4-element vector. Arithmetic with vectors is not supported, since the products differ.
#[derive(Clone, Copy, Hash, Default)]
#[repr(transparent)]
pub struct Quat<T> {
    vec: Vec4<T>,
}

unsafe impl<T: bytemuck::Zeroable> bytemuck::Zeroable for Quat<T> {}
unsafe impl<T: bytemuck::Pod> bytemuck::Pod for Quat<T> {}

impl<T: Zero + One> Quat<T> {
    /// `1 + 0i + 0j + 0k`.
    ///
    /// This is a unit quaternion that will not change a vector it rotates.
    pub const IDENTITY: Self = Self {
        vec: Vector::from_buf([T::ZERO, T::ZERO, T::ZERO, T::ONE]),
    };
}

impl<T> Quat<T> {
    /// Creates a quaternion from a 4-dimensional [`Vector`], imaginary part first.
    pub const fn from_vec(vec: Vec4<T>) -> Self {
        Self { vec }
    }

    /// Creates a quaternion from its imaginary coefficients `x`, `y`, `z` and real part `w`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lamina::*;
    /// let q = Quat::from_components(1, 2, 3, 4);
    /// assert_eq!((q.x, q.y, q.z, q.w), (1, 2, 3, 4));
    /// ```
    pub const fn from_components(x: T, y: T, z: T, w: T) -> Self {
        Self {
            vec: Vector::from_buf([x, y, z, w]),
        }
    }

    /// Returns the underlying 4-dimensional vector.
    pub fn into_vec(self) -> Vec4<T> {
        self.vec
    }
}

impl<T: Copy> Quat<T> {
    /// Creates a quaternion from a slice of exactly 4 elements, imaginary part first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::QuaternionSize`] if `slice` does not have 4 elements.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lamina::*;
    /// assert_eq!(Quat::try_from_slice(&[0, 0, 0, 1]), Ok(Quat::IDENTITY));
    /// assert_eq!(Quat::<i32>::try_from_slice(&[1, 2, 3]), Err(Error::QuaternionSize));
    /// ```
    pub fn try_from_slice(slice: &[T]) -> Result<Self> {
        match <[T; 4]>::try_from(slice) {
            Ok(array) => Ok(Self::from_vec(Vector::from_buf(array))),
            Err(_) => Err(Error::QuaternionSize),
        }
    }

    /// Returns the imaginary part as a 3-dimensional vector.
    pub fn imaginary(&self) -> Vec3<T> {
        vec3(self.x, self.y, self.z)
    }

    /// Returns the real part.
    pub fn real(&self) -> T {
        self.w
    }

    /// Returns the elements as an array, imaginary part first.
    pub fn to_array(&self) -> [T; 4] {
        *self.vec.as_array()
    }
}

impl<T: Number> Quat<T> {
    /// Returns the conjugate of this quaternion, which negates the imaginary part.
    ///
    /// For unit quaternions, the conjugate is the inverse rotation.
    pub fn conjugate(self) -> Self {
        Self::from_components(-self.x, -self.y, -self.z, self.w)
    }

    /// Computes the 4-dimensional dot product of two quaternions.
    pub fn dot(&self, other: Self) -> T {
        self.vec.dot(other.vec)
    }

    /// Sum of the squared components.
    pub fn length2(&self) -> T {
        self.vec.length2()
    }

    /// Computes the Hamilton product `self * rhs`.
    ///
    /// The product of two rotation quaternions applies `rhs` first, then `self`.
    pub fn hamilton(self, rhs: Self) -> Self {
        let [x1, y1, z1, w1] = self.to_array();
        let [x2, y2, z2, w2] = rhs.to_array();
        Self::from_components(
            w1 * x2 + x1 * w2 + y1 * z2 - z1 * y2,
            w1 * y2 - x1 * z2 + y1 * w2 + z1 * x2,
            w1 * z2 + x1 * y2 - y1 * x2 + z1 * w2,
            w1 * w2 - x1 * x2 - y1 * y2 - z1 * z2,
        )
    }

    /// Rotates the 3-dimensional vector `v` by this quaternion.
    ///
    /// This computes `q * v * q⁻¹`, treating `v` as a quaternion with zero real part. If `self`
    /// is not of unit length, the result is scaled by its squared length.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lamina::*;
    /// // half a turn around the Z axis
    /// let q = Quat::from_components(0.0, 0.0, 1.0, 0.0);
    /// assert_eq!(q.rotate(vec3(1.0, 2.0, 3.0)), vec3(-1.0, -2.0, 3.0));
    /// ```
    pub fn rotate(&self, v: Vec3<T>) -> Vec3<T> {
        let u = self.imaginary();
        let w = self.w;
        let two = T::ONE + T::ONE;
        // v' = (w² - u·u) v + 2 (u·v) u + 2 w (u × v)
        let uv = u.dot(v);
        let uu = u.dot(u);
        let c = u.cross(v).eval();
        Vector::from_fn(|i| (w * w - uu) * v[i] + two * uv * u[i] + two * w * c[i])
    }
}

impl<T: Real> Quat<T> {
    /// Euclidean norm of the four components.
    ///
    /// If the length is not equal to one, rotating a vector with this quaternion will also scale
    /// the vector. Quaternions that model rotations should be kept at unit length.
    #[doc(alias = "norm", alias = "magnitude")]
    pub fn length(&self) -> T {
        self.vec.length()
    }

    /// Returns a copy of this quaternion scaled to unit length.
    pub fn normalize(self) -> Self {
        Self::from_vec(self.vec.normalize().eval())
    }

    /// Returns the multiplicative inverse, so that `q * q.inverse()` is the identity.
    ///
    /// The zero quaternion has no inverse, and produces non-finite components.
    pub fn inverse(self) -> Self {
        self.conjugate() / self.length2()
    }
}

impl<T> Deref for Quat<T> {
    type Target = XYZW<T>;

    #[inline]
    fn deref(&self) -> &XYZW<T> {
        &self.vec
    }
}

impl<T: Copy> VectorExpr for Quat<T> {
    type Elem = T;
    type Size = Const<4>;

    #[inline]
    fn dim(&self) -> Const<4> {
        Const
    }

    #[inline]
    fn get(&self, i: usize) -> T {
        self.vec.as_array()[i]
    }
}

impl<T> From<Quat<T>> for Vec4<T> {
    fn from(q: Quat<T>) -> Self {
        q.vec
    }
}

impl<T: fmt::Debug> fmt::Debug for Quat<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Quat")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("z", &self.z)
            .field("w", &self.w)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    fn quarter_turn_x() -> Quat<f64> {
        let (sin, cos) = (std::f64::consts::FRAC_PI_4).sin_cos();
        Quat::from_components(sin, 0.0, 0.0, cos)
    }

    #[test]
    fn identity() {
        let v = vec3(1.0, -2.0, 3.0);
        assert_eq!(Quat::IDENTITY.rotate(v), v);
        assert_eq!(Quat::<f32>::IDENTITY.length(), 1.0);
        assert_eq!(Quat::<i32>::IDENTITY * Quat::<i32>::IDENTITY, Quat::IDENTITY);
    }

    #[test]
    fn rotation() {
        let q = quarter_turn_x();
        assert_approx_eq!(q.rotate(vec3(0.0, 1.0, 0.0)), vec3(0.0, 0.0, 1.0)).abs(1e-7);
        assert_approx_eq!(q.rotate(vec3(0.0, 0.0, 1.0)), vec3(0.0, -1.0, 0.0)).abs(1e-7);
        assert_approx_eq!((q * q).rotate(vec3(0.0, 1.0, 0.0)), vec3(0.0, -1.0, 0.0)).abs(1e-7);
        assert_approx_eq!(q.conjugate().rotate(vec3(0.0, 0.0, 1.0)), vec3(0.0, 1.0, 0.0))
            .abs(1e-7);
    }

    #[test]
    fn hamilton_units() {
        let i = Quat::from_components(1, 0, 0, 0);
        let j = Quat::from_components(0, 1, 0, 0);
        let k = Quat::from_components(0, 0, 1, 0);
        assert_eq!(i * j, k);
        assert_eq!(j * k, i);
        assert_eq!(k * i, j);
        assert_eq!(j * i, -k);
        assert_eq!(i * i, -Quat::IDENTITY);
        assert_eq!(i * j * k, -Quat::IDENTITY);
    }

    #[test]
    fn inverse() {
        let q = Quat::from_components(1.0, 2.0, -1.0, 0.5);
        assert_approx_eq!(q * q.inverse(), Quat::IDENTITY).abs(1e-12);
        assert_approx_eq!(q.normalize().length(), 1.0).abs(1e-12);
        assert_eq!(q.dot(q), q.length2());
    }

    #[test]
    fn arithmetic() {
        let a = Quat::from_components(1, 2, 3, 4);
        let b = Quat::from_components(4, 3, 2, 1);
        assert_eq!(a + b, Quat::from_components(5, 5, 5, 5));
        assert_eq!(a - b, Quat::from_components(-3, -1, 1, 3));
        assert_eq!(a * 2, Quat::from_components(2, 4, 6, 8));
        assert_eq!((a * 2) / 2, a);
    }

    #[test]
    fn as_vector_expr() {
        let q = Quat::from_components(1, 2, 3, 4);
        let mut v = DynVector::<i32>::zeros(0);
        v.try_assign(q).unwrap();
        assert_eq!(v, [1, 2, 3, 4]);
        assert_eq!(Vec4::from(q), vec4(1, 2, 3, 4));
        assert_eq!(Quat::try_from_slice(v.as_slice()), Ok(q));
    }

    #[test]
    fn fmt() {
        let q = Quat::from_components(1, 2, 3, 4);
        assert_eq!(format!("{q:?}"), "Quat { x: 1, y: 2, z: 3, w: 4 }");
    }

    #[test]
    fn pod() {
        let q: Quat<f32> = bytemuck::cast([0.0f32, 0.0, 0.0, 1.0]);
        assert_eq!(q, Quat::IDENTITY);
    }
}
