use lamina::{One, Sqrt, Trig, Zero};
use lamina::{check, Basis, Const, DimPromote, MatrixExpr, Quat, Real, Result, VectorExpr};

use crate::to_vec3;

/// Creates a quaternion rotating by `angle` radians around `axis`.
///
/// `axis` does not need to be normalized, but must not be zero.
///
/// # Errors
///
/// Returns [`Error::WrongVectorSize`][lamina::Error::WrongVectorSize] if `axis` does not have
/// exactly 3 elements.
///
/// # Examples
///
/// ```
/// # use lamina::*;
/// # use lamina_mathlib::*;
/// let q = quat_rotation_axis_angle(vec3(0.0, 0.0, 2.0), std::f64::consts::PI)?;
/// assert_approx_eq!(q.rotate(vec3(1.0, 2.0, 3.0)), vec3(-1.0, -2.0, 3.0)).abs(1e-15);
/// # Ok::<_, lamina::Error>(())
/// ```
pub fn quat_rotation_axis_angle<V>(axis: V, angle: V::Elem) -> Result<Quat<V::Elem>>
where
    V: VectorExpr,
    V::Elem: Real,
    V::Size: DimPromote<Const<3>>,
{
    let axis = to_vec3(axis)?.normalize().eval();
    let (s, c) = half(angle).sin_cos();
    Ok(Quat::from_components(axis.x * s, axis.y * s, axis.z * s, c))
}

fn half<T: Real>(angle: T) -> T {
    angle / (T::ONE + T::ONE)
}

/// Creates a quaternion rotating by `angle` radians around the X axis.
pub fn quat_rotation_x<T: Real>(angle: T) -> Quat<T> {
    let (s, c) = half(angle).sin_cos();
    Quat::from_components(s, T::ZERO, T::ZERO, c)
}

/// Creates a quaternion rotating by `angle` radians around the Y axis.
pub fn quat_rotation_y<T: Real>(angle: T) -> Quat<T> {
    let (s, c) = half(angle).sin_cos();
    Quat::from_components(T::ZERO, s, T::ZERO, c)
}

/// Creates a quaternion rotating by `angle` radians around the Z axis.
pub fn quat_rotation_z<T: Real>(angle: T) -> Quat<T> {
    let (s, c) = half(angle).sin_cos();
    Quat::from_components(T::ZERO, T::ZERO, s, c)
}

/// Extracts the rotation stored in the upper-left 3x3 block of `m`.
///
/// The block has to be a pure rotation (orthonormal with a determinant of 1) for the result to be
/// meaningful. The basis orientation of `m` is honored, so this is the inverse of
/// [`rotation_quat`][crate::rotation_quat].
///
/// # Errors
///
/// Returns [`Error::MatrixTooSmall`][lamina::Error::MatrixTooSmall] if `m` is smaller than 3x3.
pub fn quat_from_matrix<M>(m: M) -> Result<Quat<M::Elem>>
where
    M: MatrixExpr,
    M::Elem: Real,
{
    let (rows, cols) = m.shape();
    check::min_shape::<3, 3, _, _>(rows, cols)?;

    // element `(r, c)` of the rotation in column-basis form
    let a = |r: usize, c: usize| {
        let (row, col) = <M::Basis as Basis>::position(c, r);
        m.get(row, col)
    };
    let one = M::Elem::ONE;
    let quarter = M::Elem::from_f64(0.25);
    let trace = a(0, 0) + a(1, 1) + a(2, 2);

    // Pick the largest of the four candidate divisors to stay away from cancellation.
    let q = if trace > M::Elem::ZERO {
        let s = (trace + one).sqrt() * (one + one);
        Quat::from_components(
            (a(2, 1) - a(1, 2)) / s,
            (a(0, 2) - a(2, 0)) / s,
            (a(1, 0) - a(0, 1)) / s,
            quarter * s,
        )
    } else if a(0, 0) > a(1, 1) && a(0, 0) > a(2, 2) {
        let s = (one + a(0, 0) - a(1, 1) - a(2, 2)).sqrt() * (one + one);
        Quat::from_components(
            quarter * s,
            (a(0, 1) + a(1, 0)) / s,
            (a(0, 2) + a(2, 0)) / s,
            (a(2, 1) - a(1, 2)) / s,
        )
    } else if a(1, 1) > a(2, 2) {
        let s = (one + a(1, 1) - a(0, 0) - a(2, 2)).sqrt() * (one + one);
        Quat::from_components(
            (a(0, 1) + a(1, 0)) / s,
            quarter * s,
            (a(1, 2) + a(2, 1)) / s,
            (a(0, 2) - a(2, 0)) / s,
        )
    } else {
        let s = (one + a(2, 2) - a(0, 0) - a(1, 1)).sqrt() * (one + one);
        Quat::from_components(
            (a(0, 2) + a(2, 0)) / s,
            (a(1, 2) + a(2, 1)) / s,
            quarter * s,
            (a(1, 0) - a(0, 1)) / s,
        )
    };
    Ok(q)
}

/// Spherically interpolates between the unit quaternions `from` and `to`.
///
/// `t = 0` returns `from` and `t = 1` returns a quaternion describing the same rotation as `to`.
/// The interpolation follows the shorter of the two arcs between the rotations, at constant
/// angular velocity.
///
/// # Examples
///
/// ```
/// # use lamina::*;
/// # use lamina_mathlib::*;
/// let a = quat_rotation_z(0.0);
/// let b = quat_rotation_z(1.0);
/// assert_approx_eq!(slerp(a, b, 0.25), quat_rotation_z(0.25)).abs(1e-14);
/// ```
pub fn slerp<T: Real>(from: Quat<T>, to: Quat<T>, t: T) -> Quat<T> {
    let (to, cos) = shortest_arc(from, to);

    // Nearly identical rotations make `sin` vanish; fall back to linear interpolation.
    if cos > T::ONE - T::from_f64(1e-6) {
        log::trace!("slerp: falling back to nlerp for cos = {cos:?}");
        return lerp(from, to, t).normalize();
    }

    let theta = cos.acos();
    let sin = theta.sin();
    let a = ((T::ONE - t) * theta).sin() / sin;
    let b = (t * theta).sin() / sin;
    from * a + to * b
}

/// Linearly interpolates between the unit quaternions `from` and `to`, and normalizes the result.
///
/// This is cheaper than [`slerp`] and follows the same path, but does not move at constant angular
/// velocity.
pub fn nlerp<T: Real>(from: Quat<T>, to: Quat<T>, t: T) -> Quat<T> {
    let (to, _) = shortest_arc(from, to);
    lerp(from, to, t).normalize()
}

fn lerp<T: Real>(from: Quat<T>, to: Quat<T>, t: T) -> Quat<T> {
    from * (T::ONE - t) + to * t
}

/// `q` and `-q` describe the same rotation; picks the one closer to `from`.
fn shortest_arc<T: Real>(from: Quat<T>, to: Quat<T>) -> (Quat<T>, T) {
    let cos = from.dot(to);
    if cos < T::ZERO {
        (-to, -cos)
    } else {
        (to, cos)
    }
}
