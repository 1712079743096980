use lamina::{MinMax, Sqrt, Trig, Zero};
use lamina::{dot, perp_dot, vec2, Const, DimPromote, Real, Result, Vec2, VectorExpr};

/// Returns the angle between two vectors, in radians, in the range `[0, π]`.
///
/// The vectors may have any number of elements, and do not need to be normalized. The angle
/// involving a zero vector is 0.
///
/// # Errors
///
/// Returns [`Error::IncompatibleVectorSizes`][lamina::Error::IncompatibleVectorSizes] if the
/// vectors differ in size.
///
/// # Examples
///
/// ```
/// # use lamina::*;
/// # use lamina_mathlib::*;
/// let angle = unsigned_angle(vec3(1.0, 0.0, 0.0), vec3(0.0, 0.0, -3.0))?;
/// assert_approx_eq!(angle, std::f64::consts::FRAC_PI_2);
/// # Ok::<_, lamina::Error>(())
/// ```
pub fn unsigned_angle<A, B>(a: A, b: B) -> Result<A::Elem>
where
    A: VectorExpr,
    A::Elem: Real,
    B: VectorExpr<Elem = A::Elem>,
    A::Size: DimPromote<B::Size>,
{
    let cos = dot(&a, &b)?;
    // |a|²|b|² - (a·b)² is |a × b|² in three dimensions
    let sin2 = a.length2() * b.length2() - cos * cos;
    Ok(sin2.max(A::Elem::ZERO).sqrt().atan2(cos))
}

/// Returns the angle to rotate the 2D vector `a` by to make it point along `b`, in radians.
///
/// The result is in the range `[-π, π]`, and positive for counterclockwise rotations.
///
/// # Errors
///
/// Returns [`Error::WrongVectorSize`][lamina::Error::WrongVectorSize] if either vector does not
/// have exactly 2 elements.
///
/// # Examples
///
/// ```
/// # use lamina::*;
/// # use lamina_mathlib::*;
/// use std::f32::consts::FRAC_PI_2;
///
/// assert_eq!(signed_angle_2d(Vec2f::X, Vec2f::Y)?, FRAC_PI_2);
/// assert_eq!(signed_angle_2d(Vec2f::Y, Vec2f::X)?, -FRAC_PI_2);
/// # Ok::<_, lamina::Error>(())
/// ```
pub fn signed_angle_2d<A, B>(a: A, b: B) -> Result<A::Elem>
where
    A: VectorExpr,
    A::Elem: Real,
    B: VectorExpr<Elem = A::Elem>,
    A::Size: DimPromote<Const<2>> + DimPromote<B::Size>,
    B::Size: DimPromote<Const<2>>,
{
    let sin = perp_dot(&a, &b)?;
    let cos = dot(&a, &b)?;
    Ok(sin.atan2(cos))
}

/// Rotates the 2D vector `v` counterclockwise by `angle` radians.
///
/// # Errors
///
/// Returns [`Error::WrongVectorSize`][lamina::Error::WrongVectorSize] if `v` does not have exactly
/// 2 elements.
pub fn rotate_2d<V>(v: V, angle: V::Elem) -> Result<Vec2<V::Elem>>
where
    V: VectorExpr,
    V::Elem: Real,
    V::Size: DimPromote<Const<2>>,
{
    lamina::check::exact::<2, _>(v.dim())?;
    let (s, c) = angle.sin_cos();
    let (x, y) = (v.get(0), v.get(1));
    Ok(vec2(c * x - s * y, s * x + c * y))
}
