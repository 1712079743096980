//! Conversions between cartesian, polar, cylindrical and spherical coordinates.
//!
//! Azimuths are measured counterclockwise from the positive X axis, in the XY plane. The polar
//! axis of cylindrical and spherical coordinates is the Z axis. All angles are in radians.

use lamina::{Sqrt, Trig};
use lamina::{check, vec2, vec3, Const, DimPromote, Real, Result, Vec2, Vec3, VectorExpr};

/// How the elevation of spherical coordinates is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Elevation {
    /// Angle from the positive Z axis, in `[0, π]`.
    #[default]
    Colatitude,
    /// Angle from the XY plane, in `[-π/2, π/2]`.
    Latitude,
}

/// Converts polar coordinates to a 2D cartesian vector.
pub fn polar_to_cartesian<T: Real>(radius: T, azimuth: T) -> Vec2<T> {
    let (s, c) = azimuth.sin_cos();
    vec2(radius * c, radius * s)
}

/// Converts a 2D cartesian vector to polar coordinates `(radius, azimuth)`.
///
/// The azimuth is in `[-π, π]`.
///
/// # Errors
///
/// Returns [`Error::WrongVectorSize`][lamina::Error::WrongVectorSize] if `v` does not have exactly
/// 2 elements.
///
/// # Examples
///
/// ```
/// # use lamina::*;
/// # use lamina_mathlib::*;
/// let (radius, azimuth) = cartesian_to_polar(vec2(0.0, -2.0))?;
/// assert_eq!(radius, 2.0);
/// assert_eq!(azimuth, -std::f64::consts::FRAC_PI_2);
/// # Ok::<_, lamina::Error>(())
/// ```
pub fn cartesian_to_polar<V>(v: V) -> Result<(V::Elem, V::Elem)>
where
    V: VectorExpr,
    V::Elem: Real,
    V::Size: DimPromote<Const<2>>,
{
    check::exact::<2, _>(v.dim())?;
    let (x, y) = (v.get(0), v.get(1));
    Ok((v.length(), y.atan2(x)))
}

/// Converts cylindrical coordinates to a 3D cartesian vector.
pub fn cylindrical_to_cartesian<T: Real>(radius: T, azimuth: T, height: T) -> Vec3<T> {
    let (s, c) = azimuth.sin_cos();
    vec3(radius * c, radius * s, height)
}

/// Converts a 3D cartesian vector to cylindrical coordinates `(radius, azimuth, height)`.
///
/// # Errors
///
/// Returns [`Error::WrongVectorSize`][lamina::Error::WrongVectorSize] if `v` does not have exactly
/// 3 elements.
pub fn cartesian_to_cylindrical<V>(v: V) -> Result<(V::Elem, V::Elem, V::Elem)>
where
    V: VectorExpr,
    V::Elem: Real,
    V::Size: DimPromote<Const<3>>,
{
    check::exact::<3, _>(v.dim())?;
    let (x, y, z) = (v.get(0), v.get(1), v.get(2));
    Ok(((x * x + y * y).sqrt(), y.atan2(x), z))
}

/// Converts spherical coordinates to a 3D cartesian vector.
///
/// # Examples
///
/// ```
/// # use lamina::*;
/// # use lamina_mathlib::*;
/// use std::f64::consts::FRAC_PI_2;
///
/// let north = spherical_to_cartesian(2.0, 0.0, FRAC_PI_2, Elevation::Latitude);
/// assert_approx_eq!(north, vec3(0.0, 0.0, 2.0)).abs(1e-15);
///
/// let east = spherical_to_cartesian(1.0, FRAC_PI_2, FRAC_PI_2, Elevation::Colatitude);
/// assert_approx_eq!(east, vec3(0.0, 1.0, 0.0)).abs(1e-15);
/// ```
pub fn spherical_to_cartesian<T: Real>(
    radius: T,
    azimuth: T,
    elevation: T,
    kind: Elevation,
) -> Vec3<T> {
    let (sin_az, cos_az) = azimuth.sin_cos();
    let (sin_el, cos_el) = elevation.sin_cos();
    // (distance from the Z axis, height) for a unit radius
    let (planar, height) = match kind {
        Elevation::Colatitude => (sin_el, cos_el),
        Elevation::Latitude => (cos_el, sin_el),
    };
    vec3(
        radius * planar * cos_az,
        radius * planar * sin_az,
        radius * height,
    )
}

/// Converts a 3D cartesian vector to spherical coordinates `(radius, azimuth, elevation)`.
///
/// # Errors
///
/// Returns [`Error::WrongVectorSize`][lamina::Error::WrongVectorSize] if `v` does not have exactly
/// 3 elements.
pub fn cartesian_to_spherical<V>(v: V, kind: Elevation) -> Result<(V::Elem, V::Elem, V::Elem)>
where
    V: VectorExpr,
    V::Elem: Real,
    V::Size: DimPromote<Const<3>>,
{
    check::exact::<3, _>(v.dim())?;
    let (x, y, z) = (v.get(0), v.get(1), v.get(2));
    let planar = (x * x + y * y).sqrt();
    let elevation = match kind {
        Elevation::Colatitude => planar.atan2(z),
        Elevation::Latitude => z.atan2(planar),
    };
    Ok((v.length(), y.atan2(x), elevation))
}
