//! Transformation matrix builders.
//!
//! Every builder overwrites a writable matrix that is at least as large as the transformation it
//! builds. The transformation is written to the upper-left block of the matrix; the remaining
//! elements are reset to the identity. Fixed-size matrices that are too small are rejected at
//! compile time, dynamic ones with [`Error::MatrixTooSmall`][lamina::Error::MatrixTooSmall].

use lamina::{One, Trig, Zero};
use lamina::{
    check, Basis, Const, DimPromote, MatrixExprMut, Quat, Real, Result, Vec3, VectorExpr,
};

use crate::to_vec3;

/// Writes `a`, given in column-basis form (as used with `M * v`), to the upper-left block of `m`.
fn store<M, const N: usize>(m: &mut M, a: [[M::Elem; N]; N])
where
    M: MatrixExprMut + ?Sized,
    M::Elem: Real,
{
    for (row, elems) in a.iter().enumerate() {
        for (col, &elem) in elems.iter().enumerate() {
            // column `col` of the column-basis form is basis vector `col`
            let (r, c) = <M::Basis as Basis>::position(col, row);
            *m.get_mut(r, c) = elem;
        }
    }
}

fn reset<M>(m: &mut M)
where
    M: MatrixExprMut + ?Sized,
    M::Elem: Real,
{
    for row in 0..m.rows() {
        for col in 0..m.cols() {
            *m.get_mut(row, col) = if row == col {
                M::Elem::ONE
            } else {
                M::Elem::ZERO
            };
        }
    }
}

/// Which range the depth of visible points is mapped to by a projection matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ZClip {
    /// Depth ends up in `[-1, 1]` (OpenGL convention).
    #[default]
    NegativeOne,
    /// Depth ends up in `[0, 1]` (Direct3D, Vulkan, Metal and WebGPU convention).
    Zero,
}

/// Overwrites `m` with the identity transformation.
///
/// This works for matrices of any shape, including non-square ones.
pub fn identity_transform<M>(m: &mut M)
where
    M: MatrixExprMut + ?Sized,
    M::Elem: Real,
{
    reset(m);
}

/// Builds a 2D rotation by `angle` radians, counterclockwise.
///
/// Requires a matrix of at least 2x2.
///
/// # Examples
///
/// ```
/// # use lamina::*;
/// # use lamina_mathlib::*;
/// let mut m = Mat2::<f64>::ZERO;
/// rotation_2d(&mut m, std::f64::consts::FRAC_PI_2)?;
/// assert_approx_eq!(transform_vector(&m, vec2(1.0, 0.0))?, vec2(0.0, 1.0)).abs(1e-15);
/// # Ok::<_, lamina::Error>(())
/// ```
pub fn rotation_2d<M>(m: &mut M, angle: M::Elem) -> Result<()>
where
    M: MatrixExprMut + ?Sized,
    M::Elem: Real,
{
    let (rows, cols) = m.shape();
    check::min_shape::<2, 2, _, _>(rows, cols)?;
    let (s, c) = angle.sin_cos();
    reset(m);
    store(m, [[c, -s], [s, c]]);
    Ok(())
}

/// Builds a 3D rotation by `angle` radians around the X axis.
///
/// Requires a matrix of at least 3x3.
pub fn rotation_x<M>(m: &mut M, angle: M::Elem) -> Result<()>
where
    M: MatrixExprMut + ?Sized,
    M::Elem: Real,
{
    let (rows, cols) = m.shape();
    check::min_shape::<3, 3, _, _>(rows, cols)?;
    let (s, c) = angle.sin_cos();
    let (zero, one) = (M::Elem::ZERO, M::Elem::ONE);
    reset(m);
    store(m, [[one, zero, zero], [zero, c, -s], [zero, s, c]]);
    Ok(())
}

/// Builds a 3D rotation by `angle` radians around the Y axis.
///
/// Requires a matrix of at least 3x3.
pub fn rotation_y<M>(m: &mut M, angle: M::Elem) -> Result<()>
where
    M: MatrixExprMut + ?Sized,
    M::Elem: Real,
{
    let (rows, cols) = m.shape();
    check::min_shape::<3, 3, _, _>(rows, cols)?;
    let (s, c) = angle.sin_cos();
    let (zero, one) = (M::Elem::ZERO, M::Elem::ONE);
    reset(m);
    store(m, [[c, zero, s], [zero, one, zero], [-s, zero, c]]);
    Ok(())
}

/// Builds a 3D rotation by `angle` radians around the Z axis.
///
/// Requires a matrix of at least 3x3.
pub fn rotation_z<M>(m: &mut M, angle: M::Elem) -> Result<()>
where
    M: MatrixExprMut + ?Sized,
    M::Elem: Real,
{
    let (rows, cols) = m.shape();
    check::min_shape::<3, 3, _, _>(rows, cols)?;
    let (s, c) = angle.sin_cos();
    let (zero, one) = (M::Elem::ZERO, M::Elem::ONE);
    reset(m);
    store(m, [[c, -s, zero], [s, c, zero], [zero, zero, one]]);
    Ok(())
}

/// Builds a 3D rotation by `angle` radians around `axis`.
///
/// `axis` does not need to be normalized, but must not be zero. Requires a matrix of at least 3x3.
///
/// # Errors
///
/// Returns an error if `axis` does not have exactly 3 elements, or if `m` is too small.
pub fn rotation_axis_angle<M, V>(m: &mut M, axis: V, angle: M::Elem) -> Result<()>
where
    M: MatrixExprMut + ?Sized,
    M::Elem: Real,
    V: VectorExpr<Elem = M::Elem>,
    V::Size: DimPromote<Const<3>>,
{
    let (rows, cols) = m.shape();
    check::min_shape::<3, 3, _, _>(rows, cols)?;
    let axis = to_vec3(axis)?.normalize().eval();
    let [x, y, z] = axis.into_array();
    let (s, c) = angle.sin_cos();
    let t = M::Elem::ONE - c;
    reset(m);
    store(
        m,
        [
            [c + x * x * t, x * y * t - z * s, x * z * t + y * s],
            [y * x * t + z * s, c + y * y * t, y * z * t - x * s],
            [z * x * t - y * s, z * y * t + x * s, c + z * z * t],
        ],
    );
    Ok(())
}

/// Builds the 3D rotation described by the unit quaternion `q`.
///
/// Requires a matrix of at least 3x3.
///
/// # Examples
///
/// ```
/// # use lamina::*;
/// # use lamina_mathlib::*;
/// let q = quat_rotation_axis_angle(vec3(1.0, 1.0, 0.0), 1.0)?;
/// let mut m = Mat3::<f64>::ZERO;
/// rotation_quat(&mut m, q)?;
///
/// let v = vec3(0.5, -2.0, 3.0);
/// assert_approx_eq!(transform_vector(&m, v)?, q.rotate(v)).abs(1e-14);
/// # Ok::<_, lamina::Error>(())
/// ```
pub fn rotation_quat<M>(m: &mut M, q: Quat<M::Elem>) -> Result<()>
where
    M: MatrixExprMut + ?Sized,
    M::Elem: Real,
{
    let (rows, cols) = m.shape();
    check::min_shape::<3, 3, _, _>(rows, cols)?;
    let [x, y, z, w] = q.to_array();
    let one = M::Elem::ONE;
    let two = one + one;
    reset(m);
    store(
        m,
        [
            [
                one - two * (y * y + z * z),
                two * (x * y - z * w),
                two * (x * z + y * w),
            ],
            [
                two * (x * y + z * w),
                one - two * (x * x + z * z),
                two * (y * z - x * w),
            ],
            [
                two * (x * z - y * w),
                two * (y * z + x * w),
                one - two * (x * x + y * y),
            ],
        ],
    );
    Ok(())
}

/// Builds a 3D translation by `offset`, as an affine transformation.
///
/// Requires a matrix of at least 4x4.
///
/// # Errors
///
/// Returns an error if `offset` does not have exactly 3 elements, or if `m` is too small.
pub fn translation_3d<M, V>(m: &mut M, offset: V) -> Result<()>
where
    M: MatrixExprMut + ?Sized,
    M::Elem: Real,
    V: VectorExpr<Elem = M::Elem>,
    V::Size: DimPromote<Const<3>>,
{
    let (rows, cols) = m.shape();
    check::min_shape::<4, 4, _, _>(rows, cols)?;
    let [x, y, z] = to_vec3(offset)?.into_array();
    let (zero, one) = (M::Elem::ZERO, M::Elem::ONE);
    reset(m);
    store(
        m,
        [
            [one, zero, zero, x],
            [zero, one, zero, y],
            [zero, zero, one, z],
            [zero, zero, zero, one],
        ],
    );
    Ok(())
}

/// Builds a 3D scaling by `factors` along the X, Y and Z axes.
///
/// Requires a matrix of at least 3x3.
///
/// # Errors
///
/// Returns an error if `factors` does not have exactly 3 elements, or if `m` is too small.
pub fn scale_3d<M, V>(m: &mut M, factors: V) -> Result<()>
where
    M: MatrixExprMut + ?Sized,
    M::Elem: Real,
    V: VectorExpr<Elem = M::Elem>,
    V::Size: DimPromote<Const<3>>,
{
    let (rows, cols) = m.shape();
    check::min_shape::<3, 3, _, _>(rows, cols)?;
    let [x, y, z] = to_vec3(factors)?.into_array();
    let zero = M::Elem::ZERO;
    reset(m);
    store(m, [[x, zero, zero], [zero, y, zero], [zero, zero, z]]);
    Ok(())
}

/// Builds a right-handed view transformation for a camera at `eye` looking at `target`.
///
/// In view space, the camera looks down the negative Z axis, with `up` pointing roughly along
/// positive Y. Requires a matrix of at least 4x4.
///
/// If `up` is parallel to the viewing direction, the orientation of the camera is undefined and
/// the resulting matrix contains non-finite elements.
///
/// # Errors
///
/// Returns an error if any of the vectors does not have exactly 3 elements, or if `m` is too small.
///
/// # Examples
///
/// ```
/// # use lamina::*;
/// # use lamina_mathlib::*;
/// let mut view = Mat4::<f64>::ZERO;
/// look_at_rh(&mut view, vec3(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y)?;
/// assert_approx_eq!(transform_point(&view, Vec3::<f64>::ZERO)?, vec3(0.0, 0.0, -5.0));
/// # Ok::<_, lamina::Error>(())
/// ```
pub fn look_at_rh<M, Eye, Target, Up>(m: &mut M, eye: Eye, target: Target, up: Up) -> Result<()>
where
    M: MatrixExprMut + ?Sized,
    M::Elem: Real,
    Eye: VectorExpr<Elem = M::Elem>,
    Eye::Size: DimPromote<Const<3>>,
    Target: VectorExpr<Elem = M::Elem>,
    Target::Size: DimPromote<Const<3>>,
    Up: VectorExpr<Elem = M::Elem>,
    Up::Size: DimPromote<Const<3>>,
{
    let (rows, cols) = m.shape();
    check::min_shape::<4, 4, _, _>(rows, cols)?;
    let eye = to_vec3(eye)?;
    let target = to_vec3(target)?;
    let up = to_vec3(up)?;

    let f = (target - eye).normalize().eval();
    let side = f.cross(up).eval();
    if side.length2() == M::Elem::ZERO {
        log::warn!("look_at_rh: up vector {up:?} is parallel to the view direction {f:?}");
    }
    let s = side.normalize().eval();
    let u: Vec3<M::Elem> = s.cross(f).eval();

    let (zero, one) = (M::Elem::ZERO, M::Elem::ONE);
    reset(m);
    store(
        m,
        [
            [s.x, s.y, s.z, -s.dot(eye)],
            [u.x, u.y, u.z, -u.dot(eye)],
            [-f.x, -f.y, -f.z, f.dot(eye)],
            [zero, zero, zero, one],
        ],
    );
    Ok(())
}

/// Builds a right-handed perspective projection.
///
/// `fov_y` is the vertical field of view in radians, and `aspect` is the ratio of the viewport's
/// width to its height. Points at a distance of `near` in front of the camera are mapped to the
/// smallest depth of the `z_clip` range, points at `far` to the largest. Requires a matrix of at
/// least 4x4.
///
/// # Examples
///
/// ```
/// # use lamina::*;
/// # use lamina_mathlib::*;
/// let mut proj = Mat4::<f64>::ZERO;
/// perspective_rh(&mut proj, 1.0, 1.5, 0.1, 100.0, ZClip::Zero)?;
///
/// let near = transform_vector(&proj, vec4(0.0, 0.0, -0.1, 1.0))?;
/// let far = transform_vector(&proj, vec4(0.0, 0.0, -100.0, 1.0))?;
/// assert_approx_eq!(near.z / near.w, 0.0).abs(1e-12);
/// assert_approx_eq!(far.z / far.w, 1.0).abs(1e-12);
/// # Ok::<_, lamina::Error>(())
/// ```
pub fn perspective_rh<M>(
    m: &mut M,
    fov_y: M::Elem,
    aspect: M::Elem,
    near: M::Elem,
    far: M::Elem,
    z_clip: ZClip,
) -> Result<()>
where
    M: MatrixExprMut + ?Sized,
    M::Elem: Real,
{
    let (rows, cols) = m.shape();
    check::min_shape::<4, 4, _, _>(rows, cols)?;
    let (zero, one) = (M::Elem::ZERO, M::Elem::ONE);
    let two = one + one;
    let f = one / (fov_y / two).tan();
    let depth = near - far;
    let (a, b) = match z_clip {
        ZClip::NegativeOne => ((far + near) / depth, two * far * near / depth),
        ZClip::Zero => (far / depth, far * near / depth),
    };
    reset(m);
    store(
        m,
        [
            [f / aspect, zero, zero, zero],
            [zero, f, zero, zero],
            [zero, zero, a, b],
            [zero, zero, -one, zero],
        ],
    );
    Ok(())
}

/// Builds a right-handed orthographic projection of the given view volume.
///
/// Requires a matrix of at least 4x4.
#[allow(clippy::too_many_arguments)]
pub fn orthographic_rh<M>(
    m: &mut M,
    left: M::Elem,
    right: M::Elem,
    bottom: M::Elem,
    top: M::Elem,
    near: M::Elem,
    far: M::Elem,
    z_clip: ZClip,
) -> Result<()>
where
    M: MatrixExprMut + ?Sized,
    M::Elem: Real,
{
    let (rows, cols) = m.shape();
    check::min_shape::<4, 4, _, _>(rows, cols)?;
    let (zero, one) = (M::Elem::ZERO, M::Elem::ONE);
    let two = one + one;
    let (width, height, depth) = (right - left, top - bottom, far - near);
    let (a, b) = match z_clip {
        ZClip::NegativeOne => (-two / depth, -(far + near) / depth),
        ZClip::Zero => (-one / depth, -near / depth),
    };
    reset(m);
    store(
        m,
        [
            [two / width, zero, zero, -(right + left) / width],
            [zero, two / height, zero, -(top + bottom) / height],
            [zero, zero, a, b],
            [zero, zero, zero, one],
        ],
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use lamina::*;

    use crate::*;

    #[test]
    fn quarter_turn_about_x() {
        let mut m = Mat3::<f64>::identity();
        rotation_x(&mut m, FRAC_PI_2).unwrap();
        let v = transform_vector(&m, vec3(0.0, 1.0, 0.0)).unwrap();
        assert_approx_eq!(v, vec3(0.0, 0.0, 1.0)).abs(1e-7);
    }

    #[test]
    fn axis_rotations_match_axis_angle() {
        let axes = [Vec3::<f64>::X, Vec3::Y, Vec3::Z];
        let builders: [fn(&mut Mat3<f64>, f64) -> Result<()>; 3] =
            [rotation_x, rotation_y, rotation_z];
        for (axis, build) in axes.into_iter().zip(builders) {
            let mut a = Mat3::ZERO;
            let mut b = Mat3::ZERO;
            build(&mut a, 0.7).unwrap();
            rotation_axis_angle(&mut b, axis * 3.0, 0.7).unwrap();
            assert_approx_eq!(a, b).abs(1e-15);
        }
    }

    #[test]
    fn row_and_column_bases_agree() {
        let mut cols = Matrix::<[[f64; 4]; 4], ColBasis, RowMajor>::ZERO;
        let mut rows = Matrix::<[[f64; 4]; 4], RowBasis, ColMajor>::ZERO;
        rotation_axis_angle(&mut cols, vec3(1.0, 2.0, 3.0), 0.4).unwrap();
        rotation_axis_angle(&mut rows, vec3(1.0, 2.0, 3.0), 0.4).unwrap();
        assert_approx_eq!(cols.transpose().eval(), rows.eval()).abs(1e-15);

        let v = vec3(-1.0, 0.5, 2.0);
        let a = transform_vector(&cols, v).unwrap();
        let b = transform_vector(&rows, v).unwrap();
        assert_approx_eq!(a, b).abs(1e-15);
    }

    #[test]
    fn larger_matrices_keep_identity() {
        let mut m = DynMatrix::<f64>::zeros(5, 5);
        rotation_z(&mut m, PI).unwrap();
        assert_eq!(m[(3, 3)], 1.0);
        assert_eq!(m[(4, 4)], 1.0);
        assert_eq!(m[(4, 0)], 0.0);
        assert_approx_eq!(m[(0, 0)], -1.0);

        if config::SIZE_CHECKS {
            let mut small = DynMatrix::<f64>::zeros(3, 3);
            assert_eq!(
                translation_3d(&mut small, vec3(1.0, 2.0, 3.0)),
                Err(Error::MatrixTooSmall)
            );
        }
    }

    #[test]
    fn identity_of_any_shape() {
        let mut m = Mat::<f32, 2, 3>::from_rows([[5.0; 3]; 2]);
        identity_transform(&mut m);
        assert_eq!(m, [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
    }

    #[test]
    fn translation_and_scale() {
        let mut t = Mat4::<f64>::ZERO;
        translation_3d(&mut t, vec3(1.0, 2.0, 3.0)).unwrap();
        assert_eq!(
            transform_point(&t, vec3(1.0, 1.0, 1.0)).unwrap(),
            vec3(2.0, 3.0, 4.0)
        );

        let mut s = DynMatrix::<f64>::zeros(3, 3);
        scale_3d(&mut s, DynVector::from_slice(&[2.0, 3.0, 4.0])).unwrap();
        assert_eq!([s[(0, 0)], s[(1, 1)], s[(2, 2)]], [2.0, 3.0, 4.0]);
        assert_eq!(s[(0, 1)], 0.0);
        if config::SIZE_CHECKS {
            assert_eq!(
                scale_3d(&mut s, DynVector::from_slice(&[2.0, 3.0])),
                Err(Error::WrongVectorSize)
            );
        }
    }

    #[test]
    fn look_at_maps_eye_and_target() {
        let eye = vec3(1.0, 2.0, 3.0);
        let target = vec3(4.0, -2.0, 3.0);
        let mut view = Mat4::<f64>::ZERO;
        look_at_rh(&mut view, eye, target, Vec3::Z).unwrap();

        assert_approx_eq!(transform_point(&view, eye).unwrap(), Vec3::<f64>::ZERO).abs(1e-15);
        // the target is 5 units straight ahead
        assert_approx_eq!(transform_point(&view, target).unwrap(), vec3(0.0, 0.0, -5.0))
            .abs(1e-14);
    }

    #[test]
    fn projections_map_depth_range() {
        for (z_clip, lo) in [(ZClip::NegativeOne, -1.0), (ZClip::Zero, 0.0)] {
            let mut p = Mat4::<f64>::ZERO;
            perspective_rh(&mut p, FRAC_PI_2, 2.0, 1.0, 10.0, z_clip).unwrap();
            let near = transform_vector(&p, vec4(2.0, 1.0, -1.0, 1.0)).unwrap();
            let far = transform_vector(&p, vec4(0.0, 0.0, -10.0, 1.0)).unwrap();
            assert_approx_eq!(near.z / near.w, lo).abs(1e-12);
            assert_approx_eq!(far.z / far.w, 1.0).abs(1e-12);
            // the corner of the near plane ends up in the corner of the viewport
            assert_approx_eq!(near.x / near.w, 1.0).abs(1e-12);
            assert_approx_eq!(near.y / near.w, 1.0).abs(1e-12);

            let mut o = Mat4::<f64>::ZERO;
            orthographic_rh(&mut o, -2.0, 2.0, -1.0, 1.0, 1.0, 5.0, z_clip).unwrap();
            let corner = transform_point(&o, vec3(2.0, -1.0, -5.0)).unwrap();
            assert_approx_eq!(corner, vec3(1.0, -1.0, 1.0)).abs(1e-12);
            let center = transform_point(&o, vec3(0.0, 0.0, -1.0)).unwrap();
            assert_approx_eq!(center, vec3(0.0, 0.0, lo)).abs(1e-12);
        }
    }
}
