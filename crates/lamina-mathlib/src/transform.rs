use lamina::{Zero};
use lamina::{
    config::SIZE_CHECKS, Basis, Error, MatrixExpr, Number, Result, Vector, VectorAlloc, VectorExpr,
    VectorExprMut, VectorOf,
};

/// Returns element `k` of basis vector `i` of `m`.
#[inline]
pub(crate) fn basis_elem<M: MatrixExpr>(m: &M, i: usize, k: usize) -> M::Elem {
    let (row, col) = <M::Basis as Basis>::position(i, k);
    m.get(row, col)
}

fn ensure_fits<M: MatrixExpr>(m: &M, n: usize) -> Result<()> {
    if SIZE_CHECKS && (m.rows() < n || m.cols() < n) {
        Err(Error::MatrixTooSmall)
    } else {
        Ok(())
    }
}

/// Applies the linear part of the transformation `m` to the vector `v`.
///
/// For an `N`-element vector, this uses the upper-left `N`x`N` block of `m`, so a 4x4 affine
/// transformation can be applied to a 3-dimensional direction (which ignores its translation).
/// The block is applied as `m * v` for column-basis matrices and as `v * m` for row-basis ones.
///
/// # Errors
///
/// Returns [`Error::MatrixTooSmall`] if `m` has fewer than `N` rows or columns.
///
/// # Examples
///
/// ```
/// # use lamina::*;
/// # use lamina_mathlib::*;
/// let mut m = Mat4::<f32>::ZERO;
/// translation_3d(&mut m, vec3(10.0, 20.0, 30.0))?;
/// assert_eq!(transform_vector(&m, vec3(1.0, 2.0, 3.0))?, vec3(1.0, 2.0, 3.0));
/// # Ok::<_, lamina::Error>(())
/// ```
pub fn transform_vector<M, V>(m: M, v: V) -> Result<VectorOf<V::Size, M::Elem>>
where
    M: MatrixExpr,
    M::Elem: Number,
    V: VectorExpr<Elem = M::Elem>,
    V::Size: VectorAlloc<M::Elem>,
{
    let n = v.size();
    ensure_fits(&m, n)?;
    let mut out = Vector::from_buf(V::Size::alloc(v.dim()));
    for k in 0..n {
        *out.get_mut(k) = (0..n).fold(M::Elem::ZERO, |acc, i| {
            acc + basis_elem(&m, i, k) * v.get(i)
        });
    }
    Ok(out)
}

/// Applies the affine transformation `m` to the point `p`.
///
/// For an `N`-element point, the upper-left `N`x`N` block of `m` is applied like in
/// [`transform_vector`], and basis vector `N` of `m` is added as the translation. The projective
/// part of `m` is ignored.
///
/// # Errors
///
/// Returns [`Error::MatrixTooSmall`] if `m` has fewer than `N + 1` rows or columns.
///
/// # Examples
///
/// ```
/// # use lamina::*;
/// # use lamina_mathlib::*;
/// let mut m = Mat4::<f32>::ZERO;
/// translation_3d(&mut m, vec3(10.0, 20.0, 30.0))?;
/// assert_eq!(transform_point(&m, vec3(1.0, 2.0, 3.0))?, vec3(11.0, 22.0, 33.0));
///
/// let too_small = Mat3::<f32>::identity();
/// assert_eq!(
///     transform_point(&too_small, vec3(1.0, 2.0, 3.0)),
///     Err(Error::MatrixTooSmall),
/// );
/// # Ok::<_, lamina::Error>(())
/// ```
pub fn transform_point<M, V>(m: M, p: V) -> Result<VectorOf<V::Size, M::Elem>>
where
    M: MatrixExpr,
    M::Elem: Number,
    V: VectorExpr<Elem = M::Elem>,
    V::Size: VectorAlloc<M::Elem>,
{
    let n = p.size();
    ensure_fits(&m, n + 1)?;
    let mut out = Vector::from_buf(V::Size::alloc(p.dim()));
    for k in 0..n {
        *out.get_mut(k) = (0..n).fold(basis_elem(&m, n, k), |acc, i| {
            acc + basis_elem(&m, i, k) * p.get(i)
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use lamina::*;

    use crate::*;

    #[test]
    fn follows_basis() {
        let cols = Matrix::<_, ColBasis>::from_buf([[1, 2], [3, 4]]);
        let rows = Matrix::<_, RowBasis>::from_buf([[1, 2], [3, 4]]);
        let v = vec2(1, 10);
        assert_eq!(transform_vector(&cols, v).unwrap(), (&cols * v));
        assert_eq!(transform_vector(&rows, v).unwrap(), (v * &rows));
    }

    #[test]
    fn dynamic_operands() {
        let m = DynMatrix::<f64>::identity_dyn(4);
        let p = DynVector::from_slice(&[1.0, 2.0, 3.0]);
        assert_eq!(transform_point(&m, &p).unwrap(), [1.0, 2.0, 3.0]);

        let big = DynVector::from_slice(&[1.0; 4]);
        assert_eq!(transform_point(&m, &big), Err(Error::MatrixTooSmall));
        assert_eq!(transform_vector(&m, &big).unwrap(), [1.0; 4]);
    }

    #[test]
    fn rotate_then_translate() {
        let mut m = Mat4::<f64>::ZERO;
        rotation_z(&mut m, std::f64::consts::FRAC_PI_2).unwrap();
        let mut t = Mat4::<f64>::ZERO;
        translation_3d(&mut t, vec3(0.0, 0.0, 5.0)).unwrap();

        // column basis applies the right operand first, row basis the left one
        let combined = if <DefaultBasis as Basis>::ROW_BASIS {
            &m * &t
        } else {
            &t * &m
        };
        let p = transform_point(&combined, vec3(1.0, 0.0, 0.0)).unwrap();
        assert_approx_eq!(p, vec3(0.0, 1.0, 5.0)).abs(1e-15);
    }
}
