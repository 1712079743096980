//! Determinants and inverses.
//!
//! Matrices up to 4x4 use closed-form cofactor expansions. Larger ones go through an elimination:
//! LU with partial pivoting for the determinant, Gauss-Jordan with full pivoting for the inverse.

use std::array;

use crate::{
    check,
    storage::{MatrixAlloc, MatrixOf},
    Abs, DimPromote, DynMatrix, MatrixExpr, MatrixExprMut, One, Real, Result, Zero,
};

use super::lu_pivot;

fn read<M, const N: usize>(m: &M) -> [[M::Elem; N]; N]
where
    M: MatrixExpr + ?Sized,
{
    array::from_fn(|r| array::from_fn(|c| m.get(r, c)))
}

fn write<M, const N: usize>(m: &mut M, rows: [[M::Elem; N]; N])
where
    M: MatrixExprMut + ?Sized,
{
    for (r, row) in rows.iter().enumerate() {
        for (c, &v) in row.iter().enumerate() {
            *m.get_mut(r, c) = v;
        }
    }
}

fn det2<T: Real>([[a, b], [c, d]]: [[T; 2]; 2]) -> T {
    a * d - b * c
}

fn det3<T: Real>([[a, b, c], [d, e, f], [g, h, i]]: [[T; 3]; 3]) -> T {
    a * (e * i - f * h) - b * (d * i - f * g) + c * (d * h - e * g)
}

/// The 2x2 minors of the top two rows (`s`) and of the bottom two rows (`c`) of a 4x4 matrix.
fn minors4<T: Real>(m: &[[T; 4]; 4]) -> ([T; 6], [T; 6]) {
    let [a0, a1, a2, a3] = m;
    let s = [
        a0[0] * a1[1] - a1[0] * a0[1],
        a0[0] * a1[2] - a1[0] * a0[2],
        a0[0] * a1[3] - a1[0] * a0[3],
        a0[1] * a1[2] - a1[1] * a0[2],
        a0[1] * a1[3] - a1[1] * a0[3],
        a0[2] * a1[3] - a1[2] * a0[3],
    ];
    let c = [
        a2[0] * a3[1] - a3[0] * a2[1],
        a2[0] * a3[2] - a3[0] * a2[2],
        a2[0] * a3[3] - a3[0] * a2[3],
        a2[1] * a3[2] - a3[1] * a2[2],
        a2[1] * a3[3] - a3[1] * a2[3],
        a2[2] * a3[3] - a3[2] * a2[3],
    ];
    (s, c)
}

fn det4_from_minors<T: Real>(s: &[T; 6], c: &[T; 6]) -> T {
    s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1] + s[5] * c[0]
}

/// Computes the determinant of the square matrix `m`.
///
/// # Errors
///
/// Returns [`Error::NonSquareMatrix`][crate::Error::NonSquareMatrix] if `m` is not square.
///
/// # Examples
///
/// ```
/// # use lamina::*;
/// let m = Mat3::from_rows([
///     [2.0, 0.0, 2.0],
///     [3.0, 3.0, 4.0],
///     [5.0, 5.0, 4.0],
/// ]);
/// assert_approx_eq!(determinant(&m)?, -16.0).rel(1e-3);
///
/// let d = DynMatrix::from_row_slice(2, 3, &[0.0; 6])?;
/// assert_eq!(determinant(&d), Err(Error::NonSquareMatrix));
/// # Ok::<_, lamina::Error>(())
/// ```
pub fn determinant<M>(m: M) -> Result<M::Elem>
where
    M: MatrixExpr,
    M::Elem: Real,
    M::Rows: DimPromote<M::Cols>,
{
    let (rows, cols) = m.shape();
    check::square(rows, cols)?;

    let det = match m.rows() {
        0 => M::Elem::ONE,
        1 => m.get(0, 0),
        2 => det2(read(&m)),
        3 => det3(read(&m)),
        4 => {
            let (s, c) = minors4(&read(&m));
            det4_from_minors(&s, &c)
        }
        n => {
            let mut lu = DynMatrix::from_fn_dyn(n, n, |r, c| m.get(r, c));
            let pivots = lu_pivot(&mut lu)?;
            (0..n).fold(pivots.sign::<M::Elem>(), |acc, i| acc * lu[(i, i)])
        }
    };
    Ok(det)
}

/// Computes the inverse of the square matrix `m`.
///
/// The result has the size tags, basis and layout of `m`. Inverting a singular matrix produces
/// non-finite elements and logs a warning.
///
/// # Errors
///
/// Returns [`Error::NonSquareMatrix`][crate::Error::NonSquareMatrix] if `m` is not square.
///
/// # Examples
///
/// ```
/// # use lamina::*;
/// let m = Mat2::from_rows([[1.0, 2.0], [3.0, 4.0]]);
/// let inv = inverse(&m)?;
/// assert_approx_eq!(inv, Mat2::from_rows([[-2.0, 1.0], [1.5, -0.5]])).rel(1e-3);
/// assert_approx_eq!(m * inv, Mat2::<f64>::identity()).abs(1e-12);
/// # Ok::<_, lamina::Error>(())
/// ```
pub fn inverse<M>(m: M) -> Result<MatrixOf<M::Rows, M::Cols, M::Elem, M::Basis, M::Layout>>
where
    M: MatrixExpr,
    M::Elem: Real,
    M::Rows: DimPromote<M::Cols> + MatrixAlloc<M::Elem, M::Cols>,
{
    let (rows, cols) = m.shape();
    check::square(rows, cols)?;

    let mut out = m.eval();
    invert_in_place(&mut out);
    Ok(out)
}

fn invert_in_place<M>(m: &mut M)
where
    M: MatrixExprMut + ?Sized,
    M::Elem: Real,
{
    let zero = M::Elem::ZERO;
    let one = M::Elem::ONE;
    let n = m.rows();
    match n {
        0 => {}
        1 => {
            let a = m.get(0, 0);
            if a == zero {
                log::warn!("inverting a singular 1x1 matrix");
            }
            *m.get_mut(0, 0) = one / a;
        }
        2 => {
            let [[a, b], [c, d]] = read::<_, 2>(&*m);
            let det = det2([[a, b], [c, d]]);
            if det == zero {
                log::warn!("inverting a singular 2x2 matrix");
            }
            let inv = one / det;
            write(m, [[d * inv, -b * inv], [-c * inv, a * inv]]);
        }
        3 => {
            let a = read::<_, 3>(&*m);
            let det = det3(a);
            if det == zero {
                log::warn!("inverting a singular 3x3 matrix");
            }
            let inv = one / det;
            let [[a, b, c], [d, e, f], [g, h, i]] = a;
            write(
                m,
                [
                    [(e * i - f * h) * inv, (c * h - b * i) * inv, (b * f - c * e) * inv],
                    [(f * g - d * i) * inv, (a * i - c * g) * inv, (c * d - a * f) * inv],
                    [(d * h - e * g) * inv, (b * g - a * h) * inv, (a * e - b * d) * inv],
                ],
            );
        }
        4 => {
            let a = read::<_, 4>(&*m);
            let (s, c) = minors4(&a);
            let det = det4_from_minors(&s, &c);
            if det == zero {
                log::warn!("inverting a singular 4x4 matrix");
            }
            let inv = one / det;
            let [a0, a1, a2, a3] = a;
            #[rustfmt::skip]
            let b = [
                [
                    a1[1] * c[5] - a1[2] * c[4] + a1[3] * c[3],
                    -a0[1] * c[5] + a0[2] * c[4] - a0[3] * c[3],
                    a3[1] * s[5] - a3[2] * s[4] + a3[3] * s[3],
                    -a2[1] * s[5] + a2[2] * s[4] - a2[3] * s[3],
                ],
                [
                    -a1[0] * c[5] + a1[2] * c[2] - a1[3] * c[1],
                    a0[0] * c[5] - a0[2] * c[2] + a0[3] * c[1],
                    -a3[0] * s[5] + a3[2] * s[2] - a3[3] * s[1],
                    a2[0] * s[5] - a2[2] * s[2] + a2[3] * s[1],
                ],
                [
                    a1[0] * c[4] - a1[1] * c[2] + a1[3] * c[0],
                    -a0[0] * c[4] + a0[1] * c[2] - a0[3] * c[0],
                    a3[0] * s[4] - a3[1] * s[2] + a3[3] * s[0],
                    -a2[0] * s[4] + a2[1] * s[2] - a2[3] * s[0],
                ],
                [
                    -a1[0] * c[3] + a1[1] * c[1] - a1[2] * c[0],
                    a0[0] * c[3] - a0[1] * c[1] + a0[2] * c[0],
                    -a3[0] * s[3] + a3[1] * s[1] - a3[2] * s[0],
                    a2[0] * s[3] - a2[1] * s[1] + a2[2] * s[0],
                ],
            ];
            write(m, b.map(|row| row.map(|v| v * inv)));
        }
        _ => gauss_jordan(m),
    }
}

/// Inverts `m` in place by Gauss-Jordan elimination with full pivoting.
///
/// Every step picks the largest remaining element as the pivot. Column exchanges are undone at
/// the end, in reverse order.
fn gauss_jordan<M>(m: &mut M)
where
    M: MatrixExprMut + ?Sized,
    M::Elem: Real,
{
    let zero = M::Elem::ZERO;
    let one = M::Elem::ONE;
    let n = m.rows();

    let mut a: Vec<M::Elem> = Vec::with_capacity(n * n);
    for r in 0..n {
        a.extend((0..n).map(|c| m.get(r, c)));
    }
    let at = |r: usize, c: usize| r * n + c;

    let mut used = vec![false; n];
    let mut row_of = vec![0; n];
    let mut col_of = vec![0; n];

    for step in 0..n {
        let (mut prow, mut pcol) = (0, 0);
        let mut best = None;
        for r in (0..n).filter(|&r| !used[r]) {
            for c in (0..n).filter(|&c| !used[c]) {
                let v = a[at(r, c)].abs();
                if best.map_or(true, |b| v > b) {
                    best = Some(v);
                    (prow, pcol) = (r, c);
                }
            }
        }
        used[pcol] = true;

        if prow != pcol {
            for c in 0..n {
                a.swap(at(prow, c), at(pcol, c));
            }
        }
        row_of[step] = prow;
        col_of[step] = pcol;

        let pivot = a[at(pcol, pcol)];
        if pivot == zero {
            log::warn!("inverting a singular {n}x{n} matrix");
        }
        let inv = one / pivot;
        a[at(pcol, pcol)] = one;
        for c in 0..n {
            a[at(pcol, c)] = a[at(pcol, c)] * inv;
        }

        for r in (0..n).filter(|&r| r != pcol) {
            let f = a[at(r, pcol)];
            a[at(r, pcol)] = zero;
            for c in 0..n {
                a[at(r, c)] = a[at(r, c)] - a[at(pcol, c)] * f;
            }
        }
    }

    for step in (0..n).rev() {
        if row_of[step] != col_of[step] {
            for r in 0..n {
                a.swap(at(r, row_of[step]), at(r, col_of[step]));
            }
        }
    }

    for r in 0..n {
        for c in 0..n {
            *m.get_mut(r, c) = a[at(r, c)];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::gauss_jordan;
    use crate::*;

    fn well_conditioned(n: usize) -> DynMatrix<f64> {
        DynMatrix::from_fn_dyn(n, n, |r, c| {
            if r == c {
                n as f64 + 1.0
            } else {
                ((r * 7 + c * 3) % 5) as f64 * 0.25 - 0.5
            }
        })
    }

    #[test]
    fn known_inverse_2x2() {
        let m = Mat2::from_rows([[1.0, 2.0], [3.0, 4.0]]);
        assert_approx_eq!(m.inverse(), Mat2::from_rows([[-2.0, 1.0], [1.5, -0.5]])).rel(1e-3);
    }

    #[test]
    fn known_determinants() {
        let m = Mat3::from_rows([[2.0, 0.0, 2.0], [3.0, 3.0, 4.0], [5.0, 5.0, 4.0]]);
        assert_approx_eq!(m.determinant(), -16.0).rel(1e-3);
        assert_eq!(Mat4::<f64>::identity().determinant(), 1.0);
        assert_eq!(Mat1::from_rows([[3.0]]).determinant(), 3.0);
        assert_eq!(DynMatrix::<f32>::zeros(0, 0).determinant(), 1.0);
    }

    #[test]
    fn closed_forms_match_elimination() {
        for n in 2..=4 {
            let m = well_conditioned(n);
            let closed = inverse(&m).unwrap();
            let mut eliminated = m.clone();
            gauss_jordan(&mut eliminated);
            assert_approx_eq!(closed, eliminated).abs(1e-12);

            let mut lu = m.clone();
            let pivots = lu_pivot(&mut lu).unwrap();
            let by_lu = (0..n).fold(pivots.sign::<f64>(), |acc, i| acc * lu[(i, i)]);
            assert_approx_eq!(determinant(&m).unwrap(), by_lu).rel(1e-12);
        }
    }

    #[test]
    fn round_trip() {
        for n in 1..=7 {
            let m = well_conditioned(n);
            let inv = inverse(&m).unwrap();
            assert_approx_eq!(&m * &inv, DynMatrix::<f64>::identity_dyn(n)).abs(1e-9);
            assert_approx_eq!(&inv * &m, DynMatrix::<f64>::identity_dyn(n)).abs(1e-9);
        }

        let fixed = Mat4::from_rows([
            [4.0, 1.0, 0.0, 2.0],
            [0.0, 3.0, 1.0, 0.0],
            [1.0, 0.0, 5.0, 1.0],
            [2.0, 1.0, 0.0, 6.0],
        ]);
        assert_approx_eq!(fixed * fixed.inverse(), Mat4::<f64>::identity()).abs(1e-12);
    }

    #[test]
    fn pivoting_handles_zero_diagonal() {
        let mut m = DynMatrix::<f64>::zeros(5, 5);
        for i in 0..5 {
            m[(i, (i + 2) % 5)] = (i + 1) as f64;
        }
        // permutation by a 5-cycle is even, so the determinant is 1 * 2 * 3 * 4 * 5
        assert_approx_eq!(m.determinant(), 120.0).rel(1e-12);

        let inv = m.inverse();
        assert_approx_eq!(&m * &inv, DynMatrix::<f64>::identity_dyn(5)).abs(1e-12);
    }

    #[test]
    fn larger_determinant() {
        let m = well_conditioned(6);
        let mut swapped = m.clone();
        for c in 0..6 {
            let tmp = swapped[(0, c)];
            swapped[(0, c)] = swapped[(3, c)];
            swapped[(3, c)] = tmp;
        }
        assert_approx_eq!(swapped.determinant(), -m.determinant()).rel(1e-9);
    }

    #[test]
    fn singular_is_not_finite() {
        let _ = env_logger::builder().is_test(true).try_init();
        let inv = Mat2::from_rows([[1.0, 2.0], [2.0, 4.0]]).inverse();
        assert!(inv.as_slice().iter().any(|v| !v.is_finite()));
    }

    #[test]
    fn layout_is_kept() {
        let m = Matrix::<[[f64; 2]; 2], RowBasis, ColMajor>::from_rows([[1.0, 2.0], [3.0, 4.0]]);
        let inv: Matrix<[[f64; 2]; 2], RowBasis, ColMajor> = inverse(&m).unwrap();
        assert_eq!(inv.as_slice(), &[-2.0, 1.5, 1.0, -0.5]);
    }

    #[test]
    #[cfg(not(feature = "unchecked"))]
    fn non_square() {
        let m = DynMatrix::<f64>::zeros(2, 3);
        assert_eq!(inverse(&m).err(), Some(Error::NonSquareMatrix));
        assert_eq!(determinant((&m).transpose()), Err(Error::NonSquareMatrix));
        assert_eq!(trace(&m), Err(Error::NonSquareMatrix));
    }
}
