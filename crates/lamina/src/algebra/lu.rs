//! In-place LU decomposition and the matching solvers.
//!
//! Both decompositions overwrite a square matrix `A` with its factors: the strictly lower
//! triangle holds `L` (whose unit diagonal is implied), the upper triangle including the diagonal
//! holds `U`.

use crate::{
    assign::{self, OpAssign},
    check,
    storage::{VectorAlloc, VectorOf},
    Abs, DimPromote, Error, MatrixExpr, MatrixExprMut, One, Real, Result, Vector, VectorExpr,
    VectorExprMut, Zero,
};

/// Decomposes the square matrix `m` into `L * U` in place, without pivoting.
///
/// A zero pivot makes the factors non-finite. It is reported through [`log::warn!`], but does not
/// make the decomposition fail. Matrices that need row exchanges should use [`lu_pivot`].
///
/// # Errors
///
/// Returns [`Error::NonSquareMatrix`] if `m` is not square.
///
/// # Examples
///
/// ```
/// # use lamina::*;
/// let mut m = Mat2::from_rows([[4.0, 3.0], [6.0, 3.0]]);
/// lu(&mut m)?;
/// assert_eq!(m, [[4.0, 3.0], [1.5, -1.5]]);
/// # Ok::<_, lamina::Error>(())
/// ```
pub fn lu<M>(m: &mut M) -> Result<()>
where
    M: MatrixExprMut + ?Sized,
    M::Elem: Real,
    M::Rows: DimPromote<M::Cols>,
{
    let (rows, cols) = m.shape();
    check::square(rows, cols)?;
    let n = m.rows();

    for k in 0..n {
        let pivot = m.get(k, k);
        if pivot == M::Elem::ZERO {
            log::warn!("zero pivot in column {k} of a {n}x{n} LU decomposition");
        }
        eliminate(m, k, pivot);
    }
    Ok(())
}

/// Row order and parity produced by [`lu_pivot`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pivots {
    order: Vec<usize>,
    odd: bool,
}

impl Pivots {
    /// Returns the original row index of every row of the decomposed matrix.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Returns `true` if an odd number of row exchanges was performed.
    pub fn is_odd(&self) -> bool {
        self.odd
    }

    /// Returns the sign of the row permutation: `-1` if it is odd, `1` otherwise.
    pub fn sign<T: Real>(&self) -> T {
        if self.odd {
            -T::ONE
        } else {
            T::ONE
        }
    }
}

/// Decomposes the square matrix `m` into `P * L * U` in place, with partial pivoting.
///
/// Rows are physically exchanged so that each pivot has the largest magnitude in its column. The
/// returned [`Pivots`] record where every row came from.
///
/// A column without a non-zero pivot candidate means that `m` is singular. It is reported through
/// [`log::warn!`], and leaves a zero on the diagonal of `U`.
///
/// # Errors
///
/// Returns [`Error::NonSquareMatrix`] if `m` is not square.
///
/// # Examples
///
/// ```
/// # use lamina::*;
/// let mut m = Mat2::from_rows([[0.0, 1.0], [2.0, 3.0]]);
/// let pivots = lu_pivot(&mut m)?;
/// assert_eq!(pivots.order(), &[1, 0]);
/// assert!(pivots.is_odd());
/// assert_eq!(m, [[2.0, 3.0], [0.0, 1.0]]);
/// # Ok::<_, lamina::Error>(())
/// ```
pub fn lu_pivot<M>(m: &mut M) -> Result<Pivots>
where
    M: MatrixExprMut + ?Sized,
    M::Elem: Real,
    M::Rows: DimPromote<M::Cols>,
{
    let (rows, cols) = m.shape();
    check::square(rows, cols)?;
    let n = m.rows();

    let mut pivots = Pivots {
        order: (0..n).collect(),
        odd: false,
    };
    for k in 0..n {
        let mut best = k;
        for i in k + 1..n {
            if m.get(i, k).abs() > m.get(best, k).abs() {
                best = i;
            }
        }
        if best != k {
            for j in 0..n {
                let tmp = m.get(k, j);
                *m.get_mut(k, j) = m.get(best, j);
                *m.get_mut(best, j) = tmp;
            }
            pivots.order.swap(k, best);
            pivots.odd = !pivots.odd;
        }

        let pivot = m.get(k, k);
        if pivot == M::Elem::ZERO {
            log::warn!("matrix is singular, column {k} has no non-zero pivot");
            continue;
        }
        eliminate(m, k, pivot);
    }
    Ok(pivots)
}

fn eliminate<M>(m: &mut M, k: usize, pivot: M::Elem)
where
    M: MatrixExprMut + ?Sized,
    M::Elem: Real,
{
    let n = m.rows();
    for i in k + 1..n {
        let f = m.get(i, k) / pivot;
        *m.get_mut(i, k) = f;
        for j in k + 1..n {
            let v = m.get(i, j) - f * m.get(k, j);
            *m.get_mut(i, j) = v;
        }
    }
}

/// Solves `A * x = b` for `x`, given the result of [`lu`] applied to `A`.
///
/// # Errors
///
/// Returns [`Error::NonSquareMatrix`] if `lu` is not square, and
/// [`Error::IncompatibleVectorSizes`] if `b` does not have one element per row of `lu`.
///
/// # Examples
///
/// ```
/// # use lamina::*;
/// let mut m = Mat2::from_rows([[4.0, 3.0], [6.0, 3.0]]);
/// lu(&mut m)?;
/// let x = lu_solve(&m, vec2(10.0, 12.0))?;
/// assert_eq!(x, vec2(1.0, 2.0));
/// # Ok::<_, lamina::Error>(())
/// ```
pub fn lu_solve<M, V>(lu: &M, b: V) -> Result<VectorOf<M::Rows, M::Elem>>
where
    M: MatrixExpr + ?Sized,
    M::Elem: Real,
    M::Rows: DimPromote<M::Cols> + DimPromote<V::Size> + VectorAlloc<M::Elem>,
    V: VectorExpr<Elem = M::Elem>,
{
    let (rows, cols) = lu.shape();
    check::square(rows, cols)?;
    check::vectors(rows, b.dim())?;

    let mut x = Vector::from_buf(<M::Rows as VectorAlloc<M::Elem>>::alloc(rows));
    assign::run_vector::<OpAssign, _, _>(&mut x, &b);
    substitute(lu, &mut x);
    Ok(x)
}

/// Solves `A * x = b` for `x`, given the result of [`lu_pivot`] applied to `A`.
///
/// # Errors
///
/// Returns [`Error::NonSquareMatrix`] if `lu` is not square, and
/// [`Error::IncompatibleVectorSizes`] if `b` or `pivots` do not have one element per row of `lu`.
///
/// # Examples
///
/// ```
/// # use lamina::*;
/// let mut m = Mat2::from_rows([[0.0, 1.0], [2.0, 3.0]]);
/// let pivots = lu_pivot(&mut m)?;
/// let x = lu_pivot_solve(&m, &pivots, vec2(2.0, 8.0))?;
/// assert_eq!(x, vec2(1.0, 2.0));
/// # Ok::<_, lamina::Error>(())
/// ```
pub fn lu_pivot_solve<M, V>(
    lu: &M,
    pivots: &Pivots,
    b: V,
) -> Result<VectorOf<M::Rows, M::Elem>>
where
    M: MatrixExpr + ?Sized,
    M::Elem: Real,
    M::Rows: DimPromote<M::Cols> + DimPromote<V::Size> + VectorAlloc<M::Elem>,
    V: VectorExpr<Elem = M::Elem>,
{
    let (rows, cols) = lu.shape();
    check::square(rows, cols)?;
    check::vectors(rows, b.dim())?;
    if pivots.order.len() != lu.rows() {
        return Err(Error::IncompatibleVectorSizes);
    }

    let mut x = Vector::from_buf(<M::Rows as VectorAlloc<M::Elem>>::alloc(rows));
    for (i, &from) in pivots.order.iter().enumerate() {
        *x.get_mut(i) = b.get(from);
    }
    substitute(lu, &mut x);
    Ok(x)
}

/// Forward substitution with the unit lower factor, then backward substitution with the upper
/// one.
fn substitute<M, X>(lu: &M, x: &mut X)
where
    M: MatrixExpr + ?Sized,
    M::Elem: Real,
    X: VectorExprMut<Elem = M::Elem>,
{
    let n = lu.rows();
    for i in 0..n {
        let mut acc = x.get(i);
        for j in 0..i {
            acc = acc - lu.get(i, j) * x.get(j);
        }
        *x.get_mut(i) = acc;
    }
    for i in (0..n).rev() {
        let mut acc = x.get(i);
        for j in i + 1..n {
            acc = acc - lu.get(i, j) * x.get(j);
        }
        *x.get_mut(i) = acc / lu.get(i, i);
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    fn system() -> (Mat3<f64>, Vec3<f64>) {
        let a = Mat::from_rows([[2.0, 1.0, 1.0], [4.0, -6.0, 0.0], [-2.0, 7.0, 2.0]]);
        (a, vec3(5.0, -2.0, 9.0))
    }

    #[test]
    fn factors_reproduce_matrix() {
        let (a, _) = system();
        let mut f = a;
        lu(&mut f).unwrap();

        let lower = Mat3::from_fn(|r, c| match r.cmp(&c) {
            std::cmp::Ordering::Greater => f[(r, c)],
            std::cmp::Ordering::Equal => 1.0,
            std::cmp::Ordering::Less => 0.0,
        });
        let upper = Mat3::from_fn(|r, c| if r <= c { f[(r, c)] } else { 0.0 });
        assert_approx_eq!(lower * upper, a).abs(1e-12);
    }

    #[test]
    fn solve() {
        let (a, b) = system();
        let mut f = a;
        lu(&mut f).unwrap();
        let x = lu_solve(&f, b).unwrap();
        assert_approx_eq!(x, vec3(1.0, 1.0, 2.0)).abs(1e-12);
        assert_approx_eq!(a * x, b).abs(1e-12);
    }

    #[test]
    fn pivoted_solve() {
        let a = Mat::from_rows([[0.0, 2.0, 1.0], [1.0, 1.0, 1.0], [3.0, 0.0, 1.0]]);
        let b = vec3(5.0, 5.0, 6.0);

        let mut f = a;
        let pivots = lu_pivot(&mut f).unwrap();
        assert_eq!(pivots.order()[0], 2);
        assert_eq!(pivots.order().len(), 3);

        let x = lu_pivot_solve(&f, &pivots, b).unwrap();
        assert_approx_eq!(x, vec3(1.0, 1.0, 3.0)).abs(1e-12);
    }

    #[test]
    fn dynamic() {
        let (a, b) = system();
        let mut f = DynMatrix::<f64>::zeros(0, 0);
        f.try_assign(&a).unwrap();
        let pivots = lu_pivot(&mut f).unwrap();
        let x = lu_pivot_solve(&f, &pivots, DynVector::from_slice(b.as_slice())).unwrap();
        assert_approx_eq!(x, DynVector::from_slice(&[1.0, 1.0, 2.0])).abs(1e-12);
    }

    #[test]
    fn singular_leaves_zero_pivot() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut m = Mat2::from_rows([[1.0, 2.0], [2.0, 4.0]]);
        lu_pivot(&mut m).unwrap();
        assert_eq!(m[(1, 1)], 0.0);
    }

    #[test]
    #[cfg(not(feature = "unchecked"))]
    fn errors() {
        let mut m = DynMatrix::<f64>::zeros(2, 3);
        assert_eq!(lu(&mut m), Err(Error::NonSquareMatrix));
        assert_eq!(lu_pivot(&mut m).err(), Some(Error::NonSquareMatrix));

        let sq = DynMatrix::<f64>::identity_dyn(2);
        assert_eq!(
            lu_solve(&sq, DynVector::from_slice(&[1.0, 2.0, 3.0])),
            Err(Error::IncompatibleVectorSizes)
        );

        let pivots = lu_pivot(&mut DynMatrix::<f64>::identity_dyn(3)).unwrap();
        assert_eq!(
            lu_pivot_solve(&sq, &pivots, vec2(1.0, 2.0)),
            Err(Error::IncompatibleVectorSizes)
        );
    }
}
