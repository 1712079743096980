//! Compares the dense algorithms against nalgebra.

use lamina::*;
use nalgebra::{DMatrix, DVector};

fn random_system(rng: &mut fastrand::Rng, n: usize) -> (Vec<f64>, Vec<f64>) {
    let a = (0..n * n)
        .map(|i| {
            let diag = if i / n == i % n { n as f64 } else { 0.0 };
            rng.f64() * 2.0 - 1.0 + diag
        })
        .collect();
    let b = (0..n).map(|_| rng.f64() * 10.0 - 5.0).collect();
    (a, b)
}

#[test]
fn determinant_matches() -> anyhow::Result<()> {
    let mut rng = fastrand::Rng::with_seed(41);
    for n in 1..=9 {
        for _ in 0..10 {
            let (data, _) = random_system(&mut rng, n);
            let ours = determinant(DynMatrix::from_row_slice(n, n, &data)?)?;
            let theirs = DMatrix::from_row_slice(n, n, &data).determinant();
            assert_approx_eq!(ours, theirs).rel(1e-10);
        }
    }
    Ok(())
}

#[test]
fn inverse_matches() -> anyhow::Result<()> {
    let mut rng = fastrand::Rng::with_seed(42);
    for n in 1..=9 {
        let (data, _) = random_system(&mut rng, n);
        let ours = inverse(DynMatrix::from_row_slice(n, n, &data)?)?;
        let theirs = DMatrix::from_row_slice(n, n, &data)
            .try_inverse()
            .ok_or_else(|| anyhow::anyhow!("nalgebra found a singular {n}x{n} matrix"))?;
        for r in 0..n {
            for c in 0..n {
                assert_approx_eq!(ours[(r, c)], theirs[(r, c)]).abs(1e-12);
            }
        }
    }
    Ok(())
}

#[test]
fn pivoted_solve_matches() -> anyhow::Result<()> {
    let mut rng = fastrand::Rng::with_seed(43);
    for n in 1..=9 {
        let (data, rhs) = random_system(&mut rng, n);

        let mut lu = DynMatrix::from_row_slice(n, n, &data)?;
        let pivots = lu_pivot(&mut lu)?;
        let ours = lu_pivot_solve(&lu, &pivots, DynVector::from_slice(&rhs))?;

        let theirs = DMatrix::from_row_slice(n, n, &data)
            .lu()
            .solve(&DVector::from_column_slice(&rhs))
            .ok_or_else(|| anyhow::anyhow!("nalgebra could not solve a {n}x{n} system"))?;
        assert_approx_eq!(ours, DynVector::from_slice(theirs.as_slice())).abs(1e-12);
    }
    Ok(())
}

#[test]
fn fixed_sizes_match() -> anyhow::Result<()> {
    let mut rng = fastrand::Rng::with_seed(44);
    let (data, _) = random_system(&mut rng, 4);
    let m = Mat4::<f64>::try_from_slice(&data)?;
    let theirs = nalgebra::Matrix4::from_row_slice(&data);
    assert_approx_eq!(determinant(&m)?, theirs.determinant()).rel(1e-12);

    let inv = m.inverse();
    let theirs = theirs
        .try_inverse()
        .ok_or_else(|| anyhow::anyhow!("nalgebra found a singular 4x4 matrix"))?;
    for r in 0..4 {
        for c in 0..4 {
            assert_approx_eq!(inv[(r, c)], theirs[(r, c)]).abs(1e-12);
        }
    }
    Ok(())
}
