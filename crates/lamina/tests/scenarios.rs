use std::f64::consts::FRAC_PI_2;

use lamina::*;

#[test]
fn inverse_of_2x2() -> anyhow::Result<()> {
    let m = Mat2::from_rows([[1.0, 2.0], [3.0, 4.0]]);
    let expected = Mat2::from_rows([[-2.0, 1.0], [1.5, -0.5]]);
    assert_approx_eq!(inverse(&m)?, expected).rel(1e-3);
    assert_approx_eq!(m.inverse(), expected).rel(1e-3);

    let dynamic = DynMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0])?;
    assert_approx_eq!(inverse(&dynamic)?, expected).rel(1e-3);
    Ok(())
}

#[test]
fn determinant_of_3x3() -> anyhow::Result<()> {
    let m = Mat3::from_rows([[2.0, 0.0, 2.0], [3.0, 3.0, 4.0], [5.0, 5.0, 4.0]]);
    assert_approx_eq!(determinant(&m)?, -16.0).rel(1e-3);

    let dynamic = DynMatrix::from_row_slice(3, 3, m.as_slice())?;
    assert_approx_eq!(determinant(&dynamic)?, -16.0).rel(1e-3);
    Ok(())
}

#[test]
fn dot_of_unit_vectors() -> anyhow::Result<()> {
    let u = vec3(0.0f64, 0.0, 1.0);
    let v = vec3(1.0f64, 0.0, 0.0);
    assert_eq!(dot(u, v)?, 0.0);
    assert_eq!(dot(u, u)?, 1.0);
    Ok(())
}

#[test]
fn quarter_turn_about_x() -> anyhow::Result<()> {
    let mut m = Mat3::<f64>::identity();
    let (s, c) = FRAC_PI_2.sin_cos();
    m.try_assign(Mat3::from_rows([[1.0, 0.0, 0.0], [0.0, c, -s], [0.0, s, c]]))?;

    let v = &m * vec3(0.0, 1.0, 0.0);
    assert_approx_eq!(v, vec3(0.0, 0.0, 1.0)).abs(1e-7);
    Ok(())
}

#[test]
fn wrong_element_count() -> anyhow::Result<()> {
    let mut m = DynMatrix::<f64>::zeros(3, 4);
    for len in [11, 13] {
        let data = vec![1.0; len];
        assert_eq!(
            m.try_copy_from_slice(&data),
            Err(Error::IncompatibleMatrixSizes)
        );
        assert!(DynMatrix::from_row_slice(3, 4, &data).is_err());
    }
    assert_eq!((m.rows(), m.cols()), (3, 4));

    m.try_copy_from_slice(&[2.0; 12])?;
    assert_eq!(m.as_slice(), &[2.0; 12]);
    Ok(())
}

#[test]
fn external_storage_aliases_caller_buffer() -> anyhow::Result<()> {
    let mut data = [0.0f32; 12];
    {
        let mut m = Matrix::<_, ColBasis, RowMajor>::external(&mut data, 3, 4)?;
        m[(1, 2)] = 5.0;
        m.try_add_assign(Mat::<f32, 3, 4>::from_fn(|r, c| (r * 4 + c) as f32))?;
    }
    assert_eq!(data[4 + 2], 5.0 + 6.0);
    assert_eq!(data[11], 11.0);

    let mut data = [0.0f32; 12];
    {
        let mut m = Matrix::<_, ColBasis, ColMajor>::external(&mut data, 3, 4)?;
        m[(1, 2)] = 5.0;
    }
    assert_eq!(data[2 * 3 + 1], 5.0);

    let mut buf = [1, 2, 3];
    ExtVector::external(&mut buf[..]).try_mul_assign(vec3(2, 2, 2))?;
    assert_eq!(buf, [2, 4, 6]);
    Ok(())
}
