//! Geometry on top of [`lamina`].
//!
//! This crate builds transformation matrices and rotation quaternions, applies transformations to
//! vectors and points, and converts between coordinate systems. The core crate knows nothing about
//! any of this; everything here is written against its public expression traits.
//!
//! # Basis orientation
//!
//! Every matrix builder and every transformation function honors the [`Basis`] of the matrix it
//! works with. For a [`ColBasis`] matrix, the images of the coordinate axes are stored in its
//! columns and vectors are transformed as `M * v`. For a [`RowBasis`] matrix, they are stored in
//! its rows and vectors are transformed as `v * M`. The builders produce the same transformation
//! for either orientation, so code using these functions does not need to care which one is
//! configured.
//!
//! ```
//! # use lamina::*;
//! # use lamina_mathlib::*;
//! let mut cols = Matrix::<[[f64; 3]; 3], ColBasis>::ZERO;
//! let mut rows = Matrix::<[[f64; 3]; 3], RowBasis>::ZERO;
//! rotation_z(&mut cols, std::f64::consts::FRAC_PI_2)?;
//! rotation_z(&mut rows, std::f64::consts::FRAC_PI_2)?;
//!
//! assert_approx_eq!(transform_vector(&cols, Vec3::X)?, Vec3::<f64>::Y).abs(1e-15);
//! assert_approx_eq!(transform_vector(&rows, Vec3::X)?, Vec3::<f64>::Y).abs(1e-15);
//! # Ok::<_, lamina::Error>(())
//! ```
//!
//! [`Basis`]: lamina::Basis
//! [`ColBasis`]: lamina::ColBasis
//! [`RowBasis`]: lamina::RowBasis

mod angle;
mod builders;
mod coords;
mod quat;
mod transform;

pub use angle::*;
pub use builders::*;
pub use coords::*;
pub use quat::*;
pub use transform::*;

use lamina::{check, Const, DimPromote, Real, Result, Vec3, VectorExpr};

/// Copies a 3-element vector expression into a [`Vec3`], checking its size.
fn to_vec3<V>(v: V) -> Result<Vec3<V::Elem>>
where
    V: VectorExpr,
    V::Elem: Real,
    V::Size: DimPromote<Const<3>>,
{
    check::exact::<3, _>(v.dim())?;
    Ok(Vec3::from_fn(|i| v.get(i)))
}
