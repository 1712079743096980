//! Vectors, matrices and quaternions with lazily evaluated, size-checked arithmetic.
//!
//! # Overview
//!
//! Every container in this crate is generic over the buffer holding its elements, so the same
//! [`Vector`] and [`Matrix`] types cover fixed-size storage on the stack, resizable storage on the
//! heap, and storage borrowed from the caller. Arithmetic between containers builds lightweight
//! expression nodes instead of computing anything right away. The elements are only computed when
//! the expression is assigned to a container or evaluated with [`VectorExpr::eval`] /
//! [`MatrixExpr::eval`].
//!
//! ```
//! # use lamina::*;
//! let a = vec3(1.0, 2.0, 3.0);
//! let b = DynVector::from_slice(&[0.5, 0.5, 0.5]);
//!
//! // Nothing is computed here...
//! let sum = &a + &b * 2.0;
//! // ...until the expression is evaluated.
//! assert_eq!(sum.eval(), [2.0, 3.0, 4.0]);
//! ```
//!
//! # Sizes
//!
//! Sizes are tracked with the tags [`Const`] (known at compile time) and [`Dyn`] (known at run
//! time). Combining two fixed-size operands of different sizes does not compile. As soon as a
//! dynamically sized operand is involved, the sizes are compared at run time: the `std::ops`
//! operators panic on a mismatch, while the free functions (like [`dot`] or [`mat_mul`]) and the
//! `try_*` methods return an [`Error`].
//!
//! ```compile_fail
//! # use lamina::*;
//! let _ = vec3(1, 2, 3) + vec2(1, 2);
//! ```
//!
//! # Promotion
//!
//! The result of an operation picks its element type, storage, basis and layout from its operands:
//!
//! - Element types follow the usual arithmetic conversions (`f32` and `f64` give `f64`, see
//!   [`Promote`]).
//! - The result is stored inline if all of its sizes are fixed, and on the heap otherwise.
//! - Matching basis or layout tags are kept, mismatched ones become the configured defaults.
//!
//! # Build-time configuration
//!
//! Behavior that is usually chosen once per application is selected with Cargo features instead of
//! run-time settings. See the [`config`] module for the available knobs.

pub mod approx;

mod algebra;
pub mod assign;
pub mod check;
pub mod config;
mod dim;
mod error;
mod expr;
pub mod functor;
mod layout;
mod matrix;
pub mod overload;
mod promote;
mod quat;
mod storage;
mod traits;
mod vector;

pub use algebra::*;
pub use assign::AssignOp;
pub use config::{DefaultBasis, DefaultLayout};
pub use dim::*;
pub use error::{Error, Result};
pub use expr::*;
pub use layout::*;
pub use matrix::*;
pub use promote::{Promote, PromotedElem};
pub use quat::Quat;
pub use storage::*;
pub use traits::*;
pub use vector::*;
