//! Per-element-type numeric operations.
//!
//! Every container and expression in this crate is generic over its element type. The traits in
//! this module describe what an element type has to support for a given operation, and carry the
//! per-type constants (like [`Real::EPSILON`]) that algorithms need.

use std::{fmt, ops};

use crate::promote::Promote;

/// Trigonometry on angles in radians.
pub trait Trig: Sized {
    fn sin(self) -> Self;
    fn cos(self) -> Self;
    fn tan(self) -> Self;
    fn asin(self) -> Self;
    fn acos(self) -> Self;
    fn atan(self) -> Self;
    /// Four-quadrant arctangent of `self / x`.
    fn atan2(self, x: Self) -> Self;
    /// `(self.sin(), self.cos())`, computed together.
    fn sin_cos(self) -> (Self, Self);
}

pub trait Sqrt {
    fn sqrt(self) -> Self;
}

pub trait Abs {
    fn abs(self) -> Self;
}

/// Ordering helpers that also work for floats.
///
/// For floats, a `NaN` operand is ignored and the other operand is returned, like [`f64::min`].
pub trait MinMax: Sized {
    fn min(self, rhs: Self) -> Self;
    fn max(self, rhs: Self) -> Self;
    fn clamp(self, low: Self, high: Self) -> Self {
        self.max(low).min(high)
    }
}

/// Additive identity.
pub trait Zero {
    const ZERO: Self;
}

/// Multiplicative identity.
pub trait One {
    const ONE: Self;
}

/// Element types closed under `+ - * /` and negation.
///
/// Combining two values of the same [`Number`] type never promotes them to another type.
pub trait Number:
    Promote<Self, Output = Self>
    + Zero
    + One
    + ops::Neg<Output = Self>
    + ops::Add<Output = Self>
    + ops::Sub<Output = Self>
    + ops::Mul<Output = Self>
    + ops::Div<Output = Self>
    + PartialEq
    + Copy
{
}
impl<T> Number for T where
    T: Promote<Self, Output = Self>
        + Zero
        + One
        + ops::Neg<Output = Self>
        + ops::Add<Output = Self>
        + ops::Sub<Output = Self>
        + ops::Mul<Output = Self>
        + ops::Div<Output = Self>
        + PartialEq
        + Copy
{
}

/// Floating-point element types.
///
/// Algorithms that need square roots, trigonometry or a notion of numerical precision (inversion,
/// normalization, rotations) are restricted to these types.
pub trait Real: Number + Sqrt + Trig + Abs + MinMax + PartialOrd + fmt::Debug {
    /// Difference between `1.0` and the next larger representable number.
    const EPSILON: Self;
    /// Archimedes' constant (π).
    const PI: Self;

    /// Converts an [`f64`] to this type, rounding if necessary.
    fn from_f64(value: f64) -> Self;

    /// Returns `true` if `self` is neither infinite nor NaN.
    fn is_finite(self) -> bool;
}

/// Primitive element types that can appear as the scalar operand of `expr * scalar` and
/// `expr / scalar`.
pub trait Scalar: Copy + fmt::Debug {}

macro_rules! scalar {
    ($($t:ty),+) => {$(impl Scalar for $t {})+};
}
scalar!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64);

/// Implements `$trait` for each type by calling the inherent method of the same name.
macro_rules! inherent {
    ($trait:ident for [$($t:ty),+] $methods:tt) => {
        $(inherent!(@impl $trait, $t, $methods);)+
    };
    (@impl $trait:ident, $t:ty, { $(fn $m:ident($($arg:ident),*) -> $ret:ty;)+ }) => {
        impl $trait for $t {
            $(
                #[inline]
                fn $m(self $(, $arg: Self)*) -> $ret {
                    <$t>::$m(self $(, $arg)*)
                }
            )+
        }
    };
}

inherent!(MinMax for [f32, f64] {
    fn min(rhs) -> Self;
    fn max(rhs) -> Self;
});
inherent!(Abs for [i8, i16, i32, i64, i128, isize, f32, f64] { fn abs() -> Self; });
inherent!(Sqrt for [f32, f64] { fn sqrt() -> Self; });
inherent!(Trig for [f32, f64] {
    fn sin() -> Self;
    fn cos() -> Self;
    fn tan() -> Self;
    fn asin() -> Self;
    fn acos() -> Self;
    fn atan() -> Self;
    fn atan2(x) -> Self;
    fn sin_cos() -> (Self, Self);
});

macro_rules! ord_min_max {
    ($($t:ty),+) => {$(
        impl MinMax for $t {
            #[inline]
            fn min(self, rhs: Self) -> Self {
                Ord::min(self, rhs)
            }

            #[inline]
            fn max(self, rhs: Self) -> Self {
                Ord::max(self, rhs)
            }
        }
    )+};
}
ord_min_max!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

macro_rules! zero_one {
    ($zero:literal, $one:literal: $($t:ty),+) => {$(
        impl Zero for $t {
            const ZERO: Self = $zero;
        }
        impl One for $t {
            const ONE: Self = $one;
        }
    )+};
}
zero_one!(0, 1: u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
zero_one!(0.0, 1.0: f32, f64);

macro_rules! real {
    ($($t:ident),+) => {$(
        impl Real for $t {
            const EPSILON: Self = $t::EPSILON;
            const PI: Self = std::$t::consts::PI;

            #[inline]
            fn from_f64(value: f64) -> Self {
                value as $t
            }

            #[inline]
            fn is_finite(self) -> bool {
                $t::is_finite(self)
            }
        }
    )+};
}
real!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    fn half<T: Real>() -> T {
        T::ONE / (T::ONE + T::ONE)
    }

    #[test]
    fn constants() {
        assert_eq!(<f32 as Real>::EPSILON, f32::EPSILON);
        assert_eq!(<f64 as Real>::PI, std::f64::consts::PI);
        assert_eq!(half::<f64>(), 0.5);
        assert_eq!(<i32 as Zero>::ZERO, 0);
        assert_eq!(<usize as One>::ONE, 1);
    }

    #[test]
    fn min_max() {
        assert_eq!(MinMax::clamp(5, 0, 3), 3);
        assert_eq!(MinMax::clamp(-2.0, 0.0, 3.0), 0.0);
        assert_eq!(MinMax::max(f32::NAN, 1.0), 1.0);
    }

    #[test]
    fn sin_cos() {
        let (s, c) = Trig::sin_cos(0.0f64);
        assert_eq!((s, c), (0.0, 1.0));
        assert_eq!(Abs::abs(-3i64), 3);
        assert_eq!(Sqrt::sqrt(9.0f32), 3.0);
    }
}
