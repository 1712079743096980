//! Approximate equality.
//!
//! Containers compare element by element, and only compare equal if their sizes match. Like
//! `PartialEq`, the comparison works across storage types, so a fixed-size result can be checked
//! against a dynamically sized one.
//!
//! The three comparisons follow
//! <https://randomascii.wordpress.com/2012/02/25/comparing-floating-point-numbers-2012-edition/>.

mod impls;

use std::{fmt, panic::Location};

/// Approximate comparison of `Self` against `Rhs`.
///
/// Compound values compare equal when every pair of elements does.
pub trait ApproxEq<Rhs: ?Sized = Self> {
    /// Scalar type of the absolute and relative tolerances, usually [`f32`] or [`f64`].
    type Tolerance: Tolerances + Copy;

    /// `|self - other| <= abs_tolerance`.
    fn abs_diff_eq(&self, other: &Rhs, abs_tolerance: Self::Tolerance) -> bool;

    /// `|self - other| <= max(|self|, |other|) * rel_tolerance`.
    fn rel_diff_eq(&self, other: &Rhs, rel_tolerance: Self::Tolerance) -> bool;

    /// At most `ulps_tolerance` representable values lie between `self` and `other`.
    ///
    /// `NaN` equals nothing, the two zeroes are equal, and values of opposite sign never are.
    fn ulps_diff_eq(&self, other: &Rhs, ulps_tolerance: u32) -> bool;
}

/// Tolerances used when an assertion does not pick a comparison.
pub trait Tolerances {
    const ABS: Self;
    const REL: Self;
    const ULPS: u32;
}

impl Tolerances for f32 {
    const ABS: Self = f32::EPSILON;
    const REL: Self = f32::EPSILON;
    const ULPS: u32 = 4;
}

impl Tolerances for f64 {
    const ABS: Self = f64::EPSILON;
    const REL: Self = f64::EPSILON;
    const ULPS: u32 = 4;
}

/// Pending approximate assertion, created by [`assert_approx_eq!`][crate::assert_approx_eq] and
/// [`assert_approx_ne!`][crate::assert_approx_ne].
///
/// [`abs`](Self::abs), [`rel`](Self::rel) and [`ulps`](Self::ulps) enable comparisons; the values
/// are equal if any enabled comparison says so. With none enabled, an absolute and a relative
/// comparison with [`Tolerances::ABS`] and [`Tolerances::REL`] are used.
///
/// The assertion runs when the value is dropped, at the end of the statement.
pub struct Asserter<'a, L, R>
where
    L: ApproxEq<R> + fmt::Debug + ?Sized,
    R: fmt::Debug + ?Sized,
{
    left: &'a L,
    right: &'a R,
    expect_equal: bool,
    // `drop` cannot be `#[track_caller]`
    location: &'static Location<'static>,
    msg: Option<fmt::Arguments<'a>>,
    abs: Option<L::Tolerance>,
    rel: Option<L::Tolerance>,
    ulps: Option<u32>,
}

impl<'a, L, R> Asserter<'a, L, R>
where
    L: ApproxEq<R> + fmt::Debug + ?Sized,
    R: fmt::Debug + ?Sized,
{
    #[doc(hidden)]
    #[track_caller]
    pub fn new(
        left: &'a L,
        right: &'a R,
        expect_equal: bool,
        msg: Option<fmt::Arguments<'a>>,
    ) -> Self {
        Self {
            left,
            right,
            expect_equal,
            location: Location::caller(),
            msg,
            abs: None,
            rel: None,
            ulps: None,
        }
    }

    /// Enables an absolute comparison.
    ///
    /// Prefer this for values near zero, where relative comparisons are meaningless.
    pub fn abs(&mut self, tolerance: L::Tolerance) -> &mut Self {
        self.abs = Some(tolerance);
        self
    }

    /// Enables a relative comparison.
    pub fn rel(&mut self, tolerance: L::Tolerance) -> &mut Self {
        self.rel = Some(tolerance);
        self
    }

    /// Enables a comparison in units in the last place.
    pub fn ulps(&mut self, tolerance: u32) -> &mut Self {
        self.ulps = Some(tolerance);
        self
    }
}

impl<'a, L, R> Drop for Asserter<'a, L, R>
where
    L: ApproxEq<R> + fmt::Debug + ?Sized,
    R: fmt::Debug + ?Sized,
{
    fn drop(&mut self) {
        let (left, right) = (self.left, self.right);
        let equal = if self.abs.is_none() && self.rel.is_none() && self.ulps.is_none() {
            left.abs_diff_eq(right, L::Tolerance::ABS) || left.rel_diff_eq(right, L::Tolerance::REL)
        } else {
            self.abs.is_some_and(|t| left.abs_diff_eq(right, t))
                || self.rel.is_some_and(|t| left.rel_diff_eq(right, t))
                || self.ulps.is_some_and(|t| left.ulps_diff_eq(right, t))
        };

        if equal != self.expect_equal {
            let op = if self.expect_equal { "==" } else { "!=" };
            fail(op, &left, &right, self.location, self.msg);
        }
    }
}

#[cold]
fn fail(
    op: &str,
    left: &dyn fmt::Debug,
    right: &dyn fmt::Debug,
    location: &Location<'_>,
    msg: Option<fmt::Arguments<'_>>,
) -> ! {
    let msg = msg.map(|m| format!(": {m}")).unwrap_or_default();
    panic!("assertion `left {op} right` failed at {location}{msg}\n  left: {left:?}\n right: {right:?}");
}

/// Like [`assert_eq!`], but for values that only need to be approximately equal.
///
/// The returned [`Asserter`] selects the comparison. See also [`assert_approx_ne!`].
///
/// # Examples
///
/// ```
/// # use lamina::*;
/// let sum = (0..10).fold(0.0, |acc, _| acc + 0.1);
/// assert_approx_eq!(sum, 1.0);
///
/// let fixed = vec3(0.1, 0.2, 0.3) * 3.0;
/// let dynamic = DynVector::from_slice(&[0.3, 0.6, 0.9]);
/// assert_approx_eq!(fixed.eval(), dynamic).abs(1e-12);
///
/// assert_approx_eq!(250.0, 249.0).abs(1.0);
/// assert_approx_eq!(250.0, 249.0).rel(0.004);
/// assert_approx_eq!(2.0, 2.0 + 2.0 * f64::EPSILON).ulps(1);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($lhs:expr, $rhs:expr $(,)?) => {
        $crate::approx::Asserter::new(&$lhs, &$rhs, true, ::core::option::Option::None)
    };
    ($lhs:expr, $rhs:expr, $($arg:tt)+) => {
        $crate::approx::Asserter::new(
            &$lhs,
            &$rhs,
            true,
            ::core::option::Option::Some(::core::format_args!($($arg)+)),
        )
    };
}

/// The negation of [`assert_approx_eq!`].
///
/// ```
/// # use lamina::*;
/// assert_approx_ne!(250.0, 249.0).abs(0.5);
/// assert_approx_ne!(vec2(1.0, 2.0), DynVector::from_slice(&[1.0, 2.0, 3.0]));
/// ```
#[macro_export]
macro_rules! assert_approx_ne {
    ($lhs:expr, $rhs:expr $(,)?) => {
        $crate::approx::Asserter::new(&$lhs, &$rhs, false, ::core::option::Option::None)
    };
    ($lhs:expr, $rhs:expr, $($arg:tt)+) => {
        $crate::approx::Asserter::new(
            &$lhs,
            &$rhs,
            false,
            ::core::option::Option::Some(::core::format_args!($($arg)+)),
        )
    };
}

#[cfg(test)]
mod tests {
    #[test]
    #[should_panic(expected = "assertion `left == right` failed")]
    fn eq_failure() {
        assert_approx_eq!(0.5, 0.75);
    }

    #[test]
    #[should_panic(expected = "assertion `left != right` failed")]
    fn ne_failure() {
        assert_approx_ne!(0.5, 0.5);
    }

    #[test]
    #[should_panic(expected = "pivot 3 drifted")]
    fn custom_message() {
        assert_approx_eq!(0.5, 0.75, "pivot {} drifted", 3);
    }

    #[test]
    fn any_enabled_comparison_suffices() {
        assert_approx_eq!(10.0, 10.5).abs(0.1).rel(0.1);
        assert_approx_ne!(10.0, 10.5).abs(0.1).ulps(3);
    }

    #[test]
    fn relative() {
        assert_approx_eq!(2.0, 2.002).rel(0.001);
        assert_approx_ne!(2.0, 2.002).rel(0.0009);
        assert_approx_eq!(3.0, -3.0).rel(2.0);
        // anything but zero is a 100% error relative to zero
        assert_approx_ne!(0.0, 1e-30).rel(0.99);
    }

    #[test]
    fn ulps_and_signs() {
        let next = f32::from_bits(1.0f32.to_bits() + 1);
        assert_approx_eq!(1.0f32, next).ulps(1);
        assert_approx_ne!(1.0f32, next).ulps(0);
        assert_approx_eq!(0.0f64, -0.0).ulps(0);
        assert_approx_ne!(1e-300f64, -1e-300).ulps(u32::MAX);
        assert_approx_eq!(-4.0, -4.0).abs(0.0);
    }

    #[test]
    fn non_finite() {
        assert_approx_ne!(f64::NAN, f64::NAN).abs(f64::MAX);
        assert_approx_ne!(f32::NAN, 1.0).ulps(u32::MAX);
        assert_approx_eq!(f64::INFINITY, f64::INFINITY).rel(0.0);
        assert_approx_ne!(f32::NEG_INFINITY, f32::INFINITY).abs(f32::MAX);
        assert_approx_ne!(f64::INFINITY, f64::MAX).abs(1e300);
        // infinity is the representable value right after MAX
        assert_approx_eq!(f64::MAX, f64::INFINITY).ulps(1);
    }

    #[test]
    fn slices_and_arrays() {
        assert_approx_eq!([0.1 + 0.2, 1.0], [0.3, 1.0]);
        assert_approx_ne!([1.0, 2.0][..], [1.0][..]);
        assert_approx_eq!([0.25f32, 0.5][..], [0.25, 0.5][..]).abs(0.0);
    }
}
