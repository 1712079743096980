//! Size tags.
//!
//! Every vector expression carries one size tag, every matrix expression carries two (rows and
//! columns). A tag is either known at compile time ([`Const`]), only known at run time ([`Dyn`]),
//! or compatible with any size ([`Unit`], used by scalar-like operands such as
//! [`splat`][crate::splat]).
//!
//! [`DimPromote`] computes the size tag of the result of combining two operands. Combining two
//! [`Const`] tags with different values has no [`DimPromote`] impl, so such a mismatch is rejected
//! by the compiler instead of being detected at run time.

use std::fmt;

/// A size tag.
pub trait Dim: Copy + fmt::Debug + PartialEq + Send + Sync + 'static {
    /// The size, if it is known at compile time.
    const FIXED: Option<usize>;

    /// `true` if an operand of this size is repeated to match any other size.
    const BROADCAST: bool = false;

    /// Returns the number of elements along this dimension.
    fn value(self) -> usize;

    /// Creates a tag describing `n` elements, or returns [`None`] if this tag cannot describe `n`
    /// elements (because it is fixed to a different size).
    fn try_from_usize(n: usize) -> Option<Self>;
}

/// A size known at compile time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Const<const N: usize>;

/// A size only known at run time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Dyn(pub usize);

/// The size of a scalar-like operand that is compatible with operands of any size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Unit;

impl<const N: usize> Dim for Const<N> {
    const FIXED: Option<usize> = Some(N);

    #[inline]
    fn value(self) -> usize {
        N
    }

    #[inline]
    fn try_from_usize(n: usize) -> Option<Self> {
        (n == N).then_some(Const)
    }
}

impl Dim for Dyn {
    const FIXED: Option<usize> = None;

    #[inline]
    fn value(self) -> usize {
        self.0
    }

    #[inline]
    fn try_from_usize(n: usize) -> Option<Self> {
        Some(Dyn(n))
    }
}

impl Dim for Unit {
    const FIXED: Option<usize> = Some(1);
    const BROADCAST: bool = true;

    #[inline]
    fn value(self) -> usize {
        1
    }

    #[inline]
    fn try_from_usize(n: usize) -> Option<Self> {
        (n == 1).then_some(Unit)
    }
}

/// Size promotion between the size tags of two operands.
///
/// | `Self`     | `Rhs`      | `Output`   | checked at   |
/// |------------|------------|------------|--------------|
/// | `Const<N>` | `Const<N>` | `Const<N>` | compile time |
/// | `Const<N>` | `Dyn`      | `Const<N>` | run time     |
/// | `Dyn`      | `Const<N>` | `Const<N>` | run time     |
/// | `Dyn`      | `Dyn`      | `Dyn`      | run time     |
/// | `Unit`     | any `D`    | `D`        | never        |
/// | any `D`    | `Unit`     | `D`        | never        |
///
/// Two `Dyn` operands promote to the larger of the two sizes; with run-time checks enabled the
/// sizes have to be equal anyway.
#[diagnostic::on_unimplemented(
    message = "incompatible expression sizes `{Self}` and `{Rhs}`",
    label = "the sizes of these operands are known to differ at compile time"
)]
pub trait DimPromote<Rhs: Dim>: Dim {
    /// The size tag of the result.
    type Output: Dim;

    /// Computes the size of the result.
    ///
    /// This does not check compatibility; see [`DimPromote::compatible`].
    fn promote(self, rhs: Rhs) -> Self::Output;

    /// Returns whether an operand of size `self` can be combined with one of size `rhs`.
    fn compatible(self, rhs: Rhs) -> bool;
}

impl<const N: usize> DimPromote<Const<N>> for Const<N> {
    type Output = Const<N>;

    #[inline]
    fn promote(self, _: Const<N>) -> Const<N> {
        Const
    }

    #[inline]
    fn compatible(self, _: Const<N>) -> bool {
        true
    }
}

impl<const N: usize> DimPromote<Dyn> for Const<N> {
    type Output = Const<N>;

    #[inline]
    fn promote(self, _: Dyn) -> Const<N> {
        Const
    }

    #[inline]
    fn compatible(self, rhs: Dyn) -> bool {
        rhs.0 == N
    }
}

impl<const N: usize> DimPromote<Const<N>> for Dyn {
    type Output = Const<N>;

    #[inline]
    fn promote(self, _: Const<N>) -> Const<N> {
        Const
    }

    #[inline]
    fn compatible(self, _: Const<N>) -> bool {
        self.0 == N
    }
}

impl DimPromote<Dyn> for Dyn {
    type Output = Dyn;

    #[inline]
    fn promote(self, rhs: Dyn) -> Dyn {
        Dyn(self.0.max(rhs.0))
    }

    #[inline]
    fn compatible(self, rhs: Dyn) -> bool {
        self.0 == rhs.0
    }
}

impl<D: Dim> DimPromote<D> for Unit {
    type Output = D;

    #[inline]
    fn promote(self, rhs: D) -> D {
        rhs
    }

    #[inline]
    fn compatible(self, _: D) -> bool {
        true
    }
}

impl<const N: usize> DimPromote<Unit> for Const<N> {
    type Output = Const<N>;

    #[inline]
    fn promote(self, _: Unit) -> Const<N> {
        Const
    }

    #[inline]
    fn compatible(self, _: Unit) -> bool {
        true
    }
}

impl DimPromote<Unit> for Dyn {
    type Output = Dyn;

    #[inline]
    fn promote(self, _: Unit) -> Dyn {
        self
    }

    #[inline]
    fn compatible(self, _: Unit) -> bool {
        true
    }
}

/// Shorthand for the promoted size of two size tags.
pub type PromotedDim<A, B> = <A as DimPromote<B>>::Output;

#[cfg(test)]
mod tests {
    use super::*;

    fn promote<A: DimPromote<B>, B: Dim>(a: A, b: B) -> Option<usize> {
        a.compatible(b).then(|| a.promote(b).value())
    }

    #[test]
    fn fixed() {
        assert_eq!(promote(Const::<3>, Const::<3>), Some(3));
        assert_eq!(promote(Const::<3>, Dyn(3)), Some(3));
        assert_eq!(promote(Dyn(3), Const::<3>), Some(3));
        assert_eq!(promote(Const::<3>, Dyn(4)), None);
        assert_eq!(promote(Dyn(2), Const::<3>), None);
    }

    #[test]
    fn dynamic() {
        assert_eq!(promote(Dyn(5), Dyn(5)), Some(5));
        assert_eq!(promote(Dyn(5), Dyn(6)), None);
        assert_eq!(Dyn(5).promote(Dyn(6)), Dyn(6));
    }

    #[test]
    fn unit() {
        assert_eq!(promote(Unit, Const::<7>), Some(7));
        assert_eq!(promote(Const::<7>, Unit), Some(7));
        assert_eq!(promote(Unit, Dyn(9)), Some(9));
        assert_eq!(promote(Dyn(9), Unit), Some(9));
        assert_eq!(promote(Unit, Unit), Some(1));
    }

    #[test]
    fn from_usize() {
        assert_eq!(Const::<4>::try_from_usize(4), Some(Const));
        assert_eq!(Const::<4>::try_from_usize(3), None);
        assert_eq!(Dyn::try_from_usize(3), Some(Dyn(3)));
        assert_eq!(Unit::try_from_usize(2), None);
        assert_eq!(<Const<4> as Dim>::FIXED, Some(4));
        assert_eq!(<Dyn as Dim>::FIXED, None);
    }
}
