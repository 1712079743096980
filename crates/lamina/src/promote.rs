//! Element type promotion.
//!
//! When two operands with different element types are combined, both elements are converted to a
//! common type first. The table follows the usual arithmetic conversions: integers widen to the
//! larger integer of the same signedness, integers combined with a float become that float, and
//! `f32` combined with `f64` becomes `f64`. Pairs without a lossless-enough common type (for
//! example `i32` and `u32`) have no entry, so combining them is a compile error.

/// Determines the common type of `Self` and `Rhs`, and converts values to it.
pub trait Promote<Rhs>: Copy {
    /// The common type.
    type Output: Copy;

    /// Converts a left-hand operand to the common type.
    fn promote_lhs(self) -> Self::Output;

    /// Converts a right-hand operand to the common type.
    fn promote_rhs(rhs: Rhs) -> Self::Output;
}

/// Shorthand for the common element type of `A` and `B`.
pub type PromotedElem<A, B> = <A as Promote<B>>::Output;

macro_rules! identity {
    ($($types:ty),+) => {
        $(
            impl Promote<$types> for $types {
                type Output = $types;

                #[inline]
                fn promote_lhs(self) -> $types {
                    self
                }

                #[inline]
                fn promote_rhs(rhs: $types) -> $types {
                    rhs
                }
            }
        )+
    };
}
identity!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64);

macro_rules! widen {
    ($($from:ty => $to:ty;)+) => {
        $(
            impl Promote<$to> for $from {
                type Output = $to;

                #[inline]
                fn promote_lhs(self) -> $to {
                    self as $to
                }

                #[inline]
                fn promote_rhs(rhs: $to) -> $to {
                    rhs
                }
            }

            impl Promote<$from> for $to {
                type Output = $to;

                #[inline]
                fn promote_lhs(self) -> $to {
                    self
                }

                #[inline]
                fn promote_rhs(rhs: $from) -> $to {
                    rhs as $to
                }
            }
        )+
    };
}

widen!(
    f32 => f64;

    i8 => i16;
    i8 => i32;
    i8 => i64;
    i16 => i32;
    i16 => i64;
    i32 => i64;

    u8 => u16;
    u8 => u32;
    u8 => u64;
    u16 => u32;
    u16 => u64;
    u32 => u64;
);

macro_rules! int_to_float {
    ($($int:ty),+) => {
        widen!(
            $(
                $int => f32;
                $int => f64;
            )+
        );
    };
}
int_to_float!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);
