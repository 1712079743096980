//! Named element access (`v.x`, `v.y`, ...) for fixed-size vectors with up to 4 elements.

use std::ops::{Deref, DerefMut};

use crate::Vector;

macro_rules! views {
    ($($view:ident { $($field:ident),+ })+) => {$(
        #[doc = concat!("Named fields of a ", stringify!($view), " vector.")]
        #[repr(C)]
        pub struct $view<T> {
            $(pub $field: T,)+
            // only reachable through `Deref` on a vector
            _sealed: (),
        }
    )+};
}
views! {
    X { x }
    XY { x, y }
    XYZ { x, y, z }
    XYZW { x, y, z, w }
}

macro_rules! named_fields {
    ($($n:literal => $view:ident),+) => {
        $(
            impl<T> Deref for Vector<[T; $n]> {
                type Target = $view<T>;

                #[inline]
                fn deref(&self) -> &$view<T> {
                    // SAFETY: `Vector` is `repr(transparent)` over `[T; N]`, and the view is a
                    // `repr(C)` struct of `N` fields of type `T` plus a trailing ZST.
                    unsafe { &*(self as *const Self as *const $view<T>) }
                }
            }

            impl<T> DerefMut for Vector<[T; $n]> {
                #[inline]
                fn deref_mut(&mut self) -> &mut $view<T> {
                    // SAFETY: see `deref`.
                    unsafe { &mut *(self as *mut Self as *mut $view<T>) }
                }
            }
        )+
    };
}
named_fields!(1 => X, 2 => XY, 3 => XYZ, 4 => XYZW);

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn layout_matches() {
        assert_eq!(std::mem::size_of::<XYZW<f64>>(), std::mem::size_of::<Vec4<f64>>());
        assert_eq!(std::mem::align_of::<XY<u8>>(), std::mem::align_of::<Vec2<u8>>());

        let mut v = vec4(1, 2, 3, 4);
        v.w = 40;
        v.y += 10;
        assert_eq!(v, [1, 12, 3, 40]);
        assert_eq!(vec1(5).x, 5);
    }
}
