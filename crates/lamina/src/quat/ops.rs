use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::{approx::ApproxEq, Number, Quat};

impl<T: Copy + PartialEq> PartialEq for Quat<T> {
    fn eq(&self, other: &Self) -> bool {
        self.to_array() == other.to_array()
    }
}

impl<T: Copy + Eq> Eq for Quat<T> {}

macro_rules! componentwise {
    ($($tr:ident, $method:ident, $assign_tr:ident, $assign_method:ident, $op:tt;)+) => {
        $(
            impl<T: Number> $tr for Quat<T> {
                type Output = Self;

                fn $method(self, rhs: Self) -> Self {
                    let [a, b] = [self.to_array(), rhs.to_array()];
                    Self::from_components(a[0] $op b[0], a[1] $op b[1], a[2] $op b[2], a[3] $op b[3])
                }
            }

            impl<T: Number> $assign_tr for Quat<T> {
                fn $assign_method(&mut self, rhs: Self) {
                    *self = *self $op rhs;
                }
            }
        )+
    };
}
componentwise!(
    Add, add, AddAssign, add_assign, +;
    Sub, sub, SubAssign, sub_assign, -;
);

impl<T: Number> Neg for Quat<T> {
    type Output = Self;

    fn neg(self) -> Self {
        let [x, y, z, w] = self.to_array();
        Self::from_components(-x, -y, -z, -w)
    }
}

/// Hamilton product.
impl<T: Number> Mul for Quat<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.hamilton(rhs)
    }
}

impl<T: Number> MulAssign for Quat<T> {
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.hamilton(rhs);
    }
}

/// Scales every component.
impl<T: Number> Mul<T> for Quat<T> {
    type Output = Self;

    fn mul(self, rhs: T) -> Self {
        let [x, y, z, w] = self.to_array();
        Self::from_components(x * rhs, y * rhs, z * rhs, w * rhs)
    }
}

/// Divides every component.
impl<T: Number> Div<T> for Quat<T> {
    type Output = Self;

    fn div(self, rhs: T) -> Self {
        let [x, y, z, w] = self.to_array();
        Self::from_components(x / rhs, y / rhs, z / rhs, w / rhs)
    }
}

impl<T: ApproxEq + Copy> ApproxEq for Quat<T> {
    type Tolerance = T::Tolerance;

    fn abs_diff_eq(&self, other: &Self, abs_tolerance: Self::Tolerance) -> bool {
        self.to_array().abs_diff_eq(&other.to_array(), abs_tolerance)
    }

    fn rel_diff_eq(&self, other: &Self, rel_tolerance: Self::Tolerance) -> bool {
        self.to_array().rel_diff_eq(&other.to_array(), rel_tolerance)
    }

    fn ulps_diff_eq(&self, other: &Self, ulps_tolerance: u32) -> bool {
        self.to_array().ulps_diff_eq(&other.to_array(), ulps_tolerance)
    }
}
