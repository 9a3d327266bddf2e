use crate::{Float, PI};

pub mod arena;
pub mod camera;
pub mod color;
pub mod film;
pub mod geometry;
pub mod integrator;
pub mod interaction;
pub mod intersect;
pub mod light;
pub mod material;
pub mod mesh;
pub mod packet;
pub mod parallel;
pub mod primitive;
pub mod profiler;
pub mod scene;
pub mod transform;

use num::integer::Roots;
use num::Bounded;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// Slop factor guarding secondary rays against immediate self intersection.
pub const SLOP: Float = 1e-4;

pub trait RealNum<T>:
    Add<Output = T>
    + Sub<Output = T>
    + Mul<Output = T>
    + Div<Output = T>
    + Neg<Output = T>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + PartialOrd
    + PartialEq
    + Bounded
    + Copy
    + Clone
{
    fn one() -> Self;
    fn two() -> Self;
    fn zero() -> Self;
    fn min(self, t: Self) -> Self;
    fn max(self, t: Self) -> Self;
    fn sqrt(self) -> Self;
    fn abs(self) -> Self;
    fn floor(self) -> Self;
    fn ceil(self) -> Self;
    fn is_nan(self) -> bool;
}

macro_rules! implement_real_num {
    ($t:ident, $sqrt:ident, $zero:expr, $one:expr, $two:expr) => {
        impl RealNum<$t> for $t {
            fn zero() -> Self {
                $zero
            }

            fn one() -> Self {
                $one
            }

            fn two() -> Self {
                $two
            }

            fn sqrt(self) -> Self {
                $sqrt::sqrt(&self)
            }

            fn min(self, t: Self) -> Self {
                std::cmp::min(self, t)
            }

            fn max(self, t: Self) -> Self {
                std::cmp::max(self, t)
            }

            fn abs(self) -> Self {
                $t::abs(self)
            }

            fn floor(self) -> Self {
                self
            }

            fn ceil(self) -> Self {
                self
            }

            fn is_nan(self) -> bool {
                false
            }
        }
    };
    ($t:ident; $zero:expr, $one:expr, $two:expr) => {
        impl RealNum<$t> for $t {
            fn zero() -> Self {
                $zero
            }

            fn one() -> Self {
                $one
            }

            fn two() -> Self {
                $two
            }

            fn sqrt(self) -> Self {
                $t::sqrt(self)
            }

            fn min(self, t: Self) -> Self {
                $t::min(self, t)
            }

            fn max(self, t: Self) -> Self {
                $t::max(self, t)
            }

            fn abs(self) -> Self {
                $t::abs(self)
            }

            fn floor(self) -> Self {
                self.floor()
            }

            fn ceil(self) -> Self {
                self.ceil()
            }

            fn is_nan(self) -> bool {
                self.is_nan()
            }
        }
    };
}

implement_real_num!(f32; 0.0, 1.0, 2.0);
implement_real_num!(f64; 0.0, 1.0, 2.0);
implement_real_num!(i32, Roots, 0, 1, 2);
implement_real_num!(i64, Roots, 0, 1, 2);

pub fn lerp<T: RealNum<T>>(t: T, v1: T, v2: T) -> T {
    (T::one() - t) * v1 + t * v2
}

pub fn radians(deg: Float) -> Float {
    PI / 180.0 * deg
}

pub fn degrees(rad: Float) -> Float {
    180.0 / PI * rad
}

pub fn clamp<T: RealNum<T>>(val: T, low: T, high: T) -> T {
    if val < low {
        low
    } else if val > high {
        high
    } else {
        val
    }
}

/// Stable quadratic solve; roots come back sorted. False when the
/// discriminant is negative.
pub fn quadratic(a: Float, b: Float, c: Float, t0: &mut Float, t1: &mut Float) -> bool {
    let discrim = b as f64 * b as f64 - 4.0 * a as f64 * c as f64;
    if discrim < 0.0 {
        return false;
    }
    let root_discrim = discrim.sqrt() as Float;

    let q = if b < 0.0 {
        -0.5 * (b - root_discrim)
    } else {
        -0.5 * (b + root_discrim)
    };
    *t0 = q / a;
    *t1 = c / q;

    if *t0 > *t1 {
        std::mem::swap(t0, t1)
    }
    true
}
