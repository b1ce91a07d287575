//! Numbers and numerics.

use crate::{promote::Promote, simd::Lanes};
use approx::AbsDiffEq;
use bytemuck::Pod;
use core::fmt;
use num_traits as nt;

/// An arithmetic (integral or floating point) scalar that vectors and
/// matrices can be built from.
///
/// Implemented for all primitive integer and floating point types and nothing
/// else, so instantiating a vector or matrix over any other type fails to
/// compile. The trait also carries the compile-time SIMD register binding of
/// the scalar for every supported dimension (see [`Lanes`]).
pub trait Scalar:
    Copy
    + Default
    + fmt::Debug
    + fmt::Display
    + PartialOrd
    + nt::Num
    + nt::NumCast
    + AbsDiffEq<Epsilon = Self>
    + Pod
    + Promote<Self, Output = Self>
    + Lanes<2>
    + Lanes<3>
    + Lanes<4>
{
    /// The floating point type that norms and other irrational quantities of
    /// this scalar type are expressed in. `f32` for `f32`, and `f64` for `f64`
    /// and every integer type.
    type Real: Float + Scalar;

    /// Whether this is a floating point type.
    const IS_FLOAT: bool;

    /// Converts the value to [`Self::Real`](Scalar::Real).
    fn to_real(self) -> Self::Real;
}

/// Gathers traits useful for working with generic floating point types.
pub trait Float:
    nt::Float + nt::FromPrimitive + nt::ToPrimitive + approx::AbsDiffEq + approx::RelativeEq
{
}

impl Float for f32 {}
impl Float for f64 {}

/// Addition, subtraction and multiplication that wrap around on integer
/// overflow. For floats these are the plain IEEE operations.
///
/// Integer arithmetic modulo `2^bits` gives the exact result of a polynomial
/// expression whenever that result is representable, even if intermediate
/// terms are not.
pub trait WrappingArithmetic: Copy {
    fn add_wrapped(self, rhs: Self) -> Self;
    fn sub_wrapped(self, rhs: Self) -> Self;
    fn mul_wrapped(self, rhs: Self) -> Self;
}

macro_rules! impl_wrapping_arithmetic {
    (float => $($t:ty),+) => {
        $(
            impl WrappingArithmetic for $t {
                #[inline]
                fn add_wrapped(self, rhs: Self) -> Self {
                    self + rhs
                }

                #[inline]
                fn sub_wrapped(self, rhs: Self) -> Self {
                    self - rhs
                }

                #[inline]
                fn mul_wrapped(self, rhs: Self) -> Self {
                    self * rhs
                }
            }
        )+
    };
    (integer => $($t:ty),+) => {
        $(
            impl WrappingArithmetic for $t {
                #[inline]
                fn add_wrapped(self, rhs: Self) -> Self {
                    nt::WrappingAdd::wrapping_add(&self, &rhs)
                }

                #[inline]
                fn sub_wrapped(self, rhs: Self) -> Self {
                    nt::WrappingSub::wrapping_sub(&self, &rhs)
                }

                #[inline]
                fn mul_wrapped(self, rhs: Self) -> Self {
                    nt::WrappingMul::wrapping_mul(&self, &rhs)
                }
            }
        )+
    };
}

macro_rules! impl_scalar {
    ($real:ty, $is_float:literal => $($t:ty),+) => {
        $(
            impl Scalar for $t {
                type Real = $real;

                const IS_FLOAT: bool = $is_float;

                #[inline]
                #[allow(clippy::cast_lossless, clippy::cast_precision_loss)]
                fn to_real(self) -> Self::Real {
                    self as $real
                }
            }
        )+
    };
}

impl_wrapping_arithmetic!(float => f32, f64);
impl_wrapping_arithmetic!(integer => i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// Computes `a*d - b*c` with [`WrappingArithmetic`], i.e. the determinant of
/// the 2x2 matrix with rows `[a, b]` and `[c, d]`.
#[inline]
pub(crate) fn det2<T: WrappingArithmetic>(a: T, b: T, c: T, d: T) -> T {
    a.mul_wrapped(d).sub_wrapped(b.mul_wrapped(c))
}

impl_scalar!(f32, true => f32);
impl_scalar!(f64, true => f64);
impl_scalar!(f64, false => i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

#[cfg(test)]
mod tests {
    use super::*;

    fn real_of<T: Scalar>(value: T) -> T::Real {
        value.to_real()
    }

    #[test]
    fn floating_types_are_their_own_real_type() {
        assert_eq!(real_of(1.5_f32), 1.5_f32);
        assert_eq!(real_of(2.5_f64), 2.5_f64);
        assert!(<f32 as Scalar>::IS_FLOAT);
        assert!(<f64 as Scalar>::IS_FLOAT);
    }

    #[test]
    fn integer_types_convert_to_f64() {
        assert_eq!(real_of(-3_i8), -3.0_f64);
        assert_eq!(real_of(7_u16), 7.0_f64);
        assert_eq!(real_of(1_i64 << 40), 1_099_511_627_776.0_f64);
        assert_eq!(real_of(42_usize), 42.0_f64);
        assert!(!<i32 as Scalar>::IS_FLOAT);
        assert!(!<usize as Scalar>::IS_FLOAT);
    }

    #[test]
    fn integer_arithmetic_wraps_around() {
        assert_eq!(0_u8.sub_wrapped(1), u8::MAX);
        assert_eq!(i32::MAX.add_wrapped(1), i32::MIN);
        assert_eq!(200_u8.mul_wrapped(2), 144);
        assert_eq!(0_u32.sub_wrapped(1).add_wrapped(2), 1);
    }

    #[test]
    fn float_arithmetic_is_plain() {
        assert_eq!(1.5_f32.add_wrapped(2.25), 3.75);
        assert_eq!(f64::MAX.mul_wrapped(2.0), f64::INFINITY);
        assert_eq!(0.0_f64.sub_wrapped(1.0), -1.0);
    }

    #[test]
    fn det2_is_exact_when_result_fits() {
        assert_eq!(det2(0_u8, 1, 1, 0), u8::MAX);
        assert_eq!(det2(100_i8, 99, 101, 100), 1);
        assert_eq!(det2(3.0_f64, 8.0, 4.0, 6.0), -14.0);
    }
}
