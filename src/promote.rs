//! Numeric promotion between scalar types.
//!
//! Binary operators that produce a new value (`+`, `-`, `*`, `/`) combine
//! operands of scalar types `T` and `S` in their common type
//! [`Promoted<T, S>`]. Compound assignments (`+=`, `-=`, `*=`, `/=`) never
//! promote: the right-hand side is coerced into the scalar type of the
//! left-hand side with `as` semantics, which may lose precision.
//!
//! The common type follows the usual arithmetic conversions:
//!
//! - If either type is floating point, the widest floating point type wins
//!   (`f64` over `f32`, and any float over any integer).
//! - Between integers, the type of higher rank (bit width) wins.
//! - Between a signed and an unsigned integer of equal rank, the unsigned one
//!   wins.
//! - `isize`/`usize` rank as 64-bit types, but lose to `i64`/`u64` of the same
//!   signedness.
//!
//! Unlike C, integers narrower than 32 bits are not promoted to a 32-bit type
//! first: `u8 + u8` stays `u8`.

use crate::num::Scalar;

/// The common scalar type of `T` and `S`.
pub type Promoted<T, S> = <T as Promote<S>>::Output;

/// Scalar types that can be combined with values of type `Rhs`, producing
/// values of the common type [`Self::Output`](Promote::Output).
pub trait Promote<Rhs = Self> {
    /// The common type of `Self` and `Rhs`.
    type Output: Scalar;

    /// Converts a value of the left-hand type to the common type.
    fn promote(self) -> Self::Output;

    /// Converts a value of the right-hand type to the common type.
    fn promote_rhs(rhs: Rhs) -> Self::Output;
}

macro_rules! impl_promote_reflexive {
    ($($t:ty),+) => {
        $(
            impl Promote<$t> for $t {
                type Output = $t;

                #[inline]
                fn promote(self) -> Self::Output {
                    self
                }

                #[inline]
                fn promote_rhs(rhs: $t) -> Self::Output {
                    rhs
                }
            }
        )+
    };
}

macro_rules! impl_promote {
    ($wide:ty => $($narrow:ty),+) => {
        $(
            impl Promote<$narrow> for $wide {
                type Output = $wide;

                #[inline]
                fn promote(self) -> Self::Output {
                    self
                }

                #[inline]
                #[allow(clippy::cast_lossless)]
                fn promote_rhs(rhs: $narrow) -> Self::Output {
                    rhs as $wide
                }
            }

            impl Promote<$wide> for $narrow {
                type Output = $wide;

                #[inline]
                #[allow(clippy::cast_lossless)]
                fn promote(self) -> Self::Output {
                    self as $wide
                }

                #[inline]
                fn promote_rhs(rhs: $wide) -> Self::Output {
                    rhs
                }
            }
        )+
    };
}

impl_promote_reflexive!(f32, f64, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl_promote!(f64 => f32, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
impl_promote!(f32 => i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
impl_promote!(u64 => i8, i16, i32, i64, isize, u8, u16, u32, usize);
impl_promote!(usize => i8, i16, i32, i64, isize, u8, u16, u32);
impl_promote!(i64 => i8, i16, i32, isize, u8, u16, u32);
impl_promote!(isize => i8, i16, i32, u8, u16, u32);
impl_promote!(u32 => i8, i16, i32, u8, u16);
impl_promote!(i32 => i8, i16, u8, u16);
impl_promote!(u16 => i8, i16, u8);
impl_promote!(i16 => i8, u8);
impl_promote!(u8 => i8);

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::TypeId;

    fn common_type<T: Promote<S>, S>() -> TypeId {
        TypeId::of::<Promoted<T, S>>()
    }

    fn is_symmetric<T: Promote<S>, S: Promote<T>>() -> bool {
        TypeId::of::<Promoted<T, S>>() == TypeId::of::<Promoted<S, T>>()
    }

    #[test]
    fn promoting_a_type_with_itself_gives_same_type() {
        assert_eq!(common_type::<f32, f32>(), TypeId::of::<f32>());
        assert_eq!(common_type::<i8, i8>(), TypeId::of::<i8>());
        assert_eq!(common_type::<usize, usize>(), TypeId::of::<usize>());
    }

    #[test]
    fn floats_dominate_integers_and_f64_dominates_f32() {
        assert_eq!(common_type::<f32, f64>(), TypeId::of::<f64>());
        assert_eq!(common_type::<i32, f32>(), TypeId::of::<f32>());
        assert_eq!(common_type::<f32, i64>(), TypeId::of::<f32>());
        assert_eq!(common_type::<u64, f64>(), TypeId::of::<f64>());
    }

    #[test]
    fn wider_integers_dominate_narrower_ones() {
        assert_eq!(common_type::<i8, i32>(), TypeId::of::<i32>());
        assert_eq!(common_type::<i64, i16>(), TypeId::of::<i64>());
        assert_eq!(common_type::<u8, i16>(), TypeId::of::<i16>());
        assert_eq!(common_type::<u32, i64>(), TypeId::of::<i64>());
    }

    #[test]
    fn unsigned_wins_between_integers_of_equal_rank() {
        assert_eq!(common_type::<i32, u32>(), TypeId::of::<u32>());
        assert_eq!(common_type::<u64, i64>(), TypeId::of::<u64>());
        assert_eq!(common_type::<isize, usize>(), TypeId::of::<usize>());
    }

    #[test]
    fn fixed_width_types_win_over_pointer_sized_types() {
        assert_eq!(common_type::<i64, isize>(), TypeId::of::<i64>());
        assert_eq!(common_type::<usize, u64>(), TypeId::of::<u64>());
        assert_eq!(common_type::<usize, i64>(), TypeId::of::<usize>());
    }

    #[test]
    fn promotion_is_symmetric() {
        assert!(is_symmetric::<f32, f64>());
        assert!(is_symmetric::<i32, f32>());
        assert!(is_symmetric::<u16, i8>());
        assert!(is_symmetric::<isize, u32>());
        assert!(is_symmetric::<u64, usize>());
    }

    #[test]
    fn promoting_values_converts_both_operands() {
        assert_eq!(<i32 as Promote<f64>>::promote(3), 3.0_f64);
        assert_eq!(<i32 as Promote<f64>>::promote_rhs(0.5), 0.5_f64);
        assert_eq!(<f32 as Promote<i32>>::promote_rhs(-7), -7.0_f32);
        assert_eq!(<u8 as Promote<i16>>::promote(255), 255_i16);
    }
}
