//! Compile-time selection of native SIMD registers for vector lanes.
//!
//! Every scalar type implements [`Lanes<N>`] for the dimensions 2, 3 and 4.
//! The implementation binds the `(scalar, dimension)` pair either to a native
//! vector register, together with the storage alignment the register
//! requires, or to [`NoRegister`] with the natural alignment of the scalar.
//! The elementwise kernels of [`Lanes`] have portable default bodies. Only
//! bindings with a register override them with intrinsics, and the
//! overrides must produce results identical to the defaults. Integer
//! kernels wrap around on overflow on every path.
//!
//! The binding is decided once per build from `cfg(target_arch)` and
//! `cfg(target_feature)`. CPU features are never detected at runtime. Disabling the
//! `simd` feature forces every pair onto the fallback.
//!
//! | Pair         | x86-64                                            | AArch64 (NEON)           |
//! |--------------|---------------------------------------------------|--------------------------|
//! | `f32`, 4     | `__m128`, align 16                                | `float32x4_t`, align 16  |
//! | `i32`, 4     | `__m128i`, align 16                               | `int32x4_t`, align 16    |
//! | `f64`, 4     | `__m256d` (AVX), align 32; else 2 × `__m128d`, align 16 | 2 × `float64x2_t`, align 16 |
//! | `u64`/`usize`, 4 | `__m256i` (AVX2), align 32; else 2 × `__m128i`, align 16 | 2 × `uint64x2_t`, align 16 |
//!
//! A four-lane `f64` vector never binds a single 128-bit register: when
//! 256-bit registers are unavailable, two 128-bit registers cover all lanes.

use crate::num::WrappingArithmetic;
use core::{fmt, mem};
use num_traits as nt;

/// Binds the `N` lanes of a vector of `Self` to storage and, when the target
/// has one, to a native SIMD register.
pub trait Lanes<const N: usize>:
    Copy + fmt::Debug + PartialOrd + nt::Num + WrappingArithmetic + 'static
{
    /// The native register the lanes are processed in, or [`NoRegister`].
    type Register: Copy + fmt::Debug;

    /// Backing storage for the lanes, aligned the way the register requires.
    type Storage: LaneStorage<Self, N>;

    /// Required alignment of [`Self::Storage`](Lanes::Storage) in bytes.
    const ALIGNMENT: usize;

    /// Whether a native register is bound.
    const HAS_REGISTER: bool;

    /// Name of the bound register type, for diagnostics.
    const REGISTER_NAME: &'static str;

    /// Adds the lanes of `a` and `b`.
    #[inline]
    fn add_lanes(a: &Self::Storage, b: &Self::Storage) -> Self::Storage {
        zip_lanes(a, b, Self::add_wrapped)
    }

    /// Subtracts the lanes of `b` from those of `a`.
    #[inline]
    fn sub_lanes(a: &Self::Storage, b: &Self::Storage) -> Self::Storage {
        zip_lanes(a, b, Self::sub_wrapped)
    }

    /// Multiplies the lanes of `a` and `b`.
    #[inline]
    fn mul_lanes(a: &Self::Storage, b: &Self::Storage) -> Self::Storage {
        zip_lanes(a, b, Self::mul_wrapped)
    }

    /// Multiplies each lane of `a` by `factor`.
    #[inline]
    fn scale_lanes(a: &Self::Storage, factor: Self) -> Self::Storage {
        map_lanes(a, |a| a.mul_wrapped(factor))
    }

    /// Divides each lane of `a` by `divisor`.
    ///
    /// # Panics
    /// For integer scalars, if `divisor` is zero.
    #[inline]
    fn div_lanes(a: &Self::Storage, divisor: Self) -> Self::Storage {
        map_lanes(a, |a| a / divisor)
    }
}

/// Storage for `N` lanes of type `T`, viewable as a plain array.
pub trait LaneStorage<T, const N: usize>: Copy + fmt::Debug {
    /// Wraps the given lanes.
    fn from_array(array: [T; N]) -> Self;

    /// The lanes as an array.
    fn as_array(&self) -> &[T; N];

    /// The lanes as a mutable array.
    fn as_array_mut(&mut self) -> &mut [T; N];
}

/// Marker register type for `(scalar, dimension)` pairs without a native
/// register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NoRegister;

/// Wrapper aligning its contents to 16 bytes (one 128-bit register).
#[repr(C, align(16))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Align16<A>(pub A);

/// Wrapper aligning its contents to 32 bytes (one 256-bit register).
#[repr(C, align(32))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Align32<A>(pub A);

/// The register binding of one `(scalar, dimension)` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegisterBinding {
    pub scalar: &'static str,
    pub dimension: usize,
    pub register: &'static str,
    pub alignment: usize,
    pub has_register: bool,
}

impl<T: Copy + fmt::Debug, const N: usize> LaneStorage<T, N> for [T; N] {
    #[inline]
    fn from_array(array: [T; N]) -> Self {
        array
    }

    #[inline]
    fn as_array(&self) -> &[T; N] {
        self
    }

    #[inline]
    fn as_array_mut(&mut self) -> &mut [T; N] {
        self
    }
}

impl<T: Copy + fmt::Debug, const N: usize> LaneStorage<T, N> for Align16<[T; N]> {
    #[inline]
    fn from_array(array: [T; N]) -> Self {
        Self(array)
    }

    #[inline]
    fn as_array(&self) -> &[T; N] {
        &self.0
    }

    #[inline]
    fn as_array_mut(&mut self) -> &mut [T; N] {
        &mut self.0
    }
}

impl<T: Copy + fmt::Debug, const N: usize> LaneStorage<T, N> for Align32<[T; N]> {
    #[inline]
    fn from_array(array: [T; N]) -> Self {
        Self(array)
    }

    #[inline]
    fn as_array(&self) -> &[T; N] {
        &self.0
    }

    #[inline]
    fn as_array_mut(&mut self) -> &mut [T; N] {
        &mut self.0
    }
}

impl RegisterBinding {
    /// The binding of `T` at dimension `N` in this build.
    pub fn of<T: Lanes<N>, const N: usize>() -> Self {
        Self {
            scalar: std::any::type_name::<T>(),
            dimension: N,
            register: T::REGISTER_NAME,
            alignment: T::ALIGNMENT,
            has_register: T::HAS_REGISTER,
        }
    }
}

impl fmt::Display for RegisterBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) -> {} (alignment {})",
            self.scalar, self.dimension, self.register, self.alignment
        )
    }
}

#[inline]
fn map_lanes<T: Copy, S: LaneStorage<T, N>, const N: usize>(a: &S, f: impl Fn(T) -> T) -> S {
    S::from_array(a.as_array().map(f))
}

#[inline]
fn zip_lanes<T: Copy, S: LaneStorage<T, N>, const N: usize>(
    a: &S,
    b: &S,
    f: impl Fn(T, T) -> T,
) -> S {
    let (a, b) = (a.as_array(), b.as_array());
    S::from_array(std::array::from_fn(|i| f(a[i], b[i])))
}

/// Binds the given dimensions of a scalar type to [`NoRegister`] with
/// natural alignment.
macro_rules! impl_fallback_lanes {
    ($t:ty => $($n:literal),+) => {
        $(
            impl $crate::simd::Lanes<$n> for $t {
                type Register = $crate::simd::NoRegister;
                type Storage = [$t; $n];

                const ALIGNMENT: usize = ::core::mem::size_of::<$t>();
                const HAS_REGISTER: bool = false;
                const REGISTER_NAME: &'static str = "none";
            }
        )+
    };
}

impl_fallback_lanes!(f32 => 2, 3);
impl_fallback_lanes!(f64 => 2, 3);
impl_fallback_lanes!(i32 => 2, 3);
impl_fallback_lanes!(u64 => 2, 3);
impl_fallback_lanes!(usize => 2, 3);
impl_fallback_lanes!(i8 => 2, 3, 4);
impl_fallback_lanes!(i16 => 2, 3, 4);
impl_fallback_lanes!(i64 => 2, 3, 4);
impl_fallback_lanes!(isize => 2, 3, 4);
impl_fallback_lanes!(u8 => 2, 3, 4);
impl_fallback_lanes!(u16 => 2, 3, 4);
impl_fallback_lanes!(u32 => 2, 3, 4);

cfg_if::cfg_if! {
    if #[cfg(all(feature = "simd", target_arch = "x86_64", target_feature = "sse2"))] {
        mod x86;
    } else if #[cfg(all(feature = "simd", target_arch = "aarch64", target_feature = "neon"))] {
        mod neon;
    } else {
        impl_fallback_lanes!(f32 => 4);
        impl_fallback_lanes!(f64 => 4);
        impl_fallback_lanes!(i32 => 4);
        impl_fallback_lanes!(u64 => 4);
        impl_fallback_lanes!(usize => 4);
    }
}

const fn storage_alignment_matches<T: Lanes<N>, const N: usize>() -> bool {
    mem::align_of::<T::Storage>() == T::ALIGNMENT
        && mem::size_of::<T::Storage>() == N * mem::size_of::<T>()
}

macro_rules! assert_storage_layouts {
    ($($t:ty),+) => {
        const _: () = {
            $(
                assert!(storage_alignment_matches::<$t, 2>());
                assert!(storage_alignment_matches::<$t, 3>());
                assert!(storage_alignment_matches::<$t, 4>());
            )+
        };
    };
}

// Lane storage must have exactly the declared alignment and no padding, since
// vectors and matrices are reinterpreted as plain scalar slices.
assert_storage_layouts!(f32, f64, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! bindings_of {
    ($($t:ty),+) => {
        [$(
            RegisterBinding::of::<$t, 2>(),
            RegisterBinding::of::<$t, 3>(),
            RegisterBinding::of::<$t, 4>(),
        )+]
    };
}

/// The register binding of every supported `(scalar, dimension)` pair in
/// this build.
pub fn register_bindings() -> Vec<RegisterBinding> {
    bindings_of!(f32, f64, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize).to_vec()
}

/// Logs the register binding table of this build: bound pairs at info level
/// and unbound pairs at debug level.
pub fn log_register_bindings() {
    for binding in register_bindings() {
        if binding.has_register {
            log::info!("SIMD register bound: {binding}");
        } else {
            log::debug!("No SIMD register: {binding}");
        }
    }
}
