//! SSE2/AVX/AVX2 register bindings for four-lane vectors on x86-64.
//!
//! Integer kernels wrap around on overflow, like the portable kernels.

use super::{Align16, Lanes};
use core::arch::x86_64::*;

impl Lanes<4> for f32 {
    type Register = __m128;
    type Storage = Align16<[f32; 4]>;

    const ALIGNMENT: usize = 16;
    const HAS_REGISTER: bool = true;
    const REGISTER_NAME: &'static str = "__m128";

    #[inline]
    fn add_lanes(a: &Self::Storage, b: &Self::Storage) -> Self::Storage {
        unsafe { store_ps(_mm_add_ps(load_ps(a), load_ps(b))) }
    }

    #[inline]
    fn sub_lanes(a: &Self::Storage, b: &Self::Storage) -> Self::Storage {
        unsafe { store_ps(_mm_sub_ps(load_ps(a), load_ps(b))) }
    }

    #[inline]
    fn mul_lanes(a: &Self::Storage, b: &Self::Storage) -> Self::Storage {
        unsafe { store_ps(_mm_mul_ps(load_ps(a), load_ps(b))) }
    }

    #[inline]
    fn scale_lanes(a: &Self::Storage, factor: f32) -> Self::Storage {
        unsafe { store_ps(_mm_mul_ps(load_ps(a), _mm_set1_ps(factor))) }
    }

    #[inline]
    fn div_lanes(a: &Self::Storage, divisor: f32) -> Self::Storage {
        unsafe { store_ps(_mm_div_ps(load_ps(a), _mm_set1_ps(divisor))) }
    }
}

impl Lanes<4> for i32 {
    type Register = __m128i;
    type Storage = Align16<[i32; 4]>;

    const ALIGNMENT: usize = 16;
    const HAS_REGISTER: bool = true;
    const REGISTER_NAME: &'static str = "__m128i";

    #[inline]
    fn add_lanes(a: &Self::Storage, b: &Self::Storage) -> Self::Storage {
        unsafe { store_epi32(_mm_add_epi32(load_epi32(a), load_epi32(b))) }
    }

    #[inline]
    fn sub_lanes(a: &Self::Storage, b: &Self::Storage) -> Self::Storage {
        unsafe { store_epi32(_mm_sub_epi32(load_epi32(a), load_epi32(b))) }
    }

    // Lane-wise 32-bit multiplication needs SSE4.1.
    #[cfg(target_feature = "sse4.1")]
    #[inline]
    fn mul_lanes(a: &Self::Storage, b: &Self::Storage) -> Self::Storage {
        unsafe { store_epi32(_mm_mullo_epi32(load_epi32(a), load_epi32(b))) }
    }

    #[cfg(target_feature = "sse4.1")]
    #[inline]
    fn scale_lanes(a: &Self::Storage, factor: i32) -> Self::Storage {
        unsafe { store_epi32(_mm_mullo_epi32(load_epi32(a), _mm_set1_epi32(factor))) }
    }
}

cfg_if::cfg_if! {
    if #[cfg(target_feature = "avx")] {
        use super::Align32;

        impl Lanes<4> for f64 {
            type Register = __m256d;
            type Storage = Align32<[f64; 4]>;

            const ALIGNMENT: usize = 32;
            const HAS_REGISTER: bool = true;
            const REGISTER_NAME: &'static str = "__m256d";

            #[inline]
            fn add_lanes(a: &Self::Storage, b: &Self::Storage) -> Self::Storage {
                unsafe { store_pd256(_mm256_add_pd(load_pd256(a), load_pd256(b))) }
            }

            #[inline]
            fn sub_lanes(a: &Self::Storage, b: &Self::Storage) -> Self::Storage {
                unsafe { store_pd256(_mm256_sub_pd(load_pd256(a), load_pd256(b))) }
            }

            #[inline]
            fn mul_lanes(a: &Self::Storage, b: &Self::Storage) -> Self::Storage {
                unsafe { store_pd256(_mm256_mul_pd(load_pd256(a), load_pd256(b))) }
            }

            #[inline]
            fn scale_lanes(a: &Self::Storage, factor: f64) -> Self::Storage {
                unsafe { store_pd256(_mm256_mul_pd(load_pd256(a), _mm256_set1_pd(factor))) }
            }

            #[inline]
            fn div_lanes(a: &Self::Storage, divisor: f64) -> Self::Storage {
                unsafe { store_pd256(_mm256_div_pd(load_pd256(a), _mm256_set1_pd(divisor))) }
            }
        }

        #[inline]
        unsafe fn load_pd256(lanes: &Align32<[f64; 4]>) -> __m256d {
            unsafe { _mm256_load_pd(lanes.0.as_ptr()) }
        }

        #[inline]
        unsafe fn store_pd256(register: __m256d) -> Align32<[f64; 4]> {
            let mut lanes = Align32([0.0; 4]);
            unsafe { _mm256_store_pd(lanes.0.as_mut_ptr(), register) };
            lanes
        }
    } else {
        impl Lanes<4> for f64 {
            type Register = [__m128d; 2];
            type Storage = Align16<[f64; 4]>;

            const ALIGNMENT: usize = 16;
            const HAS_REGISTER: bool = true;
            const REGISTER_NAME: &'static str = "[__m128d; 2]";

            #[inline]
            fn add_lanes(a: &Self::Storage, b: &Self::Storage) -> Self::Storage {
                unsafe { zip_pd_pair(a, b, |a, b| _mm_add_pd(a, b)) }
            }

            #[inline]
            fn sub_lanes(a: &Self::Storage, b: &Self::Storage) -> Self::Storage {
                unsafe { zip_pd_pair(a, b, |a, b| _mm_sub_pd(a, b)) }
            }

            #[inline]
            fn mul_lanes(a: &Self::Storage, b: &Self::Storage) -> Self::Storage {
                unsafe { zip_pd_pair(a, b, |a, b| _mm_mul_pd(a, b)) }
            }

            #[inline]
            fn scale_lanes(a: &Self::Storage, factor: f64) -> Self::Storage {
                let factor = Align16([factor; 4]);
                unsafe { zip_pd_pair(a, &factor, |a, b| _mm_mul_pd(a, b)) }
            }

            #[inline]
            fn div_lanes(a: &Self::Storage, divisor: f64) -> Self::Storage {
                let divisor = Align16([divisor; 4]);
                unsafe { zip_pd_pair(a, &divisor, |a, b| _mm_div_pd(a, b)) }
            }
        }

        /// Applies `f` to the low and high register halves of `a` and `b`.
        #[inline]
        unsafe fn zip_pd_pair(
            a: &Align16<[f64; 4]>,
            b: &Align16<[f64; 4]>,
            f: impl Fn(__m128d, __m128d) -> __m128d,
        ) -> Align16<[f64; 4]> {
            let mut lanes = Align16([0.0; 4]);
            unsafe {
                let (a, b) = (a.0.as_ptr(), b.0.as_ptr());
                let out = lanes.0.as_mut_ptr();
                _mm_store_pd(out, f(_mm_load_pd(a), _mm_load_pd(b)));
                _mm_store_pd(out.add(2), f(_mm_load_pd(a.add(2)), _mm_load_pd(b.add(2))));
            }
            lanes
        }
    }
}

macro_rules! impl_wide_integer_lanes {
    ($t:ty) => {
        cfg_if::cfg_if! {
            if #[cfg(target_feature = "avx2")] {
                impl Lanes<4> for $t {
                    type Register = __m256i;
                    type Storage = super::Align32<[$t; 4]>;

                    const ALIGNMENT: usize = 32;
                    const HAS_REGISTER: bool = true;
                    const REGISTER_NAME: &'static str = "__m256i";

                    #[inline]
                    fn add_lanes(a: &Self::Storage, b: &Self::Storage) -> Self::Storage {
                        unsafe {
                            let sum = _mm256_add_epi64(
                                _mm256_load_si256(a.0.as_ptr().cast()),
                                _mm256_load_si256(b.0.as_ptr().cast()),
                            );
                            let mut lanes = super::Align32([0; 4]);
                            _mm256_store_si256(lanes.0.as_mut_ptr().cast(), sum);
                            lanes
                        }
                    }

                    #[inline]
                    fn sub_lanes(a: &Self::Storage, b: &Self::Storage) -> Self::Storage {
                        unsafe {
                            let difference = _mm256_sub_epi64(
                                _mm256_load_si256(a.0.as_ptr().cast()),
                                _mm256_load_si256(b.0.as_ptr().cast()),
                            );
                            let mut lanes = super::Align32([0; 4]);
                            _mm256_store_si256(lanes.0.as_mut_ptr().cast(), difference);
                            lanes
                        }
                    }
                }
            } else {
                impl Lanes<4> for $t {
                    type Register = [__m128i; 2];
                    type Storage = Align16<[$t; 4]>;

                    const ALIGNMENT: usize = 16;
                    const HAS_REGISTER: bool = true;
                    const REGISTER_NAME: &'static str = "[__m128i; 2]";

                    #[inline]
                    fn add_lanes(a: &Self::Storage, b: &Self::Storage) -> Self::Storage {
                        unsafe { zip_epi64_pair(a, b, |a, b| _mm_add_epi64(a, b)) }
                    }

                    #[inline]
                    fn sub_lanes(a: &Self::Storage, b: &Self::Storage) -> Self::Storage {
                        unsafe { zip_epi64_pair(a, b, |a, b| _mm_sub_epi64(a, b)) }
                    }
                }
            }
        }
    };
}

impl_wide_integer_lanes!(u64);
impl_wide_integer_lanes!(usize);

/// Applies `f` to the low and high 128-bit halves of `a` and `b`, whose lanes
/// are 64-bit integers.
#[cfg(not(target_feature = "avx2"))]
#[inline]
unsafe fn zip_epi64_pair<T: Copy + Default>(
    a: &Align16<[T; 4]>,
    b: &Align16<[T; 4]>,
    f: impl Fn(__m128i, __m128i) -> __m128i,
) -> Align16<[T; 4]> {
    const { assert!(core::mem::size_of::<T>() == 8) };
    let mut lanes = Align16([T::default(); 4]);
    unsafe {
        let (a, b) = (a.0.as_ptr().cast::<__m128i>(), b.0.as_ptr().cast::<__m128i>());
        let out = lanes.0.as_mut_ptr().cast::<__m128i>();
        _mm_store_si128(out, f(_mm_load_si128(a), _mm_load_si128(b)));
        _mm_store_si128(
            out.add(1),
            f(_mm_load_si128(a.add(1)), _mm_load_si128(b.add(1))),
        );
    }
    lanes
}

#[inline]
unsafe fn load_ps(lanes: &Align16<[f32; 4]>) -> __m128 {
    unsafe { _mm_load_ps(lanes.0.as_ptr()) }
}

#[inline]
unsafe fn store_ps(register: __m128) -> Align16<[f32; 4]> {
    let mut lanes = Align16([0.0; 4]);
    unsafe { _mm_store_ps(lanes.0.as_mut_ptr(), register) };
    lanes
}

#[inline]
unsafe fn load_epi32(lanes: &Align16<[i32; 4]>) -> __m128i {
    unsafe { _mm_load_si128(lanes.0.as_ptr().cast()) }
}

#[inline]
unsafe fn store_epi32(register: __m128i) -> Align16<[i32; 4]> {
    let mut lanes = Align16([0; 4]);
    unsafe { _mm_store_si128(lanes.0.as_mut_ptr().cast(), register) };
    lanes
}
