//! NEON register bindings for four-lane vectors on AArch64.
//!
//! NEON registers are 128 bits wide, so four `f64` or 64-bit integer lanes are
//! processed as a pair of registers.

use super::{Align16, Lanes};
use core::arch::aarch64::*;

impl Lanes<4> for f32 {
    type Register = float32x4_t;
    type Storage = Align16<[f32; 4]>;

    const ALIGNMENT: usize = 16;
    const HAS_REGISTER: bool = true;
    const REGISTER_NAME: &'static str = "float32x4_t";

    #[inline]
    fn add_lanes(a: &Self::Storage, b: &Self::Storage) -> Self::Storage {
        unsafe { store_f32(vaddq_f32(load_f32(a), load_f32(b))) }
    }

    #[inline]
    fn sub_lanes(a: &Self::Storage, b: &Self::Storage) -> Self::Storage {
        unsafe { store_f32(vsubq_f32(load_f32(a), load_f32(b))) }
    }

    #[inline]
    fn mul_lanes(a: &Self::Storage, b: &Self::Storage) -> Self::Storage {
        unsafe { store_f32(vmulq_f32(load_f32(a), load_f32(b))) }
    }

    #[inline]
    fn scale_lanes(a: &Self::Storage, factor: f32) -> Self::Storage {
        unsafe { store_f32(vmulq_n_f32(load_f32(a), factor)) }
    }

    #[inline]
    fn div_lanes(a: &Self::Storage, divisor: f32) -> Self::Storage {
        unsafe { store_f32(vdivq_f32(load_f32(a), vdupq_n_f32(divisor))) }
    }
}

impl Lanes<4> for i32 {
    type Register = int32x4_t;
    type Storage = Align16<[i32; 4]>;

    const ALIGNMENT: usize = 16;
    const HAS_REGISTER: bool = true;
    const REGISTER_NAME: &'static str = "int32x4_t";

    #[inline]
    fn add_lanes(a: &Self::Storage, b: &Self::Storage) -> Self::Storage {
        unsafe { store_s32(vaddq_s32(load_s32(a), load_s32(b))) }
    }

    #[inline]
    fn sub_lanes(a: &Self::Storage, b: &Self::Storage) -> Self::Storage {
        unsafe { store_s32(vsubq_s32(load_s32(a), load_s32(b))) }
    }

    #[inline]
    fn mul_lanes(a: &Self::Storage, b: &Self::Storage) -> Self::Storage {
        unsafe { store_s32(vmulq_s32(load_s32(a), load_s32(b))) }
    }

    #[inline]
    fn scale_lanes(a: &Self::Storage, factor: i32) -> Self::Storage {
        unsafe { store_s32(vmulq_n_s32(load_s32(a), factor)) }
    }
}

impl Lanes<4> for f64 {
    type Register = [float64x2_t; 2];
    type Storage = Align16<[f64; 4]>;

    const ALIGNMENT: usize = 16;
    const HAS_REGISTER: bool = true;
    const REGISTER_NAME: &'static str = "[float64x2_t; 2]";

    #[inline]
    fn add_lanes(a: &Self::Storage, b: &Self::Storage) -> Self::Storage {
        unsafe { zip_f64_pair(a, b, |a, b| vaddq_f64(a, b)) }
    }

    #[inline]
    fn sub_lanes(a: &Self::Storage, b: &Self::Storage) -> Self::Storage {
        unsafe { zip_f64_pair(a, b, |a, b| vsubq_f64(a, b)) }
    }

    #[inline]
    fn mul_lanes(a: &Self::Storage, b: &Self::Storage) -> Self::Storage {
        unsafe { zip_f64_pair(a, b, |a, b| vmulq_f64(a, b)) }
    }

    #[inline]
    fn scale_lanes(a: &Self::Storage, factor: f64) -> Self::Storage {
        let factor = Align16([factor; 4]);
        unsafe { zip_f64_pair(a, &factor, |a, b| vmulq_f64(a, b)) }
    }

    #[inline]
    fn div_lanes(a: &Self::Storage, divisor: f64) -> Self::Storage {
        let divisor = Align16([divisor; 4]);
        unsafe { zip_f64_pair(a, &divisor, |a, b| vdivq_f64(a, b)) }
    }
}

macro_rules! impl_wide_integer_lanes {
    ($t:ty) => {
        impl Lanes<4> for $t {
            type Register = [uint64x2_t; 2];
            type Storage = Align16<[$t; 4]>;

            const ALIGNMENT: usize = 16;
            const HAS_REGISTER: bool = true;
            const REGISTER_NAME: &'static str = "[uint64x2_t; 2]";

            #[inline]
            fn add_lanes(a: &Self::Storage, b: &Self::Storage) -> Self::Storage {
                unsafe { zip_u64_pair(a, b, |a, b| vaddq_u64(a, b)) }
            }

            #[inline]
            fn sub_lanes(a: &Self::Storage, b: &Self::Storage) -> Self::Storage {
                unsafe { zip_u64_pair(a, b, |a, b| vsubq_u64(a, b)) }
            }
        }
    };
}

impl_wide_integer_lanes!(u64);
impl_wide_integer_lanes!(usize);

#[inline]
unsafe fn zip_f64_pair(
    a: &Align16<[f64; 4]>,
    b: &Align16<[f64; 4]>,
    f: impl Fn(float64x2_t, float64x2_t) -> float64x2_t,
) -> Align16<[f64; 4]> {
    let mut lanes = Align16([0.0; 4]);
    unsafe {
        let (a, b) = (a.0.as_ptr(), b.0.as_ptr());
        let out = lanes.0.as_mut_ptr();
        vst1q_f64(out, f(vld1q_f64(a), vld1q_f64(b)));
        vst1q_f64(out.add(2), f(vld1q_f64(a.add(2)), vld1q_f64(b.add(2))));
    }
    lanes
}

#[inline]
unsafe fn zip_u64_pair<T: Copy + Default>(
    a: &Align16<[T; 4]>,
    b: &Align16<[T; 4]>,
    f: impl Fn(uint64x2_t, uint64x2_t) -> uint64x2_t,
) -> Align16<[T; 4]> {
    const { assert!(core::mem::size_of::<T>() == 8) };
    let mut lanes = Align16([T::default(); 4]);
    unsafe {
        let (a, b) = (a.0.as_ptr().cast::<u64>(), b.0.as_ptr().cast::<u64>());
        let out = lanes.0.as_mut_ptr().cast::<u64>();
        vst1q_u64(out, f(vld1q_u64(a), vld1q_u64(b)));
        vst1q_u64(out.add(2), f(vld1q_u64(a.add(2)), vld1q_u64(b.add(2))));
    }
    lanes
}

#[inline]
unsafe fn load_f32(lanes: &Align16<[f32; 4]>) -> float32x4_t {
    unsafe { vld1q_f32(lanes.0.as_ptr()) }
}

#[inline]
unsafe fn store_f32(register: float32x4_t) -> Align16<[f32; 4]> {
    let mut lanes = Align16([0.0; 4]);
    unsafe { vst1q_f32(lanes.0.as_mut_ptr(), register) };
    lanes
}

#[inline]
unsafe fn load_s32(lanes: &Align16<[i32; 4]>) -> int32x4_t {
    unsafe { vld1q_s32(lanes.0.as_ptr()) }
}

#[inline]
unsafe fn store_s32(register: int32x4_t) -> Align16<[i32; 4]> {
    let mut lanes = Align16([0; 4]);
    unsafe { vst1q_s32(lanes.0.as_mut_ptr(), register) };
    lanes
}
