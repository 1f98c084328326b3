use std::arch::aarch64::*;

#[derive(Debug, Clone, Copy)]
pub struct NEONVector(int16x8_t);

impl super::Vector for NEONVector {
    const LANES: usize = 8;

    #[inline]
    fn is_available() -> bool {
        // NEON is mandatory on aarch64
        cfg!(target_arch = "aarch64")
    }

    #[inline(always)]
    unsafe fn zero() -> Self {
        unsafe { Self(vdupq_n_s16(0)) }
    }

    #[inline(always)]
    unsafe fn splat_i16(value: i16) -> Self {
        unsafe { Self(vdupq_n_s16(value)) }
    }

    #[inline(always)]
    unsafe fn load_unaligned(data: *const i16) -> Self {
        unsafe { Self(vld1q_s16(data)) }
    }

    #[inline(always)]
    unsafe fn store_unaligned(self, data: *mut i16) {
        unsafe { vst1q_s16(data, self.0) }
    }

    #[inline(always)]
    unsafe fn adds_i16(self, other: Self) -> Self {
        unsafe { Self(vqaddq_s16(self.0, other.0)) }
    }

    #[inline(always)]
    unsafe fn subs_i16(self, other: Self) -> Self {
        unsafe { Self(vqsubq_s16(self.0, other.0)) }
    }

    #[inline(always)]
    unsafe fn max_i16(self, other: Self) -> Self {
        unsafe { Self(vmaxq_s16(self.0, other.0)) }
    }

    #[inline(always)]
    unsafe fn smax_i16(self) -> i16 {
        unsafe { vmaxvq_s16(self.0) }
    }

    #[inline(always)]
    unsafe fn any_gt_i16(self, other: Self) -> bool {
        unsafe { vmaxvq_u16(vcgtq_s16(self.0, other.0)) != 0 }
    }

    #[inline(always)]
    unsafe fn shift_right_padded_i16(self, other: Self) -> Self {
        unsafe { Self(vextq_s16::<7>(other.0, self.0)) }
    }
}
