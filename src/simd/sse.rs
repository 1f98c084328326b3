use std::arch::x86_64::*;

#[derive(Debug, Clone, Copy)]
pub struct SSEVector(pub(crate) __m128i);

/// Horizontal signed maximum of eight `i16` lanes. Uses shuffles rather than byte shifts so
/// that no zero lanes leak into the reduction.
#[inline(always)]
pub(super) unsafe fn hmax_epi16(v: __m128i) -> i16 {
    unsafe {
        let max = _mm_max_epi16(v, _mm_shuffle_epi32::<0b01_00_11_10>(v));
        let max = _mm_max_epi16(max, _mm_shuffle_epi32::<0b10_11_00_01>(max));
        let max = _mm_max_epi16(max, _mm_shufflelo_epi16::<0b10_11_00_01>(max));
        _mm_extract_epi16::<0>(max) as i16
    }
}

impl super::Vector for SSEVector {
    const LANES: usize = 8;

    #[inline]
    fn is_available() -> bool {
        raw_cpuid::CpuId::new()
            .get_feature_info()
            .is_some_and(|info| info.has_ssse3() && info.has_sse41())
    }

    #[inline(always)]
    unsafe fn zero() -> Self {
        unsafe { Self(_mm_setzero_si128()) }
    }

    #[inline(always)]
    unsafe fn splat_i16(value: i16) -> Self {
        unsafe { Self(_mm_set1_epi16(value)) }
    }

    #[inline(always)]
    unsafe fn load_unaligned(data: *const i16) -> Self {
        unsafe { Self(_mm_loadu_si128(data as *const __m128i)) }
    }

    #[inline(always)]
    unsafe fn store_unaligned(self, data: *mut i16) {
        unsafe { _mm_storeu_si128(data as *mut __m128i, self.0) }
    }

    #[inline(always)]
    unsafe fn adds_i16(self, other: Self) -> Self {
        unsafe { Self(_mm_adds_epi16(self.0, other.0)) }
    }

    #[inline(always)]
    unsafe fn subs_i16(self, other: Self) -> Self {
        unsafe { Self(_mm_subs_epi16(self.0, other.0)) }
    }

    #[inline(always)]
    unsafe fn max_i16(self, other: Self) -> Self {
        unsafe { Self(_mm_max_epi16(self.0, other.0)) }
    }

    #[inline(always)]
    unsafe fn smax_i16(self) -> i16 {
        unsafe { hmax_epi16(self.0) }
    }

    #[inline(always)]
    unsafe fn any_gt_i16(self, other: Self) -> bool {
        unsafe { _mm_movemask_epi8(_mm_cmpgt_epi16(self.0, other.0)) != 0 }
    }

    #[inline(always)]
    unsafe fn shift_right_padded_i16(self, other: Self) -> Self {
        unsafe { Self(_mm_alignr_epi8::<14>(self.0, other.0)) }
    }
}
